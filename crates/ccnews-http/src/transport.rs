//! `reqwest`-backed implementation of the transport port.

use std::time::Duration;

use async_trait::async_trait;
use ccnews_core::{
    HttpMethod, HttpRequest, HttpSettings, HttpTransport, ResponseContent, StreamedResponse,
    TransportError, TransportResult,
};
use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};

use crate::chunking::rechunk;
use crate::content::{classify_media_type, decode_body};
use crate::retry::{RetryBudget, parse_retry_after, retry_delay};

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Production transport using reqwest with retry logic.
///
/// Retries configured statuses and connection failures with exponential
/// backoff, for allowed methods only. Anything left over is classified into
/// a [`TransportError`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    settings: HttpSettings,
}

impl ReqwestTransport {
    /// Create a transport from HTTP settings.
    pub fn new(settings: HttpSettings) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| TransportError::connection(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, settings })
    }

    pub const fn settings(&self) -> &HttpSettings {
        &self.settings
    }

    fn build_request(&self, request: &HttpRequest) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    /// Send a request, retrying transient failures.
    ///
    /// Returns only successful responses; error statuses are classified.
    async fn send_with_retry(&self, request: &HttpRequest) -> TransportResult<reqwest::Response> {
        let mut budget = RetryBudget::for_method(&self.settings, request.method);

        loop {
            match self.build_request(request).send().await {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_client_error() && !status.is_server_error() {
                        return Ok(response);
                    }

                    if self.settings.is_retry_status(status.as_u16()) {
                        if let Some(attempt) = budget.take() {
                            let delay =
                                retry_delay(&self.settings, attempt, header_retry_after(&response));
                            tracing::warn!(
                                url = %request.url,
                                status = status.as_u16(),
                                attempt,
                                delay_ms = delay_millis(delay),
                                "Retryable HTTP status, backing off"
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                    }

                    return Err(classify_error_response(response).await);
                }
                Err(e) => {
                    if is_transient(&e) {
                        if let Some(attempt) = budget.take() {
                            let delay = retry_delay(&self.settings, attempt, None);
                            tracing::warn!(
                                url = %request.url,
                                attempt,
                                delay_ms = delay_millis(delay),
                                error = %e,
                                "Connection failure, backing off"
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                    }

                    return Err(TransportError::connection(e.to_string()));
                }
            }
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(&self, request: &HttpRequest) -> TransportResult<ResponseContent> {
        let response = self.send_with_retry(request).await?;
        let kind = classify_media_type(content_type(&response).as_deref());
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::connection(format!("failed to read body: {e}")))?;

        tracing::debug!(url = %request.url, bytes = body.len(), "HTTP response read");
        decode_body(kind, body)
    }

    async fn stream(&self, request: &HttpRequest) -> TransportResult<StreamedResponse> {
        let response = self.send_with_retry(request).await?;
        let content_length = response.content_length().unwrap_or(0);

        let raw = response.bytes_stream().map(|item| {
            item.map_err(|e| TransportError::connection(format!("stream interrupted: {e}")))
        });

        Ok(StreamedResponse {
            content_length,
            chunks: rechunk(raw, self.settings.chunk_size).boxed(),
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

const fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Options => reqwest::Method::OPTIONS,
        HttpMethod::Trace => reqwest::Method::TRACE,
    }
}

/// Connect failures, timeouts and send errors are worth another try.
fn is_transient(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout() || error.is_request()
}

fn content_type(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn header_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_retry_after)
}

fn delay_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// Turn a 4xx/5xx response into a client or server error.
async fn classify_error_response(response: reqwest::Response) -> TransportError {
    let status = response.status();
    let kind = classify_media_type(content_type(&response).as_deref());
    let message = status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string);

    // Body is informational only; an unreadable or undecodable body is dropped
    let body = match response.bytes().await {
        Ok(bytes) if !bytes.is_empty() => decode_body(kind, bytes).ok(),
        _ => None,
    };

    TransportError::from_status(status.as_u16(), body, message)
}
