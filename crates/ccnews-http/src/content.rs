//! Response body classification.

use bytes::Bytes;
use ccnews_core::{ResponseContent, TransportError, TransportResult};

/// How a response body should be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Json,
    Bytes,
}

/// Map a `Content-Type` header value to a [`ContentKind`].
///
/// Parameters after `;` are ignored. A missing or unrecognised type is text.
pub fn classify_media_type(content_type: Option<&str>) -> ContentKind {
    let Some(raw) = content_type else {
        return ContentKind::Text;
    };
    let media = raw
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match media.as_str() {
        "application/json" => ContentKind::Json,
        "application/octet-stream"
        | "binary/octet-stream"
        | "application/gzip"
        | "application/x-gzip" => ContentKind::Bytes,
        _ => ContentKind::Text,
    }
}

/// Decode a fully read body according to its kind.
pub(crate) fn decode_body(kind: ContentKind, body: Bytes) -> TransportResult<ResponseContent> {
    match kind {
        ContentKind::Bytes => Ok(ResponseContent::Bytes(body)),
        ContentKind::Json => serde_json::from_slice(&body)
            .map(ResponseContent::Json)
            .map_err(|e| TransportError::Decode {
                message: format!("invalid JSON body: {e}"),
            }),
        ContentKind::Text => Ok(ResponseContent::Text(
            String::from_utf8_lossy(&body).into_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_types() {
        assert_eq!(classify_media_type(None), ContentKind::Text);
        assert_eq!(classify_media_type(Some("text/html")), ContentKind::Text);
        assert_eq!(
            classify_media_type(Some("text/html; charset=utf-8")),
            ContentKind::Text
        );
        assert_eq!(
            classify_media_type(Some("Application/JSON; charset=utf-8")),
            ContentKind::Json
        );
        assert_eq!(
            classify_media_type(Some("application/octet-stream")),
            ContentKind::Bytes
        );
        assert_eq!(
            classify_media_type(Some("binary/octet-stream")),
            ContentKind::Bytes
        );
        assert_eq!(
            classify_media_type(Some("application/x-gzip")),
            ContentKind::Bytes
        );
        assert_eq!(classify_media_type(Some("image/png")), ContentKind::Text);
    }

    #[test]
    fn test_decode_json() {
        let content = decode_body(ContentKind::Json, Bytes::from_static(br#"{"a":1}"#)).unwrap();
        assert_eq!(content, ResponseContent::Json(serde_json::json!({"a": 1})));

        let err = decode_body(ContentKind::Json, Bytes::from_static(b"{nope")).unwrap_err();
        assert!(matches!(err, TransportError::Decode { .. }));
    }

    #[test]
    fn test_decode_text_is_lossy() {
        let content = decode_body(ContentKind::Text, Bytes::from_static(b"caf\xff")).unwrap();
        assert_eq!(content, ResponseContent::Text("caf\u{fffd}".to_string()));
    }
}
