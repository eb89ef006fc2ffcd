//! Runtime settings and validation.
//!
//! Settings are plain data with defaults. `from_env` overlays `CCNEWS_*`
//! environment variables; the CLI loads a `.env` file first.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ports::HttpMethod;

/// Default catalog base URL.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://data.commoncrawl.org/crawl-data/CC-NEWS";

/// Statuses retried by default.
pub const DEFAULT_RETRY_STATUSES: [u16; 5] = [413, 429, 502, 503, 504];

/// Default number of files ingested at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 3;

// ============================================================================
// Sections
// ============================================================================

/// Transport behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Base of the exponential backoff, in seconds.
    pub backoff_factor: f64,
    /// Upper bound on a single backoff delay, in seconds.
    pub max_backoff: f64,
    pub retry_statuses: Vec<u16>,
    pub retry_methods: Vec<HttpMethod>,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
    /// Size of chunks handed out by streamed responses.
    pub chunk_size: usize,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 0.5,
            max_backoff: 30.0,
            retry_statuses: DEFAULT_RETRY_STATUSES.to_vec(),
            retry_methods: vec![
                HttpMethod::Get,
                HttpMethod::Head,
                HttpMethod::Put,
                HttpMethod::Delete,
                HttpMethod::Options,
                HttpMethod::Trace,
            ],
            timeout_secs: 60,
            chunk_size: 64 * 1024,
            user_agent: concat!("ccnews/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpSettings {
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    #[must_use]
    pub const fn with_backoff(mut self, factor: f64, max: f64) -> Self {
        self.backoff_factor = factor;
        self.max_backoff = max;
        self
    }

    #[must_use]
    pub fn with_retry_statuses(mut self, statuses: impl Into<Vec<u16>>) -> Self {
        self.retry_statuses = statuses.into();
        self
    }

    #[must_use]
    pub fn with_retry_methods(mut self, methods: impl Into<Vec<HttpMethod>>) -> Self {
        self.retry_methods = methods.into();
        self
    }

    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub const fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Delay before retry number `attempt` (1-based).
    ///
    /// `min(backoff_factor * 2^(attempt - 1), max_backoff)`.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let secs = (self.backoff_factor * 2f64.powi(exponent)).min(self.max_backoff);
        Duration::from_secs_f64(secs.max(0.0))
    }

    pub fn is_retry_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    pub fn is_retry_method(&self, method: HttpMethod) -> bool {
        self.retry_methods.contains(&method)
    }
}

/// Where catalogs and capture files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub base_url: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
        }
    }
}

impl CatalogSettings {
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Ingestion run behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlSettings {
    /// Files ingested at once.
    pub max_concurrency: usize,
    /// Rows shown by the catalog table.
    pub table_length: usize,
}

impl Default for EtlSettings {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            table_length: 10,
        }
    }
}

impl EtlSettings {
    #[must_use]
    pub const fn with_max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n;
        self
    }
}

// ============================================================================
// Settings
// ============================================================================

/// All runtime settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub http: HttpSettings,
    pub catalog: CatalogSettings,
    pub etl: EtlSettings,
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Max concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("Chunk size must be at least 1 byte")]
    InvalidChunkSize,

    #[error("Table length must be at least 1")]
    InvalidTableLength,

    #[error("Backoff factor must be a finite, non-negative number of seconds")]
    InvalidBackoff,

    #[error("Max backoff must be finite and at least the backoff factor")]
    InvalidMaxBackoff,

    #[error("Retry status {0} is not an HTTP status code")]
    InvalidRetryStatus(u16),

    #[error("Catalog base URL must not be empty")]
    EmptyBaseUrl,
}

impl Settings {
    /// Defaults overlaid with `CCNEWS_*` environment variables.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`, keyed by env var name.
    ///
    /// Empty values are treated as unset. The result is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut settings = Self::default();

        if let Some(v) = get("CCNEWS_HTTP_MAX_RETRIES") {
            settings.http.max_retries = parse_value("CCNEWS_HTTP_MAX_RETRIES", &v)?;
        }
        if let Some(v) = get("CCNEWS_HTTP_BACKOFF_FACTOR") {
            settings.http.backoff_factor = parse_value("CCNEWS_HTTP_BACKOFF_FACTOR", &v)?;
        }
        if let Some(v) = get("CCNEWS_HTTP_MAX_BACKOFF") {
            settings.http.max_backoff = parse_value("CCNEWS_HTTP_MAX_BACKOFF", &v)?;
        }
        if let Some(v) = get("CCNEWS_HTTP_RETRY_STATUSES") {
            settings.http.retry_statuses = v
                .split(',')
                .map(|s| parse_value("CCNEWS_HTTP_RETRY_STATUSES", s.trim()))
                .collect::<Result<_, _>>()?;
        }
        if let Some(v) = get("CCNEWS_HTTP_RETRY_METHODS") {
            settings.http.retry_methods = v
                .split(',')
                .map(|s| {
                    HttpMethod::parse(s).ok_or_else(|| SettingsError::InvalidValue {
                        key: "CCNEWS_HTTP_RETRY_METHODS".to_string(),
                        value: s.trim().to_string(),
                    })
                })
                .collect::<Result<_, _>>()?;
        }
        if let Some(v) = get("CCNEWS_HTTP_TIMEOUT") {
            settings.http.timeout_secs = parse_value("CCNEWS_HTTP_TIMEOUT", &v)?;
        }
        if let Some(v) = get("CCNEWS_HTTP_CHUNK_SIZE") {
            settings.http.chunk_size = parse_value("CCNEWS_HTTP_CHUNK_SIZE", &v)?;
        }
        if let Some(v) = get("CCNEWS_HTTP_USER_AGENT") {
            settings.http.user_agent = v;
        }
        if let Some(v) = get("CCNEWS_CATALOG_BASE_URL") {
            settings.catalog.base_url = v;
        }
        if let Some(v) = get("CCNEWS_ETL_MAX_CONCURRENCY") {
            settings.etl.max_concurrency = parse_value("CCNEWS_ETL_MAX_CONCURRENCY", &v)?;
        }
        if let Some(v) = get("CCNEWS_ETL_TABLE_LENGTH") {
            settings.etl.table_length = parse_value("CCNEWS_ETL_TABLE_LENGTH", &v)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field and range constraints.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let http = &self.http;
        if !http.backoff_factor.is_finite() || http.backoff_factor < 0.0 {
            return Err(SettingsError::InvalidBackoff);
        }
        if !http.max_backoff.is_finite() || http.max_backoff < http.backoff_factor {
            return Err(SettingsError::InvalidMaxBackoff);
        }
        if http.chunk_size == 0 {
            return Err(SettingsError::InvalidChunkSize);
        }
        if let Some(&status) = http
            .retry_statuses
            .iter()
            .find(|s| !(100..=599).contains(*s))
        {
            return Err(SettingsError::InvalidRetryStatus(status));
        }
        if self.catalog.base_url.trim().is_empty() {
            return Err(SettingsError::EmptyBaseUrl);
        }
        if self.etl.max_concurrency == 0 {
            return Err(SettingsError::InvalidConcurrency);
        }
        if self.etl.table_length == 0 {
            return Err(SettingsError::InvalidTableLength);
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value.parse().map_err(|_| SettingsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.http.max_retries, 3);
        assert_eq!(settings.http.retry_statuses, vec![413, 429, 502, 503, 504]);
        assert_eq!(settings.etl.max_concurrency, 3);
        assert_eq!(settings.catalog.base_url, DEFAULT_CATALOG_BASE_URL);
        assert!(settings.http.user_agent.starts_with("ccnews/"));
        assert!(!settings.http.is_retry_method(HttpMethod::Post));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let http = HttpSettings::default().with_backoff(0.5, 3.0);
        assert_eq!(http.backoff_delay(1), Duration::from_millis(500));
        assert_eq!(http.backoff_delay(2), Duration::from_secs(1));
        assert_eq!(http.backoff_delay(3), Duration::from_secs(2));
        assert_eq!(http.backoff_delay(4), Duration::from_secs(3));
        assert_eq!(http.backoff_delay(40), Duration::from_secs(3));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("CCNEWS_HTTP_MAX_RETRIES", "5"),
            ("CCNEWS_HTTP_RETRY_STATUSES", "500, 503"),
            ("CCNEWS_HTTP_RETRY_METHODS", "get,post"),
            ("CCNEWS_CATALOG_BASE_URL", "http://localhost:9000/cc"),
            ("CCNEWS_ETL_MAX_CONCURRENCY", "8"),
            ("CCNEWS_HTTP_USER_AGENT", ""),
        ]))
        .unwrap();

        assert_eq!(settings.http.max_retries, 5);
        assert_eq!(settings.http.retry_statuses, vec![500, 503]);
        assert_eq!(
            settings.http.retry_methods,
            vec![HttpMethod::Get, HttpMethod::Post]
        );
        assert_eq!(settings.catalog.base_url, "http://localhost:9000/cc");
        assert_eq!(settings.etl.max_concurrency, 8);
        // Empty values fall back to defaults
        assert!(settings.http.user_agent.starts_with("ccnews/"));
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = Settings::from_lookup(lookup(&[("CCNEWS_HTTP_TIMEOUT", "soon")])).unwrap_err();
        assert_eq!(
            err,
            SettingsError::InvalidValue {
                key: "CCNEWS_HTTP_TIMEOUT".to_string(),
                value: "soon".to_string(),
            }
        );

        let err =
            Settings::from_lookup(lookup(&[("CCNEWS_HTTP_RETRY_METHODS", "GET,FETCH")])).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn test_validate_ranges() {
        let mut settings = Settings::default();
        settings.etl.max_concurrency = 0;
        assert_eq!(settings.validate(), Err(SettingsError::InvalidConcurrency));

        let mut settings = Settings::default();
        settings.http = settings.http.with_chunk_size(0);
        assert_eq!(settings.validate(), Err(SettingsError::InvalidChunkSize));

        let mut settings = Settings::default();
        settings.http = settings.http.with_backoff(2.0, 1.0);
        assert_eq!(settings.validate(), Err(SettingsError::InvalidMaxBackoff));

        let mut settings = Settings::default();
        settings.http.retry_statuses.push(42);
        assert_eq!(settings.validate(), Err(SettingsError::InvalidRetryStatus(42)));
    }
}
