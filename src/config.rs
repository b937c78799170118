use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout: 10 seconds
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Default cache TTL: 1 hour
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(3_600_000);

/// Default maximum number of cached outcomes
pub const DEFAULT_CACHE_SIZE: usize = 1000;

/// Settings for a [`TerminologyClient`](crate::TerminologyClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologyClientConfig {
    /// Base URL of the terminology server, e.g. `https://tx.fhir.org/r4`.
    pub base_url: String,
    /// Upper bound for a single `$validate-code` round trip.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
    /// How long a server answer stays in the cache.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: Duration,
    /// Maximum number of cached answers before LRU eviction.
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_cache_ttl() -> Duration {
    DEFAULT_CACHE_TTL
}

fn default_cache_size() -> usize {
    DEFAULT_CACHE_SIZE
}

impl TerminologyClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    /// The base URL with any trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TerminologyClientConfig::new("https://tx.fhir.org/r4");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.cache_size, 1000);
    }

    #[test]
    fn test_builders() {
        let config = TerminologyClientConfig::new("https://tx.fhir.org/r4")
            .with_timeout(Duration::from_millis(250))
            .with_cache_ttl(Duration::from_secs(60))
            .with_cache_size(10);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.cache_size, 10);
    }

    #[test]
    fn test_trailing_slash_normalized() {
        assert_eq!(
            TerminologyClientConfig::new("https://tx.fhir.org/r4/").normalized_base_url(),
            "https://tx.fhir.org/r4"
        );
        assert_eq!(
            TerminologyClientConfig::new("https://tx.fhir.org/r4//").normalized_base_url(),
            "https://tx.fhir.org/r4"
        );
        assert_eq!(
            TerminologyClientConfig::new("https://tx.fhir.org/r4").normalized_base_url(),
            "https://tx.fhir.org/r4"
        );
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: TerminologyClientConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost:8080/fhir"}"#).unwrap();
        assert_eq!(config, TerminologyClientConfig::new("http://localhost:8080/fhir"));
    }
}
