//! Remote `$validate-code` client.
//!
//! [`TerminologyClient`] answers each [`ValidationRequest`] from its own LRU
//! cache when possible and otherwise calls `ValueSet/$validate-code` on the
//! configured terminology server.
//!
//! # Failure policy
//!
//! The client is fail-open. A timeout, connection error, non-2xx status or a
//! response that is not a usable `Parameters` resource produces a fallback
//! outcome (`is_valid == true`, `was_validated == false`). Fallback outcomes
//! are never cached, so the next identical request contacts the server again.
//! Only a completed answer from the server, valid or not, is cached.
//!
//! # Example
//!
//! ```rust,no_run
//! use octofhir_terminology::{TerminologyClient, TerminologyClientConfig, ValidationRequest};
//! use std::time::Duration;
//!
//! # async fn example() -> octofhir_terminology::Result<()> {
//! let client = TerminologyClient::new(
//!     TerminologyClientConfig::new("https://tx.fhir.org/r4").with_timeout(Duration::from_secs(5)),
//! )?;
//!
//! let request = ValidationRequest::new("http://hl7.org/fhir/ValueSet/clinical-findings", "22298006")
//!     .with_system("http://snomed.info/sct");
//!
//! let outcome = client.validate(&request).await;
//! if !outcome.was_validated() {
//!     println!("server unavailable: {:?}", outcome.message());
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::header::ACCEPT;
use url::Url;

use crate::cache::OutcomeCache;
use crate::config::TerminologyClientConfig;
use crate::error::{Result, TerminologyError};
use crate::parameters::parse_validate_code_response;
use crate::types::{CacheStats, ValidationOutcome, ValidationRequest};

/// Media type requested from the terminology server.
pub const FHIR_JSON: &str = "application/fhir+json";

/// Client for a single terminology server.
///
/// Each client owns its cache; two clients never share entries, even when
/// pointed at the same server.
pub struct TerminologyClient {
    http_client: reqwest::Client,
    base_url: String,
    endpoint: Url,
    timeout: Duration,
    cache: OutcomeCache,
}

impl TerminologyClient {
    /// Creates a client for `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute `http`/`https` URL,
    /// the cache size is zero, or the HTTP client cannot be built.
    pub fn new(config: TerminologyClientConfig) -> Result<Self> {
        let base_url = config.normalized_base_url().to_string();
        let endpoint = Url::parse(&format!("{base_url}/ValueSet/$validate-code"))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TerminologyError::configuration_error(format!(
                "Unsupported terminology server scheme '{}'",
                endpoint.scheme()
            )));
        }

        let cache = OutcomeCache::new(config.cache_size, config.cache_ttl)?;
        let http_client = reqwest::Client::builder().build()?;

        tracing::debug!(
            "Created terminology client for {} (timeout {:?}, cache {} entries / {:?})",
            base_url,
            config.timeout,
            config.cache_size,
            config.cache_ttl
        );

        Ok(Self {
            http_client,
            base_url,
            endpoint,
            timeout: config.timeout,
            cache,
        })
    }

    /// Base URL of the server, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validates a code against a ValueSet.
    ///
    /// Never fails: when the server cannot be consulted the returned outcome
    /// is valid with `was_validated() == false` and a message naming the cause.
    pub async fn validate(&self, request: &ValidationRequest) -> ValidationOutcome {
        let key = request.cache_key();

        if let Some(outcome) = self.cache.get(&key) {
            tracing::trace!("Cache hit for terminology lookup: {}", key);
            return outcome;
        }

        tracing::debug!("Cache miss for terminology lookup: {}", key);

        match self.fetch_with_timeout(request).await {
            Ok(outcome) => {
                tracing::debug!(
                    "Terminology server answered {} for {}",
                    outcome.is_valid(),
                    key
                );
                self.cache.insert(key, outcome.clone());
                outcome
            }
            Err(err) => {
                tracing::warn!(
                    code = %request.code,
                    system = request.system.as_deref().unwrap_or(""),
                    value_set = %request.value_set_url,
                    error = %err,
                    "Terminology validation unavailable, assuming code is valid"
                );
                ValidationOutcome::fallback(format!("Terminology validation not performed: {err}"))
            }
        }
    }

    /// Drops every cached outcome.
    pub fn clear_cache(&self) {
        self.cache.clear();
        tracing::debug!("Cleared terminology cache for {}", self.base_url);
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    async fn fetch_with_timeout(&self, request: &ValidationRequest) -> Result<ValidationOutcome> {
        // Dropping the fetch future on timeout aborts the in-flight request
        match tokio::time::timeout(self.timeout, self.fetch(request)).await {
            Ok(result) => result,
            Err(_) => Err(TerminologyError::Timeout {
                timeout: self.timeout,
            }),
        }
    }

    async fn fetch(&self, request: &ValidationRequest) -> Result<ValidationOutcome> {
        let mut query = vec![
            ("url", request.value_set_url.as_str()),
            ("code", request.code.as_str()),
        ];
        if let Some(system) = request.system.as_deref() {
            query.push(("system", system));
        }
        if let Some(display) = request.display.as_deref() {
            query.push(("display", display));
        }

        let response = self
            .http_client
            .get(self.endpoint.clone())
            .header(ACCEPT, FHIR_JSON)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TerminologyError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let response = parse_validate_code_response(&body)?;

        Ok(response.into())
    }
}

impl std::fmt::Debug for TerminologyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminologyClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
