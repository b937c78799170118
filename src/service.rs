//! The seam between profile validation and terminology lookups.
//!
//! A validator that needs to check a coded element depends on
//! [`TerminologyService`] only. Three implementations are provided:
//!
//! - [`TerminologyClient`] asks a remote terminology server
//! - [`InMemoryTerminologyService`] answers from locally bundled value sets
//! - [`RoutingTerminologyService`] sends codes from large external code systems
//!   (see [`is_external_system`]) to a remote service and everything else to a
//!   local one
//!
//! # Example
//!
//! ```rust,no_run
//! use octofhir_terminology::{
//!     InMemoryTerminologyService, RoutingTerminologyService, TerminologyClient,
//!     TerminologyClientConfig,
//! };
//! use std::sync::Arc;
//!
//! # fn example() -> octofhir_terminology::Result<()> {
//! let mut local = InMemoryTerminologyService::new();
//! local.add_code(
//!     "http://hl7.org/fhir/ValueSet/administrative-gender",
//!     "female",
//!     Some("http://hl7.org/fhir/administrative-gender"),
//!     Some("Female"),
//! );
//!
//! let remote = TerminologyClient::new(TerminologyClientConfig::new("https://tx.fhir.org/r4"))?;
//! let service = RoutingTerminologyService::new(Arc::new(local), Arc::new(remote));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::classifier::is_external_system;
use crate::client::TerminologyClient;
use crate::types::{ValidationOutcome, ValidationRequest};

/// Anything that can decide whether a code belongs to a ValueSet.
///
/// Implementations do not return errors. When an answer cannot be obtained
/// they return [`ValidationOutcome::fallback`].
#[async_trait]
pub trait TerminologyService: Send + Sync {
    async fn validate(&self, request: &ValidationRequest) -> ValidationOutcome;
}

#[async_trait]
impl TerminologyService for TerminologyClient {
    async fn validate(&self, request: &ValidationRequest) -> ValidationOutcome {
        TerminologyClient::validate(self, request).await
    }
}

/// Type alias for code map: (code, system) -> display
type CodeMap = HashMap<(String, Option<String>), Option<String>>;

/// Terminology service backed by value sets held in memory.
///
/// Useful for small, locally bundled value sets and in tests. A request for a
/// value set that was never registered cannot be verified and yields a
/// fallback outcome.
#[derive(Debug, Default)]
pub struct InMemoryTerminologyService {
    value_sets: HashMap<String, CodeMap>,
}

impl InMemoryTerminologyService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code to a value set
    pub fn add_code(
        &mut self,
        value_set_url: &str,
        code: &str,
        system: Option<&str>,
        display: Option<&str>,
    ) {
        self.value_sets
            .entry(value_set_url.to_string())
            .or_default()
            .insert(
                (code.to_string(), system.map(str::to_string)),
                display.map(str::to_string),
            );
    }

    /// Add multiple codes to a value set
    pub fn add_codes(&mut self, value_set_url: &str, codes: &[(&str, Option<&str>)]) {
        for (code, system) in codes {
            self.add_code(value_set_url, code, *system, None);
        }
    }

    pub fn contains_value_set(&self, value_set_url: &str) -> bool {
        self.value_sets.contains_key(value_set_url)
    }
}

fn lookup<'a>(codes: &'a CodeMap, request: &ValidationRequest) -> Option<&'a Option<String>> {
    let key = (request.code.clone(), request.system.clone());
    if let Some(display) = codes.get(&key) {
        return Some(display);
    }

    match request.system {
        // Coding without a system matches the code under any system
        None => codes
            .iter()
            .find(|((code, _), _)| code == &request.code)
            .map(|(_, display)| display),
        // Codes registered without a system match any requested system
        Some(_) => codes.get(&(request.code.clone(), None)),
    }
}

#[async_trait]
impl TerminologyService for InMemoryTerminologyService {
    async fn validate(&self, request: &ValidationRequest) -> ValidationOutcome {
        let Some(codes) = self.value_sets.get(&request.value_set_url) else {
            return ValidationOutcome::fallback(format!(
                "Value set '{}' is not available locally",
                request.value_set_url
            ));
        };

        let Some(known_display) = lookup(codes, request) else {
            return ValidationOutcome::validated(
                false,
                Some(format!(
                    "Code '{}' (system: {}) is not in value set '{}'",
                    request.code,
                    request.system.as_deref().unwrap_or("none"),
                    request.value_set_url
                )),
                None,
            );
        };

        let message = match (request.display.as_deref(), known_display.as_deref()) {
            (Some(given), Some(expected)) if given != expected => Some(format!(
                "Display '{given}' does not match expected '{expected}'"
            )),
            _ => None,
        };

        ValidationOutcome::validated(true, message, known_display.clone())
    }
}

/// Routes requests by code system.
///
/// Requests whose `system` is an external terminology go to `remote`; requests
/// with a local system or no system at all go to `local`.
pub struct RoutingTerminologyService {
    local: Arc<dyn TerminologyService>,
    remote: Arc<dyn TerminologyService>,
}

impl RoutingTerminologyService {
    pub fn new(local: Arc<dyn TerminologyService>, remote: Arc<dyn TerminologyService>) -> Self {
        Self { local, remote }
    }

    /// Whether `request` would be sent to the remote service.
    pub fn is_remote(request: &ValidationRequest) -> bool {
        request.system.as_deref().is_some_and(is_external_system)
    }
}

#[async_trait]
impl TerminologyService for RoutingTerminologyService {
    async fn validate(&self, request: &ValidationRequest) -> ValidationOutcome {
        if Self::is_remote(request) {
            tracing::trace!("Routing {} to remote terminology", request.cache_key());
            self.remote.validate(request).await
        } else {
            tracing::trace!("Routing {} to local terminology", request.cache_key());
            self.local.validate(request).await
        }
    }
}

impl std::fmt::Debug for RoutingTerminologyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingTerminologyService")
            .finish_non_exhaustive()
    }
}
