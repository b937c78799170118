//! # OctoFHIR Terminology
//!
//! Validation of FHIR codes against remote terminology servers.
//!
//! Large code systems such as SNOMED CT, LOINC or RxNorm cannot be shipped with
//! the FHIR core packages. When a profile validator meets a code from one of
//! them it hands the code, its system and the bound ValueSet to this crate,
//! which asks a terminology server through `ValueSet/$validate-code`.
//!
//! ## Features
//!
//! - **Classification**: [`is_external_system`] tells which systems need a server
//! - **Caching**: answers are kept in a per-client LRU cache with a TTL
//! - **Bounded latency**: every round trip is cut off after a configured timeout
//! - **Fail-open**: an unreachable or misbehaving server never rejects a code
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use octofhir_terminology::*;
//!
//! # async fn example() -> Result<()> {
//! let client = TerminologyClient::new(TerminologyClientConfig::new("https://tx.fhir.org/r4"))?;
//!
//! let system = "http://loinc.org";
//! if is_external_system(system) {
//!     let request = ValidationRequest::new("http://hl7.org/fhir/ValueSet/observation-codes", "8480-6")
//!         .with_system(system);
//!     let outcome = client.validate(&request).await;
//!     println!("valid: {}, confirmed: {}", outcome.is_valid(), outcome.was_validated());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod parameters;
pub mod service;
pub mod types;

pub use cache::OutcomeCache;
pub use classifier::{EXTERNAL_SYSTEM_PREFIXES, is_external_system};
pub use client::{FHIR_JSON, TerminologyClient};
pub use config::{DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL, DEFAULT_TIMEOUT, TerminologyClientConfig};
pub use error::{Result, TerminologyError};
pub use parameters::{ValidateCodeResponse, parse_validate_code_response};
pub use service::{InMemoryTerminologyService, RoutingTerminologyService, TerminologyService};
pub use types::{CacheStats, ValidationOutcome, ValidationRequest};
