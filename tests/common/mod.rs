//! Shared fixtures for terminology client tests.

use octofhir_terminology::{TerminologyClient, TerminologyClientConfig};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::MockServer;

#[allow(dead_code)]
pub const VALIDATE_CODE_PATH: &str = "/ValueSet/$validate-code";
#[allow(dead_code)]
pub const CLINICAL_FINDINGS: &str = "http://hl7.org/fhir/ValueSet/clinical-findings";
#[allow(dead_code)]
pub const SNOMED: &str = "http://snomed.info/sct";
#[allow(dead_code)]
pub const LOINC: &str = "http://loinc.org";

/// A `Parameters` body as returned by `$validate-code`.
#[allow(dead_code)]
pub fn parameters(result: bool, display: Option<&str>, message: Option<&str>) -> Value {
    let mut parameter = vec![json!({"name": "result", "valueBoolean": result})];
    if let Some(display) = display {
        parameter.push(json!({"name": "display", "valueString": display}));
    }
    if let Some(message) = message {
        parameter.push(json!({"name": "message", "valueString": message}));
    }

    json!({
        "resourceType": "Parameters",
        "parameter": parameter
    })
}

/// Client pointed at `server` with a short timeout.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> TerminologyClient {
    client_with(server, |config| config)
}

#[allow(dead_code)]
pub fn client_with(
    server: &MockServer,
    configure: impl FnOnce(TerminologyClientConfig) -> TerminologyClientConfig,
) -> TerminologyClient {
    let config =
        TerminologyClientConfig::new(server.uri()).with_timeout(Duration::from_secs(2));
    TerminologyClient::new(configure(config)).unwrap()
}
