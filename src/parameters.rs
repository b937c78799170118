//! Decoding of `$validate-code` responses.
//!
//! The operation answers with a FHIR `Parameters` resource. Only the `result`,
//! `message` and `display` parameters are read; any other parameter is ignored.

use serde::Deserialize;

use crate::error::{Result, TerminologyError};
use crate::types::ValidationOutcome;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    resource_type: Option<String>,
    #[serde(default)]
    parameter: Vec<Parameter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Parameter {
    #[serde(default)]
    name: String,
    value_boolean: Option<bool>,
    value_string: Option<String>,
}

/// The parts of a `$validate-code` answer the client cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateCodeResponse {
    pub result: bool,
    pub message: Option<String>,
    pub display: Option<String>,
}

impl From<ValidateCodeResponse> for ValidationOutcome {
    fn from(response: ValidateCodeResponse) -> Self {
        ValidationOutcome::validated(response.result, response.message, response.display)
    }
}

/// Parses a `Parameters` body.
///
/// Fails when the body is not JSON, is not a `Parameters` resource, or carries
/// no boolean `result` parameter.
pub fn parse_validate_code_response(body: &[u8]) -> Result<ValidateCodeResponse> {
    let parameters: Parameters = serde_json::from_slice(body)?;

    match parameters.resource_type.as_deref() {
        Some("Parameters") => {}
        Some(other) => {
            return Err(TerminologyError::protocol_error(format!(
                "Expected a Parameters resource, got {other}"
            )));
        }
        None => {
            return Err(TerminologyError::protocol_error(
                "Response has no resourceType",
            ));
        }
    }

    let mut result = None;
    let mut message = None;
    let mut display = None;

    for parameter in parameters.parameter {
        match parameter.name.as_str() {
            "result" => result = parameter.value_boolean,
            "message" => message = parameter.value_string,
            "display" => display = parameter.value_string,
            _ => {}
        }
    }

    let result = result.ok_or_else(|| {
        TerminologyError::protocol_error("Parameters response has no boolean 'result'")
    })?;

    Ok(ValidateCodeResponse {
        result,
        message,
        display,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<ValidateCodeResponse> {
        parse_validate_code_response(value.to_string().as_bytes())
    }

    #[test]
    fn test_parse_valid_with_display() {
        let response = parse(json!({
            "resourceType": "Parameters",
            "parameter": [
                {"name": "result", "valueBoolean": true},
                {"name": "display", "valueString": "Active"}
            ]
        }))
        .unwrap();

        assert_eq!(
            response,
            ValidateCodeResponse {
                result: true,
                message: None,
                display: Some("Active".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_rejection_with_message() {
        let response = parse(json!({
            "resourceType": "Parameters",
            "parameter": [
                {"name": "result", "valueBoolean": false},
                {"name": "message", "valueString": "Code 'X' not found in value set"}
            ]
        }))
        .unwrap();

        assert!(!response.result);
        assert_eq!(
            response.message.as_deref(),
            Some("Code 'X' not found in value set")
        );
    }

    #[test]
    fn test_unknown_parameters_ignored() {
        let response = parse(json!({
            "resourceType": "Parameters",
            "parameter": [
                {"name": "code", "valueCode": "123"},
                {"name": "system", "valueUri": "http://snomed.info/sct"},
                {"name": "issues", "resource": {"resourceType": "OperationOutcome"}},
                {"name": "result", "valueBoolean": true}
            ]
        }))
        .unwrap();

        assert!(response.result);
        assert_eq!(response.display, None);
    }

    #[test]
    fn test_wrong_resource_type_is_protocol_error() {
        let err = parse(json!({
            "resourceType": "OperationOutcome",
            "issue": [{"severity": "error", "code": "not-found"}]
        }))
        .unwrap_err();

        assert!(matches!(err, TerminologyError::Protocol { .. }));
        assert!(err.to_string().contains("OperationOutcome"));
    }

    #[test]
    fn test_missing_result_is_protocol_error() {
        let err = parse(json!({
            "resourceType": "Parameters",
            "parameter": [{"name": "display", "valueString": "Active"}]
        }))
        .unwrap_err();

        assert!(matches!(err, TerminologyError::Protocol { .. }));
    }

    #[test]
    fn test_non_json_body_is_serialization_error() {
        let err = parse_validate_code_response(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, TerminologyError::Serialization(_)));
    }

    #[test]
    fn test_into_outcome() {
        let outcome: ValidationOutcome = ValidateCodeResponse {
            result: false,
            message: Some("nope".to_string()),
            display: None,
        }
        .into();

        assert!(!outcome.is_valid());
        assert!(outcome.was_validated());
        assert_eq!(outcome.message(), Some("nope"));
    }
}
