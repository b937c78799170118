use serde::Serialize;

/// Result of resolving a [`ValidationRequest`](super::ValidationRequest).
///
/// An outcome is either *validated* (the terminology server answered) or a
/// *fallback* produced when no answer could be obtained. Fallback outcomes are
/// always valid, so an unreachable server never rejects data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display: Option<String>,
    was_validated: bool,
}

impl ValidationOutcome {
    /// An answer reported by a terminology server.
    pub fn validated(is_valid: bool, message: Option<String>, display: Option<String>) -> Self {
        Self {
            is_valid,
            message,
            display,
            was_validated: true,
        }
    }

    /// An assumed-valid outcome for when the server could not be consulted.
    pub fn fallback(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: Some(message.into()),
            display: None,
            was_validated: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// `true` only if a terminology server actually produced this answer.
    pub fn was_validated(&self) -> bool {
        self.was_validated
    }
}
