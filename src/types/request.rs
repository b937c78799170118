use serde::{Deserialize, Serialize};

/// A single code to check against a ValueSet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    pub code: String,
    pub system: Option<String>,
    pub value_set_url: String,
    /// Human-readable label the server may check as a secondary condition.
    pub display: Option<String>,
}

impl ValidationRequest {
    pub fn new(value_set_url: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            system: None,
            value_set_url: value_set_url.into(),
            display: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Key identifying this request in the outcome cache.
    ///
    /// The value set, system and code are joined with `|` in that order. The
    /// delimiter is not escaped.
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.value_set_url,
            self.system.as_deref().unwrap_or(""),
            self.code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_layout() {
        let request = ValidationRequest::new("http://example.org/vs", "A")
            .with_system("http://snomed.info/sct");
        assert_eq!(
            request.cache_key(),
            "http://example.org/vs|http://snomed.info/sct|A"
        );

        let without_system = ValidationRequest::new("http://example.org/vs", "A");
        assert_eq!(without_system.cache_key(), "http://example.org/vs||A");
    }

    #[test]
    fn test_display_does_not_affect_cache_key() {
        let plain = ValidationRequest::new("vs1", "A").with_system("sys1");
        let labelled = plain.clone().with_display("Alpha");
        assert_eq!(plain.cache_key(), labelled.cache_key());
    }

    #[test]
    fn test_distinct_systems_produce_distinct_keys() {
        let a = ValidationRequest::new("vs1", "A").with_system("sys1");
        let b = ValidationRequest::new("vs1", "A").with_system("sys2");
        assert_ne!(a.cache_key(), b.cache_key());
    }
}
