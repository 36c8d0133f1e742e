use serde::{Deserialize, Serialize};

/// Uniform response shape: what this broker returns to its caller and
/// what it expects back from the HTTP collaborators. A shared wire
/// contract, not just an internal type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Envelope {
    /// A success envelope with no data.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
            data: None,
        }
    }

    /// A failure envelope.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: None,
        }
    }

    /// Attach (or clear) the data field.
    #[must_use]
    pub fn with_data(mut self, data: Option<serde_json::Value>) -> Self {
        self.data = data;
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_round_trips_with_data() {
        let envelope = Envelope::ok("Authed!").with_data(Some(json!({"id": 7, "name": "ada"})));
        let json = serde_json::to_string(&envelope).unwrap();
        let back: Envelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);
        assert_eq!(back.data.unwrap()["name"], "ada");
    }

    #[test]
    fn failure_round_trips() {
        let envelope = Envelope::fail("invalid credentials");
        let json = serde_json::to_string(&envelope).unwrap();
        let back: Envelope = serde_json::from_str(&json).unwrap();
        assert!(back.error);
        assert_eq!(back.message, "invalid credentials");
        assert!(back.data.is_none());
    }

    #[test]
    fn data_omitted_when_absent() {
        let json = serde_json::to_string(&Envelope::ok("Logged!")).unwrap();
        assert!(!json.contains("data"));
    }

    #[test]
    fn decodes_collaborator_envelope_without_data() {
        let back: Envelope = serde_json::from_str(r#"{"error":false,"message":"sent to x"}"#).unwrap();
        assert!(!back.error);
        assert!(back.data.is_none());
    }
}
