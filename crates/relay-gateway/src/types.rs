use relay_queue::LogEntry;
use serde::{Deserialize, Serialize};

/// The single inbound request shape. Only the sub-object matching
/// `action` is read; the others are ignored even when present, and an
/// absent sub-object decodes to its empty value and is forwarded
/// as-is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrokerRequest {
    pub action: String,
    pub auth: Credentials,
    pub log: LogEntry,
    pub mail: MailRequest,
}

/// Payload forwarded to the authentication collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload forwarded to the mail collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MailRequest {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub message: String,
}
