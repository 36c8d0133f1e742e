use serde::{Deserialize, Serialize};

/// A single log-stream message: `{name, data}` on the wire.
///
/// The same shape arrives in the inbound broker request and leaves on
/// the queue, so both ends share this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    pub name: String,
    pub data: String,
}
