//! Error types for relay-queue.

/// Errors that can occur while handing a log entry to the queue.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The Kafka client rejected the message or the broker was unreachable.
    #[error("queue publish failed: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// The entry could not be serialized to JSON.
    #[error("log entry serialization failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// A non-Kafka sink refused the entry.
    #[error("log sink failure: {0}")]
    Sink(String),
}
