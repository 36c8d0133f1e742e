use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use rdkafka::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;

use crate::entry::LogEntry;
use crate::error::PublishError;
use crate::sink::LogSink;

/// Fixed key for every published entry: the log stream carries only
/// informational-severity records from this broker.
pub const ROUTING_KEY: &str = "log.INFO";

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Kafka producer for the log stream.
///
/// The underlying producer connects lazily and is safe to share across
/// request tasks, so one instance serves the whole process.
pub struct LogPublisher {
    producer: FutureProducer,
    topic: String,
}

impl LogPublisher {
    /// Create a producer for `topic` on the given broker list.
    ///
    /// The connection itself is established on first send; this only
    /// fails if the client configuration is rejected.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Kafka` if the producer cannot be built.
    pub fn connect(brokers: &str, topic: impl Into<String>) -> Result<Self, PublishError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .set("socket.timeout.ms", "5000")
            .create()?;

        Ok(Self {
            producer,
            topic: topic.into(),
        })
    }

    /// Serialize `entry` and hand it to the broker.
    ///
    /// Waits only for the broker to accept the message, bounded by a
    /// short timeout. A failure is terminal: no retry, no buffering.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Encode` if the entry cannot be serialized
    /// and `PublishError::Kafka` if the broker does not accept it.
    pub async fn send(&self, entry: &LogEntry) -> Result<(), PublishError> {
        let payload = serde_json::to_vec(entry)?;
        let record = FutureRecord::to(&self.topic)
            .key(ROUTING_KEY)
            .payload(&payload);

        match self
            .producer
            .send(record, Timeout::After(DELIVERY_TIMEOUT))
            .await
        {
            Ok((partition, offset)) => {
                tracing::debug!(partition, offset, name = %entry.name, "log entry published");
                Ok(())
            }
            Err((e, _)) => {
                tracing::error!(error = %e, topic = %self.topic, "log publish failed");
                Err(PublishError::Kafka(e))
            }
        }
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl LogSink for LogPublisher {
    fn publish(
        &self,
        entry: LogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>> {
        Box::pin(async move { self.send(&entry).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publisher_builds_without_broker() {
        let publisher = LogPublisher::connect("localhost:9092", "logs").unwrap();
        assert_eq!(publisher.topic(), "logs");
    }

    #[test]
    fn routing_key_is_informational() {
        assert_eq!(ROUTING_KEY, "log.INFO");
    }
}
