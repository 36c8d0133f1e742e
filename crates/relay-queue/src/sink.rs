use std::future::Future;
use std::pin::Pin;

use crate::entry::LogEntry;
use crate::error::PublishError;

/// Destination for log entries leaving the gateway.
///
/// Object-safe so the gateway can hold an `Arc<dyn LogSink>` and tests
/// can substitute an in-memory double for the Kafka publisher.
pub trait LogSink: Send + Sync {
    fn publish(
        &self,
        entry: LogEntry,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + '_>>;
}
