//! Asynchronous log delivery for the relay broker.
//!
//! Log entries accepted by the gateway are handed to a Kafka topic and
//! forgotten: the broker accepting the message is the only confirmation
//! the caller ever sees. Downstream processing is the log service's
//! problem.

mod entry;
mod error;
mod publisher;
mod sink;

pub use entry::LogEntry;
pub use error::PublishError;
pub use publisher::{LogPublisher, ROUTING_KEY};
pub use sink::LogSink;
