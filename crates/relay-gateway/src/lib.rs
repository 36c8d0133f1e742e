//! HTTP broker that fronts the authentication, logging, and mail
//! services behind a single JSON entry point.
//!
//! An inbound request names an action; the dispatcher forwards the
//! matching sub-object to exactly one downstream collaborator and
//! translates the outcome into the shared `{error, message, data}`
//! envelope.

mod downstream;
mod envelope;
mod error;
mod handlers;
mod router;
mod server;
mod types;

pub use downstream::{DownstreamClient, DownstreamTargets, default_client};
pub use envelope::Envelope;
pub use error::{BrokerError, ServerError};
pub use server::BrokerServer;
pub use types::{BrokerRequest, Credentials, MailRequest};
