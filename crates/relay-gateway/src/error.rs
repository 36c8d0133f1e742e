use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::envelope::Envelope;

/// Everything that can terminate a broker request. Each failure is
/// terminal: it surfaces to the original caller as an error envelope
/// with no retry and no fallback between the log paths.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The inbound body did not decode as a broker request.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The action tag matched none of the known collaborators.
    #[error("unrecognized action \"{0}\"")]
    UnrecognizedAction(String),

    /// The outbound call failed at the transport level.
    #[error("downstream unreachable: {0}")]
    DownstreamUnreachable(reqwest::Error),

    /// The collaborator answered with a status outside its accepted set.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// The collaborator accepted the call but its body did not decode
    /// as an envelope.
    #[error("malformed downstream response: {0}")]
    MalformedResponse(reqwest::Error),

    /// Authentication refused: a 401 or an embedded error envelope.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The outbound payload could not be serialized. Propagated rather
    /// than sending an empty body.
    #[error("request encoding failed: {0}")]
    EncodingFailed(#[from] serde_json::Error),

    /// The queue did not accept the log entry.
    #[error("log publish failed: {0}")]
    QueuePublishFailed(#[from] relay_queue::PublishError),
}

impl BrokerError {
    /// HTTP status for the error class: 400 for bad input, 401 for
    /// credential failure, 500 for downstream trouble.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) | Self::UnrecognizedAction(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::DownstreamUnreachable(_)
            | Self::UnexpectedStatus(_)
            | Self::MalformedResponse(_)
            | Self::EncodingFailed(_)
            | Self::QueuePublishFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BrokerError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = %status, "request failed: {self}");
        (status, Json(Envelope::fail(self.to_string()))).into_response()
    }
}

/// Errors from the HTTP server itself, as opposed to a single request.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {0}: {1}")]
    Bind(String, std::io::Error),
    #[error("server error: {0}")]
    Server(String),
}
