use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_queue::LogEntry;

use crate::envelope::Envelope;
use crate::error::BrokerError;
use crate::server::AppState;
use crate::types::{BrokerRequest, Credentials, MailRequest};

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
}

/// The action dispatcher: exactly one collaborator call per request,
/// selected by exact match on the action tag. The selected handler owns
/// the response; the dispatcher only writes the error path.
pub(crate) async fn handle_submission(
    State(state): State<AppState>,
    payload: Result<Json<BrokerRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return BrokerError::MalformedRequest(rejection.body_text()).into_response();
        }
    };

    tracing::debug!(action = %request.action, "dispatching");
    let result = match request.action.as_str() {
        "auth" => authenticate(&state, &request.auth).await,
        "log" => log_via_queue(&state, request.log).await,
        "mail" => send_mail(&state, &request.mail).await,
        _ => Err(BrokerError::UnrecognizedAction(request.action.clone())),
    };

    match result {
        Ok(envelope) => (StatusCode::ACCEPTED, Json(envelope)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn authenticate(state: &AppState, credentials: &Credentials) -> Result<Envelope, BrokerError> {
    let downstream = state.client.authenticate(credentials).await?;
    Ok(Envelope::ok("Authed!").with_data(downstream.data))
}

/// Queue variant of the log path: success means the message broker
/// accepted the entry, not that the log service processed it. The
/// synchronous variant with the stronger guarantee is
/// [`crate::DownstreamClient::log`].
async fn log_via_queue(state: &AppState, entry: LogEntry) -> Result<Envelope, BrokerError> {
    state.log_sink.publish(entry).await?;
    Ok(Envelope::ok("Logged via queue"))
}

async fn send_mail(state: &AppState, mail: &MailRequest) -> Result<Envelope, BrokerError> {
    let recipient = mail.to.clone();
    state.client.send_mail(mail).await?;
    Ok(Envelope::ok(format!("Sent! {recipient}")))
}

pub(crate) async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}
