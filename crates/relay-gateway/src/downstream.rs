use std::time::Duration;

use relay_queue::LogEntry;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::envelope::Envelope;
use crate::error::BrokerError;
use crate::types::{Credentials, MailRequest};

/// Target URLs for the three HTTP collaborators.
#[derive(Debug, Clone)]
pub struct DownstreamTargets {
    pub auth: String,
    pub log: String,
    pub mail: String,
}

impl Default for DownstreamTargets {
    fn default() -> Self {
        Self {
            auth: "http://authentication-service/authenticate".into(),
            log: "http://logger-service/log".into(),
            mail: "http://mail-service/send".into(),
        }
    }
}

/// Create the shared outbound HTTP client with the broker's standard
/// timeouts. One instance serves the whole process; per-call transport
/// setup is avoided by injecting this into [`DownstreamClient`].
///
/// # Panics
///
/// Panics if the TLS backend cannot be initialized (should never happen
/// with rustls).
#[must_use]
pub fn default_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("relay/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("default HTTP client construction must not fail")
}

/// One outbound call per method, all through the same skeleton:
/// serialize, POST as JSON, check the status the collaborator promises.
/// Only authentication decodes the response body; the others treat a
/// 202 as the whole answer.
pub struct DownstreamClient {
    client: reqwest::Client,
    targets: DownstreamTargets,
}

impl DownstreamClient {
    #[must_use]
    pub fn new(client: reqwest::Client, targets: DownstreamTargets) -> Self {
        Self { client, targets }
    }

    /// Call the authentication collaborator and return its envelope,
    /// with `data` untouched.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` on a 401 or an embedded error envelope,
    /// `UnexpectedStatus` on any other non-202, `DownstreamUnreachable`
    /// on transport failure, `MalformedResponse` if the 202 body does
    /// not decode.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Envelope, BrokerError> {
        let response = self.post_json(&self.targets.auth, credentials).await?;
        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(BrokerError::InvalidCredentials),
            StatusCode::ACCEPTED => {}
            other => return Err(BrokerError::UnexpectedStatus(other.as_u16())),
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(BrokerError::MalformedResponse)?;
        if envelope.error {
            return Err(BrokerError::InvalidCredentials);
        }
        Ok(envelope)
    }

    /// Deliver a log entry synchronously over HTTP. A success confirms
    /// the log service processed the entry, unlike the queue path.
    ///
    /// # Errors
    ///
    /// `UnexpectedStatus` on any non-202, `DownstreamUnreachable` on
    /// transport failure.
    pub async fn log(&self, entry: &LogEntry) -> Result<(), BrokerError> {
        let response = self.post_json(&self.targets.log, entry).await?;
        Self::ensure_accepted(&response)
    }

    /// Hand a message to the mail collaborator.
    ///
    /// # Errors
    ///
    /// `UnexpectedStatus` on any non-202, `DownstreamUnreachable` on
    /// transport failure.
    pub async fn send_mail(&self, mail: &MailRequest) -> Result<(), BrokerError> {
        let response = self.post_json(&self.targets.mail, mail).await?;
        Self::ensure_accepted(&response)
    }

    async fn post_json<T: Serialize>(
        &self,
        url: &str,
        payload: &T,
    ) -> Result<reqwest::Response, BrokerError> {
        let body = serde_json::to_vec(payload)?;
        self.client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(BrokerError::DownstreamUnreachable)
    }

    fn ensure_accepted(response: &reqwest::Response) -> Result<(), BrokerError> {
        let status = response.status();
        if status == StatusCode::ACCEPTED {
            Ok(())
        } else {
            Err(BrokerError::UnexpectedStatus(status.as_u16()))
        }
    }
}
