use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use relay_queue::LogSink;
use tokio::sync::watch;

use crate::downstream::DownstreamClient;
use crate::error::ServerError;
use crate::router::build_router;

/// Per-request view of the process-scoped dependencies: the shared
/// outbound HTTP client and the log sink. Both tolerate concurrent use.
#[derive(Clone)]
pub(crate) struct AppState {
    pub client: Arc<DownstreamClient>,
    pub log_sink: Arc<dyn LogSink>,
    pub started_at: Instant,
}

pub struct BrokerServer {
    addr: SocketAddr,
    max_body_size: usize,
    client: DownstreamClient,
    log_sink: Arc<dyn LogSink>,
    shutdown_rx: watch::Receiver<bool>,
}

impl BrokerServer {
    #[must_use]
    pub fn new(
        bind: &str,
        port: u16,
        client: DownstreamClient,
        log_sink: Arc<dyn LogSink>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        let addr: SocketAddr = format!("{bind}:{port}").parse().unwrap_or_else(|e| {
            tracing::warn!("invalid bind '{bind}': {e}, falling back to 127.0.0.1:{port}");
            SocketAddr::from(([127, 0, 0, 1], port))
        });

        Self {
            addr,
            max_body_size: 1_048_576,
            client,
            log_sink,
            shutdown_rx,
        }
    }

    #[must_use]
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Start the broker's HTTP server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or encounters a
    /// fatal I/O error.
    pub async fn serve(self) -> Result<(), ServerError> {
        let state = AppState {
            client: Arc::new(self.client),
            log_sink: self.log_sink,
            started_at: Instant::now(),
        };

        let router = build_router(state, self.max_body_size);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| ServerError::Bind(self.addr.to_string(), e))?;
        tracing::info!("broker listening on {}", self.addr);

        let mut shutdown_rx = self.shutdown_rx;
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                while !*shutdown_rx.borrow_and_update() {
                    if shutdown_rx.changed().await.is_err() {
                        std::future::pending::<()>().await;
                    }
                }
                tracing::info!("broker shutting down");
            })
            .await
            .map_err(|e| ServerError::Server(format!("{e}")))?;

        Ok(())
    }
}
