mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use relay_gateway::{BrokerServer, DownstreamClient, DownstreamTargets, default_client};
use relay_queue::LogPublisher;
use tokio::sync::watch;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load(Path::new("relay.toml")).context("loading configuration")?;

    let client = DownstreamClient::new(
        default_client(),
        DownstreamTargets {
            auth: config.downstream.auth_url.clone(),
            log: config.downstream.log_url.clone(),
            mail: config.downstream.mail_url.clone(),
        },
    );

    let publisher = LogPublisher::connect(&config.queue.brokers, config.queue.topic.as_str())
        .context("creating queue publisher")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e:#}");
            return;
        }
        tracing::info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    BrokerServer::new(
        &config.server.bind,
        config.server.port,
        client,
        Arc::new(publisher),
        shutdown_rx,
    )
    .with_max_body_size(config.server.max_body_size)
    .serve()
    .await?;

    Ok(())
}
