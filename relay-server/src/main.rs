//! Relay Server
//!
//! Receives Telegram bot updates over a webhook and lets the configured admin
//! pick a repository and a workflow to dispatch on GitHub Actions.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use relay_client::{GitHubClient, TelegramClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod service;

#[cfg(test)]
mod test_utils;

use crate::config::{Args, Config};
use crate::service::UpdateRouter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "relay_server=debug,relay_client=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting relay server...");

    let config = Config::from_args(Args::parse())?;

    tracing::info!("Bot token: {}", config.masked_token());
    tracing::info!("Webhook URL: {}", config.webhook_url);
    tracing::info!("Admin ID: {}", config.admin_id);
    tracing::info!(
        "Repositories: {:?}",
        config.repositories.aliases().collect::<Vec<_>>()
    );

    let http = relay_client::http_client(config.http_timeout)
        .context("Failed to build HTTP client")?;
    let github = Arc::new(GitHubClient::with_client(
        &config.github_api_url,
        &config.github_token,
        http.clone(),
    ));
    let telegram = Arc::new(TelegramClient::with_client(
        &config.telegram_api_url,
        &config.bot_token,
        http,
    ));

    register_webhook(&telegram, &config).await;

    let router = UpdateRouter::new(config.router_settings(), github, telegram);
    let app = api::create_router(api::AppState::new(router, config.bot_token.clone()));

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Relay server stopped");
    Ok(())
}

/// Point Telegram at our webhook; a failure is logged and startup continues
async fn register_webhook(telegram: &TelegramClient, config: &Config) {
    let endpoint = config.webhook_endpoint();

    match telegram.set_webhook(&endpoint).await {
        Ok(()) => tracing::info!("Webhook registered at {}/{}", config.webhook_url, config.masked_token()),
        Err(e) => tracing::warn!("Failed to register webhook: {}", e),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
