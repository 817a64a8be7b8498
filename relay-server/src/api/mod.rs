//! API Module
//!
//! HTTP surface of the relay:
//! - `POST /{bot token}` receives Telegram updates
//! - everything else answers with the health page

pub mod ack;
pub mod health;
pub mod webhook;

use std::sync::Arc;

use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;

use crate::config::mask_secret;
use crate::service::UpdateRouter;

/// Shared application state, cheap to clone
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    router: Arc<UpdateRouter>,
    /// Path segment Telegram posts updates to
    webhook_secret: String,
}

impl AppState {
    pub fn new(router: UpdateRouter, webhook_secret: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                router: Arc::new(router),
                webhook_secret: webhook_secret.into(),
            }),
        }
    }

    pub fn router(&self) -> &Arc<UpdateRouter> {
        &self.inner.router
    }

    pub fn is_webhook_secret(&self, candidate: &str) -> bool {
        self.inner.webhook_secret == candidate
    }

    pub fn masked_route(&self) -> String {
        mask_secret(&self.inner.webhook_secret)
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/{secret}",
            post(webhook::receive_update).fallback(health::health_page),
        )
        .fallback(health::health_page)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
