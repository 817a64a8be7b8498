//! Webhook API Handler
//!
//! Receives Telegram updates. Extractor rejections and the body itself are
//! handled here so that no request is answered with a 4xx.

use axum::{
    body::Bytes,
    extract::{
        Path, State,
        rejection::{BytesRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};
use relay_core::dto::telegram::Update;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::{AppState, ack::Ack, health};

/// Bytes of a malformed body echoed into the log
const BODY_PREVIEW_BYTES: usize = 200;

/// POST /{secret}
/// Handle one Telegram update
pub async fn receive_update(
    State(state): State<AppState>,
    secret: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let is_webhook = match &secret {
        Ok(Path(secret)) => state.is_webhook_secret(secret),
        Err(e) => {
            tracing::debug!("Unreadable path segment: {}", e);
            false
        }
    };
    if !is_webhook {
        tracing::debug!("POST to a non-webhook path, serving health page");
        return health::health_page(State(state)).await.into_response();
    }

    // Oversized bodies (past axum's default 2 MiB limit) land here too.
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Unreadable webhook body ({}): {}", e.status(), e.body_text());
            return Ack::Ok.into_response();
        }
    };

    if body.is_empty() {
        tracing::warn!("Empty webhook body");
        return Ack::Ok.into_response();
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            let preview = &body[..body.len().min(BODY_PREVIEW_BYTES)];
            tracing::warn!(
                "Malformed update: {}; body: {}",
                e,
                String::from_utf8_lossy(preview)
            );
            return Ack::Ok.into_response();
        }
    };

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("update", %request_id, update_id = update.update_id);
    tracing::info!(%request_id, "Received update {}", update.update_id);

    // A panic inside the router must still be acknowledged with 200.
    let router = state.router().clone();
    let handled = tokio::spawn(async move { router.handle(&update).await }.instrument(span)).await;

    let ack = match handled {
        Ok(Ok(())) => Ack::Ok,
        Ok(Err(e)) => {
            tracing::warn!(%request_id, "Failed to handle update: {}", e);
            Ack::Error
        }
        Err(e) => {
            tracing::error!(%request_id, "Update handler aborted: {}", e);
            Ack::Error
        }
    };

    ack.into_response()
}
