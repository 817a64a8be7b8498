//! Webhook acknowledgements
//!
//! Telegram retries any delivery that is not answered with a 2xx, so every
//! outcome of the webhook, including failures, is a `200` with a short body.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// Update handled (or deliberately ignored)
    Ok,
    /// Handling failed; logged, not retried
    Error,
}

impl Ack {
    pub fn body(self) -> &'static str {
        match self {
            Ack::Ok => "ok",
            Ack::Error => "error",
        }
    }
}

impl IntoResponse for Ack {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.body(),
        )
            .into_response()
    }
}
