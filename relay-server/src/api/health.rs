//! Health Page Handler
//!
//! Served for every request that is not a webhook delivery.

use axum::{extract::State, http::StatusCode, response::Html};

use crate::api::AppState;

/// GET / (and any unknown path)
/// Human readable status page
pub async fn health_page(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    (StatusCode::OK, Html(render(&state)))
}

fn render(state: &AppState) -> String {
    let settings = state.router().settings();

    format!(
        "🤖 <b>Bot is running</b><br>\n\
         ✅ Webhook route: <code>/{}</code><br>\n\
         ✅ Admin ID: <code>{}</code><br>\n\
         ✅ Repositories: <code>{}</code><br>\n\
         🕒 Up since: <code>{}</code><br>\n\
         📱 Send <code>/run</code> to the bot to start",
        state.masked_route(),
        settings.admin_id,
        settings.registry.len(),
        state.router().started_at().to_rfc3339()
    )
}
