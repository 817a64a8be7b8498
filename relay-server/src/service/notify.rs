//! Best-effort message delivery

use relay_client::Notifier;
use relay_core::dto::telegram::SendMessage;

/// Sends `message`, logging instead of returning delivery failures
pub async fn notify(notifier: &dyn Notifier, message: SendMessage) {
    let chat_id = message.chat_id;

    match notifier.send(message).await {
        Ok(()) => tracing::debug!(chat_id, "Message delivered"),
        Err(e) => tracing::warn!(chat_id, "Failed to send message: {}", e),
    }
}
