//! Message rendering
//!
//! Every user-visible text and keyboard is built here. Texts use Telegram's
//! HTML parse mode; dynamic values go through `escape_html`.

use relay_core::domain::payload::CallbackPayload;
use relay_core::domain::registry::{RepositoryId, RepositoryRegistry};
use relay_core::domain::workflow::WorkflowDescriptor;
use relay_core::dto::telegram::{
    InlineKeyboardButton, InlineKeyboardMarkup, SendMessage, escape_html,
};

use crate::service::dispatch::DispatchOutcome;

/// Most workflow buttons shown for one repository
pub const MAX_WORKFLOW_BUTTONS: usize = 10;

/// Telegram rejects a keyboard whose `callback_data` exceeds this many bytes
pub const MAX_CALLBACK_DATA_BYTES: usize = 64;

/// Longest upstream error excerpt quoted back to the user, in characters
pub const ERROR_EXCERPT_CHARS: usize = 200;

pub fn denied_callback(chat_id: i64) -> SendMessage {
    SendMessage::html(chat_id, "⛔ <b>Not authorized</b>")
}

pub fn denied_command(chat_id: i64) -> SendMessage {
    SendMessage::html(chat_id, "⛔ <b>Admin only</b>")
}

pub fn configuration_error(chat_id: i64) -> SendMessage {
    SendMessage::html(chat_id, "❌ Repository configuration error")
}

pub fn setup_instructions(chat_id: i64) -> SendMessage {
    SendMessage::html(
        chat_id,
        "❌ <b>No repositories configured</b>\n\n\
         Set <code>REPO_CONFIG</code> in the environment\n\
         Format: <code>myrepo:owner/repo,blog:owner/blog</code>",
    )
}

/// One button per configured alias
pub fn repository_menu(chat_id: i64, registry: &RepositoryRegistry) -> SendMessage {
    let buttons = registry.aliases().map(|alias| {
        InlineKeyboardButton::new(
            format!("📁 {alias}"),
            CallbackPayload::select_repository(alias).encode(),
        )
    });

    SendMessage::html(
        chat_id,
        "🤖 <b>GitHub Actions trigger</b>\n\n👇 Select a repository",
    )
    .with_keyboard(InlineKeyboardMarkup::single_column(buttons))
}

pub fn no_workflows(chat_id: i64, repo: &RepositoryId) -> SendMessage {
    SendMessage::html(
        chat_id,
        format!(
            "❌ No workflows found in <code>{}</code>",
            escape_html(&repo.to_string())
        ),
    )
}

/// One button per workflow, capped at [`MAX_WORKFLOW_BUTTONS`]
///
/// Workflows whose payload would not fit in `callback_data` are left out
/// so the rest of the menu can still be sent.
pub fn workflow_menu(
    chat_id: i64,
    alias: &str,
    repo: &RepositoryId,
    workflows: &[WorkflowDescriptor],
) -> SendMessage {
    let buttons = workflows
        .iter()
        .filter_map(|wf| {
            let payload = CallbackPayload::select_workflow(alias, &wf.filename).encode();
            if payload.len() > MAX_CALLBACK_DATA_BYTES {
                tracing::warn!(
                    "Skipping workflow {} of {}: callback data is {} bytes (max {})",
                    wf.filename,
                    repo,
                    payload.len(),
                    MAX_CALLBACK_DATA_BYTES
                );
                return None;
            }
            Some(InlineKeyboardButton::new(format!("🚀 {}", wf.label()), payload))
        })
        .take(MAX_WORKFLOW_BUTTONS);

    SendMessage::html(
        chat_id,
        format!(
            "📦 <b>Select a workflow</b>\n\n<code>{}</code>",
            escape_html(&repo.to_string())
        ),
    )
    .with_keyboard(InlineKeyboardMarkup::single_column(buttons))
}

pub fn status(chat_id: i64, repository_count: usize, admin_id: i64, up_since: &str) -> SendMessage {
    SendMessage::html(
        chat_id,
        format!(
            "✅ <b>Bot status</b>\n\n\
             🔗 Webhook: <code>✅ connected</code>\n\
             📦 Repositories: <code>{repository_count}</code>\n\
             👤 Admin: <code>{admin_id}</code>\n\
             🕒 Up since: <code>{}</code>",
            escape_html(up_since)
        ),
    )
}

/// Outcome notice of a dispatch attempt
pub fn dispatch_result(chat_id: i64, repo: &RepositoryId, outcome: &DispatchOutcome) -> SendMessage {
    let repo = escape_html(&repo.to_string());

    let text = match outcome {
        DispatchOutcome::Accepted {
            workflow_file,
            branch,
        } => format!(
            "✅ <b>Workflow dispatched</b>\n\
             📦 <code>{repo}</code>\n\
             ⚙️ <code>{}</code>\n\
             🌿 <code>{}</code>",
            escape_html(workflow_file),
            escape_html(branch)
        ),
        DispatchOutcome::Rejected {
            workflow_file,
            branch,
            status,
            body,
        } => format!(
            "⚠️ <b>Dispatch failed</b>\n\
             📦 <code>{repo}/{}</code>\n\
             🌿 <code>{}</code>\n\
             ❌ Status: <code>{status}</code>\n\
             <pre>{}</pre>",
            escape_html(workflow_file),
            escape_html(branch),
            escape_html(&excerpt(body, ERROR_EXCERPT_CHARS))
        ),
        DispatchOutcome::Failed {
            workflow_file,
            error,
        } => format!(
            "💥 <b>Dispatch error</b>\n\
             📦 <code>{repo}/{}</code>\n\
             <code>{}</code>",
            escape_html(workflow_file),
            escape_html(&excerpt(error, ERROR_EXCERPT_CHARS))
        ),
    };

    SendMessage::html(chat_id, text)
}

/// Cuts `text` to at most `max_chars` characters, marking the cut with `…`
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
