//! Telegram Bot API DTOs
//!
//! Inbound: the `Update` object delivered to the webhook.
//! Outbound: `sendMessage` bodies with optional inline keyboards.

use serde::{Deserialize, Serialize};

/// Parse mode used for every outgoing message
pub const PARSE_MODE_HTML: &str = "HTML";

/// Incoming update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: i64,

    pub chat: Chat,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Button press on an inline keyboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub id: String,

    pub from: User,

    /// Message the keyboard was attached to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Body of `sendMessage`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessage {
    pub chat_id: i64,
    pub text: String,
    pub parse_mode: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl SendMessage {
    pub fn html(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: PARSE_MODE_HTML.to_string(),
            reply_markup: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(keyboard);
        self
    }
}

/// Ordered rows of ordered buttons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// One button per row
    pub fn single_column(buttons: impl IntoIterator<Item = InlineKeyboardButton>) -> Self {
        Self {
            inline_keyboard: buttons.into_iter().map(|button| vec![button]).collect(),
        }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &InlineKeyboardButton> {
        self.inline_keyboard.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// Body of `setWebhook`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetWebhook {
    pub url: String,
}

/// Envelope every Bot API method answers with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

/// Escapes text for interpolation into an HTML-mode message
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_update() {
        let json = serde_json::json!({
            "update_id": 10,
            "message": {
                "message_id": 1,
                "date": 1700000000,
                "chat": { "id": 42, "type": "private" },
                "from": { "id": 42, "is_bot": false, "first_name": "A" },
                "text": "/run"
            }
        });

        let update: Update = serde_json::from_value(json).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.from, Some(User { id: 42 }));
        assert_eq!(message.text.as_deref(), Some("/run"));
        assert!(update.callback_query.is_none());
    }

    #[test]
    fn test_parse_callback_update() {
        let json = serde_json::json!({
            "update_id": 11,
            "callback_query": {
                "id": "abc",
                "from": { "id": 42 },
                "message": { "message_id": 5, "chat": { "id": 42 } },
                "data": "repo:site"
            }
        });

        let update: Update = serde_json::from_value(json).unwrap();
        let query = update.callback_query.unwrap();
        assert_eq!(query.from.id, 42);
        assert_eq!(query.message.unwrap().chat.id, 42);
        assert_eq!(query.data.as_deref(), Some("repo:site"));
    }

    #[test]
    fn test_send_message_omits_empty_keyboard() {
        let body = serde_json::to_value(SendMessage::html(1, "hi")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "chat_id": 1, "text": "hi", "parse_mode": "HTML" })
        );
    }

    #[test]
    fn test_single_column_keyboard() {
        let keyboard = InlineKeyboardMarkup::single_column(vec![
            InlineKeyboardButton::new("a", "repo:a"),
            InlineKeyboardButton::new("b", "repo:b"),
        ]);
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.buttons().count(), 2);
    }

    #[test]
    fn test_envelope_without_result() {
        // No `Default` impl: the envelope must not require one.
        #[derive(Debug, Deserialize)]
        struct Sent {
            message_id: i64,
        }

        let json = serde_json::json!({ "ok": false, "description": "Bad Request: chat not found" });
        let envelope: ApiResponse<Sent> = serde_json::from_value(json).unwrap();
        assert!(!envelope.ok);
        assert!(envelope.result.is_none());
        assert_eq!(
            envelope.description.as_deref(),
            Some("Bad Request: chat not found")
        );

        let json = serde_json::json!({ "ok": true, "result": { "message_id": 7 } });
        let envelope: ApiResponse<Sent> = serde_json::from_value(json).unwrap();
        assert_eq!(envelope.result.map(|sent| sent.message_id), Some(7));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b> & c"), "a&lt;b&gt; &amp; c");
        assert_eq!(escape_html("plain"), "plain");
    }
}
