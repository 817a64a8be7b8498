//! Telegram Bot API endpoints

use std::fmt;

use relay_core::dto::telegram::{ApiResponse, SendMessage, SetWebhook};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::handle_response;

/// HTTP client for the Telegram Bot API
#[derive(Clone)]
pub struct TelegramClient {
    /// Method base, `{api_url}/bot{token}`; contains the bot credential
    bot_url: String,
    /// HTTP client instance
    client: Client,
}

impl TelegramClient {
    /// Create a new Telegram client with a default HTTP client
    pub fn new(api_url: impl AsRef<str>, token: impl AsRef<str>) -> Self {
        Self::with_client(api_url, token, Client::new())
    }

    /// Create a new Telegram client with a custom HTTP client
    pub fn with_client(api_url: impl AsRef<str>, token: impl AsRef<str>, client: Client) -> Self {
        Self {
            bot_url: format!(
                "{}/bot{}",
                api_url.as_ref().trim_end_matches('/'),
                token.as_ref()
            ),
            client,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.bot_url, method)
    }

    /// Unwrap the `{ ok, result, description }` envelope
    async fn call<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        // The URL carries the bot token; only the method name is logged.
        let method = response.url().path_segments().and_then(|mut s| s.next_back());
        tracing::debug!("Telegram {} -> {}", method.unwrap_or("?"), response.status());

        let envelope: ApiResponse<T> = handle_response(response).await?;

        if !envelope.ok {
            return Err(ClientError::Rejected(
                envelope
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }

        envelope
            .result
            .ok_or_else(|| ClientError::ParseError("response is missing `result`".to_string()))
    }

    // =============================================================================
    // Methods
    // =============================================================================

    /// Send a text message, optionally with an inline keyboard
    pub async fn send_message(&self, message: &SendMessage) -> Result<()> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(message)
            .send()
            .await?;

        let _sent: serde_json::Value = self.call(response).await?;
        Ok(())
    }

    /// Point the bot's updates at `url`
    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        let response = self
            .client
            .post(self.method_url("setWebhook"))
            .json(&SetWebhook {
                url: url.to_string(),
            })
            .send()
            .await?;

        let accepted: bool = self.call(response).await?;
        if !accepted {
            return Err(ClientError::Rejected("setWebhook returned false".to_string()));
        }

        Ok(())
    }
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("bot_url", &"<redacted>")
            .finish()
    }
}
