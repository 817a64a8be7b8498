//! Relay HTTP Clients
//!
//! Typed clients for the two upstream APIs the relay talks to:
//!
//! - [`GitHubClient`]: lists workflows, reads a repository's default branch and
//!   creates workflow dispatch events
//! - [`TelegramClient`]: sends messages and registers the webhook
//!
//! The update router is written against the [`CiProvider`] and [`Notifier`]
//! traits so it can be exercised without network access.
//!
//! # Example
//!
//! ```no_run
//! use relay_client::{GitHubClient, http_client};
//! use std::time::Duration;
//!
//! # async fn example() -> relay_client::Result<()> {
//! let http = http_client(Duration::from_secs(10))?;
//! let github = GitHubClient::with_client("https://api.github.com", "ghp_xxx", http);
//!
//! let repo: relay_core::domain::registry::RepositoryId = "acme/site".parse().unwrap();
//! let workflows = github.list_workflows(&repo).await?;
//! println!("{} workflows", workflows.workflows.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
mod github;
mod provider;
mod telegram;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use github::GitHubClient;
pub use provider::{CiProvider, Notifier};
pub use telegram::TelegramClient;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// Sent on every outbound request; GitHub rejects requests without one
pub const USER_AGENT: &str = concat!("actions-relay/", env!("CARGO_PKG_VERSION"));

/// Builds the shared HTTP client with a per-request timeout
pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(ClientError::from)
}

// =============================================================================
// Response Handlers
// =============================================================================

/// Check the status code and deserialize a JSON body
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Require one exact status and ignore the body
async fn expect_status(response: reqwest::Response, expected: reqwest::StatusCode) -> Result<()> {
    let status = response.status();

    if status != expected {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    Ok(())
}
