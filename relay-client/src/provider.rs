//! Seams between the update router and the upstream APIs
//!
//! The router only sees these traits; the HTTP clients implement them and
//! tests substitute in-memory fakes.

use async_trait::async_trait;
use relay_core::domain::registry::RepositoryId;
use relay_core::dto::github::WorkflowList;
use relay_core::dto::telegram::SendMessage;

use crate::error::Result;
use crate::{GitHubClient, TelegramClient};

/// CI provider operations used by the relay
#[async_trait]
pub trait CiProvider: Send + Sync {
    /// Lists the workflows defined in `repo`
    async fn list_workflows(&self, repo: &RepositoryId) -> Result<WorkflowList>;

    /// Resolves the default branch of `repo`
    async fn default_branch(&self, repo: &RepositoryId) -> Result<String>;

    /// Starts `workflow_file` on `git_ref`; `Ok` only when the provider accepted it
    async fn dispatch_workflow(
        &self,
        repo: &RepositoryId,
        workflow_file: &str,
        git_ref: &str,
    ) -> Result<()>;
}

/// Delivers messages to a chat
///
/// Callers treat delivery as best effort: the error is for logging only.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: SendMessage) -> Result<()>;
}

#[async_trait]
impl CiProvider for GitHubClient {
    async fn list_workflows(&self, repo: &RepositoryId) -> Result<WorkflowList> {
        GitHubClient::list_workflows(self, repo).await
    }

    async fn default_branch(&self, repo: &RepositoryId) -> Result<String> {
        GitHubClient::default_branch(self, repo).await
    }

    async fn dispatch_workflow(
        &self,
        repo: &RepositoryId,
        workflow_file: &str,
        git_ref: &str,
    ) -> Result<()> {
        GitHubClient::dispatch_workflow(self, repo, workflow_file, git_ref).await
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn send(&self, message: SendMessage) -> Result<()> {
        self.send_message(&message).await
    }
}
