//! GitHub Actions endpoints

use std::fmt;

use relay_core::domain::registry::RepositoryId;
use relay_core::dto::github::{DispatchRequest, RepositoryMeta, WorkflowList};
use reqwest::{Client, RequestBuilder, StatusCode, Url};

use crate::error::{ClientError, Result};
use crate::{USER_AGENT, expect_status, handle_response};

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// HTTP client for the GitHub REST API
#[derive(Clone)]
pub struct GitHubClient {
    /// Base URL of the API (e.g., "https://api.github.com")
    base_url: String,
    /// Personal access token or app token
    token: String,
    /// HTTP client instance
    client: Client,
}

impl GitHubClient {
    /// Create a new GitHub client with a default HTTP client
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new GitHub client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    fn repo_url(&self, repo: &RepositoryId) -> String {
        format!("{}/repos/{}/{}", self.base_url, repo.owner(), repo.name())
    }

    /// The workflow file is added as one percent-encoded path segment
    fn dispatch_url(&self, repo: &RepositoryId, workflow_file: &str) -> Result<Url> {
        let invalid = || ClientError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.repo_url(repo)).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["actions", "workflows", workflow_file, "dispatches"]);
        Ok(url)
    }

    // =============================================================================
    // Actions
    // =============================================================================

    /// List the workflows defined in a repository
    ///
    /// `GET /repos/{owner}/{repo}/actions/workflows`
    pub async fn list_workflows(&self, repo: &RepositoryId) -> Result<WorkflowList> {
        let url = format!("{}/actions/workflows", self.repo_url(repo));
        tracing::debug!("GET {}", url);
        let response = self.authorized(self.client.get(&url)).send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());

        handle_response(response).await
    }

    /// Read the repository's default branch
    ///
    /// `GET /repos/{owner}/{repo}`
    pub async fn default_branch(&self, repo: &RepositoryId) -> Result<String> {
        let url = self.repo_url(repo);
        tracing::debug!("GET {}", url);
        let response = self.authorized(self.client.get(&url)).send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());

        let meta: RepositoryMeta = handle_response(response).await?;
        Ok(meta.default_branch)
    }

    /// Create a workflow dispatch event
    ///
    /// `POST /repos/{owner}/{repo}/actions/workflows/{workflow_file}/dispatches`
    ///
    /// Succeeds only on `204 No Content`; any other status is returned as
    /// [`ClientError::ApiError`](crate::ClientError::ApiError) with the body.
    pub async fn dispatch_workflow(
        &self,
        repo: &RepositoryId,
        workflow_file: &str,
        git_ref: &str,
    ) -> Result<()> {
        let url = self.dispatch_url(repo, workflow_file)?;
        let request = DispatchRequest {
            git_ref: git_ref.to_string(),
        };
        tracing::debug!("POST {} (ref {})", url, git_ref);
        let response = self
            .authorized(self.client.post(url.clone()))
            .json(&request)
            .send()
            .await?;
        tracing::debug!("POST {} -> {}", url, response.status());

        expect_status(response, StatusCode::NO_CONTENT).await
    }
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
