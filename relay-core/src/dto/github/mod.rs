//! GitHub REST API DTOs
//!
//! Shapes for the three Actions calls the relay makes: list workflows,
//! read repository metadata and create a workflow dispatch event.

use serde::{Deserialize, Serialize};

/// Response of `GET /repos/{owner}/{repo}/actions/workflows`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowList {
    #[serde(default)]
    pub total_count: u64,

    #[serde(default)]
    pub workflows: Vec<WorkflowEntry>,
}

/// One workflow as reported by the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowEntry {
    pub id: u64,

    #[serde(default)]
    pub name: String,

    /// Repository-relative path, e.g. `.github/workflows/deploy.yml`
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub state: Option<String>,
}

/// Subset of `GET /repos/{owner}/{repo}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryMeta {
    pub default_branch: String,
}

/// Body of `POST .../workflows/{file}/dispatches`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRequest {
    #[serde(rename = "ref")]
    pub git_ref: String,
}
