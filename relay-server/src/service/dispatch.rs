//! Workflow Dispatch Service
//!
//! Starts a workflow on the repository's default branch. One attempt per
//! button press; nothing is retried.

use relay_client::{CiProvider, ClientError};
use relay_core::domain::registry::RepositoryId;
use relay_core::domain::workflow::normalize_workflow_file;

/// Result of a single dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Provider answered `204 No Content`
    Accepted { workflow_file: String, branch: String },

    /// Provider answered with any other status
    Rejected {
        workflow_file: String,
        branch: String,
        status: u16,
        body: String,
    },

    /// No usable response (transport failure, timeout...)
    Failed { workflow_file: String, error: String },
}

/// Resolve the branch to run on, falling back to `fallback` on any failure
pub async fn resolve_branch(ci: &dyn CiProvider, repo: &RepositoryId, fallback: &str) -> String {
    match ci.default_branch(repo).await {
        Ok(branch) if !branch.trim().is_empty() => branch,
        Ok(_) => {
            tracing::warn!("{} reported an empty default branch, using {}", repo, fallback);
            fallback.to_string()
        }
        Err(e) => {
            tracing::warn!(
                "Failed to resolve default branch of {}: {}; using {}",
                repo,
                e,
                fallback
            );
            fallback.to_string()
        }
    }
}

/// Dispatch `workflow` on `repo`
pub async fn dispatch_workflow(
    ci: &dyn CiProvider,
    repo: &RepositoryId,
    workflow: &str,
    fallback_branch: &str,
) -> DispatchOutcome {
    let workflow_file = normalize_workflow_file(workflow);
    let branch = resolve_branch(ci, repo, fallback_branch).await;

    tracing::info!("Dispatching {} on {}@{}", workflow_file, repo, branch);

    match ci.dispatch_workflow(repo, &workflow_file, &branch).await {
        Ok(()) => {
            tracing::info!("Dispatch accepted: {} on {}@{}", workflow_file, repo, branch);
            DispatchOutcome::Accepted {
                workflow_file,
                branch,
            }
        }
        Err(ClientError::ApiError { status, message }) => {
            tracing::warn!(
                "Dispatch of {} on {} rejected (status {}): {}",
                workflow_file,
                repo,
                status,
                message
            );
            DispatchOutcome::Rejected {
                workflow_file,
                branch,
                status,
                body: message,
            }
        }
        Err(e) => {
            tracing::error!("Dispatch of {} on {} failed: {}", workflow_file, repo, e);
            DispatchOutcome::Failed {
                workflow_file,
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CiCall, FakeCi, Reply};

    fn repo() -> RepositoryId {
        "acme/site-repo".parse().unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_uses_default_branch() {
        let ci = FakeCi::new().with_branch(Reply::Ok("trunk".to_string()));

        let outcome = dispatch_workflow(&ci, &repo(), "deploy.yml", "main").await;

        assert_eq!(
            outcome,
            DispatchOutcome::Accepted {
                workflow_file: "deploy.yml".to_string(),
                branch: "trunk".to_string(),
            }
        );
        assert_eq!(
            ci.calls().last(),
            Some(&CiCall::Dispatch {
                repo: "acme/site-repo".to_string(),
                workflow_file: "deploy.yml".to_string(),
                git_ref: "trunk".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_branch_lookup_failure_falls_back() {
        let ci = FakeCi::new().with_branch(Reply::Status(404, "Not Found".to_string()));

        let outcome = dispatch_workflow(&ci, &repo(), "deploy.yml", "main").await;

        assert!(matches!(outcome, DispatchOutcome::Accepted { .. }));
        assert_eq!(ci.dispatched_refs(), vec!["main".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_extension_is_appended() {
        let ci = FakeCi::new();

        let outcome = dispatch_workflow(&ci, &repo(), "deploy", "main").await;

        assert!(matches!(
            outcome,
            DispatchOutcome::Accepted { ref workflow_file, .. } if workflow_file == "deploy.yml"
        ));
    }

    #[tokio::test]
    async fn test_rejected_dispatch_keeps_status_and_body() {
        let ci = FakeCi::new().with_dispatch(Reply::Status(
            422,
            "Workflow does not have 'workflow_dispatch' trigger".to_string(),
        ));

        let outcome = dispatch_workflow(&ci, &repo(), "deploy.yml", "main").await;

        match outcome {
            DispatchOutcome::Rejected { status, body, .. } => {
                assert_eq!(status, 422);
                assert!(body.contains("workflow_dispatch"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(ci.dispatch_count(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported_not_raised() {
        let ci = FakeCi::new().with_dispatch(Reply::Broken("connection reset".to_string()));

        let outcome = dispatch_workflow(&ci, &repo(), "deploy.yml", "main").await;

        assert!(matches!(outcome, DispatchOutcome::Failed { ref error, .. } if error.contains("connection reset")));
        assert_eq!(ci.dispatch_count(), 1);
    }
}
