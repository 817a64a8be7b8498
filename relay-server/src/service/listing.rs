//! Workflow Listing Service

use relay_client::CiProvider;
use relay_core::domain::registry::RepositoryId;
use relay_core::domain::workflow::WorkflowDescriptor;

/// Fetch the workflows of `repo`
///
/// Upstream failures collapse into an empty list, so callers cannot tell a
/// failed listing from a repository without workflows.
pub async fn list_workflows(ci: &dyn CiProvider, repo: &RepositoryId) -> Vec<WorkflowDescriptor> {
    match ci.list_workflows(repo).await {
        Ok(list) => {
            let workflows: Vec<_> = list
                .workflows
                .iter()
                .filter_map(WorkflowDescriptor::from_entry)
                .collect();
            tracing::debug!("Listed {} workflows for {}", workflows.len(), repo);
            workflows
        }
        Err(e) => {
            tracing::warn!("Failed to list workflows for {}: {}", repo, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeCi, Reply};

    fn repo() -> RepositoryId {
        "acme/site-repo".parse().unwrap()
    }

    #[tokio::test]
    async fn test_lists_descriptors() {
        let ci = FakeCi::new().with_workflows(&[
            ("CI", ".github/workflows/ci.yml"),
            ("Deploy", ".github/workflows/deploy.yaml"),
        ]);

        let workflows = list_workflows(&ci, &repo()).await;

        let files: Vec<_> = workflows.iter().map(|wf| wf.filename.as_str()).collect();
        assert_eq!(files, vec!["ci.yml", "deploy.yaml"]);
        assert_eq!(workflows[1].display_name, "Deploy");
    }

    #[tokio::test]
    async fn test_entries_without_filename_are_dropped() {
        let ci = FakeCi::new().with_workflows(&[
            ("Broken", ".github/workflows/"),
            ("Deploy", ".github/workflows/deploy.yml"),
        ]);

        let workflows = list_workflows(&ci, &repo()).await;

        assert_eq!(workflows.len(), 1);
        assert_eq!(workflows[0].filename, "deploy.yml");
    }

    #[tokio::test]
    async fn test_failures_become_empty() {
        for reply in [
            Reply::Status(404, "Not Found".to_string()),
            Reply::Broken("timed out".to_string()),
        ] {
            let ci = FakeCi::new().with_listing(reply);
            assert!(list_workflows(&ci, &repo()).await.is_empty());
        }
    }
}
