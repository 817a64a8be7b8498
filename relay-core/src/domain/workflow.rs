//! Workflow domain model

use serde::{Deserialize, Serialize};

use crate::dto::github::WorkflowEntry;

/// Extension appended to workflow names that carry none
pub const DEFAULT_WORKFLOW_EXTENSION: &str = ".yml";

const WORKFLOW_EXTENSIONS: [&str; 2] = [".yml", ".yaml"];

/// A workflow definition of one repository
///
/// Fetched fresh for every repository selection and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDescriptor {
    /// Last path segment of the workflow file (e.g. `deploy.yml`)
    pub filename: String,

    /// Provider-side numeric id
    pub id: u64,

    /// Human readable name from the workflow's `name:` key
    pub display_name: String,
}

impl WorkflowDescriptor {
    /// Builds a descriptor from a listing entry
    ///
    /// Returns `None` when the entry's path has no file name component.
    pub fn from_entry(entry: &WorkflowEntry) -> Option<Self> {
        let filename = entry.path.rsplit('/').next().unwrap_or_default().trim();
        if filename.is_empty() {
            return None;
        }

        Some(Self {
            filename: filename.to_string(),
            id: entry.id,
            display_name: entry.name.trim().to_string(),
        })
    }

    /// Text shown on the workflow's button
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.filename
        } else {
            &self.display_name
        }
    }
}

/// Ensures a workflow reference ends in a workflow file extension
pub fn normalize_workflow_file(workflow: &str) -> String {
    if WORKFLOW_EXTENSIONS.iter().any(|ext| workflow.ends_with(ext)) {
        workflow.to_string()
    } else {
        format!("{workflow}{DEFAULT_WORKFLOW_EXTENSION}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64, name: &str, path: &str) -> WorkflowEntry {
        WorkflowEntry {
            id,
            name: name.to_string(),
            path: path.to_string(),
            state: Some("active".to_string()),
        }
    }

    #[test]
    fn test_from_entry_uses_last_path_segment() {
        let wf = WorkflowDescriptor::from_entry(&entry(7, "Deploy", ".github/workflows/deploy.yml"))
            .unwrap();
        assert_eq!(wf.filename, "deploy.yml");
        assert_eq!(wf.id, 7);
        assert_eq!(wf.label(), "Deploy");
    }

    #[test]
    fn test_from_entry_rejects_empty_filename() {
        assert!(WorkflowDescriptor::from_entry(&entry(1, "Broken", ".github/workflows/")).is_none());
        assert!(WorkflowDescriptor::from_entry(&entry(2, "Empty", "")).is_none());
    }

    #[test]
    fn test_label_falls_back_to_filename() {
        let wf = WorkflowDescriptor::from_entry(&entry(3, "", ".github/workflows/ci.yaml")).unwrap();
        assert_eq!(wf.label(), "ci.yaml");
    }

    #[test]
    fn test_normalize_workflow_file() {
        assert_eq!(normalize_workflow_file("deploy"), "deploy.yml");
        assert_eq!(normalize_workflow_file("deploy.yml"), "deploy.yml");
        assert_eq!(normalize_workflow_file("deploy.yaml"), "deploy.yaml");
    }
}
