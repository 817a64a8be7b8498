//! In-memory fakes of the upstream API seams

use std::sync::Mutex;

use async_trait::async_trait;
use relay_client::{CiProvider, ClientError, Notifier};
use relay_core::domain::registry::RepositoryId;
use relay_core::dto::github::{WorkflowEntry, WorkflowList};
use relay_core::dto::telegram::SendMessage;

/// Canned reply of a fake upstream call
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    /// Upstream answered with this status and body
    Status(u16, String),
    /// No usable response at all
    Broken(String),
}

impl<T: Clone> Reply<T> {
    fn to_result(&self) -> relay_client::Result<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status, body) => Err(ClientError::api_error(*status, body.clone())),
            Reply::Broken(reason) => Err(ClientError::ParseError(reason.clone())),
        }
    }
}

/// A call received by [`FakeCi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CiCall {
    ListWorkflows(String),
    DefaultBranch(String),
    Dispatch {
        repo: String,
        workflow_file: String,
        git_ref: String,
    },
}

pub struct FakeCi {
    workflows: Reply<WorkflowList>,
    branch: Reply<String>,
    dispatch: Reply<()>,
    calls: Mutex<Vec<CiCall>>,
}

impl FakeCi {
    /// No workflows, default branch `main`, every dispatch accepted
    pub fn new() -> Self {
        Self {
            workflows: Reply::Ok(WorkflowList::default()),
            branch: Reply::Ok("main".to_string()),
            dispatch: Reply::Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Workflows given as `(name, path)` pairs
    pub fn with_workflows(mut self, workflows: &[(&str, &str)]) -> Self {
        let workflows: Vec<WorkflowEntry> = workflows
            .iter()
            .enumerate()
            .map(|(i, (name, path))| WorkflowEntry {
                id: i as u64 + 1,
                name: name.to_string(),
                path: path.to_string(),
                state: Some("active".to_string()),
            })
            .collect();

        self.workflows = Reply::Ok(WorkflowList {
            total_count: workflows.len() as u64,
            workflows,
        });
        self
    }

    pub fn with_listing(mut self, reply: Reply<WorkflowList>) -> Self {
        self.workflows = reply;
        self
    }

    pub fn with_branch(mut self, reply: Reply<String>) -> Self {
        self.branch = reply;
        self
    }

    pub fn with_dispatch(mut self, reply: Reply<()>) -> Self {
        self.dispatch = reply;
        self
    }

    pub fn calls(&self) -> Vec<CiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, CiCall::ListWorkflows(_)))
            .count()
    }

    pub fn dispatch_count(&self) -> usize {
        self.dispatched_refs().len()
    }

    pub fn dispatched_refs(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                CiCall::Dispatch { git_ref, .. } => Some(git_ref),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: CiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CiProvider for FakeCi {
    async fn list_workflows(&self, repo: &RepositoryId) -> relay_client::Result<WorkflowList> {
        self.record(CiCall::ListWorkflows(repo.to_string()));
        self.workflows.to_result()
    }

    async fn default_branch(&self, repo: &RepositoryId) -> relay_client::Result<String> {
        self.record(CiCall::DefaultBranch(repo.to_string()));
        self.branch.to_result()
    }

    async fn dispatch_workflow(
        &self,
        repo: &RepositoryId,
        workflow_file: &str,
        git_ref: &str,
    ) -> relay_client::Result<()> {
        self.record(CiCall::Dispatch {
            repo: repo.to_string(),
            workflow_file: workflow_file.to_string(),
            git_ref: git_ref.to_string(),
        });
        self.dispatch.to_result()
    }
}

/// Records every message; optionally fails each delivery
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SendMessage>>,
    failing: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn sent(&self) -> Vec<SendMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: SendMessage) -> relay_client::Result<()> {
        self.sent.lock().unwrap().push(message);
        if self.failing {
            return Err(ClientError::api_error(403, "Forbidden: bot was blocked by the user"));
        }
        Ok(())
    }
}
