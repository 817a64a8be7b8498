//! Callback payloads
//!
//! Inline keyboard buttons can only carry an opaque string. The relay keeps the
//! menu stateless by encoding the next step into that string:
//!
//! - `repo:<alias>` selects a repository
//! - `wf:<alias>|<workflow file>` selects a workflow of that repository
//!
//! Aliases must not contain `:` or `|`. This is a configuration constraint and
//! is not escaped here.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const REPO_PREFIX: &str = "repo:";
const WORKFLOW_PREFIX: &str = "wf:";
const FIELD_SEPARATOR: char = '|';

/// Instruction carried by an inline keyboard button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackPayload {
    /// Show the workflows of the repository behind `alias`
    SelectRepository { alias: String },

    /// Dispatch `workflow` on the repository behind `alias`
    SelectWorkflow { alias: String, workflow: String },
}

/// Errors produced when decoding a button payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("unrecognized callback payload: {0}")]
    UnknownPrefix(String),

    #[error("workflow payload is missing the '|' separator: {0}")]
    MissingSeparator(String),
}

impl CallbackPayload {
    pub fn select_repository(alias: impl Into<String>) -> Self {
        Self::SelectRepository {
            alias: alias.into(),
        }
    }

    pub fn select_workflow(alias: impl Into<String>, workflow: impl Into<String>) -> Self {
        Self::SelectWorkflow {
            alias: alias.into(),
            workflow: workflow.into(),
        }
    }

    /// Wire form placed in `callback_data`
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Alias the payload refers to
    pub fn alias(&self) -> &str {
        match self {
            Self::SelectRepository { alias } | Self::SelectWorkflow { alias, .. } => alias,
        }
    }
}

impl fmt::Display for CallbackPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectRepository { alias } => write!(f, "{REPO_PREFIX}{alias}"),
            Self::SelectWorkflow { alias, workflow } => {
                write!(f, "{WORKFLOW_PREFIX}{alias}{FIELD_SEPARATOR}{workflow}")
            }
        }
    }
}

impl FromStr for CallbackPayload {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(alias) = s.strip_prefix(REPO_PREFIX) {
            return Ok(Self::select_repository(alias));
        }

        if let Some(rest) = s.strip_prefix(WORKFLOW_PREFIX) {
            let (alias, workflow) = rest
                .split_once(FIELD_SEPARATOR)
                .ok_or_else(|| PayloadError::MissingSeparator(s.to_string()))?;
            return Ok(Self::select_workflow(alias, workflow));
        }

        Err(PayloadError::UnknownPrefix(s.to_string()))
    }
}
