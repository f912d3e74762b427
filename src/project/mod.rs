pub mod history;

pub use history::*;

use serde::{Deserialize, Serialize};

use crate::progress::UserProgress;
use crate::workflow::WorkflowDefinition;

/// Category used to organize the project list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectCategory {
    Experiment,
    Analysis,
    Manufacturing,
    QualityControl,
    Research,
    Other,
}

/// One named procedure: a workflow graph, the user's progress through it,
/// and metadata. The unit of persistence and of open/close.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<ProjectCategory>,
    pub created_at: u64,
    pub updated_at: u64,
    pub workflow: WorkflowDefinition,
    pub progress: UserProgress,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub template_id: Option<String>,
    /// Monotonic write stamp, bumped on every mutation. Remote replacements
    /// compare stamps to detect (not resolve) conflicting concurrent writes.
    #[serde(default)]
    pub revision: u64,
}

impl Project {
    /// A fresh project over the given workflow, progress reset to the start
    /// node.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        workflow: WorkflowDefinition,
        now: u64,
    ) -> Self {
        let progress = UserProgress::new(&workflow);
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: None,
            created_at: now,
            updated_at: now,
            workflow,
            progress,
            history: Vec::new(),
            is_template: false,
            template_id: None,
            revision: 0,
        }
    }
}
