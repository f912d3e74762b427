use serde::{Deserialize, Serialize};

use super::content::SubProcess;

/// Whether a node follows the main flow or branches on a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Process,
    Decision,
}

/// One labeled outgoing branch of a decision node.
///
/// An empty `target_node_id` is a dangling branch: legal while the user is
/// still editing, and simply produces no edge when the editor syncs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOption {
    pub label: String,
    #[serde(default)]
    pub target_node_id: String,
}

impl DecisionOption {
    pub fn new(label: impl Into<String>, target_node_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target_node_id: target_node_id.into(),
        }
    }

    /// A branch the user has not wired to a target yet.
    pub fn dangling(label: impl Into<String>) -> Self {
        Self::new(label, "")
    }
}

/// A step in the procedure.
///
/// `decision_options` only drives navigation when `kind` is
/// [`NodeKind::Decision`]; a process node may carry stale options without
/// effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sub_processes: Vec<SubProcess>,
    #[serde(default)]
    pub decision_options: Vec<DecisionOption>,
}

impl WorkflowNode {
    pub fn process(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: NodeKind::Process,
            icon: None,
            sub_processes: Vec::new(),
            decision_options: Vec::new(),
        }
    }

    pub fn decision(
        id: impl Into<String>,
        title: impl Into<String>,
        options: Vec<DecisionOption>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: NodeKind::Decision,
            icon: Some("GitBranch".to_string()),
            sub_processes: Vec::new(),
            decision_options: options,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_sub_processes(mut self, sub_processes: Vec<SubProcess>) -> Self {
        self.sub_processes = sub_processes;
        self
    }

    /// A decision node is navigable only if at least one branch has a target.
    pub fn is_navigable_decision(&self) -> bool {
        self.kind == NodeKind::Decision
            && self
                .decision_options
                .iter()
                .any(|o| !o.target_node_id.is_empty())
    }
}
