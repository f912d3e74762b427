//! Cursor and completion state over one workflow graph.
//!
//! Progress is deliberately independent of the graph structure: structural
//! edits never rewrite it, and navigation tolerates a cursor or completed id
//! that the graph no longer contains.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::workflow::{ContentType, StepContent, WorkflowDefinition, WorkflowNode};

/// Where the user is and which units are done.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub current_node_id: String,
    #[serde(default)]
    pub completed_step_ids: AHashSet<String>,
    #[serde(default)]
    pub checked_content_ids: AHashSet<String>,
    #[serde(default)]
    pub input_values: AHashMap<String, String>,
}

impl UserProgress {
    /// Fresh progress with the cursor at the workflow's start node.
    pub fn new(workflow: &WorkflowDefinition) -> Self {
        Self {
            current_node_id: workflow.start_node_id().unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// Unconditionally overwrites the cursor. The caller supplies ids taken
    /// from the current node list; existence is not re-checked here.
    pub fn set_current_node(&mut self, node_id: &str) {
        self.current_node_id = node_id.to_string();
    }

    /// Idempotent: re-completing a unit is a no-op, not an error.
    pub fn complete_step(&mut self, sub_process_id: &str) {
        self.completed_step_ids.insert(sub_process_id.to_string());
    }

    pub fn check_content(&mut self, content_id: &str, checked: bool) {
        if checked {
            self.checked_content_ids.insert(content_id.to_string());
        } else {
            self.checked_content_ids.remove(content_id);
        }
    }

    /// Records a value for an `input` content item. Navigation never reads
    /// these; they exist for display and export.
    pub fn set_input(&mut self, content_id: &str, value: impl Into<String>) {
        self.input_values.insert(content_id.to_string(), value.into());
    }

    /// Marks every sub-process of the current node complete, then follows
    /// the first outgoing edge. A node with no outgoing edge is terminal and
    /// the cursor stays put.
    pub fn advance(&mut self, workflow: &WorkflowDefinition) {
        self.complete_current_node(workflow);
        let next = workflow
            .outgoing_edges(&self.current_node_id)
            .next()
            .map(|e| e.target.clone());
        if let Some(target) = next {
            self.current_node_id = target;
        }
    }

    /// Takes a decision branch: completes the current node's sub-processes
    /// and jumps straight to the option's target, bypassing edge lookup
    /// since the option itself supplied it.
    pub fn choose_branch(&mut self, workflow: &WorkflowDefinition, target_node_id: &str) {
        self.complete_current_node(workflow);
        self.current_node_id = target_node_id.to_string();
    }

    /// Moves to the source of the first edge pointing at the current node.
    /// No edge means start-of-graph: no-op. Completion history is kept;
    /// going back is non-destructive.
    pub fn go_back(&mut self, workflow: &WorkflowDefinition) {
        let previous = workflow
            .incoming_edges(&self.current_node_id)
            .next()
            .map(|e| e.source.clone());
        if let Some(source) = previous {
            self.current_node_id = source;
        }
    }

    /// Restores the cursor to the start node and clears all completion,
    /// check and input state.
    pub fn reset(&mut self, workflow: &WorkflowDefinition) {
        self.current_node_id = workflow.start_node_id().unwrap_or_default().to_string();
        self.completed_step_ids.clear();
        self.checked_content_ids.clear();
        self.input_values.clear();
    }

    pub fn is_step_completed(&self, sub_process_id: &str) -> bool {
        self.completed_step_ids.contains(sub_process_id)
    }

    pub fn is_content_checked(&self, content_id: &str) -> bool {
        self.checked_content_ids.contains(content_id)
    }

    /// Derived read used by the layout projection: a node renders as
    /// complete if its own id is in the completed set, or every one of its
    /// sub-process ids is.
    pub fn is_node_complete(&self, node: &WorkflowNode) -> bool {
        self.completed_step_ids.contains(&node.id)
            || node
                .sub_processes
                .iter()
                .all(|sp| self.completed_step_ids.contains(&sp.id))
    }

    /// Required `check` items not yet checked and required `input` items
    /// still empty, for the current state. Advisory only: `advance` does not
    /// consult this.
    pub fn missing_required<'a>(&self, node: &'a WorkflowNode) -> Vec<&'a StepContent> {
        node.sub_processes
            .iter()
            .flat_map(|sp| sp.contents.iter())
            .filter(|c| c.required)
            .filter(|c| match c.content_type {
                ContentType::Check => !self.checked_content_ids.contains(&c.id),
                ContentType::Input => self
                    .input_values
                    .get(&c.id)
                    .is_none_or(|v| v.trim().is_empty()),
                _ => false,
            })
            .collect()
    }

    fn complete_current_node(&mut self, workflow: &WorkflowDefinition) {
        let Some(node) = workflow.find_node(&self.current_node_id) else {
            return;
        };
        for sub_process in &node.sub_processes {
            self.completed_step_ids.insert(sub_process.id.clone());
        }
    }
}
