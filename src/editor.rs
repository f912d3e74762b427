//! Consistency-preserving mutations over one [`WorkflowDefinition`].
//!
//! The editor is the only component that writes to the graph. Its job,
//! beyond the obvious bookkeeping, is to keep the edge set in lockstep with
//! two other encodings of flow order: the node array (sequential main flow)
//! and each decision node's option list (branches). Reads never re-derive
//! this consistency; it is established here, at write time.

use crate::error::EditError;
use crate::workflow::{
    ContentType, DecisionOption, NodeKind, StepContent, SubProcess, WorkflowDefinition,
    WorkflowEdge, WorkflowGroup, WorkflowNode,
};

const DEFAULT_GROUP_COLOR: &str = "#ef4444";

/// A partial update for [`GraphEditor::update_node`].
///
/// Absent fields leave the node untouched. Decision options are a tri-state
/// because "not supplied" and "explicitly cleared" trigger different edge
/// maintenance (see [`DecisionOptionsUpdate`]).
#[derive(Debug, Clone, Default)]
pub struct NodeUpdate {
    pub title: Option<String>,
    pub kind: Option<NodeKind>,
    pub icon: Option<String>,
    pub sub_processes: Option<Vec<SubProcess>>,
    pub decision_options: DecisionOptionsUpdate,
}

/// How an update treats the node's decision options.
#[derive(Debug, Clone, Default)]
pub enum DecisionOptionsUpdate {
    /// Leave the options and their edges alone.
    #[default]
    Keep,
    /// Drop all options; the node falls back to straight-line flow.
    Clear,
    /// Replace the options and rebuild the node's outgoing edges from them.
    Set(Vec<DecisionOption>),
}

impl NodeUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn kind(kind: NodeKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn decision_options(options: Vec<DecisionOption>) -> Self {
        Self {
            decision_options: DecisionOptionsUpdate::Set(options),
            ..Self::default()
        }
    }

    pub fn clear_decision_options() -> Self {
        Self {
            decision_options: DecisionOptionsUpdate::Clear,
            ..Self::default()
        }
    }
}

/// Mutating facade over one workflow.
pub struct GraphEditor<'a> {
    workflow: &'a mut WorkflowDefinition,
}

impl<'a> GraphEditor<'a> {
    pub fn new(workflow: &'a mut WorkflowDefinition) -> Self {
        Self { workflow }
    }

    /// Appends a new node with one default sub-process and wires a single
    /// edge from the previous last node, so the new node is immediately
    /// reachable on the main flow. Decision nodes start with two dangling
    /// options; their branches stay unconnected until explicitly targeted.
    ///
    /// Returns the id of the new node.
    pub fn add_node(&mut self, title: &str, kind: NodeKind) -> Result<String, EditError> {
        if title.trim().is_empty() {
            return Err(EditError::EmptyTitle { entity: "node" });
        }

        let id = self.fresh_node_id();
        let sub_id = format!("{id}-1");
        let content_id = format!("c-{id}-1");

        let node = match kind {
            NodeKind::Decision => WorkflowNode::decision(
                &id,
                title,
                vec![
                    DecisionOption::dangling("Yes"),
                    DecisionOption::dangling("No"),
                ],
            )
            .with_sub_processes(vec![SubProcess::new(&sub_id, "Decision criteria")
                .with_contents(vec![StepContent::new(
                    &content_id,
                    ContentType::Text,
                    "Describe the decision criteria",
                )])]),
            NodeKind::Process => WorkflowNode::process(&id, title).with_sub_processes(vec![
                SubProcess::new(&sub_id, "New step").with_contents(vec![StepContent::new(
                    &content_id,
                    ContentType::Text,
                    "Describe this step",
                )]),
            ]),
        };

        if let Some(last) = self.workflow.nodes.last() {
            let edge_id = format!("e-{}-{}", last.id, id);
            let source = last.id.clone();
            self.workflow
                .edges
                .push(WorkflowEdge::new(edge_id, source, &id));
        }
        self.workflow.nodes.push(node);
        Ok(id)
    }

    /// Merges fields into the node and maintains the edge set.
    ///
    /// Supplying decision options replaces every outgoing edge of the node
    /// with one edge per targeted option, in option order. Clearing them, or
    /// changing the kind to process, restores the single straight-line edge
    /// to the immediate successor unless one already exists. An unknown id
    /// is a silent no-op.
    pub fn update_node(&mut self, id: &str, update: NodeUpdate) {
        let Some(node) = self.workflow.find_node_mut(id) else {
            return;
        };

        if let Some(title) = update.title {
            node.title = title;
        }
        if let Some(kind) = update.kind {
            node.kind = kind;
        }
        if let Some(icon) = update.icon {
            node.icon = Some(icon);
        }
        if let Some(sub_processes) = update.sub_processes {
            node.sub_processes = sub_processes;
        }

        match update.decision_options {
            DecisionOptionsUpdate::Set(options) => {
                node.decision_options = options.clone();
                self.sync_decision_edges(id, &options);
            }
            DecisionOptionsUpdate::Clear => {
                node.decision_options = Vec::new();
                self.restore_sequential_edge(id);
            }
            DecisionOptionsUpdate::Keep => {
                if update.kind == Some(NodeKind::Process) {
                    self.restore_sequential_edge(id);
                }
            }
        }
    }

    /// Removes the node. When it sits on a simple chain (exactly one
    /// incoming and one outgoing edge) the two edges are spliced into one,
    /// keeping the flow connected. Any other shape just drops the touching
    /// edges; a resulting disconnect is the user's to repair.
    pub fn delete_node(&mut self, id: &str) {
        if self.workflow.node_index(id).is_none() {
            return;
        }

        let incoming: Vec<WorkflowEdge> = self.workflow.incoming_edges(id).cloned().collect();
        let outgoing: Vec<WorkflowEdge> = self.workflow.outgoing_edges(id).cloned().collect();

        self.workflow
            .edges
            .retain(|e| e.source != id && e.target != id);
        self.workflow.nodes.retain(|n| n.id != id);

        if let ([predecessor], [successor]) = (incoming.as_slice(), outgoing.as_slice()) {
            let edge_id = format!("e-{}-{}", predecessor.source, successor.target);
            self.workflow.edges.push(WorkflowEdge::new(
                edge_id,
                predecessor.source.clone(),
                successor.target.clone(),
            ));
        }
    }

    /// Creates a group spanning the closed contiguous range of nodes between
    /// `start_id` and `end_id` by array index. Membership is materialized
    /// once, here; later node edits do not recompute it.
    ///
    /// Returns the id of the new group.
    pub fn add_group(
        &mut self,
        title: &str,
        start_id: &str,
        end_id: &str,
        color: Option<String>,
    ) -> Result<String, EditError> {
        if title.trim().is_empty() {
            return Err(EditError::EmptyTitle { entity: "group" });
        }
        let start_index =
            self.workflow
                .node_index(start_id)
                .ok_or_else(|| EditError::GroupEndpointNotFound {
                    node_id: start_id.to_string(),
                })?;
        let end_index =
            self.workflow
                .node_index(end_id)
                .ok_or_else(|| EditError::GroupEndpointNotFound {
                    node_id: end_id.to_string(),
                })?;
        if start_index > end_index {
            return Err(EditError::ReversedGroupRange {
                start_id: start_id.to_string(),
                start_index,
                end_id: end_id.to_string(),
                end_index,
            });
        }

        let node_ids: Vec<String> = self.workflow.nodes[start_index..=end_index]
            .iter()
            .map(|n| n.id.clone())
            .collect();
        let id = self.fresh_group_id();
        self.workflow.groups.push(WorkflowGroup {
            id: id.clone(),
            title: title.to_string(),
            node_ids,
            color: Some(color.unwrap_or_else(|| DEFAULT_GROUP_COLOR.to_string())),
        });
        Ok(id)
    }

    /// Replaces the group's title and/or color. No effect on member nodes.
    pub fn update_group(&mut self, id: &str, title: Option<String>, color: Option<String>) {
        let Some(group) = self.workflow.groups.iter_mut().find(|g| g.id == id) else {
            return;
        };
        if let Some(title) = title {
            group.title = title;
        }
        if let Some(color) = color {
            group.color = Some(color);
        }
    }

    /// Removes the group. Member nodes are untouched.
    pub fn delete_group(&mut self, id: &str) {
        self.workflow.groups.retain(|g| g.id != id);
    }

    /// Drops every outgoing edge of the node and recreates one edge per
    /// option with a non-empty target, in option order. Dangling options
    /// produce no edge.
    fn sync_decision_edges(&mut self, node_id: &str, options: &[DecisionOption]) {
        self.workflow.edges.retain(|e| e.source != node_id);
        for (index, option) in options.iter().enumerate() {
            if option.target_node_id.is_empty() {
                continue;
            }
            let edge_id = format!("e-{}-{}-{}", node_id, option.target_node_id, index);
            self.workflow.edges.push(WorkflowEdge::new(
                edge_id,
                node_id,
                option.target_node_id.clone(),
            ));
        }
    }

    /// Restores straight-line semantics after a decision node is demoted:
    /// unless the node is last, or already flows to its immediate successor,
    /// all its outgoing edges are replaced by exactly one edge to that
    /// successor.
    fn restore_sequential_edge(&mut self, node_id: &str) {
        let Some(next_id) = self
            .workflow
            .sequential_next(node_id)
            .map(|n| n.id.clone())
        else {
            return;
        };
        let already_wired = self
            .workflow
            .outgoing_edges(node_id)
            .any(|e| e.target == next_id);
        if already_wired {
            return;
        }
        self.workflow.edges.retain(|e| e.source != node_id);
        let edge_id = format!("e-{node_id}-{next_id}");
        self.workflow
            .edges
            .push(WorkflowEdge::new(edge_id, node_id, next_id));
    }

    fn fresh_node_id(&self) -> String {
        let seq = next_sequence(self.workflow.nodes.iter().map(|n| n.id.as_str()), "step-");
        format!("step-{seq}")
    }

    fn fresh_group_id(&self) -> String {
        let seq = next_sequence(self.workflow.groups.iter().map(|g| g.id.as_str()), "group-");
        format!("group-{seq}")
    }
}

/// One past the highest numeric suffix among ids with the given prefix.
/// Deterministic, unlike the wall-clock ids a browser frontend would mint.
pub(crate) fn next_sequence<'i>(ids: impl Iterator<Item = &'i str>, prefix: &str) -> u64 {
    ids.filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1)
}
