use serde::{Deserialize, Serialize};

use super::node::WorkflowNode;

/// A directed pointer between two nodes.
///
/// Multiple edges may share a source (decision branches) or a target
/// (convergent flow).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl WorkflowEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A visual grouping over a contiguous run of nodes.
///
/// Membership is a snapshot taken at creation time; it is not recomputed as
/// nodes are inserted or removed around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowGroup {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub node_ids: Vec<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// The complete graph for one project: nodes, edges and groups.
///
/// Node array position is load-bearing: it encodes the default sequential
/// order, and both [`sequential_next`](Self::sequential_next) and
/// [`is_main_flow_edge`](Self::is_main_flow_edge) are computed from index
/// adjacency rather than from edge presence alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
    #[serde(default)]
    pub groups: Vec<WorkflowGroup>,
}

impl WorkflowDefinition {
    pub fn find_node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut WorkflowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn outgoing_edges(&self, node_id: &str) -> impl Iterator<Item = &WorkflowEdge> {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    pub fn incoming_edges(&self, node_id: &str) -> impl Iterator<Item = &WorkflowEdge> {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// The node at array-index + 1, used as the main-flow fallback when no
    /// decision branching applies.
    pub fn sequential_next(&self, node_id: &str) -> Option<&WorkflowNode> {
        let index = self.node_index(node_id)?;
        self.nodes.get(index + 1)
    }

    /// True iff the edge lands on the node immediately after its source in
    /// array order. Chooses rendering semantics only; navigation never
    /// consults this.
    pub fn is_main_flow_edge(&self, edge: &WorkflowEdge) -> bool {
        match (self.node_index(&edge.source), self.node_index(&edge.target)) {
            (Some(source_index), Some(target_index)) => target_index == source_index + 1,
            _ => false,
        }
    }

    /// The designated start node: first in array order.
    pub fn start_node_id(&self) -> Option<&str> {
        self.nodes.first().map(|n| n.id.as_str())
    }
}
