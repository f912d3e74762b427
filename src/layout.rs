//! Pure projection of a workflow plus progress into a renderable diagram.
//!
//! Nothing here feeds back into navigation or editing; a frontend takes the
//! placements, routes and frames and draws them. Constants mirror the
//! vertical single-column layout of the reference renderer.

use itertools::Itertools;
use itertools::MinMaxResult;

use crate::progress::UserProgress;
use crate::workflow::{NodeKind, WorkflowDefinition};

pub const NODE_WIDTH: f64 = 250.0;
pub const DECISION_WIDTH: f64 = 220.0;
pub const VERTICAL_SPACING: f64 = 150.0;
pub const CENTER_X: f64 = 400.0;
pub const GROUP_WIDTH: f64 = 500.0;

const NODE_TOP_MARGIN: f64 = 50.0;
const GROUP_PADDING: f64 = 25.0;
const GROUP_BASE_HEIGHT: f64 = 130.0;
const DETOUR_BASE_WIDTH: f64 = 30.0;
const DETOUR_WIDTH_PER_CHAR: f64 = 8.0;

/// How a node renders relative to the user's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Current,
    Completed,
    Pending,
}

#[derive(Debug, Clone)]
pub struct NodePlacement {
    pub node_id: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub status: NodeStatus,
}

/// Which side a branch detours around the main column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetourSide {
    Left,
    Right,
}

/// Geometry class of one edge.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeRouting {
    /// Straight down to the next node in array order.
    MainFlow,
    /// Around the column; width grows with the label so it stays readable.
    Detour { side: DetourSide, width: f64 },
}

#[derive(Debug, Clone)]
pub struct EdgeRoute {
    pub edge_id: String,
    pub source: String,
    pub target: String,
    pub routing: EdgeRouting,
    /// Label of the decision option this edge realizes, if any.
    pub label: Option<String>,
    /// Branch edges render dashed.
    pub dashed: bool,
    /// True while the user sits on the source node.
    pub active: bool,
}

/// Background frame drawn behind a group's member nodes.
#[derive(Debug, Clone)]
pub struct GroupFrame {
    pub group_id: String,
    pub title: String,
    pub color: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The complete renderable diagram.
#[derive(Debug, Clone, Default)]
pub struct DiagramLayout {
    pub nodes: Vec<NodePlacement>,
    pub edges: Vec<EdgeRoute>,
    pub groups: Vec<GroupFrame>,
}

impl DiagramLayout {
    pub fn project(workflow: &WorkflowDefinition, progress: &UserProgress) -> Self {
        Self {
            nodes: place_nodes(workflow, progress),
            edges: route_edges(workflow, progress),
            groups: frame_groups(workflow),
        }
    }
}

fn place_nodes(workflow: &WorkflowDefinition, progress: &UserProgress) -> Vec<NodePlacement> {
    workflow
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let status = if node.id == progress.current_node_id {
                NodeStatus::Current
            } else if progress.is_node_complete(node) {
                NodeStatus::Completed
            } else {
                NodeStatus::Pending
            };
            // Decision nodes are narrower and re-centered on the column.
            let (x, width) = match node.kind {
                NodeKind::Decision => (
                    CENTER_X + (NODE_WIDTH - DECISION_WIDTH) / 2.0,
                    DECISION_WIDTH,
                ),
                NodeKind::Process => (CENTER_X, NODE_WIDTH),
            };
            NodePlacement {
                node_id: node.id.clone(),
                kind: node.kind,
                x,
                y: index as f64 * VERTICAL_SPACING + NODE_TOP_MARGIN,
                width,
                status,
            }
        })
        .collect()
}

fn route_edges(workflow: &WorkflowDefinition, progress: &UserProgress) -> Vec<EdgeRoute> {
    workflow
        .edges
        .iter()
        .map(|edge| {
            let source_node = workflow.find_node(&edge.source);
            let option = source_node
                .filter(|n| n.kind == NodeKind::Decision)
                .and_then(|n| {
                    n.decision_options
                        .iter()
                        .find_position(|o| o.target_node_id == edge.target)
                });

            let routing = if workflow.is_main_flow_edge(edge) {
                EdgeRouting::MainFlow
            } else if let Some((option_index, option)) = option {
                EdgeRouting::Detour {
                    side: if option_index % 2 == 0 {
                        DetourSide::Left
                    } else {
                        DetourSide::Right
                    },
                    width: DETOUR_BASE_WIDTH
                        + option.label.chars().count() as f64 * DETOUR_WIDTH_PER_CHAR,
                }
            } else {
                // Convergent or repaired flow with no owning option: route it
                // around the left side at the base width.
                EdgeRouting::Detour {
                    side: DetourSide::Left,
                    width: DETOUR_BASE_WIDTH,
                }
            };

            EdgeRoute {
                edge_id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                routing,
                label: option.map(|(_, o)| o.label.clone()),
                dashed: option.is_some(),
                active: edge.source == progress.current_node_id,
            }
        })
        .collect()
}

fn frame_groups(workflow: &WorkflowDefinition) -> Vec<GroupFrame> {
    workflow
        .groups
        .iter()
        .filter_map(|group| {
            let extent = group
                .node_ids
                .iter()
                .filter_map(|id| workflow.node_index(id))
                .minmax();
            let (min_index, max_index) = match extent {
                MinMaxResult::NoElements => return None,
                MinMaxResult::OneElement(index) => (index, index),
                MinMaxResult::MinMax(min, max) => (min, max),
            };
            Some(GroupFrame {
                group_id: group.id.clone(),
                title: group.title.clone(),
                color: group.color.clone(),
                x: CENTER_X - GROUP_WIDTH / 2.0 + NODE_WIDTH / 2.0,
                y: min_index as f64 * VERTICAL_SPACING + GROUP_PADDING,
                width: GROUP_WIDTH,
                height: (max_index - min_index) as f64 * VERTICAL_SPACING + GROUP_BASE_HEIGHT,
            })
        })
        .collect()
}
