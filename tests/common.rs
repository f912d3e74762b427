//! Common test utilities for building workflows and stores.
use tejun::prelude::*;

/// A straight chain `step-1 -> step-2 -> ... -> step-n`, one sub-process
/// per node.
#[allow(dead_code)]
pub fn linear_workflow(n: usize) -> WorkflowDefinition {
    let mut workflow = WorkflowDefinition::default();
    for i in 1..=n {
        let id = format!("step-{i}");
        let node = WorkflowNode::process(&id, format!("Step {i}")).with_sub_processes(vec![
            SubProcess::new(format!("{id}-1"), "Work").with_contents(vec![StepContent::text_item(
                format!("c-{id}-1"),
                "Do the work",
            )]),
        ]);
        if i > 1 {
            workflow.edges.push(WorkflowEdge::new(
                format!("e-step-{}-{id}", i - 1),
                format!("step-{}", i - 1),
                &id,
            ));
        }
        workflow.nodes.push(node);
    }
    workflow
}

/// A decision node `d` with options yes -> a, no -> b and edges already
/// synced, preceded by nothing and followed by the two targets.
#[allow(dead_code)]
pub fn decision_workflow() -> WorkflowDefinition {
    WorkflowDefinition {
        nodes: vec![
            WorkflowNode::decision(
                "d",
                "Which way?",
                vec![
                    DecisionOption::new("yes", "a"),
                    DecisionOption::new("no", "b"),
                ],
            )
            .with_sub_processes(vec![
                SubProcess::new("d-1", "Criteria"),
                SubProcess::new("d-2", "More criteria"),
            ]),
            WorkflowNode::process("a", "Yes path")
                .with_sub_processes(vec![SubProcess::new("a-1", "Work")]),
            WorkflowNode::process("b", "No path")
                .with_sub_processes(vec![SubProcess::new("b-1", "Work")]),
        ],
        edges: vec![
            WorkflowEdge::new("e-d-a-0", "d", "a"),
            WorkflowEdge::new("e-d-b-1", "d", "b"),
        ],
        groups: Vec::new(),
    }
}

/// A memory-backed store with a signed-in identity, plus a probe on what
/// the store writes through the persistence collaborator.
#[allow(dead_code)]
pub fn memory_store() -> (ProjectStore, MemoryStore) {
    let probe = MemoryStore::new();
    let store = ProjectStore::with_backend(
        Some(Identity::new("tester").with_email("tester@example.com")),
        Box::new(probe.clone()),
    )
    .expect("store should load from an empty memory backend");
    (store, probe)
}

/// Sorted `(source, target)` pairs of all outgoing edges of one node.
#[allow(dead_code)]
pub fn outgoing_pairs(workflow: &WorkflowDefinition, node_id: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = workflow
        .outgoing_edges(node_id)
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect();
    pairs.sort();
    pairs
}
