//! Tests for the project store: lifecycle, history, identity gating,
//! persistence and remote synchronization.
mod common;
use common::*;
use tejun::prelude::*;

#[test]
fn fresh_backend_is_seeded_with_default_project() {
    let (store, probe) = memory_store();

    assert_eq!(store.projects().len(), 1);
    let project = &store.projects()[0];
    assert_eq!(project.id, "proj-1");
    assert!(!project.workflow.nodes.is_empty());
    assert_eq!(project.progress.current_node_id, "step-1");
    // The seed was pushed through the persistence collaborator.
    assert_eq!(probe.stored().len(), 1);
}

#[test]
fn create_project_assigns_sequential_ids_and_logs_creation() {
    let (mut store, _probe) = memory_store();

    let id = store.create_project("Etching run", Some("Second rig")).unwrap();
    assert_eq!(id, "proj-2");

    let project = store.find_project(&id).unwrap();
    assert_eq!(project.name, "Etching run");
    assert_eq!(project.description.as_deref(), Some("Second rig"));
    assert_eq!(project.history.len(), 1);
    assert_eq!(project.history[0].action, HistoryAction::Create);
    assert_eq!(project.history[0].user_id, "tester");
}

#[test]
fn create_project_rejects_empty_name() {
    let (mut store, _probe) = memory_store();
    let result = store.create_project("  ", None);
    assert!(matches!(result, Err(StoreError::Edit(_))));
    assert_eq!(store.projects().len(), 1);
}

#[test]
fn duplicate_copies_workflow_and_resets_progress() {
    let (mut store, _probe) = memory_store();
    store.select_project("proj-1");
    store.advance().unwrap();
    store.advance().unwrap();

    let copy_id = store.duplicate_project("proj-1").unwrap().unwrap();
    let source = store.find_project("proj-1").unwrap();
    let copy = store.find_project(&copy_id).unwrap();

    assert_eq!(copy.name, format!("{} (copy)", source.name));
    assert_eq!(copy.workflow.nodes.len(), source.workflow.nodes.len());
    assert_eq!(copy.progress.current_node_id, "step-1");
    assert!(copy.progress.completed_step_ids.is_empty());
    // The source keeps its progress.
    assert_eq!(source.progress.current_node_id, "step-3");
}

#[test]
fn duplicate_of_unknown_project_is_a_noop() {
    let (mut store, _probe) = memory_store();
    assert!(store.duplicate_project("missing").unwrap().is_none());
    assert_eq!(store.projects().len(), 1);
}

#[test]
fn templates_round_trip_with_back_reference() {
    let (mut store, _probe) = memory_store();

    let template_id = store
        .save_as_template("proj-1", "Polishing template")
        .unwrap()
        .unwrap();
    assert!(store.find_project(&template_id).unwrap().is_template);

    let instance_id = store
        .create_from_template(&template_id, "March run")
        .unwrap()
        .unwrap();
    let instance = store.find_project(&instance_id).unwrap();
    assert!(!instance.is_template);
    assert_eq!(instance.template_id.as_deref(), Some(template_id.as_str()));
    assert_eq!(instance.name, "March run");
}

#[test]
fn instantiating_from_a_non_template_is_a_noop() {
    let (mut store, _probe) = memory_store();
    assert!(store.create_from_template("proj-1", "x").unwrap().is_none());
}

#[test]
fn delete_project_clears_open_pointer() {
    let (mut store, probe) = memory_store();
    store.select_project("proj-1");
    assert!(store.current_project().is_some());

    store.delete_project("proj-1").unwrap();

    assert!(store.projects().is_empty());
    assert!(store.current_project_id().is_none());
    assert!(probe.stored().is_empty());
}

#[test]
fn close_project_keeps_the_list() {
    let (mut store, _probe) = memory_store();
    store.select_project("proj-1");
    store.close_project();
    assert!(store.current_project_id().is_none());
    assert_eq!(store.projects().len(), 1);
}

#[test]
fn store_without_identity_is_empty_and_read_only() {
    let store = ProjectStore::with_backend(
        None,
        Box::new(MemoryStore::with_projects(vec![Project::new(
            "proj-9",
            "Someone else's",
            WorkflowDefinition::default(),
            0,
        )])),
    )
    .unwrap();
    assert!(store.projects().is_empty());

    let mut store = store;
    assert!(matches!(
        store.create_project("x", None),
        Err(StoreError::ReadOnly)
    ));
    assert!(matches!(store.advance(), Err(StoreError::ReadOnly)));
    assert!(matches!(
        store.delete_project("proj-9"),
        Err(StoreError::ReadOnly)
    ));
}

#[test]
fn mutations_without_open_project_are_noops() {
    let (mut store, _probe) = memory_store();
    assert!(store.add_node("x", NodeKind::Process).unwrap().is_none());
    assert!(store.advance().is_ok());
    assert_eq!(store.projects().len(), 1);
}

#[test]
fn structural_edits_append_history_and_bump_revision() {
    let (mut store, _probe) = memory_store();
    store.select_project("proj-1");
    let before = store.current_project().unwrap().revision;

    let node_id = store.add_node("8. Report", NodeKind::Process).unwrap().unwrap();
    store.delete_node(&node_id).unwrap();

    let project = store.current_project().unwrap();
    assert_eq!(project.revision, before + 2);
    let recent: Vec<&str> = project
        .history
        .iter()
        .rev()
        .take(2)
        .map(|h| h.details.as_str())
        .collect();
    assert_eq!(
        recent,
        vec![
            format!("Deleted node '{node_id}'"),
            format!("Added node '{node_id}'")
        ]
    );
}

#[test]
fn history_ring_is_bounded_to_100_entries() {
    let (mut store, _probe) = memory_store();
    store.select_project("proj-1");

    for i in 0..130 {
        store.complete_step(&format!("unit-{i}")).unwrap();
    }

    let history = &store.current_project().unwrap().history;
    assert_eq!(history.len(), 100);
    // Oldest entries were evicted; the tail is the most recent completion.
    assert_eq!(history.last().unwrap().details, "Completed step 'unit-129'");
    assert!(
        history
            .iter()
            .all(|h| h.details != "Completed step 'unit-0'")
    );
}

#[test]
fn cursor_moves_bump_revision_without_history_noise() {
    let (mut store, _probe) = memory_store();
    store.select_project("proj-1");
    let (revision, entries) = {
        let p = store.current_project().unwrap();
        (p.revision, p.history.len())
    };

    store.set_current_node("step-3").unwrap();
    store.go_back().unwrap();
    store.check_content("c-1-1-1", true).unwrap();

    let project = store.current_project().unwrap();
    assert_eq!(project.revision, revision + 3);
    assert_eq!(project.history.len(), entries);
}

#[test]
fn every_mutation_pushes_a_snapshot() {
    let (mut store, probe) = memory_store();
    store.select_project("proj-1");

    store.advance().unwrap();

    let stored = probe.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].progress.current_node_id, "step-2");
}

#[test]
fn apply_remote_reports_conflicts_and_replaces_wholesale() {
    let (mut store, _probe) = memory_store();
    store.select_project("proj-1");
    store.advance().unwrap();
    store.advance().unwrap();
    let local_revision = store.current_project().unwrap().revision;

    // A stale copy of proj-1 from another session, plus a new project.
    let mut stale = store.find_project("proj-1").unwrap().clone();
    stale.revision = local_revision - 1;
    stale.progress.current_node_id = "step-1".to_string();
    let other = Project::new("proj-7", "From elsewhere", WorkflowDefinition::default(), 0);

    let conflicts = store.apply_remote(vec![stale, other]);

    assert_eq!(
        conflicts,
        vec![SyncConflict {
            project_id: "proj-1".to_string(),
            local_revision,
            remote_revision: local_revision - 1,
        }]
    );
    // Last writer wins regardless of the report.
    assert_eq!(store.projects().len(), 2);
    assert_eq!(
        store.find_project("proj-1").unwrap().progress.current_node_id,
        "step-1"
    );
    // proj-1 survived the replacement, so it stays open.
    assert_eq!(store.current_project_id(), Some("proj-1"));
}

#[test]
fn apply_remote_closes_project_that_vanished() {
    let (mut store, _probe) = memory_store();
    store.select_project("proj-1");

    let conflicts = store.apply_remote(Vec::new());

    assert!(conflicts.is_empty());
    assert!(store.projects().is_empty());
    assert!(store.current_project_id().is_none());
}

#[test]
fn json_document_round_trips_through_a_file() {
    let path = std::env::temp_dir().join("tejun-test-projects.json");
    let _ = std::fs::remove_file(&path);

    {
        let mut store = ProjectStore::with_backend(
            Some(Identity::new("tester")),
            Box::new(JsonFileStore::new(&path)),
        )
        .unwrap();
        store.select_project("proj-1");
        store.advance().unwrap();
        store.add_node("8. Report", NodeKind::Process).unwrap();
    }

    let reloaded = ProjectStore::with_backend(
        Some(Identity::new("tester")),
        Box::new(JsonFileStore::new(&path)),
    )
    .unwrap();
    let project = reloaded.find_project("proj-1").unwrap();
    assert_eq!(project.progress.current_node_id, "step-2");
    assert!(project.workflow.find_node("step-8").is_some());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn stale_document_shapes_load_with_defaults() {
    // A minimal project written by an older session: no history, revision,
    // template flag, groups or input values.
    let json = r#"[{
        "id": "proj-1",
        "name": "Old document",
        "createdAt": 1,
        "updatedAt": 1,
        "workflow": {
            "nodes": [{
                "id": "step-1",
                "title": "Only step",
                "type": "process",
                "subProcesses": [{"id": "1.1", "title": "Work"}]
            }],
            "edges": []
        },
        "progress": {"currentNodeId": "step-1"}
    }]"#;

    let projects: Vec<Project> = serde_json::from_str(json).unwrap();
    let project = &projects[0];
    assert!(project.history.is_empty());
    assert_eq!(project.revision, 0);
    assert!(!project.is_template);
    assert!(project.workflow.groups.is_empty());
    assert!(project.progress.input_values.is_empty());
    assert_eq!(project.workflow.nodes[0].kind, NodeKind::Process);
}

#[test]
fn archive_round_trips_projects_through_bincode() {
    let (mut store, _probe) = memory_store();
    store.select_project("proj-1");
    store.advance().unwrap();

    let archive = ProjectArchive::new(store.projects().to_vec());
    let bytes = archive.to_bytes().unwrap();
    let restored = ProjectArchive::from_bytes(&bytes).unwrap();

    assert_eq!(restored.projects.len(), 1);
    let project = &restored.projects[0];
    assert_eq!(project.id, "proj-1");
    assert_eq!(project.progress.current_node_id, "step-2");
    assert_eq!(
        project.workflow.nodes.len(),
        store.projects()[0].workflow.nodes.len()
    );
}
