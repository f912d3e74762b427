//! The project collection, its current-project selector, and durability.
//!
//! The store owns every [`Project`] for the signed-in user and routes all
//! mutations through one path that stamps the project (timestamp and
//! revision), appends a bounded audit entry, and pushes a best-effort
//! whole-list snapshot to the persistence collaborator. State is updated
//! optimistically; a failed write is neither surfaced nor retried, the next
//! successful write catches up.

pub mod archive;
pub mod persistence;

pub use archive::*;
pub use persistence::*;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::auth::Identity;
use crate::data::default_workflow;
use crate::editor::{GraphEditor, NodeUpdate, next_sequence};
use crate::error::{EditError, StoreError};
use crate::project::{HistoryAction, HistoryEntry, Project, ProjectCategory, push_bounded};
use crate::workflow::NodeKind;

/// A concurrent-write collision detected while applying a remote snapshot:
/// the local copy carries edits the incoming copy does not. Reported, never
/// resolved; the incoming list still wins wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConflict {
    pub project_id: String,
    pub local_revision: u64,
    pub remote_revision: u64,
}

pub struct ProjectStore {
    projects: Vec<Project>,
    current_id: Option<String>,
    identity: Option<Identity>,
    backend: Option<Box<dyn ProjectPersistence>>,
}

impl ProjectStore {
    /// An in-memory store with no durability backend.
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            projects: Vec::new(),
            current_id: None,
            identity,
            backend: None,
        }
    }

    /// Loads the project list from the backend. Without an identity the
    /// list stays empty and read-only; with one, a fresh (empty) account is
    /// seeded with the built-in example procedure.
    pub fn with_backend(
        identity: Option<Identity>,
        mut backend: Box<dyn ProjectPersistence>,
    ) -> Result<Self, StoreError> {
        let projects = if identity.is_some() {
            backend.load_all()?
        } else {
            Vec::new()
        };
        let mut store = Self {
            projects,
            current_id: None,
            identity,
            backend: Some(backend),
        };
        if store.projects.is_empty() && store.identity.is_some() {
            store.create_project("Default project", Some("Built-in example procedure"))?;
        }
        Ok(store)
    }

    // --- Read access ---

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn current_project_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn current_project(&self) -> Option<&Project> {
        let id = self.current_id.as_deref()?;
        self.find_project(id)
    }

    // --- Project lifecycle ---

    /// Creates a project over the built-in default workflow. Returns its id.
    pub fn create_project(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<String, StoreError> {
        let workflow = default_workflow();
        self.insert_project(name, description, workflow, false, None, "Created project")
    }

    /// Deep-copies an existing project's workflow into a new project with
    /// fresh progress and history. Unknown source id is a no-op.
    pub fn duplicate_project(&mut self, source_id: &str) -> Result<Option<String>, StoreError> {
        let Some(source) = self.find_project(source_id).cloned() else {
            return Ok(None);
        };
        let name = format!("{} (copy)", source.name);
        let id = self.insert_project(
            &name,
            source.description.as_deref(),
            source.workflow,
            source.is_template,
            None,
            "Duplicated project",
        )?;
        Ok(Some(id))
    }

    /// Instantiates an active project from a template, stamping the
    /// `templateId` back-reference. Non-template or unknown ids are no-ops.
    pub fn create_from_template(
        &mut self,
        template_id: &str,
        name: &str,
    ) -> Result<Option<String>, StoreError> {
        let Some(template) = self
            .find_project(template_id)
            .filter(|p| p.is_template)
            .cloned()
        else {
            return Ok(None);
        };
        let id = self.insert_project(
            name,
            template.description.as_deref(),
            template.workflow,
            false,
            Some(template_id.to_string()),
            "Instantiated from template",
        )?;
        Ok(Some(id))
    }

    /// Saves a copy of an existing project as a reusable template.
    pub fn save_as_template(
        &mut self,
        source_id: &str,
        name: &str,
    ) -> Result<Option<String>, StoreError> {
        let Some(source) = self.find_project(source_id).cloned() else {
            return Ok(None);
        };
        let id = self.insert_project(
            name,
            source.description.as_deref(),
            source.workflow,
            true,
            None,
            "Saved as template",
        )?;
        Ok(Some(id))
    }

    /// Irreversible. The caller is expected to have confirmed with the user.
    pub fn delete_project(&mut self, id: &str) -> Result<(), StoreError> {
        self.require_identity()?;
        self.projects.retain(|p| p.id != id);
        if self.current_id.as_deref() == Some(id) {
            self.current_id = None;
        }
        self.persist();
        Ok(())
    }

    pub fn update_project_meta(
        &mut self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
        category: Option<ProjectCategory>,
    ) -> Result<(), StoreError> {
        let actor = self.require_identity()?;
        let Some(index) = self.projects.iter().position(|p| p.id == id) else {
            return Ok(());
        };
        let project = &mut self.projects[index];
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(EditError::EmptyTitle { entity: "project" }.into());
            }
            project.name = name.to_string();
        }
        if let Some(description) = description {
            project.description = Some(description.to_string());
        }
        if let Some(category) = category {
            project.category = Some(category);
        }
        self.finalize(index, &actor, Some((HistoryAction::Update, "Updated project metadata".to_string())));
        Ok(())
    }

    /// Sets the "currently open" pointer. Does not validate the id or touch
    /// the stored list.
    pub fn select_project(&mut self, id: &str) {
        self.current_id = Some(id.to_string());
    }

    pub fn close_project(&mut self) {
        self.current_id = None;
    }

    // --- Structural edits on the open project ---

    pub fn add_node(&mut self, title: &str, kind: NodeKind) -> Result<Option<String>, StoreError> {
        self.mutate_current(|project| {
            let id = GraphEditor::new(&mut project.workflow).add_node(title, kind)?;
            let log = (HistoryAction::Update, format!("Added node '{id}'"));
            Ok((id, Some(log)))
        })
    }

    pub fn update_node(&mut self, id: &str, update: NodeUpdate) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            GraphEditor::new(&mut project.workflow).update_node(id, update);
            let log = (HistoryAction::Update, format!("Updated node '{id}'"));
            Ok(((), Some(log)))
        })
        .map(|_| ())
    }

    /// Irreversible. The caller is expected to have confirmed with the user.
    pub fn delete_node(&mut self, id: &str) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            GraphEditor::new(&mut project.workflow).delete_node(id);
            let log = (HistoryAction::Update, format!("Deleted node '{id}'"));
            Ok(((), Some(log)))
        })
        .map(|_| ())
    }

    pub fn add_group(
        &mut self,
        title: &str,
        start_id: &str,
        end_id: &str,
        color: Option<String>,
    ) -> Result<Option<String>, StoreError> {
        self.mutate_current(|project| {
            let id =
                GraphEditor::new(&mut project.workflow).add_group(title, start_id, end_id, color)?;
            let log = (HistoryAction::Update, format!("Added group '{id}'"));
            Ok((id, Some(log)))
        })
    }

    pub fn update_group(
        &mut self,
        id: &str,
        title: Option<String>,
        color: Option<String>,
    ) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            GraphEditor::new(&mut project.workflow).update_group(id, title, color);
            let log = (HistoryAction::Update, format!("Updated group '{id}'"));
            Ok(((), Some(log)))
        })
        .map(|_| ())
    }

    /// Member nodes survive; only the grouping is removed.
    pub fn delete_group(&mut self, id: &str) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            GraphEditor::new(&mut project.workflow).delete_group(id);
            let log = (HistoryAction::Update, format!("Deleted group '{id}'"));
            Ok(((), Some(log)))
        })
        .map(|_| ())
    }

    // --- Progress on the open project ---

    /// Cursor-only move; stamps the project but logs no audit entry.
    pub fn set_current_node(&mut self, node_id: &str) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            project.progress.set_current_node(node_id);
            Ok(((), None))
        })
        .map(|_| ())
    }

    pub fn complete_step(&mut self, sub_process_id: &str) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            project.progress.complete_step(sub_process_id);
            let log = (
                HistoryAction::Complete,
                format!("Completed step '{sub_process_id}'"),
            );
            Ok(((), Some(log)))
        })
        .map(|_| ())
    }

    pub fn check_content(&mut self, content_id: &str, checked: bool) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            project.progress.check_content(content_id, checked);
            Ok(((), None))
        })
        .map(|_| ())
    }

    pub fn set_input(&mut self, content_id: &str, value: &str) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            project.progress.set_input(content_id, value);
            Ok(((), None))
        })
        .map(|_| ())
    }

    /// "Next": completes the current node's sub-processes and follows the
    /// first outgoing edge, if any.
    pub fn advance(&mut self) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            let from = project.progress.current_node_id.clone();
            project.progress.advance(&project.workflow);
            let log = (HistoryAction::Complete, format!("Advanced from '{from}'"));
            Ok(((), Some(log)))
        })
        .map(|_| ())
    }

    /// Takes a decision option, jumping straight to its target.
    pub fn choose_branch(&mut self, target_node_id: &str) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            project.progress.choose_branch(&project.workflow, target_node_id);
            let log = (
                HistoryAction::Complete,
                format!("Chose branch to '{target_node_id}'"),
            );
            Ok(((), Some(log)))
        })
        .map(|_| ())
    }

    /// Back navigation; completion history is untouched, nothing is logged.
    pub fn go_back(&mut self) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            project.progress.go_back(&project.workflow);
            Ok(((), None))
        })
        .map(|_| ())
    }

    pub fn reset_progress(&mut self) -> Result<(), StoreError> {
        self.mutate_current(|project| {
            project.progress.reset(&project.workflow);
            let log = (HistoryAction::Reset, "Progress reset".to_string());
            Ok(((), Some(log)))
        })
        .map(|_| ())
    }

    // --- Remote synchronization ---

    /// Applies a push-style remote snapshot: last-writer-wins at whole-list
    /// granularity. Before the overwrite, per-project revision stamps are
    /// compared and collisions (local copy ahead of the incoming one) are
    /// reported back so a caller can at least tell the user.
    pub fn apply_remote(&mut self, incoming: Vec<Project>) -> Vec<SyncConflict> {
        let conflicts: Vec<SyncConflict> = self
            .projects
            .iter()
            .filter_map(|local| {
                let remote = incoming.iter().find(|r| r.id == local.id)?;
                (remote.revision < local.revision).then(|| SyncConflict {
                    project_id: local.id.clone(),
                    local_revision: local.revision,
                    remote_revision: remote.revision,
                })
            })
            .collect();

        self.projects = incoming;
        if let Some(id) = self.current_id.as_deref()
            && self.find_project(id).is_none()
        {
            self.current_id = None;
        }
        conflicts
    }

    // --- Internals ---

    fn require_identity(&self) -> Result<Identity, StoreError> {
        self.identity.clone().ok_or(StoreError::ReadOnly)
    }

    fn insert_project(
        &mut self,
        name: &str,
        description: Option<&str>,
        workflow: crate::workflow::WorkflowDefinition,
        is_template: bool,
        template_id: Option<String>,
        log_details: &str,
    ) -> Result<String, StoreError> {
        let actor = self.require_identity()?;
        if name.trim().is_empty() {
            return Err(EditError::EmptyTitle { entity: "project" }.into());
        }
        let seq = next_sequence(self.projects.iter().map(|p| p.id.as_str()), "proj-");
        let id = format!("proj-{seq}");
        let now = now_ms();
        let mut project = Project::new(&id, name, workflow, now);
        project.description = description.map(str::to_string);
        project.is_template = is_template;
        project.template_id = template_id;
        push_bounded(
            &mut project.history,
            HistoryEntry::new(
                format!("h-0-{now}"),
                now,
                &actor,
                HistoryAction::Create,
                format!("{log_details} '{name}'"),
            ),
        );
        self.projects.push(project);
        self.persist();
        Ok(id)
    }

    /// Single mutation path for the open project. No open project is a
    /// silent no-op; no identity is an error.
    fn mutate_current<R>(
        &mut self,
        f: impl FnOnce(&mut Project) -> Result<(R, Option<(HistoryAction, String)>), StoreError>,
    ) -> Result<Option<R>, StoreError> {
        let actor = self.require_identity()?;
        let Some(index) = self
            .current_id
            .as_deref()
            .and_then(|id| self.projects.iter().position(|p| p.id == id))
        else {
            return Ok(None);
        };
        let (value, log) = f(&mut self.projects[index])?;
        self.finalize(index, &actor, log);
        Ok(Some(value))
    }

    /// Stamps the project, appends the audit entry if one was produced, and
    /// pushes the snapshot.
    fn finalize(
        &mut self,
        index: usize,
        actor: &Identity,
        log: Option<(HistoryAction, String)>,
    ) {
        let now = now_ms();
        let project = &mut self.projects[index];
        project.updated_at = now;
        project.revision += 1;
        if let Some((action, details)) = log {
            let entry_id = format!("h-{}-{now}", project.revision);
            push_bounded(
                &mut project.history,
                HistoryEntry::new(entry_id, now, actor, action, details),
            );
        }
        self.persist();
    }

    /// Best-effort snapshot write. Failures are swallowed: local state stays
    /// ahead of storage until the next successful write.
    fn persist(&mut self) {
        if let Some(backend) = self.backend.as_mut() {
            let _ = backend.save_all(&self.projects);
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
