//! # Tejun - Laboratory Procedure Workflow Tracker
//!
//! **Tejun** models step-by-step laboratory procedures as a directed
//! flowchart of process and decision nodes. Users walk the flowchart,
//! mark steps complete, branch on decisions, and edit the structure while
//! the library keeps the edge set consistent with sequential order and
//! decision options.
//!
//! ## Core Pieces
//!
//! 1.  **Workflow graph** ([`workflow`]): nodes, edges and groups, plus the
//!     read-only traversal queries (sequential successor, main-flow edge
//!     detection, incoming/outgoing edges).
//! 2.  **Graph editor** ([`editor`]): the only writer. Adding a node wires
//!     it onto the main flow; changing a decision node's options rebuilds
//!     its outgoing edges; deleting a mid-chain node splices the chain back
//!     together.
//! 3.  **Progress tracker** ([`progress`]): a cursor plus idempotent
//!     completion and check sets, independent of structural edits.
//! 4.  **Project store** ([`store`]): named (workflow, progress) pairs with
//!     a bounded audit history, revision stamps for conflict detection, and
//!     pluggable persistence.
//!
//! ## Quick Start
//!
//! ```rust
//! use tejun::prelude::*;
//!
//! fn main() -> Result<(), StoreError> {
//!     // A store backed by an in-memory collaborator; real frontends pass
//!     // a JsonFileStore or their own ProjectPersistence implementation.
//!     let identity = Identity::new("user-1").with_email("user@example.com");
//!     let mut store = ProjectStore::with_backend(
//!         Some(identity),
//!         Box::new(MemoryStore::new()),
//!     )?;
//!
//!     // A fresh backend is seeded with the built-in example procedure.
//!     let project_id = store.projects()[0].id.clone();
//!     store.select_project(&project_id);
//!
//!     // Walk the procedure.
//!     store.advance()?;
//!     store.advance()?;
//!
//!     // Edit the structure: append a step and group the first three.
//!     store.add_node("8. Report", NodeKind::Process)?;
//!     store.add_group("Preparation", "step-1", "step-3", None)?;
//!
//!     // Derive a renderable diagram.
//!     let project = store.current_project().expect("project is open");
//!     let layout = DiagramLayout::project(&project.workflow, &project.progress);
//!     println!("{} nodes placed", layout.nodes.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod data;
pub mod editor;
pub mod error;
pub mod layout;
pub mod prelude;
pub mod progress;
pub mod project;
pub mod store;
pub mod workflow;
