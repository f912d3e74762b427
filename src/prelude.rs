//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types so a frontend can pull in the
//! whole working set with one `use tejun::prelude::*;`.

// Graph model
pub use crate::workflow::{
    ContentType, DecisionOption, NodeKind, StepContent, SubProcess, WorkflowDefinition,
    WorkflowEdge, WorkflowGroup, WorkflowNode,
};

// Editing
pub use crate::editor::{DecisionOptionsUpdate, GraphEditor, NodeUpdate};

// Progress
pub use crate::progress::UserProgress;

// Projects and storage
pub use crate::project::{HistoryAction, HistoryEntry, Project, ProjectCategory};
pub use crate::store::{
    JsonFileStore, MemoryStore, ProjectArchive, ProjectPersistence, ProjectStore, SyncConflict,
};

// Collaborators
pub use crate::auth::{AuthState, Identity};

// Rendering projection
pub use crate::layout::{DiagramLayout, EdgeRouting, NodeStatus};

// Error types
pub use crate::error::{EditError, StoreError};
