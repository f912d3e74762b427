use thiserror::Error;

/// Validation errors raised at the edit boundary.
///
/// These abort the operation with no partial mutation applied. Referential
/// misses (unknown node or edge ids) are deliberately *not* errors: the
/// editor treats them as silent no-ops, since selection UIs only offer ids
/// taken from the current node list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("A {entity} title must not be empty")]
    EmptyTitle { entity: &'static str },

    #[error(
        "Group range is reversed: start node '{start_id}' (index {start_index}) comes after end node '{end_id}' (index {end_index})"
    )]
    ReversedGroupRange {
        start_id: String,
        start_index: usize,
        end_id: String,
        end_index: usize,
    },

    #[error("Group endpoint node '{node_id}' was not found in the workflow")]
    GroupEndpointNotFound { node_id: String },
}

/// Errors surfaced by the project store and its persistence collaborators.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("The project store is read-only: no authenticated identity")]
    ReadOnly,

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Archive failed: {0}")]
    Archive(String),
}
