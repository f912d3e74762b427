//! Identity collaborator types.
//!
//! Authentication itself lives outside this crate; the store only needs an
//! opaque identity to attribute history entries and to gate writes. No
//! identity means the project list is treated as empty and read-only.

use serde::{Deserialize, Serialize};

/// An opaque authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Snapshot of the authentication collaborator's state. While `loading` is
/// true the store should not be queried yet.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub identity: Option<Identity>,
    pub loading: bool,
}
