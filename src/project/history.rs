use serde::{Deserialize, Serialize};

use crate::auth::Identity;

/// Oldest entries are evicted past this many.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// The kind of change an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Create,
    Update,
    Complete,
    Reset,
}

/// One audit entry. This is a display-only trail, not an undo log: no
/// inverse operation is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: u64,
    pub user_id: String,
    #[serde(default)]
    pub user_email: Option<String>,
    pub action: HistoryAction,
    pub details: String,
}

impl HistoryEntry {
    pub fn new(
        id: impl Into<String>,
        timestamp: u64,
        actor: &Identity,
        action: HistoryAction,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            user_id: actor.user_id.clone(),
            user_email: actor.email.clone(),
            action,
            details: details.into(),
        }
    }
}

/// Appends to a bounded ring: past [`MAX_HISTORY_ENTRIES`], the oldest
/// entry is dropped.
pub fn push_bounded(history: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    history.push(entry);
    if history.len() > MAX_HISTORY_ENTRIES {
        let excess = history.len() - MAX_HISTORY_ENTRIES;
        history.drain(..excess);
    }
}
