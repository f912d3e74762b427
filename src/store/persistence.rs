use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::StoreError;
use crate::project::Project;

/// Durability collaborator: a single whole-list write and a whole-list read.
///
/// The in-memory shape *is* the serialization shape; there is no extra
/// encoding or versioning layer. Stale documents from older sessions are
/// tolerated through optional-field defaults on the model types.
pub trait ProjectPersistence {
    fn save_all(&mut self, projects: &[Project]) -> Result<(), StoreError>;
    fn load_all(&mut self) -> Result<Vec<Project>, StoreError>;
}

/// JSON document on local disk, the equivalent of the browser's local
/// storage key.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ProjectPersistence for JsonFileStore {
    fn save_all(&mut self, projects: &[Project]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(projects)
            .map_err(|e| StoreError::Persistence(format!("Serialization failed: {e}")))?;
        fs::write(&self.path, json).map_err(|e| {
            StoreError::Persistence(format!(
                "Could not write '{}': {e}",
                self.path.display()
            ))
        })
    }

    fn load_all(&mut self) -> Result<Vec<Project>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            StoreError::Persistence(format!("Could not read '{}': {e}", self.path.display()))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Persistence(format!("Deserialization failed: {e}")))
    }
}

/// In-process backend. Cloning shares the underlying buffer, which lets a
/// test keep a probe on what the store wrote.
#[derive(Clone, Default)]
pub struct MemoryStore {
    buffer: Rc<RefCell<Vec<Project>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            buffer: Rc::new(RefCell::new(projects)),
        }
    }

    /// The last list written through [`ProjectPersistence::save_all`].
    pub fn stored(&self) -> Vec<Project> {
        self.buffer.borrow().clone()
    }
}

impl ProjectPersistence for MemoryStore {
    fn save_all(&mut self, projects: &[Project]) -> Result<(), StoreError> {
        *self.buffer.borrow_mut() = projects.to_vec();
        Ok(())
    }

    fn load_all(&mut self) -> Result<Vec<Project>, StoreError> {
        Ok(self.buffer.borrow().clone())
    }
}
