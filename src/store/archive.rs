use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::StoreError;
use crate::project::Project;

/// A compact binary export of one or more projects, for moving a procedure
/// between machines without going through the JSON document store.
#[derive(Serialize, Deserialize)]
pub struct ProjectArchive {
    pub projects: Vec<Project>,
}

impl ProjectArchive {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        encode_to_vec(self, standard())
            .map_err(|e| StoreError::Archive(format!("Serialization failed: {e}")))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        decode_from_slice(bytes, standard())
            .map(|(archive, _)| archive)
            .map_err(|e| StoreError::Archive(format!("Deserialization failed: {e}")))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, bytes).map_err(|e| {
            StoreError::Archive(format!("Could not write '{}': {e}", path.display()))
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            StoreError::Archive(format!("Could not read '{}': {e}", path.display()))
        })?;
        Self::from_bytes(&bytes)
    }
}
