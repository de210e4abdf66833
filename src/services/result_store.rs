use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{domain::Snapshot, error::PersistenceError};

/// Single JSON document holding the latest snapshot. Every save overwrites it.
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResultStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| PersistenceError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let contents =
            serde_json::to_vec_pretty(snapshot).map_err(|source| PersistenceError::Encode {
                path: self.path.clone(),
                source,
            })?;

        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|source| PersistenceError::Write {
                path: self.path.clone(),
                source,
            })?;

        log::info!(
            "Saved {} records to {}",
            snapshot.data.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Missing file means nothing was saved yet, which is not an error.
    pub async fn load(&self) -> Result<Snapshot, PersistenceError> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Snapshot::default()),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&contents).map_err(|source| PersistenceError::Decode {
            path: self.path.clone(),
            source,
        })
    }
}
