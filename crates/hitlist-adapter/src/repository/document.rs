//! Document - One JSON file behind one lock
//!
//! Every mutation happens under the write lock and, when the document is
//! backed by a file, is flushed to disk before the lock is released. A
//! failed flush rolls the in-memory copy back so memory and disk agree.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use hitlist_domain::RepositoryError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

#[derive(Debug)]
pub struct Document<T> {
    name: &'static str,
    path: Option<PathBuf>,
    data: RwLock<T>,
}

impl<T> Document<T>
where
    T: Serialize + DeserializeOwned + Default + Clone + PartialEq,
{
    /// Memory-only document, gone at shutdown
    pub fn in_memory(name: &'static str) -> Self {
        Self {
            name,
            path: None,
            data: RwLock::new(T::default()),
        }
    }

    /// Load `<dir>/<name>`, starting empty if the file is missing or blank
    pub fn open(dir: &Path, name: &'static str) -> Result<Self, RepositoryError> {
        let path = dir.join(name);
        let data = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => T::default(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                RepositoryError::PersistenceError {
                    message: format!("{} is not valid: {}", name, e),
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => T::default(),
            Err(e) => {
                return Err(RepositoryError::PersistenceError {
                    message: format!("Failed to read {}: {}", name, e),
                })
            }
        };
        debug!(document = name, path = %path.display(), "document loaded");

        Ok(Self {
            name,
            path: Some(path),
            data: RwLock::new(data),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<'_, T>, RepositoryError> {
        self.data
            .read()
            .map_err(|_| RepositoryError::ConcurrencyError {
                document: self.name.to_string(),
            })
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, T>, RepositoryError> {
        self.data
            .write()
            .map_err(|_| RepositoryError::ConcurrencyError {
                document: self.name.to_string(),
            })
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Result<R, RepositoryError> {
        let data = self.read_lock()?;
        Ok(f(&data))
    }

    /// Read-modify-write in one critical section
    ///
    /// Nothing is written when `f` leaves the document unchanged.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, RepositoryError> {
        let mut data = self.write_lock()?;
        let before = data.clone();
        let result = f(&mut data);

        if *data != before {
            if let Err(e) = self.flush(&data) {
                *data = before;
                return Err(e);
            }
        }
        Ok(result)
    }

    fn flush(&self, data: &T) -> Result<(), RepositoryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_vec_pretty(data).map_err(|e| self.flush_error("encode", e))?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|e| self.flush_error("write", e))?;
        fs::rename(&staging, path).map_err(|e| self.flush_error("replace", e))?;
        Ok(())
    }

    fn flush_error(&self, what: &str, e: impl std::fmt::Display) -> RepositoryError {
        RepositoryError::PersistenceError {
            message: format!("Failed to {} {}: {}", what, self.name, e),
        }
    }
}
