use crate::Result;
use crate::backend::{Backend, errors::BackendError};
use std::any::Any;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A backend that stores each key as one file inside a data directory.
///
/// Values are written with plain `fs::write`, matching the durability model
/// of the stores built on top: every mutation rewrites a whole snapshot, so
/// the last complete write wins. The directory is created on open if it does
/// not exist.
///
/// Keys are restricted to alphanumerics, `_`, and `-` so they map directly
/// to file names. Anything else is rejected with
/// [`BackendError::InvalidKey`].
#[derive(Debug)]
pub struct OnDisk {
    root: PathBuf,
}

impl OnDisk {
    /// Opens a backend rooted at the given directory, creating it if needed.
    ///
    /// # Arguments
    /// * `path` - The data directory holding one file per key.
    ///
    /// # Returns
    /// A `Result` containing the backend, or an error if the directory could
    /// not be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let root = path.into();
        fs::create_dir_all(&root).map_err(|source| BackendError::DirectoryUnavailable {
            path: root.clone(),
            source,
        })?;
        debug!(path = %root.display(), "Opened on-disk backend");
        Ok(Self { root })
    }

    /// Returns the data directory this backend reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(BackendError::InvalidKey {
                key: key.to_string(),
            }
            .into());
        }
        Ok(self.root.join(key))
    }
}

impl Backend for OnDisk {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.file_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(BackendError::FileIo {
                key: key.to_string(),
                source,
            }
            .into()),
        }
    }

    fn set(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let path = self.file_for(key)?;
        fs::write(&path, bytes).map_err(|source| {
            BackendError::FileIo {
                key: key.to_string(),
                source,
            }
            .into()
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.file_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(BackendError::FileIo {
                key: key.to_string(),
                source,
            }
            .into()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
