//! Single-writer lock for the data directory.
//!
//! Only one process may run a writing command (`write`, `import`) against a
//! journal at a time. The lock is an advisory exclusive lock on a sidecar
//! file, released when the guard is dropped or the process exits.

use crate::errors::{AppResult, LockError};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Guard holding the exclusive writer lock.
#[derive(Debug)]
pub struct WriterLock {
    file: File,
    path: PathBuf,
}

impl WriterLock {
    /// Tries to take the writer lock at `path` without blocking.
    ///
    /// # Errors
    ///
    /// - `LockError::DatabaseBusy` if another process holds the lock
    /// - `LockError::AcquisitionFailed` if the lock file cannot be opened or locked
    pub fn acquire(path: &Path) -> AppResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.to_path_buf(),
                source,
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!("Acquired writer lock {:?}", path);
                Ok(WriterLock {
                    file,
                    path: path.to_path_buf(),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock
                || e.raw_os_error() == fs2::lock_contended_error().raw_os_error() =>
            {
                Err(LockError::DatabaseBusy {
                    path: path.to_path_buf(),
                }
                .into())
            }
            Err(source) => Err(LockError::AcquisitionFailed {
                path: path.to_path_buf(),
                source,
            }
            .into()),
        }
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WriterLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release writer lock {:?}: {}", self.path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use tempfile::tempdir;

    #[test]
    fn test_second_writer_is_rejected() {
        let dir = tempdir().unwrap();
        let lock_path = dir.path().join("journal.db.lock");

        let first = WriterLock::acquire(&lock_path).unwrap();
        assert_eq!(first.path(), lock_path.as_path());

        match WriterLock::acquire(&lock_path) {
            Err(AppError::Lock(LockError::DatabaseBusy { path })) => assert_eq!(path, lock_path),
            other => panic!("Expected DatabaseBusy, got {:?}", other),
        }
    }

    #[test]
    fn test_lock_released_on_drop() {
        let dir = tempdir().unwrap();
        let lock_path = dir.path().join("journal.db.lock");

        let first = WriterLock::acquire(&lock_path).unwrap();
        drop(first);

        assert!(WriterLock::acquire(&lock_path).is_ok());
    }

    #[test]
    fn test_missing_directory_fails_acquisition() {
        let dir = tempdir().unwrap();
        let lock_path = dir.path().join("missing").join("journal.db.lock");

        assert!(matches!(
            WriterLock::acquire(&lock_path),
            Err(AppError::Lock(LockError::AcquisitionFailed { .. }))
        ));
    }
}
