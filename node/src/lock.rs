//! Exclusive ownership of a data directory.
//!
//! Only one process may drive an election at a time. The lock is an
//! `flock(LOCK_EX | LOCK_NB)` on `<data_dir>/oig.lock`, released when the
//! guard is dropped or the process exits.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::NodeError;

const LOCK_FILE: &str = "oig.lock";

/// Held for as long as the process owns the data directory.
#[derive(Debug)]
pub struct DataDirLock {
    path: PathBuf,
    _file: File,
}

impl DataDirLock {
    /// Take the lock without waiting. Fails with [`NodeError::Locked`] when
    /// another holder exists.
    pub fn acquire(data_dir: &Path) -> Result<Self, NodeError> {
        std::fs::create_dir_all(data_dir)?;
        let path = data_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;

        if !try_flock_exclusive(&file)? {
            return Err(NodeError::Locked(data_dir.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), "data directory locked");
        Ok(Self { path, _file: file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn try_flock_exclusive(file: &File) -> io::Result<bool> {
    #[cfg(unix)]
    {
        use std::os::unix::io::AsRawFd;
        // SAFETY: the descriptor is owned by `file` and stays open for the call.
        let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
        if result == 0 {
            return Ok(true);
        }
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::WouldBlock || err.raw_os_error() == Some(libc::EWOULDBLOCK)
        {
            return Ok(false);
        }
        Err(err)
    }
    #[cfg(not(unix))]
    {
        let _ = file;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn second_holder_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let first = DataDirLock::acquire(dir.path()).unwrap();
        assert!(first.path().ends_with(LOCK_FILE));

        let second = DataDirLock::acquire(dir.path());
        assert!(matches!(second, Err(NodeError::Locked(_))));
    }

    #[test]
    fn lock_is_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        drop(DataDirLock::acquire(dir.path()).unwrap());
        assert!(DataDirLock::acquire(dir.path()).is_ok());
    }
}
