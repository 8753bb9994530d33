//! File locking and atomic writes for the table files.
//!
//! Every mutation rewrites a whole table file. The lock + temp-file-rename
//! pattern here guarantees a reader never observes a half-written table.
//! It deliberately does NOT serialize read-modify-write cycles: two sessions
//! that both load, edit, and save still end with the second save overwriting
//! the first (last writer wins). That race is a documented property of the
//! tool, not something this module prevents.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;

use crate::error::{Error, Result};

/// Default lock timeout in milliseconds
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

/// Retry interval while waiting for a contended lock
const LOCK_RETRY_INTERVAL_MS: u64 = 50;

fn is_lock_contended(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::WouldBlock {
        return true;
    }

    // Windows surfaces sharing violations as "Other"; treat as contention so
    // callers get Err(LockFailed) after the timeout instead of a raw IO error.
    #[cfg(windows)]
    {
        matches!(err.raw_os_error(), Some(32) | Some(33))
    }
    #[cfg(not(windows))]
    {
        false
    }
}

/// An exclusive flock guard, released on drop
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Acquire an exclusive lock, creating the lock file if needed.
    /// Fails with [`Error::LockFailed`] once the timeout elapses.
    pub fn acquire(path: impl AsRef<Path>, timeout_ms: u64) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let start = Instant::now();
        let timeout = Duration::from_millis(timeout_ms);
        let retry_interval = Duration::from_millis(LOCK_RETRY_INTERVAL_MS);

        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    return Ok(FileLock {
                        file,
                        path: path.to_path_buf(),
                    });
                }
                Err(e) if is_lock_contended(&e) => {
                    if start.elapsed() >= timeout {
                        return Err(Error::LockFailed(path.to_path_buf()));
                    }
                    std::thread::sleep(retry_interval);
                }
                Err(e) => {
                    return Err(Error::Io(e));
                }
            }
        }
    }

    /// Try to acquire without waiting; `Ok(None)` when already held
    pub fn try_acquire(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(FileLock {
                file,
                path: path.to_path_buf(),
            })),
            Err(e) if is_lock_contended(&e) => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

/// Write data via temp file + rename so the target is never seen half-written
pub fn write_atomic(path: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Temp file in the same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension(format!(
        "{}.tmp.{}",
        path.extension().and_then(|e| e.to_str()).unwrap_or(""),
        std::process::id()
    ));

    let mut temp_file = File::create(&temp_path)?;
    temp_file.write_all(data)?;
    temp_file.sync_all()?;
    drop(temp_file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Write a table file atomically while holding `<path>.lock`
pub fn write_atomic_locked(path: impl AsRef<Path>, data: &[u8], timeout_ms: u64) -> Result<()> {
    let path = path.as_ref();
    let lock_path = PathBuf::from(format!("{}.lock", path.display()));

    let _lock = FileLock::acquire(&lock_path, timeout_ms)?;
    write_atomic(path, data)?;

    Ok(())
}

/// Read a whole file as a string while holding `<path>.lock`
pub fn read_locked_str(path: impl AsRef<Path>, timeout_ms: u64) -> Result<String> {
    let path = path.as_ref();
    let lock_path = PathBuf::from(format!("{}.lock", path.display()));

    let _lock = FileLock::acquire(&lock_path, timeout_ms)?;
    let data = fs::read_to_string(path)?;

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn lock_is_exclusive_until_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("tasks.json.lock");

        let lock = FileLock::acquire(&lock_path, 1000).unwrap();
        assert!(FileLock::try_acquire(&lock_path).unwrap().is_none());

        drop(lock);
        assert!(FileLock::try_acquire(&lock_path).unwrap().is_some());
    }

    #[test]
    fn timeout_returns_lock_failed() {
        let temp_dir = TempDir::new().unwrap();
        let lock_path = temp_dir.path().join("tasks.json.lock");

        let _lock = FileLock::acquire(&lock_path, 1000).unwrap();
        let result = FileLock::acquire(&lock_path, 50);
        assert!(matches!(result, Err(Error::LockFailed(_))));
    }

    #[test]
    fn atomic_write_replaces_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tasks.json");

        write_atomic(&file_path, b"{\"columns\":[],\"rows\":[]}").unwrap();
        write_atomic(&file_path, b"updated").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "updated");
    }

    #[test]
    fn concurrent_locked_writes_leave_one_complete_payload() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("tasks.json");

        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));
        let mut handles = Vec::with_capacity(threads);
        let mut expected = Vec::with_capacity(threads);

        for idx in 0..threads {
            let barrier = Arc::clone(&barrier);
            let file_path = file_path.clone();
            let payload = format!("{{\"writer\":{},\"data\":\"{}\"}}", idx, "x".repeat(64));
            expected.push(payload.clone());

            handles.push(thread::spawn(move || {
                barrier.wait();
                write_atomic_locked(&file_path, payload.as_bytes(), 2000).unwrap();
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        // Whichever writer went last, the file holds exactly one full payload.
        let final_contents = fs::read_to_string(&file_path).unwrap();
        assert!(expected.contains(&final_contents));
    }
}
