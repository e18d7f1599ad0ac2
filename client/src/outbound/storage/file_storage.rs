//! Directory-backed key/value storage.
//!
//! Each key is one file inside a capability-scoped directory. Writes go to a
//! hidden temporary file that is then renamed over the target, so a reader
//! never observes a partially written value.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::domain::ports::{KeyValueStorage, KeyValueStorageError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Key/value storage persisting one file per key under a directory.
#[derive(Debug)]
pub struct FileKeyValueStorage {
    dir: Dir,
    root: PathBuf,
}

impl FileKeyValueStorage {
    /// Open (creating if needed) the storage directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory cannot be created or opened.
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        std::fs::create_dir_all(root)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self {
            dir,
            root: root.to_path_buf(),
        })
    }

    /// Directory holding the stored values.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl KeyValueStorage for FileKeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStorageError> {
        validate_key(key)?;
        match self.dir.read_to_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(KeyValueStorageError::read(key, error.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStorageError> {
        validate_key(key)?;
        let tmp_name = temp_name(key);

        write_to_temp_file(&self.dir, &tmp_name, value)
            .map_err(|error| KeyValueStorageError::write(key, error.to_string()))?;
        if let Err(error) = rename_over(&self.dir, &tmp_name, key) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(KeyValueStorageError::write(key, error.to_string()));
        }
        sync_directory(&self.dir);

        debug!(key, root = %self.root.display(), "stored value");
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), KeyValueStorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(KeyValueStorageError::invalid_key(key))
    }
}

fn temp_name(key: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{key}.tmp.{}.{suffix}.{counter}", std::process::id())
}

fn write_to_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;

    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    if let Err(error) = written {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(error);
    }
    Ok(())
}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

/// Best effort: a failed directory sync leaves the rename in place.
fn sync_directory(dir: &Dir) {
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
}
