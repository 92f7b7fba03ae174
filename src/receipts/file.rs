//! # Filesystem Receipt Backend
//!
//! One file per receipt, named `<content_hash>.json`. Writes go to a
//! temporary sibling, are fsynced, then renamed into place so a reader
//! never observes a partial record.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::backend::ReceiptBackend;
use super::errors::{ReceiptStoreError, ReceiptStoreResult};
use crate::digest::is_hex_digest;

const EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Filesystem backend rooted at a directory
#[derive(Debug)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open a backend at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> ReceiptStoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record for `key`
    pub fn record_path(&self, key: &str) -> ReceiptStoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, EXTENSION)))
    }
}

/// Keys are used as file names, so only hex digests are accepted
fn validate_key(key: &str) -> ReceiptStoreResult<()> {
    if is_hex_digest(key) {
        Ok(())
    } else {
        Err(ReceiptStoreError::InvalidKey(key.to_string()))
    }
}

fn fsync_dir(path: &Path) -> ReceiptStoreResult<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()?;
    Ok(())
}

impl ReceiptBackend for FileBackend {
    fn put(&self, key: &str, data: &[u8]) -> ReceiptStoreResult<()> {
        let final_path = self.record_path(key)?;
        let temp_path = self.root.join(format!("{}.{}", key, TEMP_EXTENSION));

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(data)?;
            file.sync_all()?;
        }

        if let Err(e) = fs::rename(&temp_path, &final_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        // Directory fsync is best effort on platforms that refuse it
        let _ = fsync_dir(&self.root);
        Ok(())
    }

    fn get(&self, key: &str) -> ReceiptStoreResult<Option<Vec<u8>>> {
        let path = self.record_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, key: &str) -> ReceiptStoreResult<bool> {
        Ok(self.record_path(key)?.is_file())
    }

    fn keys(&self) -> ReceiptStoreResult<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_hex_digest(stem) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
