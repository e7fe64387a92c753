//! File-based snapshot storage
//!
//! The host keeps the table durable by writing a JSON snapshot after every
//! successful mutation and reading it back on start-up.

use anyhow::Context;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs as async_fs;
use tracing::{debug, info};

use crate::snapshot::ProfileSnapshot;
use crate::store::ProfileStore;

const BACKUP_DIR: &str = "backups";
const BACKUP_SUFFIX: &str = ".json.bak";
const LOCK_SUFFIX: &str = ".lock";
const BACKUP_TIMESTAMP: &str = "%Y%m%d_%H%M%S_%3f";
/// Rendered length of `BACKUP_TIMESTAMP`, e.g. `20260101_120000_123`
const BACKUP_TIMESTAMP_LEN: usize = 19;

/// Snapshot storage configuration
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Snapshot file path
    pub path: PathBuf,
    /// Copy the previous snapshot into `backups/` before overwriting it
    pub backup_on_overwrite: bool,
    /// Number of backups kept; older ones are pruned
    pub max_backups: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("chefbook.json"),
            backup_on_overwrite: true,
            max_backups: 5,
        }
    }
}

impl SnapshotConfig {
    /// Create a new configuration for the snapshot at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set backup on overwrite option
    pub fn with_backup_on_overwrite(mut self, enabled: bool) -> Self {
        self.backup_on_overwrite = enabled;
        self
    }

    /// Set the number of retained backups
    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    /// Directory holding the snapshot
    pub fn snapshot_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Directory holding snapshot backups
    pub fn backup_dir(&self) -> PathBuf {
        self.snapshot_dir().join(BACKUP_DIR)
    }

    /// Sidecar file locked while a host reads or rewrites the snapshot
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("chefbook.json"), ToOwned::to_owned);
        name.push(LOCK_SUFFIX);
        self.path.with_file_name(name)
    }
}

/// Advisory lock on a snapshot's sidecar lock file.
///
/// Held across load, mutate and save so that concurrent hosts sharing one
/// snapshot apply their changes one after another. Released on drop.
#[derive(Debug)]
pub struct SnapshotLock {
    file: File,
    path: PathBuf,
    exclusive: bool,
}

impl SnapshotLock {
    /// Path of the locked sidecar file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this is a writer (exclusive) lock
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }
}

impl Drop for SnapshotLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            debug!(path = ?self.path, error = %e, "Failed to release snapshot lock");
        }
    }
}

/// Snapshot file storage with atomic writes
#[derive(Debug)]
pub struct FileStorage {
    config: SnapshotConfig,
}

impl FileStorage {
    /// Create a new file storage instance
    ///
    /// # Error Recovery
    ///
    /// Creates the snapshot's parent directory if it doesn't exist.
    pub async fn new(config: SnapshotConfig) -> anyhow::Result<Self> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            async_fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create storage directory: {parent:?}"))?;
        }

        Ok(Self { config })
    }

    /// Get the storage configuration
    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Check if the snapshot file exists
    pub fn exists(&self) -> bool {
        self.config.path.exists()
    }

    /// Take the writer lock, waiting for other readers and writers to finish
    pub async fn lock_exclusive(&self) -> anyhow::Result<SnapshotLock> {
        self.acquire_lock(true).await
    }

    /// Take a reader lock, waiting for any writer to finish
    pub async fn lock_shared(&self) -> anyhow::Result<SnapshotLock> {
        self.acquire_lock(false).await
    }

    async fn acquire_lock(&self, exclusive: bool) -> anyhow::Result<SnapshotLock> {
        let path = self.config.lock_path();
        debug!(path = ?path, exclusive, "Waiting for snapshot lock");

        let lock = tokio::task::spawn_blocking(move || -> anyhow::Result<SnapshotLock> {
            let file = OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .truncate(false)
                .open(&path)
                .with_context(|| format!("Failed to open lock file: {path:?}"))?;

            let locked = if exclusive {
                file.lock()
            } else {
                file.lock_shared()
            };
            locked.with_context(|| format!("Failed to lock snapshot: {path:?}"))?;

            Ok(SnapshotLock {
                file,
                path,
                exclusive,
            })
        })
        .await
        .context("Snapshot lock task failed")??;

        debug!(path = ?lock.path, exclusive, "Snapshot lock acquired");
        Ok(lock)
    }

    /// Load the store from the snapshot file.
    ///
    /// A missing file yields an empty store. A snapshot that fails to parse
    /// or holds an invalid record is an error; nothing is partially loaded.
    pub async fn load_store(&self) -> anyhow::Result<ProfileStore> {
        if !self.exists() {
            debug!(path = ?self.config.path, "No snapshot found, starting empty");
            return Ok(ProfileStore::in_memory());
        }

        let json = self.read_to_string(&self.config.path).await?;
        let snapshot = ProfileSnapshot::from_json(&json)
            .with_context(|| format!("Failed to parse snapshot: {:?}", self.config.path))?;
        let store = ProfileStore::from_snapshot(snapshot)
            .with_context(|| format!("Snapshot rejected: {:?}", self.config.path))?;

        info!(path = ?self.config.path, profiles = store.len(), "Snapshot loaded");
        Ok(store)
    }

    /// Write the store's current contents to the snapshot file
    ///
    /// # Error Recovery
    ///
    /// The previous snapshot is backed up first (when enabled) and the new
    /// one is written atomically, so a failed save leaves the old file intact.
    pub async fn save_store(&self, store: &ProfileStore) -> anyhow::Result<()> {
        let snapshot = store.export_snapshot();
        let json = snapshot
            .to_json_pretty()
            .context("Failed to serialize snapshot")?;

        if self.config.backup_on_overwrite && self.exists() {
            self.create_backup(&self.config.path).await?;
            self.prune_backups().await?;
        }

        self.write_atomic(&self.config.path, &json).await?;

        info!(path = ?self.config.path, profiles = snapshot.profiles.len(), "Snapshot saved");
        Ok(())
    }

    /// Write content to a file atomically
    ///
    /// # Error Recovery
    ///
    /// Uses atomic write pattern:
    /// 1. Write to a uniquely named temporary file next to the target
    /// 2. Rename temp file to target
    /// 3. Original file is preserved if write fails
    pub async fn write_atomic(&self, path: &Path, content: &str) -> anyhow::Result<()> {
        debug!(path = ?path, "Writing file atomically");

        let target = path.to_path_buf();
        let content = content.to_owned();
        tokio::task::spawn_blocking(move || write_atomic_blocking(&target, &content))
            .await
            .context("Atomic write task failed")??;

        debug!(path = ?path, "File written successfully");
        Ok(())
    }

    /// Read file content as string
    pub async fn read_to_string(&self, path: &Path) -> anyhow::Result<String> {
        debug!(path = ?path, "Reading file");

        let content = async_fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {path:?}"))?;

        Ok(content)
    }

    /// Create a timestamped backup of a file
    pub async fn create_backup(&self, source: &Path) -> anyhow::Result<PathBuf> {
        let timestamp = chrono::Utc::now().format(BACKUP_TIMESTAMP);
        let backup_path = self
            .config
            .backup_dir()
            .join(format!("{}_{timestamp}{BACKUP_SUFFIX}", self.snapshot_stem()));

        let backup_dir = self.config.backup_dir();
        async_fs::create_dir_all(&backup_dir)
            .await
            .with_context(|| format!("Failed to create backup directory: {backup_dir:?}"))?;

        async_fs::copy(source, &backup_path)
            .await
            .with_context(|| format!("Failed to create backup: {backup_path:?}"))?;

        debug!(source = ?source, backup = ?backup_path, "Backup created");
        Ok(backup_path)
    }

    /// List this snapshot's backups, oldest first
    pub async fn list_backups(&self) -> anyhow::Result<Vec<PathBuf>> {
        let backup_dir = self.config.backup_dir();
        if !backup_dir.exists() {
            return Ok(Vec::new());
        }

        let stem = self.snapshot_stem();
        let mut backups = Vec::new();

        let mut entries = async_fs::read_dir(&backup_dir)
            .await
            .with_context(|| format!("Failed to read directory: {backup_dir:?}"))?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|s| s.to_str())
                && is_backup_of(name, stem)
            {
                backups.push(path);
            }
        }

        // Timestamps sort lexicographically
        backups.sort();
        Ok(backups)
    }

    async fn prune_backups(&self) -> anyhow::Result<()> {
        let backups = self.list_backups().await?;
        let excess = backups.len().saturating_sub(self.config.max_backups);

        for old in backups.iter().take(excess) {
            async_fs::remove_file(old)
                .await
                .with_context(|| format!("Failed to delete backup: {old:?}"))?;
            debug!(backup = ?old, "Old backup pruned");
        }
        Ok(())
    }

    fn snapshot_stem(&self) -> &str {
        self.config
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("chefbook")
    }
}

fn write_atomic_blocking(path: &Path, content: &str) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in: {dir:?}"))?;
    temp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write temp file: {:?}", temp.path()))?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to flush temp file: {:?}", temp.path()))?;
    temp.persist(path)
        .with_context(|| format!("Failed to rename temp file to target: {path:?}"))?;

    Ok(())
}

/// `{stem}_{timestamp}.json.bak`, with nothing else between stem and suffix
fn is_backup_of(file_name: &str, stem: &str) -> bool {
    file_name
        .strip_prefix(stem)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(BACKUP_SUFFIX))
        .is_some_and(is_backup_timestamp)
}

fn is_backup_timestamp(text: &str) -> bool {
    text.len() == BACKUP_TIMESTAMP_LEN
        && text.bytes().enumerate().all(|(i, b)| match i {
            8 | 15 => b == b'_',
            _ => b.is_ascii_digit(),
        })
}
