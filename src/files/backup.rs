//! Backup utilities for site snapshots.
//!
//! A snapshot is copied to `<file>.bak` before the first upgrade touches it,
//! so a bad fixup can be rolled back by hand.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::atomic::temp_path_for;

/// Get the backup path for a given file.
///
/// The backup path is the original path with `.bak` appended.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    PathBuf::from(backup)
}

/// Check if a backup exists for the given file.
pub fn has_backup(path: &Path) -> bool {
    backup_path_for(path).exists()
}

/// Create a backup of the given file if one doesn't already exist.
///
/// Returns `Ok(true)` if a new backup was created, `Ok(false)` if one already
/// existed or there is nothing to back up.
pub fn create_backup(path: &Path) -> Result<bool> {
    let backup = backup_path_for(path);
    if backup.exists() || !path.exists() {
        return Ok(false);
    }
    fs::copy(path, &backup)
        .with_context(|| format!("Failed to create backup: {}", backup.display()))?;
    Ok(true)
}

/// Restore a file from its backup and delete the backup.
pub fn restore_from_backup(path: &Path) -> Result<()> {
    let backup = backup_path_for(path);

    if !backup.exists() {
        anyhow::bail!("No backup exists for: {}", path.display());
    }

    let temp_path = temp_path_for(path);

    fs::copy(&backup, &temp_path)
        .with_context(|| format!("Failed to copy backup to temp file: {}", backup.display()))?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e)
            .with_context(|| format!("Failed to restore from backup: {}", path.display()));
    }

    let _ = fs::remove_file(&backup);

    Ok(())
}
