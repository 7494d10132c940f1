//! Write-through site snapshot on disk.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::snapshot::SiteSnapshot;
use super::types::{Field, FieldDefinition, FieldReference, PostId};
use super::FieldStore;
use crate::files::backup::create_backup;

/// A `SiteSnapshot` bound to its file.
///
/// Every change is written back before the mutating call returns, so by the
/// time a step reports success its data is on disk. A missing file is only
/// an error once an upgrade tries to read it.
#[derive(Debug)]
pub struct SiteFile {
    path: PathBuf,
    snapshot: Option<SiteSnapshot>,
    backup: bool,
    backed_up: bool,
}

impl SiteFile {
    pub fn open(path: impl AsRef<Path>, backup: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = if path.exists() {
            Some(SiteSnapshot::load(&path)?)
        } else {
            debug!(path = %path.display(), "site snapshot not found");
            None
        };
        Ok(Self {
            path,
            snapshot,
            backup,
            backed_up: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&SiteSnapshot> {
        self.snapshot.as_ref()
    }

    fn loaded(&self) -> Result<&SiteSnapshot> {
        self.snapshot
            .as_ref()
            .with_context(|| format!("Site snapshot not found: {}", self.path.display()))
    }

    fn loaded_mut(&mut self) -> Result<&mut SiteSnapshot> {
        let path = &self.path;
        self.snapshot
            .as_mut()
            .with_context(|| format!("Site snapshot not found: {}", path.display()))
    }

    fn write_back(&mut self) -> Result<()> {
        if !self.loaded()?.is_dirty() {
            return Ok(());
        }
        if self.backup && !self.backed_up {
            if create_backup(&self.path)? {
                info!(path = %self.path.display(), "backed up site snapshot");
            }
            self.backed_up = true;
        }
        let path = self.path.clone();
        self.loaded_mut()?.save(&path)
    }
}

impl FieldStore for SiteFile {
    fn field_references(&self) -> Result<Vec<FieldReference>> {
        self.loaded()?.field_references()
    }

    fn field_object(&self, reference: &FieldReference) -> Result<Option<Field>> {
        self.loaded()?.field_object(reference)
    }

    fn post_title(&self, post_id: PostId) -> Result<Option<String>> {
        self.loaded()?.post_title(post_id)
    }

    fn update_field(&mut self, definition: &FieldDefinition) -> Result<()> {
        self.loaded_mut()?.update_field(definition)?;
        self.write_back()
    }

    fn update_metadata_helpers(
        &mut self,
        values: &[Value],
        post_id: PostId,
        field: &Field,
    ) -> Result<bool> {
        let changed = self
            .loaded_mut()?
            .update_metadata_helpers(values, post_id, field)?;
        self.write_back()?;
        Ok(changed)
    }
}
