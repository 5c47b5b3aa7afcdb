//! Registry linker/unlinker: read, transform, write back only on change.

use std::path::Path;

use tracing::{info, warn};

use crate::{
    application::{ports::Filesystem, services::StepReport},
    domain::{
        LinkOutcome, RegistryEntry, UnlinkOutcome,
        registry::{link, unlink},
    },
    error::GrafterResult,
};

pub struct RegistryLinker<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> RegistryLinker<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Register `entry` in the registry at `path`.
    pub fn link(&self, step: &str, path: &Path, entry: &RegistryEntry) -> GrafterResult<StepReport> {
        if !self.filesystem.exists(path) {
            warn!(path = %path.display(), "Registry not found, not linking");
            return Ok(StepReport::skipped(step, format!("{} not found", path.display())));
        }

        let content = self.filesystem.read_to_string(path)?;
        match link(&content, entry)? {
            LinkOutcome::Linked(updated) => {
                self.filesystem.write_file(path, &updated)?;
                info!(key = %entry.key, path = %path.display(), "Linked");
                Ok(StepReport::applied(step).with_detail(entry.key.clone()))
            }
            LinkOutcome::AlreadyLinked => {
                info!(key = %entry.key, path = %path.display(), "Already linked");
                Ok(StepReport::unchanged(step).with_detail(format!("{} already linked", entry.key)))
            }
        }
    }

    /// Comment out the legacy registration of `unit` in the registry at `path`.
    pub fn unlink(&self, step: &str, path: &Path, unit: &str) -> GrafterResult<StepReport> {
        if !self.filesystem.exists(path) {
            warn!(path = %path.display(), "Legacy registry not found, not unlinking");
            return Ok(StepReport::skipped(step, format!("{} not found", path.display())));
        }

        let content = self.filesystem.read_to_string(path)?;
        match unlink(&content, unit)? {
            UnlinkOutcome::Unlinked(updated) => {
                self.filesystem.write_file(path, &updated)?;
                info!(unit, path = %path.display(), "Unlinked legacy registration");
                Ok(StepReport::applied(step))
            }
            UnlinkOutcome::NotRegistered => {
                info!(unit, path = %path.display(), "No live legacy registration");
                Ok(StepReport::unchanged(step).with_detail("not registered"))
            }
        }
    }
}
