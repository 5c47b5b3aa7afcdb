//! Plugin Service - plugin and view scaffolding.
//!
//! This service coordinates the prompt-and-copy side of grafter:
//! 1. Resolve the project root and the plugin directory
//! 2. Render a template set with the derived variables
//! 3. Write to filesystem (rolling back a half-created plugin)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, GeneratedFile, TemplateGenerator},
        services::{Locator, TemplateService, ViewScaffold, ViewScaffolder},
    },
    domain::{
        DomainValidator as validator, Manifest, NameVariants, PluginDefaults, ProjectLayout,
        RenderContext, TemplateSet,
        names::{PLUGIN_DIR_PREFIX, plugin_dir_name},
    },
    error::GrafterResult,
};

/// A plugin directory as shown by `grafter list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub dir_name: String,
    pub path: PathBuf,
    /// Records in the manifest's `plugins` list.
    pub records: usize,
    pub has_manifest: bool,
}

/// Plugin scaffolding service.
pub struct PluginService {
    filesystem: Arc<dyn Filesystem>,
    templates: TemplateService,
    locator: Locator,
}

impl PluginService {
    /// Create a new plugin service with the given adapters.
    pub fn new(filesystem: Arc<dyn Filesystem>, generator: Arc<dyn TemplateGenerator>) -> Self {
        Self {
            locator: Locator::new(Arc::clone(&filesystem)),
            templates: TemplateService::new(generator),
            filesystem,
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn templates(&self) -> &TemplateService {
        &self.templates
    }

    /// Create `developer/plugins/<ab_plugin_name>/` from the plugin template set.
    #[instrument(skip_all, fields(root = %root.display(), plugin = %name))]
    pub fn create_plugin(&self, root: &Path, name: &str, defaults: &PluginDefaults) -> GrafterResult<PathBuf> {
        validator::validate_name(name)?;

        let dir = ProjectLayout::plugins(root).join(plugin_dir_name(name));
        if self.filesystem.exists(&dir) {
            return Err(ApplicationError::PluginExists { path: dir }.into());
        }

        let context = RenderContext::for_plugin(name.trim(), defaults);
        let files = self.templates.render(TemplateSet::Plugin, &context)?;
        self.write_structure(&dir, &files)?;

        info!(path = %dir.display(), files = files.len(), "Plugin created");
        Ok(dir)
    }

    /// Resolve plugin `name`, creating it when allowed.
    ///
    /// Returns the plugin directory and whether this call created it.
    pub fn ensure_plugin(
        &self,
        root: &Path,
        name: &str,
        create_missing: bool,
        defaults: &PluginDefaults,
    ) -> GrafterResult<(PathBuf, bool)> {
        let plugins_dir = ProjectLayout::plugins(root);
        if let Some(dir) = self.locator.find_plugin(&plugins_dir, name) {
            info!(path = %dir.display(), "Using existing plugin");
            return Ok((dir, false));
        }
        if !create_missing {
            return Err(ApplicationError::PluginNotFound {
                name: name.to_string(),
                plugins_dir,
            }
            .into());
        }

        info!(plugin = %name, "Plugin not found, creating it");
        Ok((self.create_plugin(root, name, defaults)?, true))
    }

    /// Scaffold view `view` into the existing plugin `plugin`.
    #[instrument(skip_all, fields(plugin = %plugin, view = %view))]
    pub fn add_view(&self, root: &Path, plugin: &str, view: &str) -> GrafterResult<ViewScaffold> {
        validator::validate_name(view)?;
        let names = NameVariants::derive(view)?;

        let plugins_dir = ProjectLayout::plugins(root);
        let dir = self
            .locator
            .find_plugin(&plugins_dir, plugin)
            .ok_or_else(|| ApplicationError::PluginNotFound {
                name: plugin.to_string(),
                plugins_dir,
            })?;
        let display = self.locator.display_name(&dir);

        ViewScaffolder::new(self.filesystem.as_ref(), &self.templates).scaffold(&dir, &display, &names)
    }

    /// Plugin packages under `developer/plugins/`, sorted by directory name.
    ///
    /// A directory counts as a plugin when it has a manifest or carries the
    /// package prefix.
    pub fn list_plugins(&self, root: &Path) -> GrafterResult<Vec<PluginInfo>> {
        let plugins_dir = ProjectLayout::plugins(root);
        let mut out = Vec::new();

        for entry in self.filesystem.read_dir(&plugins_dir)? {
            if !entry.is_dir {
                continue;
            }
            let path = plugins_dir.join(&entry.name);
            let manifest_path = path.join("manifest.json");
            let has_manifest = self.filesystem.exists(&manifest_path);
            if !has_manifest && !entry.name.starts_with(PLUGIN_DIR_PREFIX) {
                continue;
            }

            let records = if has_manifest {
                match self
                    .filesystem
                    .read_to_string(&manifest_path)
                    .map(|text| Manifest::parse(&text))
                {
                    Ok(Ok(manifest)) => manifest.records().len(),
                    Ok(Err(e)) => {
                        warn!(path = %manifest_path.display(), error = %e, "Unreadable manifest");
                        0
                    }
                    Err(e) => return Err(e),
                }
            } else {
                0
            };

            out.push(PluginInfo {
                name: self.locator.display_name(&path),
                dir_name: entry.name,
                path,
                records,
                has_manifest,
            });
        }

        Ok(out)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write rendered files below `root` with rollback on failure.
    fn write_structure(&self, root: &Path, files: &[GeneratedFile]) -> GrafterResult<()> {
        match self.write_all(root, files) {
            Ok(()) => {
                info!("Successfully wrote all files");
                Ok(())
            }
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(root);
                Err(e)
            }
        }
    }

    fn write_all(&self, root: &Path, files: &[GeneratedFile]) -> GrafterResult<()> {
        self.filesystem.create_dir_all(root)?;

        for file in files {
            let path = root.join(&file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}
