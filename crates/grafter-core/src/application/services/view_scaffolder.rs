//! View scaffolding: the four view files plus the plugin wiring they need.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem, services::TemplateService},
    domain::{
        Manifest, ManifestRecord, NameVariants, RenderContext, TemplateSet,
        manifest::has_platform_type,
        names::pascal,
        platform::{EntryOutcome, WebpackOutcome, add_platform_entry, ensure_webpack_entry},
    },
    error::GrafterResult,
};

/// What one scaffold run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewScaffold {
    /// View files written by this run.
    pub created: Vec<PathBuf>,
    /// View files left alone because they already existed.
    pub existing: Vec<PathBuf>,
    /// Plugin files (entry files, webpack config, manifest) that were updated.
    pub updated: Vec<PathBuf>,
}

pub struct ViewScaffolder<'a> {
    filesystem: &'a dyn Filesystem,
    templates: &'a TemplateService,
}

impl<'a> ViewScaffolder<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, templates: &'a TemplateService) -> Self {
        Self {
            filesystem,
            templates,
        }
    }

    /// Add view `names` to the plugin in `plugin_dir`.
    ///
    /// Existing view files are never overwritten; every wiring step is
    /// idempotent, so scaffolding the same view twice changes nothing.
    #[instrument(skip_all, fields(plugin = %plugin_name, view = %names.unit))]
    pub fn scaffold(&self, plugin_dir: &Path, plugin_name: &str, names: &NameVariants) -> GrafterResult<ViewScaffold> {
        let manifest_path = plugin_dir.join("manifest.json");
        if !self.filesystem.exists(&manifest_path) {
            return Err(ApplicationError::ManifestMissing { path: manifest_path }.into());
        }

        let mut out = ViewScaffold::default();

        let files = self
            .templates
            .render(TemplateSet::View, &RenderContext::for_view(names))?;
        for file in files {
            let target = plugin_dir.join(&file.path);
            if self.filesystem.exists(&target) {
                debug!(path = %target.display(), "View file exists, keeping it");
                out.existing.push(target);
                continue;
            }
            if let Some(parent) = target.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&target, &file.content)?;
            out.created.push(target);
        }

        let fn_name = names.fn_name.as_str();
        let editor = format!("{fn_name}Editor");
        self.update_entry_file(&plugin_dir.join("web.js"), &[(fn_name, "web")], &mut out)?;
        self.update_entry_file(
            &plugin_dir.join("properties.js"),
            &[(fn_name, "properties"), (editor.as_str(), "properties")],
            &mut out,
        )?;
        self.update_webpack(&plugin_dir.join("webpack.common.js"), &mut out)?;
        self.update_manifest(&manifest_path, plugin_name, &mut out)?;

        info!(
            created = out.created.len(),
            updated = out.updated.len(),
            "View scaffolded"
        );
        Ok(out)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn update_entry_file(&self, path: &Path, entries: &[(&str, &str)], out: &mut ViewScaffold) -> GrafterResult<()> {
        if !self.filesystem.exists(path) {
            warn!(path = %path.display(), "Platform entry file missing, skipping");
            return Ok(());
        }

        let file = display_file(path);
        let mut content = self.filesystem.read_to_string(path)?;
        let mut changed = false;
        for (fn_name, sub_dir) in entries {
            if let EntryOutcome::Added(next) = add_platform_entry(&content, &file, fn_name, sub_dir)? {
                content = next;
                changed = true;
            }
        }

        if changed {
            self.filesystem.write_file(path, &content)?;
            out.updated.push(path.to_path_buf());
        }
        Ok(())
    }

    fn update_webpack(&self, path: &Path, out: &mut ViewScaffold) -> GrafterResult<()> {
        if !self.filesystem.exists(path) {
            warn!(path = %path.display(), "webpack.common.js missing, skipping entries");
            return Ok(());
        }

        let mut content = self.filesystem.read_to_string(path)?;
        let mut changed = false;
        for entry in ["web", "properties"] {
            match ensure_webpack_entry(&content, entry) {
                WebpackOutcome::Added(next) => {
                    content = next;
                    changed = true;
                }
                WebpackOutcome::AlreadyPresent => {}
                WebpackOutcome::NoBrowserEsm => {
                    warn!("webpack.common.js has no browserEsm config, skipping entries");
                    return Ok(());
                }
                WebpackOutcome::NoEntryBlock => {
                    warn!(entry, "browserEsm has no entry block, skipping");
                }
            }
        }

        if changed {
            self.filesystem.write_file(path, &content)?;
            out.updated.push(path.to_path_buf());
        }
        Ok(())
    }

    fn update_manifest(&self, path: &Path, plugin_name: &str, out: &mut ViewScaffold) -> GrafterResult<()> {
        let mut manifest = Manifest::parse(&self.filesystem.read_to_string(path)?)?;
        let file_stem = pascal(plugin_name);

        let properties = ManifestRecord::for_platform(
            plugin_name,
            "web",
            "properties",
            format!("./AB{file_stem}_properties.mjs"),
        );
        let view = ManifestRecord::for_platform(plugin_name, "web", "view", format!("./{file_stem}_web.mjs"));

        let added_properties = manifest.append_unless(properties, has_platform_type("web", "properties"))?;
        let added_view = manifest.append_unless(view, has_platform_type("web", "view"))?;

        if added_properties || added_view {
            self.filesystem.write_file(path, &manifest.to_pretty_string()?)?;
            out.updated.push(path.to_path_buf());
        } else {
            debug!("Manifest already has the web records");
        }
        Ok(())
    }
}

fn display_file(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
