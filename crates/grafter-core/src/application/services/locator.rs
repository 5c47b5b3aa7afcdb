//! Root and source locator.
//!
//! Walks upwards to the project root, then downwards through the legacy
//! trees matching every directory name case-insensitively. Also the single
//! place that decides whether a plugin directory represents a given name.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        ArtifactRole, Manifest, ProjectLayout, SourceArtifactSet,
        layout::{APPBUILDER_NAMES, DESIGNER_NAMES},
        names::{PLUGIN_DIR_PREFIX, flat_snake, plugin_dir_name},
    },
    error::GrafterResult,
};

/// Default bound of the upward root search.
pub const DEFAULT_MAX_DEPTH: usize = 20;

pub struct Locator {
    filesystem: Arc<dyn Filesystem>,
}

impl Locator {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Whether `dir` has the two expected subtrees under `developer/`.
    pub fn looks_like_root(&self, dir: &Path) -> bool {
        self.filesystem.is_dir(&ProjectLayout::platform_web(dir))
            && self.filesystem.is_dir(&ProjectLayout::plugins(dir))
    }

    /// First of `start` and its ancestors, at most `max_depth` levels up,
    /// that looks like a project root.
    #[instrument(skip_all, fields(start = %start.display(), max_depth = max_depth))]
    pub fn find_root(&self, start: &Path, max_depth: usize) -> GrafterResult<PathBuf> {
        start
            .ancestors()
            .take(max_depth + 1)
            .find(|dir| self.looks_like_root(dir))
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                ApplicationError::RootNotFound {
                    start: start.to_path_buf(),
                    depth: max_depth,
                }
                .into()
            })
    }

    /// Resolve the application and designer trees below `root`.
    pub fn layout(&self, root: &Path) -> GrafterResult<ProjectLayout> {
        let appbuilder = self.find_dir(&ProjectLayout::platform_web(root), APPBUILDER_NAMES);
        let designer = self.find_dir(&ProjectLayout::plugins(root), DESIGNER_NAMES);
        if appbuilder.is_none() && designer.is_none() {
            return Err(ApplicationError::RootNotFound {
                start: root.to_path_buf(),
                depth: 0,
            }
            .into());
        }
        if appbuilder.is_none() {
            warn!(root = %root.display(), "No legacy application tree found");
        }
        if designer.is_none() {
            warn!(root = %root.display(), "No designer tree found");
        }

        Ok(ProjectLayout {
            root: root.to_path_buf(),
            appbuilder,
            designer,
        })
    }

    /// Every legacy file of `unit` that exists on disk.
    #[instrument(skip_all, fields(unit = %unit))]
    pub fn find_unit_sources(&self, layout: &ProjectLayout, unit: &str) -> SourceArtifactSet {
        let mut sources = SourceArtifactSet::new();

        let mut candidates: Vec<(ArtifactRole, Option<PathBuf>)> = Vec::new();
        if let Some(app) = &layout.appbuilder {
            let core_views = self.resolve(app, &["core", "views"]);
            let platform_views = self.resolve(app, &["platform", "views"]);
            let components = platform_views
                .as_deref()
                .and_then(|dir| self.resolve(dir, &["viewComponent"]));
            candidates.push((ArtifactRole::CoreDefinition, core_views.clone()));
            candidates.push((ArtifactRole::CoreDefinitionCore, core_views));
            candidates.push((ArtifactRole::PlatformOverride, platform_views));
            candidates.push((ArtifactRole::UiComponent, components));
        }
        if let Some(designer) = &layout.designer {
            let pages = self.resolve(designer, &["src", "rootPages", "Designer"]);
            let properties = pages
                .as_deref()
                .and_then(|dir| self.resolve(dir, &["properties", "views"]));
            let editors = pages
                .as_deref()
                .and_then(|dir| self.resolve(dir, &["editors", "views"]));
            candidates.push((ArtifactRole::DesignProperties, properties));
            candidates.push((ArtifactRole::DesignEditor, editors));
        }

        for (role, dir) in candidates {
            let Some(dir) = dir else { continue };
            let path = dir.join(role.file_name(unit));
            if self.filesystem.exists(&path) && !self.filesystem.is_dir(&path) {
                debug!(role = %role, path = %path.display(), "Found legacy source");
                sources = sources.with(role, path);
            }
        }

        sources
    }

    /// The plugin directory under `plugins_dir` that represents `name`.
    ///
    /// An entry matches when it equals `name` exactly or case-insensitively,
    /// or equals its canonical directory name or flat snake form.
    pub fn find_plugin(&self, plugins_dir: &Path, name: &str) -> Option<PathBuf> {
        let name = name.trim();
        let canonical = plugin_dir_name(name);
        let snake = flat_snake(name);

        let entries = self.filesystem.read_dir(plugins_dir).ok()?;
        let dirs: Vec<_> = entries.into_iter().filter(|e| e.is_dir).collect();

        dirs.iter()
            .find(|e| e.name == name)
            .or_else(|| {
                dirs.iter().find(|e| {
                    e.name.eq_ignore_ascii_case(name)
                        || (!canonical.is_empty() && e.name == canonical)
                        || (!snake.is_empty() && e.name == snake)
                })
            })
            .map(|e| plugins_dir.join(&e.name))
    }

    /// Display name of a plugin: `manifest.name`, else the directory name
    /// without its package prefix.
    pub fn display_name(&self, plugin_dir: &Path) -> String {
        let from_manifest = self
            .filesystem
            .read_to_string(&plugin_dir.join("manifest.json"))
            .ok()
            .and_then(|text| Manifest::parse(&text).ok())
            .and_then(|m| m.name().map(str::to_string));
        if let Some(name) = from_manifest {
            return name;
        }

        let dir = plugin_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        dir.strip_prefix(PLUGIN_DIR_PREFIX)
            .map(str::to_string)
            .unwrap_or(dir)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Child directory of `parent` whose name matches one of `names`, ignoring case.
    fn find_dir(&self, parent: &Path, names: &[&str]) -> Option<PathBuf> {
        let entries = self.filesystem.read_dir(parent).ok()?;
        names.iter().find_map(|wanted| {
            entries
                .iter()
                .find(|e| e.is_dir && e.name.eq_ignore_ascii_case(wanted))
                .map(|e| parent.join(&e.name))
        })
    }

    /// Follow `segments` below `base`, each matched case-insensitively.
    fn resolve(&self, base: &Path, segments: &[&str]) -> Option<PathBuf> {
        segments
            .iter()
            .try_fold(base.to_path_buf(), |dir, segment| self.find_dir(&dir, &[*segment]))
    }
}
