//! Migration Service - the view migration pipeline.
//!
//! 1. Find the project root and its legacy trees
//! 2. Resolve (or create) the target plugin
//! 3. Locate the unit's legacy sources
//! 4. Ensure the placeholder scaffold
//! 5. Transplant core view, component, properties, editor
//! 6. Unlink the legacy runtime registration, materialize and link `view_<key>`
//! 7. Unlink the legacy designer registrations, materialize and link `web_view_<key>`
//!
//! Steps run strictly in order; the first error aborts the rest and files
//! already written stay written.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ports::{Filesystem, TemplateGenerator},
        services::{
            Locator, Placeholders, PluginService, RegistryLinker, StepReport, StepStatus, Transplanter,
            DEFAULT_MAX_DEPTH, ensure_placeholders, materialize,
        },
    },
    domain::{
        ArtifactRole, DomainValidator as validator, MigrationContext, NameVariants, PluginDefaults,
        ProjectLayout, RegistryEntry, SourceArtifactSet,
        layout::{LEGACY_EDITOR_REGISTRY, LEGACY_PROPERTY_REGISTRY, sibling_registry},
        registry::{reference_name, view_key},
    },
    error::GrafterResult,
};

/// Knobs of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    /// How many directory levels `find_root` climbs.
    pub max_root_depth: usize,
    /// Create the target plugin when it does not exist.
    pub create_missing_plugin: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            max_root_depth: DEFAULT_MAX_DEPTH,
            create_missing_plugin: true,
        }
    }
}

/// Which unit to move into which plugin, searching for the root from `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRequest {
    pub start: PathBuf,
    pub plugin: String,
    pub unit: String,
}

impl MigrationRequest {
    pub fn new(start: impl Into<PathBuf>, plugin: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            plugin: plugin.into(),
            unit: unit.into(),
        }
    }
}

/// Everything a migration run did, in order.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub root: PathBuf,
    pub unit: String,
    pub plugin: String,
    pub plugin_dir: PathBuf,
    pub legacy_key: Option<String>,
    pub primary_output: Option<PathBuf>,
    pub sources: SourceArtifactSet,
    pub steps: Vec<StepReport>,
}

impl MigrationReport {
    pub fn count(&self, status: StepStatus) -> usize {
        self.steps.iter().filter(|s| s.status == status).count()
    }
}

pub struct MigrationService {
    filesystem: Arc<dyn Filesystem>,
    plugins: PluginService,
    options: MigrationOptions,
}

impl MigrationService {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        generator: Arc<dyn TemplateGenerator>,
        options: MigrationOptions,
    ) -> Self {
        Self {
            plugins: PluginService::new(Arc::clone(&filesystem), generator),
            filesystem,
            options,
        }
    }

    /// Migrate legacy view `request.unit` into plugin `request.plugin`.
    #[instrument(skip_all, fields(unit = %request.unit, plugin = %request.plugin))]
    pub fn migrate_view(&self, request: &MigrationRequest) -> GrafterResult<MigrationReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, "Starting view migration");

        validator::validate_name(&request.unit)?;
        validator::validate_name(&request.plugin)?;
        let names = NameVariants::derive(&request.unit)?;

        let locator = self.locator();
        let root = locator.find_root(&request.start, self.options.max_root_depth)?;
        let layout = locator.layout(&root)?;
        info!(root = %root.display(), "Project root found");

        let mut steps = Vec::new();

        let defaults = PluginDefaults {
            description: format!("plugin migration for view: {}", request.unit),
            author: "Coding Monkey".into(),
            ..PluginDefaults::default()
        };
        let (plugin_dir, created) =
            self.plugins
                .ensure_plugin(&root, &request.plugin, self.options.create_missing_plugin, &defaults)?;
        steps.push(if created {
            StepReport::applied("ensure plugin").with_detail("created")
        } else {
            StepReport::unchanged("ensure plugin").with_detail("exists")
        });
        let plugin_name = locator.display_name(&plugin_dir);

        let sources = locator.find_unit_sources(&layout, &names.unit);
        if sources.is_empty() {
            warn!(unit = %names.unit, "No legacy sources found");
            steps.push(StepReport::skipped("locate sources", "no legacy sources found"));
        } else {
            let found: Vec<_> = sources.iter().map(|(role, _)| role.label()).collect();
            steps.push(StepReport::applied("locate sources").with_detail(found.join(", ")));
        }

        let ctx = MigrationContext::new(names, plugin_name, plugin_dir).with_sources(sources);

        steps.push(
            match ensure_placeholders(self.filesystem.as_ref(), self.plugins.templates(), &ctx)? {
                Placeholders::AlreadyPresent => StepReport::unchanged("ensure placeholders"),
                Placeholders::Generated(scaffold) => StepReport::applied("ensure placeholders")
                    .with_detail(format!("{} files created", scaffold.created.len())),
            },
        );

        steps.extend(Transplanter::new(self.filesystem.as_ref()).run(&ctx)?);

        let ctx = self.link_runtime(&layout, ctx, &mut steps)?;
        self.link_designer(&layout, &ctx, &mut steps)?;

        let report = MigrationReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            root,
            unit: ctx.unit().to_string(),
            plugin: ctx.plugin_name().to_string(),
            plugin_dir: ctx.plugin_dir().to_path_buf(),
            legacy_key: ctx.legacy_key().map(str::to_string),
            primary_output: ctx.primary_output().map(PathBuf::from),
            sources: ctx.sources().clone(),
            steps,
        };
        info!(
            applied = report.count(StepStatus::Applied),
            skipped = report.count(StepStatus::Skipped),
            "View migration finished"
        );
        Ok(report)
    }

    pub fn plugins(&self) -> &PluginService {
        &self.plugins
    }

    fn locator(&self) -> &Locator {
        self.plugins.locator()
    }

    // -------------------------------------------------------------------------
    // Registry wiring
    // -------------------------------------------------------------------------

    /// Unlink the legacy runtime entry, copy the web files to `view_<key>`
    /// and register them in the runtime registry.
    fn link_runtime(
        &self,
        layout: &ProjectLayout,
        ctx: MigrationContext,
        steps: &mut Vec<StepReport>,
    ) -> GrafterResult<MigrationContext> {
        let linker = RegistryLinker::new(self.filesystem.as_ref());

        match layout.legacy_view_registry() {
            Some(path) => steps.push(linker.unlink("unlink runtime registry", &path, ctx.unit())?),
            None => steps.push(StepReport::skipped("unlink runtime registry", "no legacy application tree")),
        }

        let entry_source = self.filesystem.read_to_string(&ctx.entry_target())?;
        let key = view_key(&entry_source, &ctx.names().pascal);
        let ctx = ctx.with_legacy_key(key.clone());

        let Some(runtime_dir) = layout.runtime_plugins() else {
            steps.push(StepReport::skipped("link runtime registry", "no legacy application tree"));
            return Ok(ctx);
        };

        let copied = materialize(
            self.filesystem.as_ref(),
            &runtime_dir.join(format!("view_{key}")),
            &[ctx.entry_target(), ctx.component_target()],
        )?;
        let Some(primary) = copied.primary else {
            steps.push(StepReport::skipped("link runtime registry", "no entry point copied"));
            return Ok(ctx);
        };
        let ctx = ctx.with_primary_output(copied.dir.join(&primary));

        let entry = RegistryEntry::runtime(&key, &primary);
        steps.push(linker.link("link runtime registry", &runtime_dir.join("index.js"), &entry)?);
        Ok(ctx)
    }

    /// Unlink the legacy designer entries, copy the properties and editor
    /// files to `web_view_<key>` and register them in the designer registry.
    fn link_designer(
        &self,
        layout: &ProjectLayout,
        ctx: &MigrationContext,
        steps: &mut Vec<StepReport>,
    ) -> GrafterResult<()> {
        let linker = RegistryLinker::new(self.filesystem.as_ref());
        let sources = ctx.sources();

        let legacy = [
            (ArtifactRole::DesignEditor, LEGACY_EDITOR_REGISTRY, "unlink editor registry"),
            (ArtifactRole::DesignProperties, LEGACY_PROPERTY_REGISTRY, "unlink properties registry"),
        ];
        for (role, file_name, step) in legacy {
            if let Some(registry) = sources.get(role).and_then(|src| sibling_registry(src, file_name)) {
                steps.push(linker.unlink(step, &registry, ctx.unit())?);
            }
        }

        let mut targets = Vec::new();
        if ctx.has(ArtifactRole::DesignProperties) {
            targets.push((ArtifactRole::DesignProperties, ctx.properties_target()));
        }
        if ctx.has(ArtifactRole::DesignEditor) {
            targets.push((ArtifactRole::DesignEditor, ctx.editor_target()));
        }
        let (Some(designer_dir), Some(key)) = (layout.designer_plugins(), ctx.legacy_key()) else {
            steps.push(StepReport::skipped("link designer registry", "no designer tree"));
            return Ok(());
        };
        if targets.is_empty() {
            steps.push(StepReport::skipped("link designer registry", "no designer sources"));
            return Ok(());
        }

        let files: Vec<PathBuf> = targets.iter().map(|(_, path)| path.clone()).collect();
        let copied = materialize(
            self.filesystem.as_ref(),
            &designer_dir.join(format!("web_view_{key}")),
            &files,
        )?;
        let reference = reference_name(key);
        let refs: Vec<(String, String)> = targets
            .iter()
            .filter_map(|(role, path)| {
                let name = path.file_name()?.to_string_lossy().into_owned();
                copied.files.contains(&name).then_some((role, name))
            })
            .map(|(role, file)| {
                let suffix = match role {
                    ArtifactRole::DesignEditor => "Editor",
                    _ => "Properties",
                };
                (format!("{reference}{suffix}"), file)
            })
            .collect();

        let entry = RegistryEntry::designer(key, &refs);
        steps.push(linker.link("link designer registry", &designer_dir.join("index.js"), &entry)?);
        Ok(())
    }
}
