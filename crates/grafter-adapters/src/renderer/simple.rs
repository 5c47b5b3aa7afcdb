//! EJS-style renderer over the embedded template sets.

use std::collections::BTreeMap;
use std::path::PathBuf;

use grafter_core::{
    application::{
        ApplicationError,
        ports::{GeneratedFile, TemplateGenerator, TemplateInfo},
    },
    domain::{RenderContext, TemplateSet},
    error::GrafterResult,
};
use tracing::{debug, instrument};

use crate::builtin_templates::embedded;
use crate::template_loader::{FilesystemTemplateLoader, LoadedSet, TemplateManifest};

/// Renders `<%= name %>` content and `[name]` path placeholders.
///
/// Files from an override directory replace embedded files with the same
/// relative path.
#[derive(Debug, Clone, Default)]
pub struct SimpleRenderer {
    overrides: Option<FilesystemTemplateLoader>,
}

impl SimpleRenderer {
    /// Renderer over the embedded sets only.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(loader: FilesystemTemplateLoader) -> Self {
        Self {
            overrides: Some(loader),
        }
    }

    /// Embedded sets merged with the override set, keyed by relative path.
    fn merged(&self, set: TemplateSet) -> GrafterResult<(BTreeMap<String, String>, LoadedSet)> {
        let mut files: BTreeMap<String, String> = embedded(set)
            .files
            .iter()
            .map(|f| (f.path.to_string(), f.content.to_string()))
            .collect();

        let loaded = match &self.overrides {
            Some(loader) => loader.load(set).map_err(|e| ApplicationError::RenderingFailed {
                reason: e.to_string(),
            })?,
            None => LoadedSet::default(),
        };
        for (path, content) in &loaded.files {
            files.insert(path.clone(), content.clone());
        }

        Ok((files, loaded))
    }
}

impl TemplateGenerator for SimpleRenderer {
    #[instrument(skip_all, fields(set = %set))]
    fn generate(&self, set: TemplateSet, context: &RenderContext) -> GrafterResult<Vec<GeneratedFile>> {
        let (files, _) = self.merged(set)?;

        let rendered = files
            .into_iter()
            .map(|(path, content)| {
                let content = if path.ends_with(".json") {
                    context.render_json(&content)
                } else {
                    context.render(&content)
                };
                GeneratedFile {
                    path: PathBuf::from(context.render_path(&path)),
                    content,
                }
            })
            .collect::<Vec<_>>();

        debug!(files = rendered.len(), "Template set rendered");
        Ok(rendered)
    }

    fn describe(&self, set: TemplateSet) -> GrafterResult<TemplateInfo> {
        let (files, loaded) = self.merged(set)?;

        let manifest = match loaded.manifest {
            Some(manifest) => manifest,
            None => TemplateManifest::parse(embedded(set).manifest, &PathBuf::from(set.dir_name()))
                .map_err(|e| ApplicationError::RenderingFailed {
                    reason: e.to_string(),
                })?,
        };

        Ok(TemplateInfo {
            set,
            name: manifest.template.name,
            description: manifest.template.description.unwrap_or_default(),
            files: files.into_keys().collect(),
            overridden: loaded.files.into_keys().collect(),
        })
    }
}
