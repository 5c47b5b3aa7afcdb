//! Template Service - template set rendering and listing.
//!
//! Wraps the generator port so every caller gets path validation for free.

use std::sync::Arc;

use crate::{
    application::ports::{GeneratedFile, TemplateGenerator, TemplateInfo},
    domain::{DomainValidator as validator, RenderContext, TemplateSet},
    error::GrafterResult,
};

/// Service for template operations.
pub struct TemplateService {
    generator: Arc<dyn TemplateGenerator>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(generator: Arc<dyn TemplateGenerator>) -> Self {
        Self { generator }
    }

    /// Render `set`, rejecting any file that would land outside its directory.
    pub fn render(&self, set: TemplateSet, context: &RenderContext) -> GrafterResult<Vec<GeneratedFile>> {
        let files = self.generator.generate(set, context)?;
        for file in &files {
            validator::validate_template_path(&file.path)?;
        }
        Ok(files)
    }

    /// Describe every template set.
    pub fn list(&self) -> GrafterResult<Vec<TemplateInfo>> {
        TemplateSet::ALL
            .iter()
            .map(|set| self.generator.describe(*set))
            .collect()
    }
}
