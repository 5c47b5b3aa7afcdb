//! Application layer for Grafter.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (MigrationService, PluginService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The text rules themselves live in `crate::domain`; services only read,
//! call into the domain, and write back.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    MigrationOptions, MigrationReport, MigrationRequest, MigrationService, PluginInfo, PluginService,
    StepReport, StepStatus, TemplateService, ViewScaffold,
};

// Re-export port traits (for adapter implementation)
pub use ports::{DirEntry, Filesystem, GeneratedFile, TemplateGenerator, TemplateInfo};

pub use error::ApplicationError;
