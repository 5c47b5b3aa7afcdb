// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Grafter.
//!
//! Pure text and name logic: every function takes strings and returns
//! strings or outcomes. Reading and writing files is left to the services in
//! the application layer, through the ports it defines.
//!
//! - **No I/O**: no filesystem or process access
//! - **Total**: absent regions are `None` or an outcome variant, not a panic
//! - **Idempotent**: re-running an edit on its own output changes nothing

pub mod anchor;
pub mod artifacts;
pub mod context;
pub mod error;
pub mod layout;
pub mod manifest;
pub mod marker;
pub mod names;
pub mod platform;
pub mod registry;
pub mod render;
pub mod transplant;

mod validation;

pub use artifacts::{ArtifactRole, SourceArtifactSet};
pub use context::MigrationContext;
pub use error::{DomainError, ErrorCategory};
pub use layout::ProjectLayout;
pub use manifest::{Manifest, ManifestRecord};
pub use names::NameVariants;
pub use registry::{LinkOutcome, RegistryEntry, UnlinkOutcome};
pub use render::{PluginDefaults, RenderContext, TemplateSet};
pub use transplant::{Transplant, TransplantKind};
pub use validation::DomainValidator;
