//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "migrate a view" or "create a plugin".

pub mod linker;
pub mod locator;
pub mod materializer;
pub mod migration_service;
pub mod placeholder;
pub mod report;
pub mod scaffold_service;
pub mod template_service;
pub mod transplanter;
pub mod view_scaffolder;

pub use linker::RegistryLinker;
pub use locator::{DEFAULT_MAX_DEPTH, Locator};
pub use materializer::{Materialized, materialize};
pub use migration_service::{MigrationOptions, MigrationReport, MigrationRequest, MigrationService};
pub use placeholder::{Placeholders, ensure_placeholders};
pub use report::{StepReport, StepStatus};
pub use scaffold_service::{PluginInfo, PluginService};
pub use template_service::TemplateService;
pub use transplanter::Transplanter;
pub use view_scaffolder::{ViewScaffold, ViewScaffolder};
