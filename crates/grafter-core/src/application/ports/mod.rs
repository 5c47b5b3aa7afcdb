//! Application ports (traits) for external dependencies.
//!
//! Adapters in `grafter-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: file and directory operations
//!   - `TemplateGenerator`: renders an embedded template set into files
//!
//! - **Driving (Input) Ports**: the services themselves, called by the CLI

pub mod output;

pub use output::{DirEntry, Filesystem, GeneratedFile, TemplateGenerator, TemplateInfo};
