//! Grafter Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Grafter, the
//! plugin scaffolding tool and legacy view migration engine.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           grafter-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (MigrationService, PluginService)      │
//! │    Locator, Transplanter, Linker ...    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Filesystem, Generator)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     grafter-adapters (Infrastructure)   │
//! │ (LocalFilesystem, SimpleRenderer, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (names, anchors, transplants, registry) │
//! │            No I/O at all                │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use grafter_core::prelude::*;
//!
//! let service = MigrationService::new(filesystem, generator, MigrationOptions::default());
//! let report = service.migrate_view(&MigrationRequest::new(".", "Bar", "Foo"))?;
//! println!("{} steps", report.steps.len());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        MigrationOptions, MigrationReport, MigrationRequest, MigrationService, PluginService,
        ports::{DirEntry, Filesystem, GeneratedFile, TemplateGenerator},
    };
    pub use crate::domain::{
        ArtifactRole, MigrationContext, NameVariants, PluginDefaults, RenderContext,
        SourceArtifactSet, TemplateSet,
    };
    pub use crate::error::{GrafterError, GrafterResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
