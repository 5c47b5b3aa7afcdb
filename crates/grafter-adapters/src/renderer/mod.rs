//! Template generators.

mod simple;

pub use simple::SimpleRenderer;
