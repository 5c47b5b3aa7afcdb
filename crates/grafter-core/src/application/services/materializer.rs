//! Directory materializer: copy migrated files into a registry directory.
//!
//! Copies are exact, so a registry copy keeps the `// grafter:migrated <role>`
//! line of its plugin source and reads as migrated output wherever it lands.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{application::ports::Filesystem, error::GrafterResult};

/// Result of one materialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    pub dir: PathBuf,
    /// File names copied, in input order.
    pub files: Vec<String>,
    /// The copied entry point: the first `.js` file without `Component` in its name.
    pub primary: Option<String>,
}

/// Create `dest` (tolerating an existing directory) and copy every existing
/// file of `files` into it, byte for byte.
pub fn materialize(filesystem: &dyn Filesystem, dest: &Path, files: &[PathBuf]) -> GrafterResult<Materialized> {
    filesystem.create_dir_all(dest)?;

    let mut copied = Vec::with_capacity(files.len());
    for source in files {
        let Some(name) = source.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if !filesystem.exists(source) {
            warn!(path = %source.display(), "Nothing to copy");
            continue;
        }
        filesystem.copy_file(source, &dest.join(&name))?;
        debug!(file = %name, dest = %dest.display(), "Copied");
        copied.push(name);
    }

    let primary = copied
        .iter()
        .find(|name| name.ends_with(".js") && !name.contains("Component"))
        .cloned();

    Ok(Materialized {
        dir: dest.to_path_buf(),
        files: copied,
        primary,
    })
}
