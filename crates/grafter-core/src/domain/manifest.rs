//! Plugin `manifest.json` records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;
use crate::domain::names::{capitalize, flat_snake};

/// One `{name, key, platform, type, path}` entry of the `plugins` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    pub name: String,
    pub key: String,
    pub platform: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
}

impl ManifestRecord {
    /// Record for `plugin` on `platform`, named and keyed by convention.
    pub fn for_platform(plugin: &str, platform: &str, kind: &str, path: impl Into<String>) -> Self {
        Self {
            name: format!("{} {}", plugin, capitalize(platform)),
            key: format!("{}_{}", flat_snake(plugin), platform),
            platform: platform.to_string(),
            kind: kind.to_string(),
            path: path.into(),
        }
    }
}

/// A parsed manifest. Unknown fields and key order survive a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    doc: Map<String, Value>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DomainError::InvalidManifest(e.to_string()))?;
        match value {
            Value::Object(doc) => Ok(Self { doc }),
            other => Err(DomainError::InvalidManifest(format!(
                "expected an object, found {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.doc.get("name").and_then(Value::as_str)
    }

    /// Records of the `plugins` list; malformed entries are skipped.
    pub fn records(&self) -> Vec<ManifestRecord> {
        self.doc
            .get("plugins")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Append `record` unless `exists` reports an equivalent one.
    ///
    /// Returns whether the record was added.
    pub fn append_unless(
        &mut self,
        record: ManifestRecord,
        exists: impl Fn(&[ManifestRecord]) -> bool,
    ) -> Result<bool, DomainError> {
        if exists(&self.records()) {
            return Ok(false);
        }

        let value = serde_json::to_value(&record)
            .map_err(|e| DomainError::InvalidManifest(e.to_string()))?;
        let plugins = self
            .doc
            .entry("plugins")
            .or_insert_with(|| Value::Array(Vec::new()));
        match plugins {
            Value::Array(list) => {
                list.push(value);
                Ok(true)
            }
            other => Err(DomainError::InvalidManifest(format!(
                "'plugins' must be a list, found {}",
                kind_of(other)
            ))),
        }
    }

    /// Three-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String, DomainError> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"   ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.doc
            .serialize(&mut ser)
            .map_err(|e| DomainError::InvalidManifest(e.to_string()))?;
        let mut text =
            String::from_utf8(out).map_err(|e| DomainError::InvalidManifest(e.to_string()))?;
        text.push('\n');
        Ok(text)
    }
}

/// Uniqueness predicate: a record with this platform and type already exists.
pub fn has_platform_type<'a>(platform: &'a str, kind: &'a str) -> impl Fn(&[ManifestRecord]) -> bool + 'a {
    move |records: &[ManifestRecord]| records.iter().any(|r| r.platform == platform && r.kind == kind)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
