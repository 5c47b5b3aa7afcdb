//! Template variables and the substitution rules shared by every generator.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::domain::NameVariants;
use crate::domain::names::{flat_snake, pascal};

static CONTENT_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<%=\s*(\w+)\s*%>").expect("content placeholder pattern must compile")
});

static PATH_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\w+)\]").expect("path placeholder pattern must compile"));

/// The embedded template sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSet {
    /// Plugin skeleton: manifest, platform entry files, webpack configs.
    Plugin,
    /// View files: entry point, component, properties, editor.
    View,
}

impl TemplateSet {
    pub const ALL: [TemplateSet; 2] = [Self::Plugin, Self::View];

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Plugin => "plugin",
            Self::View => "view",
        }
    }
}

impl fmt::Display for TemplateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Values a new plugin is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDefaults {
    pub description: String,
    pub author: String,
    pub icon: String,
}

impl Default for PluginDefaults {
    fn default() -> Self {
        Self {
            description: "A new AppBuilder plugin".into(),
            author: "AppBuilder Developer".into(),
            icon: "fa-puzzle-piece".into(),
        }
    }
}

/// Variables for rendering one template set.
///
/// Immutable after creation; `with_variable` returns a new context.
///
/// Content placeholders use the `<%= name %>` form and path placeholders the
/// `[name]` form. Unknown placeholders are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variables of the plugin skeleton for a plugin named `name`.
    ///
    /// | Variable | `"Netsuite API"` |
    /// |----------|------------------|
    /// | `pluginName` | `NetsuiteAPI` |
    /// | `pluginKey` | `netsuite_api` |
    /// | `pluginNameDisplay` | `Netsuite API` |
    pub fn for_plugin(name: &str, defaults: &PluginDefaults) -> Self {
        Self::new()
            .with_variable("pluginName", pascal(name))
            .with_variable("pluginKey", flat_snake(name))
            .with_variable("pluginNameDisplay", name)
            .with_variable("description", &defaults.description)
            .with_variable("author", &defaults.author)
            .with_variable("icon", &defaults.icon)
    }

    /// Variables of the view set for one unit.
    pub fn for_view(names: &NameVariants) -> Self {
        Self::new()
            .with_variable("fnObjectName", &names.fn_name)
            .with_variable("objectName", &names.unit)
            .with_variable("objectNamePascal", &names.pascal)
            .with_variable("pluginKey", &names.registry_key)
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Substitute `<%= name %>` placeholders.
    pub fn render(&self, template: &str) -> String {
        self.substitute(&CONTENT_PLACEHOLDER, template, |v| v.to_string())
    }

    /// Like [`render`](Self::render), escaping values for a JSON string literal.
    pub fn render_json(&self, template: &str) -> String {
        self.substitute(&CONTENT_PLACEHOLDER, template, |v| {
            let quoted = serde_json::Value::String(v.to_string()).to_string();
            quoted[1..quoted.len() - 1].to_string()
        })
    }

    /// Substitute `[name]` placeholders in a relative template path.
    pub fn render_path(&self, path: &str) -> String {
        self.substitute(&PATH_PLACEHOLDER, path, |v| v.to_string())
    }

    fn substitute(&self, pattern: &Regex, input: &str, escape: impl Fn(&str) -> String) -> String {
        pattern
            .replace_all(input, |caps: &Captures<'_>| match self.get(&caps[1]) {
                Some(value) => escape(value),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}
