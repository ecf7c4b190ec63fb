//! Parsed component record handed to validators.

use serde_json::{Map, Value as Json};

/// Opaque plugin-wide context for cross-component checks.
pub type PluginContext = Map<String, Json>;

#[derive(Debug, Clone, Default)]
/// A single declarative component: structured header plus free-text body.
pub struct Component {
    pub file_path: String,
    pub frontmatter: Map<String, Json>,
    pub body: String,
    /// Name of the directory holding the component; empty when unknown.
    pub folder_name: String,
}

impl Component {
    /// Textual form of a frontmatter field, if present.
    ///
    /// Strings are returned as-is; other scalars as written; null as empty.
    pub fn field_text(&self, key: &str) -> Option<String> {
        self.frontmatter.get(key).map(json_text)
    }
}

pub(crate) fn json_text(v: &Json) -> String {
    match v {
        Json::String(s) => s.clone(),
        Json::Null => String::new(),
        other => other.to_string(),
    }
}
