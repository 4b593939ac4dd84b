/* src/server/core/src/page.rs */

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

/// A named virtual route: a served path with no on-disk counterpart, an
/// optional script entry to inject, an optional template override, and
/// render-time variables.
///
/// Pages are immutable once placed in a route-table generation; a changed
/// page set produces a whole new table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Page {
  /// Unique within a table. Must not contain a path separator.
  pub name: String,
  /// Served virtual path. Defaults to `{name}.html`. Must not be absolute.
  pub filename: Option<String>,
  /// Root-absolute path to the script module injected before `</body>`.
  pub entry: Option<String>,
  /// Template override, relative to the project root. Falls back to the
  /// table's default template.
  pub template: Option<PathBuf>,
  /// Variables overlaid on the environment scope at render time.
  pub data: Map<String, Value>,
}

impl Page {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }

  pub fn filename(mut self, filename: impl Into<String>) -> Self {
    self.filename = Some(filename.into());
    self
  }

  pub fn entry(mut self, entry: impl Into<String>) -> Self {
    self.entry = Some(entry.into());
    self
  }

  pub fn template(mut self, template: impl Into<PathBuf>) -> Self {
    self.template = Some(template.into());
    self
  }

  pub fn data(mut self, key: impl Into<String>, value: Value) -> Self {
    self.data.insert(key.into(), value);
    self
  }

  /// Served path for this page, derived from the name when not set
  /// explicitly.
  pub fn served_path(&self) -> String {
    self.filename.clone().unwrap_or_else(|| format!("{}.html", self.name))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn served_path_defaults_to_name_html() {
    assert_eq!(Page::new("about").served_path(), "about.html");
  }

  #[test]
  fn explicit_filename_overrides_default() {
    assert_eq!(Page::new("about").filename("info.html").served_path(), "info.html");
  }

  #[test]
  fn builder_accumulates_data() {
    let page = Page::new("home")
      .entry("/src/home/main.ts")
      .data("title", Value::String("Home".to_string()))
      .data("draft", Value::Bool(false));
    assert_eq!(page.entry.as_deref(), Some("/src/home/main.ts"));
    assert_eq!(page.data.len(), 2);
  }

  #[test]
  fn deserializes_from_config_value() {
    let page: Page = serde_json::from_value(serde_json::json!({
      "name": "docs",
      "entry": "/src/docs/main.ts",
      "template": "templates/docs.html",
      "data": { "title": "Docs" },
    }))
    .unwrap();
    assert_eq!(page.name, "docs");
    assert_eq!(page.template.as_deref(), Some(std::path::Path::new("templates/docs.html")));
    assert_eq!(page.data["title"], Value::String("Docs".to_string()));
    assert!(page.filename.is_none());
  }
}
