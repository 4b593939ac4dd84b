/* src/server/core/src/server.rs */

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::page::Page;
use crate::reload::WatchOptions;
use crate::rewrite::RewriteRule;
use crate::scan::ScanConfig;

/// Framework-agnostic parts extracted from `PorticoServer`.
/// Adapter crates consume this to build framework-specific routers.
pub struct PorticoParts {
  pub pages: Vec<Page>,
  /// Applied during the dev server only, before virtual-route resolution.
  pub rewrites: Vec<RewriteRule>,
  /// Applied during the static-preview server only.
  pub preview_rewrites: Vec<RewriteRule>,
  pub scan: Option<ScanConfig>,
  /// Default page template, relative to the project root.
  pub template: PathBuf,
  /// Serving base path.
  pub base: String,
  pub watch: Option<WatchOptions>,
  /// Environment variables exposed to every render scope.
  pub env: Map<String, Value>,
  /// Diagnostic logging only; no behavioral effect.
  pub verbose: bool,
}

pub struct PorticoServer {
  pages: Vec<Page>,
  rewrites: Vec<RewriteRule>,
  preview_rewrites: Vec<RewriteRule>,
  scan: Option<ScanConfig>,
  template: PathBuf,
  base: String,
  watch: Option<WatchOptions>,
  env: Map<String, Value>,
  verbose: bool,
}

impl PorticoServer {
  pub fn new() -> Self {
    Self {
      pages: Vec::new(),
      rewrites: Vec::new(),
      preview_rewrites: Vec::new(),
      scan: None,
      template: PathBuf::from("index.html"),
      base: "/".to_string(),
      watch: None,
      env: Map::new(),
      verbose: false,
    }
  }

  pub fn page(mut self, page: Page) -> Self {
    self.pages.push(page);
    self
  }

  pub fn rewrite(mut self, rule: RewriteRule) -> Self {
    self.rewrites.push(rule);
    self
  }

  pub fn preview_rewrite(mut self, rule: RewriteRule) -> Self {
    self.preview_rewrites.push(rule);
    self
  }

  pub fn scan(mut self, config: ScanConfig) -> Self {
    self.scan = Some(config);
    self
  }

  pub fn template(mut self, template: impl Into<PathBuf>) -> Self {
    self.template = template.into();
    self
  }

  pub fn base(mut self, base: impl Into<String>) -> Self {
    self.base = base.into();
    self
  }

  pub fn watch(mut self, watch: WatchOptions) -> Self {
    self.watch = Some(watch);
    self
  }

  pub fn env(mut self, key: impl Into<String>, value: Value) -> Self {
    self.env.insert(key.into(), value);
    self
  }

  pub fn verbose(mut self, verbose: bool) -> Self {
    self.verbose = verbose;
    self
  }

  /// Consume the builder, returning framework-agnostic parts for an adapter.
  pub fn into_parts(self) -> PorticoParts {
    PorticoParts {
      pages: self.pages,
      rewrites: self.rewrites,
      preview_rewrites: self.preview_rewrites,
      scan: self.scan,
      template: self.template,
      base: self.base,
      watch: self.watch,
      env: self.env,
      verbose: self.verbose,
    }
  }
}

impl Default for PorticoServer {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use regex::Regex;

  use super::*;

  #[test]
  fn defaults() {
    let parts = PorticoServer::new().into_parts();
    assert!(parts.pages.is_empty());
    assert!(parts.rewrites.is_empty());
    assert!(parts.scan.is_none());
    assert_eq!(parts.template, PathBuf::from("index.html"));
    assert_eq!(parts.base, "/");
    assert!(parts.env.is_empty());
    assert!(!parts.verbose);
  }

  #[test]
  fn builder_accumulates_in_declaration_order() {
    let parts = PorticoServer::new()
      .page(Page::new("home"))
      .page(Page::new("about"))
      .rewrite(RewriteRule::new(Regex::new("^/a$").unwrap(), "/b"))
      .env("mode", Value::String("development".to_string()))
      .template("templates/app.html")
      .base("/app")
      .verbose(true)
      .into_parts();

    assert_eq!(parts.pages.len(), 2);
    assert_eq!(parts.pages[0].name, "home");
    assert_eq!(parts.rewrites.len(), 1);
    assert_eq!(parts.template, PathBuf::from("templates/app.html"));
    assert_eq!(parts.base, "/app");
    assert!(parts.verbose);
  }
}
