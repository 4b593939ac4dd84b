/* src/server/core/src/errors.rs */

use std::fmt;
use std::path::PathBuf;

/// Error taxonomy for the routing core.
///
/// `Config` and `Discovery` are fatal at table-build time: a build that hits
/// one produces no table at all. `Render` and `Load` are scoped to a single
/// request and never invalidate the published route table.
#[derive(Debug)]
pub enum PorticoError {
  /// Malformed page definition (absolute filename, separator in the name,
  /// non-absolute entry).
  Config { page: String, reason: String },
  /// Scan directory missing or unreadable.
  Discovery { dir: PathBuf, source: std::io::Error },
  /// Template missing or the variable pass failed.
  Render { page: String, path: PathBuf, reason: String },
  /// The table claims a route whose page definition cannot be produced.
  Load { path: String },
}

impl PorticoError {
  pub fn config(page: impl Into<String>, reason: impl Into<String>) -> Self {
    Self::Config { page: page.into(), reason: reason.into() }
  }

  pub fn discovery(dir: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Discovery { dir: dir.into(), source }
  }

  pub fn render(
    page: impl Into<String>,
    path: impl Into<PathBuf>,
    reason: impl Into<String>,
  ) -> Self {
    Self::Render { page: page.into(), path: path.into(), reason: reason.into() }
  }

  pub fn load(path: impl Into<String>) -> Self {
    Self::Load { path: path.into() }
  }

  pub fn code(&self) -> &'static str {
    match self {
      Self::Config { .. } => "CONFIG_ERROR",
      Self::Discovery { .. } => "DISCOVERY_ERROR",
      Self::Render { .. } => "RENDER_ERROR",
      Self::Load { .. } => "LOAD_FAILURE",
    }
  }

  pub fn message(&self) -> String {
    match self {
      Self::Config { page, reason } => format!("page '{page}': {reason}"),
      Self::Discovery { dir, source } => format!("scan dir {}: {source}", dir.display()),
      Self::Render { page, path, reason } => {
        format!("page '{page}' ({}): {reason}", path.display())
      }
      Self::Load { path } => format!("no content for route '{path}'"),
    }
  }
}

impl fmt::Display for PorticoError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code(), self.message())
  }
}

impl std::error::Error for PorticoError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Discovery { source, .. } => Some(source),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn codes_per_variant() {
    assert_eq!(PorticoError::config("a", "bad").code(), "CONFIG_ERROR");
    assert_eq!(
      PorticoError::discovery("pages", std::io::Error::other("denied")).code(),
      "DISCOVERY_ERROR",
    );
    assert_eq!(PorticoError::render("a", "t.html", "eof").code(), "RENDER_ERROR");
    assert_eq!(PorticoError::load("a.html").code(), "LOAD_FAILURE");
  }

  #[test]
  fn display_format() {
    let err = PorticoError::config("docs", "name must not contain a path separator");
    assert_eq!(err.to_string(), "CONFIG_ERROR: page 'docs': name must not contain a path separator");
  }

  #[test]
  fn render_message_names_page_and_path() {
    let err = PorticoError::render("home", "templates/app.html", "unexpected end of input");
    let msg = err.message();
    assert!(msg.contains("home"));
    assert!(msg.contains("templates/app.html"));
  }

  #[test]
  fn discovery_keeps_io_source() {
    let err = PorticoError::discovery("src/pages", std::io::Error::other("not a directory"));
    assert!(std::error::Error::source(&err).is_some());
  }
}
