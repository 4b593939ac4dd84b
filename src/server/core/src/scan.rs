/* src/server/core/src/scan.rs */

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::PorticoError;
use crate::page::Page;

pub type FilenameFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Directory-scanning configuration, expanded into discovered pages that are
/// merged beneath explicitly declared ones.
#[derive(Clone, Default)]
pub struct ScanConfig {
  /// Directories (relative to the project root) whose immediate
  /// subdirectories become pages. Non-directory entries are ignored.
  pub scan_dirs: Vec<PathBuf>,
  /// Relative file name that becomes a subdirectory's entry when present in
  /// the configuration.
  pub entry_file: Option<String>,
  /// Maps a discovered directory name to a served path. When unset the
  /// default `{name}.html` applies.
  pub filename: Option<FilenameFn>,
}

impl fmt::Debug for ScanConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ScanConfig")
      .field("scan_dirs", &self.scan_dirs)
      .field("entry_file", &self.entry_file)
      .field("filename", &self.filename.as_ref().map(|_| "<fn>"))
      .finish()
  }
}

/// Expand the scan configuration into discovered pages.
///
/// Results follow directory-listing order; the only ordering guarantee the
/// table build relies on is that explicit pages precede discovered ones.
/// A missing or unreadable scan directory is fatal, never a silent skip.
pub fn scan_pages(root: &Path, config: &ScanConfig) -> Result<Vec<Page>, PorticoError> {
  let mut pages = Vec::new();
  for dir in &config.scan_dirs {
    let abs = root.join(dir);
    let entries = std::fs::read_dir(&abs).map_err(|e| PorticoError::discovery(abs.clone(), e))?;
    for entry in entries {
      let entry = entry.map_err(|e| PorticoError::discovery(abs.clone(), e))?;
      if !entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
        continue;
      }
      let name = entry.file_name().to_string_lossy().into_owned();
      let mut page = Page::new(&name);
      if let Some(ref filename_fn) = config.filename {
        page.filename = Some(filename_fn(&name));
      }
      if let Some(ref entry_file) = config.entry_file {
        page.entry = Some(root_absolute(dir, &name, entry_file));
      }
      pages.push(page);
    }
  }
  Ok(pages)
}

/// Join a scan dir, subdirectory name, and entry file into a root-absolute
/// entry path.
fn root_absolute(dir: &Path, name: &str, file: &str) -> String {
  let dir = dir.to_string_lossy();
  let dir = dir.trim_start_matches("./").trim_matches('/');
  if dir.is_empty() { format!("/{name}/{file}") } else { format!("/{dir}/{name}/{file}") }
}
