/* src/server/core/src/routes.rs */

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::PorticoError;
use crate::page::Page;

/// One immutable generation of the page set and the lookup structures
/// derived from it. A rebuild publishes a replacement wholesale; nothing
/// here is ever mutated after construction, so a reader holding a snapshot
/// keeps an internally consistent view across a swap.
#[derive(Debug)]
pub struct RouteTable {
  base: String,
  by_name: HashMap<String, String>,
  by_path: HashMap<String, Arc<Page>>,
  template_set: HashSet<PathBuf>,
  default_template: PathBuf,
}

impl RouteTable {
  /// Build a table from explicit pages followed by discovered ones.
  ///
  /// The first page with a given name wins, which is how explicit pages
  /// shadow discovered pages of the same name. Validation failures are
  /// fatal: no partially valid table is ever produced.
  pub fn build(
    explicit: Vec<Page>,
    discovered: Vec<Page>,
    default_template: &Path,
    base: &str,
  ) -> Result<Self, PorticoError> {
    let mut by_name = HashMap::new();
    let mut by_path = HashMap::new();
    let mut template_set = HashSet::new();
    template_set.insert(default_template.to_path_buf());

    for page in explicit.into_iter().chain(discovered) {
      let served = page.served_path();
      if served.starts_with('/') {
        return Err(PorticoError::config(
          &page.name,
          format!("filename '{served}' must not start with /"),
        ));
      }
      if page.name.contains('/') {
        return Err(PorticoError::config(&page.name, "name must not contain a path separator"));
      }
      if let Some(ref entry) = page.entry {
        if !entry.starts_with('/') {
          return Err(PorticoError::config(
            &page.name,
            format!("entry '{entry}' must be root-absolute"),
          ));
        }
      }
      if by_name.contains_key(&page.name) {
        continue; // first wins
      }
      if let Some(ref template) = page.template {
        template_set.insert(template.clone());
      }
      by_name.insert(page.name.clone(), served.clone());
      by_path.insert(served, Arc::new(page));
    }

    Ok(Self {
      base: normalize_base(base),
      by_name,
      by_path,
      template_set,
      default_template: default_template.to_path_buf(),
    })
  }

  /// Recognize which virtual page a pathname refers to, returning its served
  /// path. `None` means "not a recognized virtual route" and callers pass
  /// the request through to the next handler; it is never an error.
  ///
  /// Registered names never contain a separator, so the path shape is
  /// checked directly rather than through a generated alternation pattern:
  /// the segment after the base, minus an optional `.html`/`.htm` suffix,
  /// must be a registered name followed by end-of-path, `?`, or `#`.
  pub fn resolve(&self, pathname: &str) -> Option<&str> {
    let rest = pathname.strip_prefix(&self.base)?;
    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let candidate = &rest[..end];
    if candidate.is_empty() || candidate.contains('/') {
      return None;
    }
    // The suffix is optional, so a name that itself ends in `.html`/`.htm`
    // must match the whole candidate before any stripping applies.
    // Otherwise a miss here can only be a race against an in-flight rebuild.
    self
      .by_name
      .get(candidate)
      .or_else(|| {
        let name = candidate
          .strip_suffix(".html")
          .or_else(|| candidate.strip_suffix(".htm"))?;
        self.by_name.get(name)
      })
      .map(String::as_str)
  }

  /// Full page definition for a served path.
  pub fn page_for_path(&self, served: &str) -> Option<&Arc<Page>> {
    self.by_path.get(served)
  }

  /// Template path for a page, falling back to the table default.
  pub fn template_for<'a>(&'a self, page: &'a Page) -> &'a Path {
    page.template.as_deref().unwrap_or(&self.default_template)
  }

  /// Whether a root-relative path is one of the templates this generation
  /// reads from. The default template is always a member.
  pub fn contains_template(&self, path: &Path) -> bool {
    self.template_set.contains(path)
  }

  pub fn template_set(&self) -> &HashSet<PathBuf> {
    &self.template_set
  }

  pub fn base(&self) -> &str {
    &self.base
  }

  pub fn page_count(&self) -> usize {
    self.by_path.len()
  }
}

/// Normalize to a leading and trailing slash so `resolve` can strip the
/// whole prefix in one step.
fn normalize_base(base: &str) -> String {
  let trimmed = base.trim_matches('/');
  if trimmed.is_empty() { "/".to_string() } else { format!("/{trimmed}/") }
}
