/* src/server/core/src/reload.rs */

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::broadcast;

use crate::errors::PorticoError;
use crate::page::Page;
use crate::routes::RouteTable;
use crate::scan::{ScanConfig, scan_pages};

/// Instruction to connected clients to discard current page state and
/// reload. Full invalidation only; no partial diffing is attempted.
#[derive(Debug, Clone, Copy)]
pub struct FullReload;

/// Change kinds the watch surface recognizes. Anything else an external
/// watcher reports is outside this core's scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchEventKind {
  Create,
  Modify,
  Remove,
}

pub type WatchHandlerFn = Arc<dyn Fn(&WatchContext<'_>) + Send + Sync>;

/// Watch configuration: either a bare handler that sees every event kind,
/// or full options restricting which kinds reach the handler.
#[derive(Clone)]
pub enum WatchOptions {
  Handler(WatchHandlerFn),
  Full { events: Vec<WatchEventKind>, handler: WatchHandlerFn },
}

impl WatchOptions {
  /// Collapse both forms once at setup so per-event dispatch never
  /// type-branches.
  fn resolve(self) -> ResolvedWatch {
    match self {
      Self::Handler(handler) => ResolvedWatch { events: None, handler },
      Self::Full { events, handler } => {
        ResolvedWatch { events: Some(events.into_iter().collect()), handler }
      }
    }
  }
}

struct ResolvedWatch {
  events: Option<HashSet<WatchEventKind>>,
  handler: WatchHandlerFn,
}

impl ResolvedWatch {
  fn accepts(&self, kind: WatchEventKind) -> bool {
    self.events.as_ref().is_none_or(|set| set.contains(&kind))
  }
}

/// Passed to the configured watch handler for each accepted event.
pub struct WatchContext<'a> {
  pub kind: WatchEventKind,
  /// Changed path, relative to the project root.
  pub path: &'a Path,
  controller: &'a ReconciliationController,
}

impl WatchContext<'_> {
  /// Re-run discovery and swap in a fresh route table.
  pub fn reload_pages(&self) -> Result<(), PorticoError> {
    self.controller.reload_pages()
  }
}

/// Owns the published `RouteTable` generation and reacts to external change
/// notifications. Only this controller produces new generations, and always
/// by full replacement: readers observe either the table before a rebuild or
/// the one after it, never a half-built state.
pub struct ReconciliationController {
  root: PathBuf,
  explicit: Vec<Page>,
  scan: Option<ScanConfig>,
  default_template: PathBuf,
  base: String,
  snapshot: ArcSwap<RouteTable>,
  reload_tx: broadcast::Sender<FullReload>,
  watch: Option<ResolvedWatch>,
}

impl ReconciliationController {
  /// Build the initial table generation. Configuration and discovery errors
  /// abort startup here rather than producing a partial table.
  pub fn new(
    root: impl Into<PathBuf>,
    explicit: Vec<Page>,
    scan: Option<ScanConfig>,
    default_template: impl Into<PathBuf>,
    base: impl Into<String>,
    watch: Option<WatchOptions>,
  ) -> Result<Self, PorticoError> {
    let root = root.into();
    let default_template = default_template.into();
    let base = base.into();
    let discovered = match scan {
      Some(ref config) => scan_pages(&root, config)?,
      None => Vec::new(),
    };
    let table = RouteTable::build(explicit.clone(), discovered, &default_template, &base)?;
    let (reload_tx, _) = broadcast::channel(16);
    Ok(Self {
      root,
      explicit,
      scan,
      default_template,
      base,
      snapshot: ArcSwap::from_pointee(table),
      reload_tx,
      watch: watch.map(WatchOptions::resolve),
    })
  }

  /// Current table generation. The returned handle stays internally
  /// consistent even if a rebuild swaps the snapshot mid-request.
  pub fn snapshot(&self) -> Arc<RouteTable> {
    self.snapshot.load_full()
  }

  /// Re-run discovery and table construction, then swap the snapshot
  /// atomically. A failed rebuild leaves the previous generation published.
  /// Updates future resolution only; no client is notified.
  pub fn reload_pages(&self) -> Result<(), PorticoError> {
    let discovered = match self.scan {
      Some(ref config) => scan_pages(&self.root, config)?,
      None => Vec::new(),
    };
    let table =
      RouteTable::build(self.explicit.clone(), discovered, &self.default_template, &self.base)?;
    self.snapshot.store(Arc::new(table));
    Ok(())
  }

  pub fn subscribe_full_reload(&self) -> broadcast::Receiver<FullReload> {
    self.reload_tx.subscribe()
  }

  /// Template content change: broadcast a full reload when the changed file
  /// belongs to the current template set, since template structure affects
  /// every page referencing it. Returns whether a reload was sent.
  pub fn notify_file_changed(&self, path: &Path) -> bool {
    let rel = self.relative(path);
    if self.snapshot.load().contains_template(rel) {
      let _ = self.reload_tx.send(FullReload);
      true
    } else {
      false
    }
  }

  /// Dispatch a watch event to the configured handler, if one accepts this
  /// kind. The handler may elect to reload the page set.
  pub fn handle_watch_event(&self, kind: WatchEventKind, path: &Path) {
    let Some(ref watch) = self.watch else { return };
    if !watch.accepts(kind) {
      return;
    }
    let ctx = WatchContext { kind, path: self.relative(path), controller: self };
    (watch.handler)(&ctx);
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn relative<'a>(&self, path: &'a Path) -> &'a Path {
    path.strip_prefix(&self.root).unwrap_or(path)
  }
}
