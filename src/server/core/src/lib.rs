/* src/server/core/src/lib.rs */

//! Routing core of the Portico multi-page dev server: resolves which virtual
//! page a request refers to, evaluates custom rewrite rules, and reconciles
//! the route table when the page set changes on disk. Template loading and
//! HTTP handling live in the adapter crates.

pub mod errors;
pub mod page;
pub mod reload;
pub mod rewrite;
pub mod routes;
pub mod scan;
pub mod server;

// Re-exports for ergonomic use
pub use errors::PorticoError;
pub use page::Page;
pub use reload::{
  FullReload, ReconciliationController, WatchContext, WatchEventKind, WatchHandlerFn, WatchOptions,
};
pub use rewrite::{
  RewriteCtx, RewriteFn, RewriteHit, RewriteRule, RewriteTarget, match_rewrites,
};
pub use routes::RouteTable;
pub use scan::{FilenameFn, ScanConfig, scan_pages};
pub use server::{PorticoParts, PorticoServer};
