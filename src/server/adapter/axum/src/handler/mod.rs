/* src/server/adapter/axum/src/handler/mod.rs */

mod page;
mod ws;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use portico_server::{ReconciliationController, RewriteRule};
use serde_json::{Map, Value};

pub(crate) struct AppState {
  pub controller: Arc<ReconciliationController>,
  /// Dev-server rewrites, checked before virtual-route resolution.
  pub rewrites: Vec<RewriteRule>,
  /// Environment scope merged beneath page data at render time.
  pub env: Map<String, Value>,
  pub root: PathBuf,
  pub verbose: bool,
}

pub(crate) fn build_router(state: Arc<AppState>) -> Router {
  // Navigation requests no explicit route claims fall through to the
  // virtual-page handler; whatever it declines stays a 404.
  Router::new()
    .route("/_portico/dev/ws", get(ws::handle_reload_ws))
    .fallback(page::handle_navigation)
    .with_state(state)
}
