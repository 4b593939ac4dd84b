/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;
mod preview;
mod ui;
mod watch;

use std::path::Path;
use std::sync::Arc;

use portico_server::{PorticoError, PorticoServer, ReconciliationController};

pub use preview::preview_router;
pub use watch::run_watch;

/// Re-export the core and injector crates for convenience
pub use portico_injector;
pub use portico_server;

/// Router plus the controller behind it, so callers can reach the snapshot
/// and reload surface after setup.
pub struct PorticoApp {
  pub router: axum::Router,
  pub controller: Arc<ReconciliationController>,
}

/// Extension trait that converts a `PorticoServer` into an Axum app.
pub trait IntoAxumRouter {
  fn into_axum_app(self, root: &Path) -> Result<PorticoApp, PorticoError>;
  fn serve(
    self,
    root: &Path,
    addr: &str,
  ) -> impl std::future::Future<Output = Result<(), Box<dyn std::error::Error>>> + Send;
}

impl IntoAxumRouter for PorticoServer {
  fn into_axum_app(self, root: &Path) -> Result<PorticoApp, PorticoError> {
    let parts = self.into_parts();
    let controller = Arc::new(ReconciliationController::new(
      root,
      parts.pages,
      parts.scan,
      parts.template,
      parts.base,
      parts.watch,
    )?);
    let state = Arc::new(handler::AppState {
      controller: Arc::clone(&controller),
      rewrites: parts.rewrites,
      env: parts.env,
      root: root.to_path_buf(),
      verbose: parts.verbose,
    });
    Ok(PorticoApp { router: handler::build_router(state), controller })
  }

  async fn serve(self, root: &Path, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = self.into_axum_app(root)?;
    let watch_controller = Arc::clone(&app.controller);
    tokio::spawn(async move {
      if let Err(err) = run_watch(watch_controller).await {
        ui::error(&format!("file watcher stopped: {err}"));
      }
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    ui::info(&format!(
      "{}dev server running on http://localhost:{}{}",
      ui::GREEN,
      local_addr.port(),
      ui::RESET
    ));
    axum::serve(listener, app.router).await?;
    Ok(())
  }
}
