/* src/server/adapter/axum/src/preview.rs */

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::http::Uri;
use portico_server::{RewriteRule, match_rewrites};
use tower_http::services::ServeDir;

/// Static file router over a build output directory, with the preview
/// rewrite rules applied before file lookup. No virtual pages and no
/// rendering here; whatever the rewrite produces must exist on disk.
pub fn preview_router(rules: Vec<RewriteRule>, root: impl AsRef<Path>) -> Router {
  let rules = Arc::new(rules);
  Router::new().fallback_service(ServeDir::new(root.as_ref())).layer(
    axum::middleware::map_request(move |mut req: Request| {
      let rules = Arc::clone(&rules);
      async move {
        if let Some(hit) = match_rewrites(req.uri().path(), &rules)
          && let Ok(uri) = hit.target.parse::<Uri>()
        {
          *req.uri_mut() = uri;
        }
        req
      }
    }),
  )
}
