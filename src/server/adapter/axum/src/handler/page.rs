/* src/server/adapter/axum/src/handler/page.rs */

use std::borrow::Cow;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{Method, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use portico_server::{PorticoError, match_rewrites};

use crate::error::AxumError;
use crate::ui;

/// Client script injected into every served page. Connects back to the dev
/// websocket and reloads the document on a full-reload broadcast.
const LIVE_RELOAD_SCRIPT: &str = r#"<script>
(() => {
  const scheme = location.protocol === "https:" ? "wss" : "ws";
  const connect = () => {
    const ws = new WebSocket(`${scheme}://${location.host}/_portico/dev/ws`);
    ws.onmessage = (event) => {
      if (event.data === "reload") location.reload();
    };
    ws.onclose = () => setTimeout(connect, 1000);
  };
  connect();
})();
</script>"#;

/// Fallback for everything no explicit route claimed. Only HTML navigations
/// are candidates for virtual pages; anything else stays a plain 404 so
/// asset and API traffic passes through untouched.
pub(crate) async fn handle_navigation(
  State(state): State<Arc<super::AppState>>,
  req: Request,
) -> Response {
  if !is_html_navigation(&req) {
    return StatusCode::NOT_FOUND.into_response();
  }
  let pathname = req.uri().path().to_string();
  match respond(&state, &pathname).await {
    Ok(Some(response)) => response,
    Ok(None) => StatusCode::NOT_FOUND.into_response(),
    Err(err) => {
      ui::error(&err.to_string());
      AxumError(err).into_response()
    }
  }
}

fn is_html_navigation(req: &Request) -> bool {
  if req.method() != Method::GET && req.method() != Method::HEAD {
    return false;
  }
  req
    .headers()
    .get(header::ACCEPT)
    .and_then(|accept| accept.to_str().ok())
    .is_some_and(|accept| accept.contains("text/html"))
}

/// Rewrite, resolve, render. `Ok(None)` is "not ours", not an error.
async fn respond(
  state: &super::AppState,
  pathname: &str,
) -> Result<Option<Response>, PorticoError> {
  let effective = match match_rewrites(pathname, &state.rewrites) {
    Some(hit) => {
      if state.verbose {
        ui::detail(&format!("rewrite[{}] {pathname} -> {}", hit.rule_index, hit.target));
      }
      Cow::Owned(hit.target)
    }
    None => Cow::Borrowed(pathname),
  };

  let snapshot = state.controller.snapshot();
  let Some(served) = snapshot.resolve(&effective) else {
    return Ok(None);
  };
  let page = snapshot.page_for_path(served).ok_or_else(|| PorticoError::load(served))?;

  let template = snapshot.template_for(page);
  let raw = tokio::fs::read_to_string(state.root.join(template)).await.map_err(|err| {
    PorticoError::render(page.name.as_str(), template, format!("read failed: {err}"))
  })?;
  let rendered = portico_injector::render_template(&raw, page.entry.as_deref(), &state.env, &page.data)
    .map_err(|err| PorticoError::render(page.name.as_str(), template, err.to_string()))?;

  if state.verbose {
    ui::detail(&format!("{pathname} -> {} ({})", page.name, template.display()));
  }
  Ok(Some(Html(with_reload_client(&rendered)).into_response()))
}

/// Splice the reload client before the first `</body>`, appending when the
/// document has none. Mirrors entry injection so both additions land in the
/// same place.
fn with_reload_client(html: &str) -> String {
  match html.find("</body>") {
    Some(idx) => {
      let mut out = String::with_capacity(html.len() + LIVE_RELOAD_SCRIPT.len() + 1);
      out.push_str(&html[..idx]);
      out.push_str(LIVE_RELOAD_SCRIPT);
      out.push('\n');
      out.push_str(&html[idx..]);
      out
    }
    None => format!("{html}\n{LIVE_RELOAD_SCRIPT}"),
  }
}
