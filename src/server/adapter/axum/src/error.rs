/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use portico_server::PorticoError;

/// Newtype wrapper to implement `IntoResponse` for `PorticoError`.
/// Required because Rust's orphan rule prevents `impl IntoResponse` for a
/// type owned by the core crate.
///
/// Render and load failures are scoped to the single request being served;
/// the response carries the error body rather than blank content.
pub(crate) struct AxumError(pub PorticoError);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let err = self.0;
    let body = serde_json::json!({
      "ok": false,
      "error": {
        "code": err.code(),
        "message": err.message(),
      }
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
  }
}

impl From<PorticoError> for AxumError {
  fn from(err: PorticoError) -> Self {
    Self(err)
  }
}
