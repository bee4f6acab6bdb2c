//! HTTP interface of the registry.
//!
//! | Method | Path      | Body / query                          | Success                  |
//! |--------|-----------|---------------------------------------|--------------------------|
//! | POST   | `/`       | JSON registration                     | the stored record        |
//! | GET    | `/`       | exactly one of `telegram_id`, `discord_id`, `email` | list of matches |
//! | GET    | `/health` |                                       | `{"status": "ok"}`       |
//!
//! Every failure answers with `{"detail": "..."}`. Caller mistakes are reported verbatim;
//! store faults are logged and hidden behind a generic message.

use axum::{
  extract::{
    rejection::{JsonRejection, QueryRejection},
    Query, State,
  },
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::get,
  Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use super::*;

/// Builds the application router around a shared registrar.
pub fn router(registrar: Registrar) -> Router {
  Router::new()
    .route("/", get(lookup_handler).post(submit_handler))
    .route("/health", get(health_handler))
    .layer(TraceLayer::new_for_http())
    .with_state(registrar)
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  /// Human-readable reason
  pub detail: String,
}

/// A failed request.
#[derive(Debug)]
pub enum ApiError {
  /// The registrar refused or failed the operation
  Registrar(RegistrarError),
  /// The request could not be extracted
  Rejected(StatusCode, String),
}

impl From<RegistrarError> for ApiError {
  fn from(err: RegistrarError) -> Self { ApiError::Registrar(err) }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::Rejected(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    ApiError::Rejected(StatusCode::BAD_REQUEST, rejection.body_text())
  }
}

impl ApiError {
  /// Get HTTP status code for this error
  pub fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Registrar(err) => match err {
        RegistrarError::EmptyField(_) | RegistrarError::AmbiguousLookup => StatusCode::BAD_REQUEST,
        RegistrarError::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RegistrarError::UnconfirmedAppend(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
      },
      ApiError::Rejected(status, _) => *status,
    }
  }

  /// Message sent to the client.
  pub fn detail(&self) -> String {
    match self {
      ApiError::Registrar(err) => match self.status_code() {
        StatusCode::BAD_GATEWAY => "Bad Gateway ()".into(),
        StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error".into(),
        _ => err.to_string(),
      },
      ApiError::Rejected(_, detail) => detail.clone(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status_code();
    if status.is_server_error() {
      error!("Request failed: {self:?}");
    } else {
      debug!("Rejected request: {self:?}");
    }
    (status, Json(ErrorResponse { detail: self.detail() })).into_response()
  }
}

/// `POST /`: validate and store a registration.
async fn submit_handler(
  State(registrar): State<Registrar>,
  body: core::result::Result<Json<Value>, JsonRejection>,
) -> core::result::Result<Json<Node>, ApiError> {
  let Json(submission) = body?;
  let node = registrar.submit(submission).await?;
  info!("Registered row {}", node.id);
  Ok(Json(node))
}

/// `GET /`: find registrations by one key.
async fn lookup_handler(
  State(registrar): State<Registrar>,
  params: core::result::Result<Query<LookupParams>, QueryRejection>,
) -> core::result::Result<Json<Vec<Node>>, ApiError> {
  let Query(params) = params?;
  let nodes = registrar.lookup(params).await?;
  if nodes.is_empty() {
    debug!("Lookup matched no registrations");
  }
  Ok(Json(nodes))
}

/// `GET /health`: liveness probe.
async fn health_handler() -> Json<Value> { Json(json!({ "status": "ok" })) }
