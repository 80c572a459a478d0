//! Handlers for `/sessions/:id/summary` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/sessions/:id/summary` | Default (empty) summary when none stored |
//! | `PUT`  | `/sessions/:id/summary` | Body: [`Summary`]; upserts, 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use confab_core::{store::SessionStore, summary::Summary};

use crate::error::ApiError;

/// `GET /sessions/:id/summary`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Summary>, ApiError>
where
  S: SessionStore,
{
  let summary = store.summary(id).await.map_err(ApiError::from_store)?;
  Ok(Json(summary))
}

/// `PUT /sessions/:id/summary`
pub async fn put_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<Summary>,
) -> Result<StatusCode, ApiError>
where
  S: SessionStore,
{
  store
    .upsert_summary(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
