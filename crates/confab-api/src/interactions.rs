//! Handlers for `/sessions/:id/interactions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/sessions/:id/interactions` | Full log in chronological order |
//! | `POST` | `/sessions/:id/interactions` | Body: [`NewInteraction`]; 201 + stored record |
//! | `PUT`  | `/sessions/:id/interactions/last` | Amend the newest turn; `{"amended":bool}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use confab_core::{
  interaction::{Interaction, NewInteraction},
  store::SessionStore,
};
use serde::Serialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /sessions/:id/interactions`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Interaction>>, ApiError>
where
  S: SessionStore,
{
  let log = store
    .list_interactions(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(log))
}

// ─── Append ───────────────────────────────────────────────────────────────────

/// `POST /sessions/:id/interactions`
pub async fn append<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewInteraction>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SessionStore,
{
  let stored = store
    .append_interaction(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(stored)))
}

// ─── Amend tail ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AmendOutcome {
  /// `false` when the session had no interactions to amend.
  pub amended: bool,
}

/// `PUT /sessions/:id/interactions/last`
pub async fn amend_last<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewInteraction>,
) -> Result<Json<AmendOutcome>, ApiError>
where
  S: SessionStore,
{
  let amended = store
    .amend_last_interaction(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(AmendOutcome { amended }))
}
