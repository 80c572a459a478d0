//! Handlers for `/sessions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/sessions` | All persisted sessions with descriptions |
//! | `POST` | `/sessions` | Body: `{"name":"...","description":"..."}`; creates a draft |
//! | `GET`  | `/sessions/resolve?name=` | Resolve a machine name to an id; 404 if unknown |
//! | `GET`  | `/sessions/:id` | Session joined with description; 404 if not found |
//! | `POST` | `/sessions/:id/save` | Body: `{"name":"..."}`; marks the draft persisted |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use confab_core::{
  session::{PersistedSession, SessionProfile},
  store::SessionStore,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /sessions`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<PersistedSession>>, ApiError>
where
  S: SessionStore,
{
  let sessions = store
    .list_persisted_sessions()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(sessions))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name:        String,
  pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SessionRef {
  pub session_id: i64,
}

/// `POST /sessions` — creates a draft; it stays a draft until saved.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SessionStore,
{
  let session_id = store
    .create_session(body.name, body.description)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(SessionRef { session_id })))
}

// ─── Resolve ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
  pub name: String,
}

/// `GET /sessions/resolve?name=<name>`
pub async fn resolve<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ResolveParams>,
) -> Result<Json<SessionRef>, ApiError>
where
  S: SessionStore,
{
  let session_id = store
    .session_id_by_name(params.name)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(SessionRef { session_id }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /sessions/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<SessionProfile>, ApiError>
where
  S: SessionStore,
{
  let profile = store
    .describe_session(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("session {id} not found")))?;
  Ok(Json(profile))
}

// ─── Save ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveBody {
  /// The display name the session is saved under.
  pub name: String,
}

/// `POST /sessions/:id/save`
///
/// An id with no backing row makes this a no-op update; the response is
/// 204 either way.
pub async fn save<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<SaveBody>,
) -> Result<StatusCode, ApiError>
where
  S: SessionStore,
{
  store
    .save_session(id, body.name)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
