//! JSON REST API for Confab.
//!
//! Exposes an axum [`Router`] backed by any [`confab_core::store::SessionStore`].
//! Auth, CORS, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", confab_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod interactions;
pub mod sessions;
pub mod summary;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use confab_core::store::SessionStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SessionStore + Send + Sync + 'static,
{
  Router::new()
    // Sessions
    .route("/sessions", get(sessions::list::<S>).post(sessions::create::<S>))
    .route("/sessions/resolve", get(sessions::resolve::<S>))
    .route("/sessions/{id}", get(sessions::get_one::<S>))
    .route("/sessions/{id}/save", post(sessions::save::<S>))
    // Interactions
    .route(
      "/sessions/{id}/interactions",
      get(interactions::list::<S>).post(interactions::append::<S>),
    )
    .route(
      "/sessions/{id}/interactions/last",
      put(interactions::amend_last::<S>),
    )
    // Summary
    .route(
      "/sessions/{id}/summary",
      get(summary::get_one::<S>).put(summary::put_one::<S>),
    )
    .with_state(store)
}
