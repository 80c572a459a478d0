//! The `SessionStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `confab-store-sqlite`).
//! Higher layers (`confab-api`, `confab-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  interaction::{Interaction, NewInteraction},
  session::{PersistedSession, SessionProfile},
  summary::Summary,
};

/// Abstraction over a Confab session store backend.
///
/// A session is a draft until explicitly saved; the backend is expected to
/// delete all outstanding drafts (and their dependent rows) when it opens,
/// before serving any call.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). The associated
/// error type converts into [`crate::Error`] so generic callers can classify
/// failures without knowing the backend.
pub trait SessionStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Lifecycle ─────────────────────────────────────────────────────────

  /// Delete every draft session, cascading to descriptions, interactions,
  /// and summaries. Returns the number of sessions removed.
  ///
  /// Backends run this once when they open; it is also callable directly.
  fn cleanse_drafts(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Create a draft session and its description as one atomic transaction:
  /// both rows commit together or neither does. Returns the minted id so
  /// the caller can chain interaction appends immediately.
  fn create_session(
    &self,
    name: String,
    description: String,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Mark a session persisted and set its display name.
  ///
  /// A missing id is a no-op update, not an error — callers must not rely
  /// on this to detect absent sessions.
  fn save_session(
    &self,
    session_id: i64,
    name_custom: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Look up a session id by machine name.
  ///
  /// Fails with [`crate::Error::SessionNotFound`] when zero rows match.
  /// Names are not required to be unique; on duplicates the lowest id wins.
  fn session_id_by_name(
    &self,
    name: String,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// All persisted sessions in ascending id order, each left-joined with
  /// its description text when available.
  fn list_persisted_sessions(
    &self,
  ) -> impl Future<Output = Result<Vec<PersistedSession>, Self::Error>> + Send + '_;

  /// A session inner-joined with its description. Returns `None` (not an
  /// error) when either row is absent.
  fn describe_session(
    &self,
    session_id: i64,
  ) -> impl Future<Output = Result<Option<SessionProfile>, Self::Error>> + Send + '_;

  // ── Interaction log ───────────────────────────────────────────────────

  /// Insert a new interaction at the tail of the session's log and return
  /// the stored record.
  ///
  /// Session existence is checked only by the store's foreign-key
  /// constraint, which surfaces as an integrity failure if violated.
  fn append_interaction(
    &self,
    session_id: i64,
    input: NewInteraction,
  ) -> impl Future<Output = Result<Interaction, Self::Error>> + Send + '_;

  /// All interactions for a session in ascending id (chronological) order.
  fn list_interactions(
    &self,
    session_id: i64,
  ) -> impl Future<Output = Result<Vec<Interaction>, Self::Error>> + Send + '_;

  /// Overwrite the most recent interaction for the session with new text.
  ///
  /// Returns `false` when the session has no interactions yet — a logged
  /// no-op, not an error. Callers must not assume the first turn can be
  /// amended before anything was appended.
  fn amend_last_interaction(
    &self,
    session_id: i64,
    input: NewInteraction,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Summary ───────────────────────────────────────────────────────────

  /// The session's rolling summary, or [`Summary::default`] when none has
  /// been stored yet.
  fn summary(
    &self,
    session_id: i64,
  ) -> impl Future<Output = Result<Summary, Self::Error>> + Send + '_;

  /// Update the stored summary if present, else insert one.
  ///
  /// A uniqueness violation from a concurrent insert race is suppressed:
  /// the other writer's row stands and this call succeeds. Callers must not
  /// assume the call is atomically race-free across processes.
  fn upsert_summary(
    &self,
    session_id: i64,
    summary: Summary,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
