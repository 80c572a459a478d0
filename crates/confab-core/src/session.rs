//! Session — the named container for one conversation.
//!
//! A session starts life as a draft (`persisted = false`). Drafts are swept
//! away the next time the store opens; only an explicit save makes a session
//! durable. The description, interaction log, and summary all hang off the
//! session id and are deleted with it.

use serde::{Deserialize, Serialize};

/// A named unit of conversation.
///
/// `name` is the machine name given at creation; `name_custom` is the
/// user-facing display name assigned when the session is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub session_id:  i64,
  pub name:        String,
  pub name_custom: Option<String>,
  pub persisted:   bool,
}

/// A session inner-joined with its description text — the read model
/// returned by [`describe_session`](crate::store::SessionStore::describe_session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProfile {
  pub session_id:  i64,
  pub name:        String,
  pub name_custom: Option<String>,
  pub persisted:   bool,
  pub description: String,
}

/// One row of [`list_persisted_sessions`](crate::store::SessionStore::list_persisted_sessions).
///
/// `persisted` is implied true. The description is left-joined and may be
/// absent for rows written before descriptions existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
  pub session_id:  i64,
  pub name:        String,
  pub name_custom: Option<String>,
  pub description: Option<String>,
}
