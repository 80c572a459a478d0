//! [`SqliteStore`] — the SQLite implementation of [`SessionStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use confab_core::{
  interaction::{Interaction, NewInteraction},
  session::{PersistedSession, SessionProfile},
  store::SessionStore,
  summary::Summary,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Confab session store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Opening the
/// store runs the schema DDL and then cleanses all drafts left behind by the
/// previous process, before any other call is served.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`, run schema initialisation, and
  /// cleanse outstanding drafts.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::bootstrap(conn).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::bootstrap(conn).await
  }

  async fn bootstrap(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let store = Self { conn };
    store.init_schema().await?;

    let removed = store.cleanse_drafts().await?;
    if removed > 0 {
      tracing::info!(removed, "cleansed draft sessions from previous run");
    }

    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SessionStore impl ───────────────────────────────────────────────────────

impl SessionStore for SqliteStore {
  type Error = Error;

  // ── Lifecycle ─────────────────────────────────────────────────────────────

  async fn cleanse_drafts(&self) -> Result<u64> {
    let removed = self
      .conn
      .call(|conn| {
        let n = conn.execute("DELETE FROM sessions WHERE persisted = 0", [])?;
        Ok(n as u64)
      })
      .await?;
    Ok(removed)
  }

  async fn create_session(&self, name: String, description: String) -> Result<i64> {
    // Insert the session, read the minted id inside the same transaction,
    // insert the dependent description row, then commit both or neither.
    let session_id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO sessions (name, persisted) VALUES (?1, 0)",
          rusqlite::params![name],
        )?;
        let session_id = tx.last_insert_rowid();
        tx.execute(
          "INSERT INTO session_descriptions (session_id, description) VALUES (?1, ?2)",
          rusqlite::params![session_id, description],
        )?;
        tx.commit()?;
        Ok(session_id)
      })
      .await?;

    tracing::debug!(session_id, "created draft session");
    Ok(session_id)
  }

  async fn save_session(&self, session_id: i64, name_custom: String) -> Result<()> {
    // Deliberately not validated against an existing row: updating a
    // missing id is a no-op and callers must not rely on an error here.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE sessions SET persisted = 1, name_custom = ?2 WHERE session_id = ?1",
          rusqlite::params![session_id, name_custom],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn session_id_by_name(&self, name: String) -> Result<i64> {
    let lookup = name.clone();
    let found: Option<i64> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT session_id FROM sessions WHERE name = ?1
               ORDER BY session_id ASC LIMIT 1",
              rusqlite::params![lookup],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    found.ok_or_else(|| Error::Core(confab_core::Error::SessionNotFound(name)))
  }

  async fn list_persisted_sessions(&self) -> Result<Vec<PersistedSession>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT s.session_id, s.name, s.name_custom, d.description
           FROM sessions s
           LEFT JOIN session_descriptions d ON d.session_id = s.session_id
           WHERE s.persisted = 1
           ORDER BY s.session_id ASC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(PersistedSession {
              session_id:  row.get(0)?,
              name:        row.get(1)?,
              name_custom: row.get(2)?,
              description: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn describe_session(&self, session_id: i64) -> Result<Option<SessionProfile>> {
    let profile = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT s.session_id, s.name, s.name_custom, s.persisted, d.description
               FROM sessions s
               INNER JOIN session_descriptions d ON d.session_id = s.session_id
               WHERE s.session_id = ?1",
              rusqlite::params![session_id],
              |row| {
                Ok(SessionProfile {
                  session_id:  row.get(0)?,
                  name:        row.get(1)?,
                  name_custom: row.get(2)?,
                  persisted:   row.get(3)?,
                  description: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(profile)
  }

  // ── Interaction log ───────────────────────────────────────────────────────

  async fn append_interaction(
    &self,
    session_id: i64,
    input: NewInteraction,
  ) -> Result<Interaction> {
    let interaction = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO interactions (session_id, user_input, llm_output)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![session_id, input.user_input, input.llm_output],
        )?;
        Ok(Interaction {
          interaction_id: conn.last_insert_rowid(),
          user_input:     input.user_input,
          llm_output:     input.llm_output,
        })
      })
      .await?;
    Ok(interaction)
  }

  async fn list_interactions(&self, session_id: i64) -> Result<Vec<Interaction>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT interaction_id, user_input, llm_output
           FROM interactions
           WHERE session_id = ?1
           ORDER BY interaction_id ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![session_id], |row| {
            Ok(Interaction {
              interaction_id: row.get(0)?,
              user_input:     row.get(1)?,
              llm_output:     row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn amend_last_interaction(
    &self,
    session_id: i64,
    input: NewInteraction,
  ) -> Result<bool> {
    let amended = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE interactions SET user_input = ?2, llm_output = ?3
           WHERE interaction_id = (
             SELECT MAX(interaction_id) FROM interactions WHERE session_id = ?1
           )",
          rusqlite::params![session_id, input.user_input, input.llm_output],
        )?;
        Ok(n > 0)
      })
      .await?;

    if !amended {
      tracing::warn!(session_id, "amend requested but session has no interactions");
    }
    Ok(amended)
  }

  // ── Summary ───────────────────────────────────────────────────────────────

  async fn summary(&self, session_id: i64) -> Result<Summary> {
    let stored = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT summary, n_summarized FROM summaries WHERE session_id = ?1",
              rusqlite::params![session_id],
              |row| {
                Ok(Summary {
                  summary:      row.get(0)?,
                  n_summarized: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;
    Ok(stored.unwrap_or_default())
  }

  async fn upsert_summary(&self, session_id: i64, summary: Summary) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let updated = tx.execute(
          "UPDATE summaries SET summary = ?2, n_summarized = ?3 WHERE session_id = ?1",
          rusqlite::params![session_id, summary.summary, summary.n_summarized],
        )?;

        if updated == 0 {
          // Another writer may insert between our UPDATE and INSERT when
          // the database file is shared across processes. The UNIQUE
          // constraint catches that race; the other writer's row stands.
          match tx.execute(
            "INSERT INTO summaries (session_id, summary, n_summarized)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![session_id, summary.summary, summary.n_summarized],
          ) {
            Ok(_) => {}
            // Only the UNIQUE race is benign; a foreign-key violation
            // (missing session) must still propagate.
            Err(rusqlite::Error::SqliteFailure(e, _))
              if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
              tracing::debug!(session_id, "summary insert lost a concurrent race");
            }
            Err(e) => return Err(e.into()),
          }
        }

        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
