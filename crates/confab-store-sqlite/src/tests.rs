//! Integration tests for `SqliteStore` against in-memory and on-disk
//! databases. The on-disk cases cover the restart cleanse, which only shows
//! up across a close-and-reopen of the same file.

use confab_core::{
  interaction::NewInteraction, store::SessionStore, summary::Summary,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn turn(user: &str, llm: &str) -> NewInteraction {
  NewInteraction::new(user, llm)
}

// ─── Session creation and lookup ─────────────────────────────────────────────

#[tokio::test]
async fn create_session_returns_monotonic_ids() {
  let s = store().await;

  let first = s
    .create_session("alpha".into(), "first".into())
    .await
    .unwrap();
  let second = s
    .create_session("beta".into(), "second".into())
    .await
    .unwrap();

  assert!(second > first);
}

#[tokio::test]
async fn create_session_writes_description_atomically() {
  let s = store().await;
  let id = s
    .create_session("alpha".into(), "a test session".into())
    .await
    .unwrap();

  let profile = s.describe_session(id).await.unwrap().unwrap();
  assert_eq!(profile.session_id, id);
  assert_eq!(profile.name, "alpha");
  assert_eq!(profile.description, "a test session");
  assert!(!profile.persisted);
  assert!(profile.name_custom.is_none());
}

#[tokio::test]
async fn session_id_by_name_finds_session() {
  let s = store().await;
  let id = s.create_session("alpha".into(), "d".into()).await.unwrap();

  assert_eq!(s.session_id_by_name("alpha".into()).await.unwrap(), id);
}

#[tokio::test]
async fn session_id_by_name_unknown_is_not_found() {
  let s = store().await;

  let err = s.session_id_by_name("nonexistent".into()).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::Core(confab_core::Error::SessionNotFound(ref name)) if name == "nonexistent"
  ));
}

#[tokio::test]
async fn session_id_by_name_duplicate_returns_lowest_id() {
  let s = store().await;
  let first = s.create_session("twin".into(), "a".into()).await.unwrap();
  s.create_session("twin".into(), "b".into()).await.unwrap();

  assert_eq!(s.session_id_by_name("twin".into()).await.unwrap(), first);
}

#[tokio::test]
async fn describe_missing_session_returns_none() {
  let s = store().await;
  assert!(s.describe_session(42).await.unwrap().is_none());
}

// ─── Save and listing ────────────────────────────────────────────────────────

#[tokio::test]
async fn save_session_marks_persisted_with_custom_name() {
  let s = store().await;
  let id = s.create_session("alpha".into(), "d".into()).await.unwrap();

  s.save_session(id, "Alpha Custom".into()).await.unwrap();

  let profile = s.describe_session(id).await.unwrap().unwrap();
  assert!(profile.persisted);
  assert_eq!(profile.name_custom.as_deref(), Some("Alpha Custom"));
}

#[tokio::test]
async fn save_missing_session_is_noop() {
  let s = store().await;
  // No row with this id; the update must succeed without touching anything.
  s.save_session(999, "ghost".into()).await.unwrap();
  assert!(s.list_persisted_sessions().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_persisted_excludes_drafts_and_orders_by_id() {
  let s = store().await;
  let a = s.create_session("a".into(), "da".into()).await.unwrap();
  let b = s.create_session("b".into(), "db".into()).await.unwrap();
  s.create_session("draft".into(), "never saved".into())
    .await
    .unwrap();

  s.save_session(b, "B".into()).await.unwrap();
  s.save_session(a, "A".into()).await.unwrap();

  let listed = s.list_persisted_sessions().await.unwrap();
  assert_eq!(listed.len(), 2);
  assert_eq!(listed[0].session_id, a);
  assert_eq!(listed[1].session_id, b);
  assert_eq!(listed[0].description.as_deref(), Some("da"));
}

// ─── Interaction log ─────────────────────────────────────────────────────────

#[tokio::test]
async fn append_and_list_preserves_order() {
  let s = store().await;
  let id = s.create_session("alpha".into(), "d".into()).await.unwrap();

  for i in 0..5 {
    s.append_interaction(id, turn(&format!("q{i}"), &format!("a{i}")))
      .await
      .unwrap();
  }

  let log = s.list_interactions(id).await.unwrap();
  assert_eq!(log.len(), 5);
  for (i, interaction) in log.iter().enumerate() {
    assert_eq!(interaction.user_input, format!("q{i}"));
    assert_eq!(interaction.llm_output, format!("a{i}"));
  }
  assert!(log.windows(2).all(|w| w[0].interaction_id < w[1].interaction_id));
}

#[tokio::test]
async fn append_to_missing_session_violates_foreign_key() {
  let s = store().await;

  let err = s
    .append_interaction(123, turn("hi", "hello"))
    .await
    .unwrap_err();
  assert!(err.is_constraint_violation());
}

#[tokio::test]
async fn amend_last_overwrites_only_the_tail() {
  let s = store().await;
  let id = s.create_session("alpha".into(), "d".into()).await.unwrap();

  s.append_interaction(id, turn("q0", "a0")).await.unwrap();
  s.append_interaction(id, turn("q1", "a1")).await.unwrap();

  let amended = s
    .amend_last_interaction(id, turn("q1 revised", "a1 revised"))
    .await
    .unwrap();
  assert!(amended);

  let log = s.list_interactions(id).await.unwrap();
  assert_eq!(log[0].user_input, "q0");
  assert_eq!(log[1].user_input, "q1 revised");
  assert_eq!(log[1].llm_output, "a1 revised");
}

#[tokio::test]
async fn amend_with_empty_log_is_noop() {
  let s = store().await;
  let id = s.create_session("alpha".into(), "d".into()).await.unwrap();

  let amended = s
    .amend_last_interaction(id, turn("too", "early"))
    .await
    .unwrap();
  assert!(!amended);
  assert!(s.list_interactions(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn interaction_logs_are_scoped_per_session() {
  let s = store().await;
  let a = s.create_session("a".into(), "da".into()).await.unwrap();
  let b = s.create_session("b".into(), "db".into()).await.unwrap();

  s.append_interaction(a, turn("qa", "aa")).await.unwrap();
  s.append_interaction(b, turn("qb", "ab")).await.unwrap();

  let log_a = s.list_interactions(a).await.unwrap();
  assert_eq!(log_a.len(), 1);
  assert_eq!(log_a[0].user_input, "qa");
}

// ─── Summary ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn summary_defaults_to_empty() {
  let s = store().await;
  let id = s.create_session("alpha".into(), "d".into()).await.unwrap();

  let summary = s.summary(id).await.unwrap();
  assert_eq!(summary, Summary::default());
  assert_eq!(summary.summary, "");
  assert_eq!(summary.n_summarized, 0);
}

#[tokio::test]
async fn upsert_summary_inserts_then_overwrites() {
  let s = store().await;
  let id = s.create_session("alpha".into(), "d".into()).await.unwrap();

  s.upsert_summary(id, Summary { summary: "s".into(), n_summarized: 3 })
    .await
    .unwrap();
  assert_eq!(
    s.summary(id).await.unwrap(),
    Summary { summary: "s".into(), n_summarized: 3 }
  );

  s.upsert_summary(id, Summary { summary: "s2".into(), n_summarized: 5 })
    .await
    .unwrap();
  assert_eq!(
    s.summary(id).await.unwrap(),
    Summary { summary: "s2".into(), n_summarized: 5 }
  );
}

// ─── Restart cleanse ─────────────────────────────────────────────────────────

#[tokio::test]
async fn reopen_cleanses_drafts_and_dependents() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("confab.db");

  let draft_id = {
    let s = SqliteStore::open(&path).await.unwrap();
    let id = s
      .create_session("draft".into(), "never saved".into())
      .await
      .unwrap();
    s.append_interaction(id, turn("hi", "hello")).await.unwrap();
    s.upsert_summary(id, Summary { summary: "s".into(), n_summarized: 1 })
      .await
      .unwrap();
    id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.describe_session(draft_id).await.unwrap().is_none());
  assert!(s.list_interactions(draft_id).await.unwrap().is_empty());
  assert_eq!(s.summary(draft_id).await.unwrap(), Summary::default());
  assert!(matches!(
    s.session_id_by_name("draft".into()).await.unwrap_err(),
    crate::Error::Core(confab_core::Error::SessionNotFound(_))
  ));
}

#[tokio::test]
async fn reopen_keeps_saved_sessions_intact() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("confab.db");

  let saved_id = {
    let s = SqliteStore::open(&path).await.unwrap();
    let id = s.create_session("keep".into(), "kept".into()).await.unwrap();
    s.append_interaction(id, turn("q", "a")).await.unwrap();
    s.save_session(id, "Kept Session".into()).await.unwrap();
    id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let listed = s.list_persisted_sessions().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].session_id, saved_id);
  assert_eq!(listed[0].name, "keep");
  assert_eq!(listed[0].name_custom.as_deref(), Some("Kept Session"));
  assert_eq!(listed[0].description.as_deref(), Some("kept"));

  let log = s.list_interactions(saved_id).await.unwrap();
  assert_eq!(log.len(), 1);
  assert_eq!(log[0].user_input, "q");
}

#[tokio::test]
async fn explicit_cleanse_reports_removed_count() {
  let s = store().await;
  s.create_session("d1".into(), "x".into()).await.unwrap();
  s.create_session("d2".into(), "y".into()).await.unwrap();
  let kept = s.create_session("k".into(), "z".into()).await.unwrap();
  s.save_session(kept, "K".into()).await.unwrap();

  assert_eq!(s.cleanse_drafts().await.unwrap(), 2);
  assert_eq!(s.cleanse_drafts().await.unwrap(), 0);
  assert_eq!(s.list_persisted_sessions().await.unwrap().len(), 1);
}

// ─── End-to-end scenario ─────────────────────────────────────────────────────

#[tokio::test]
async fn full_session_lifecycle() {
  let s = store().await;

  let id = s.create_session("alpha".into(), "test".into()).await.unwrap();

  s.append_interaction(id, turn("hi", "hello")).await.unwrap();
  let log = s.list_interactions(id).await.unwrap();
  assert_eq!(log.len(), 1);
  assert_eq!(log[0].user_input, "hi");
  assert_eq!(log[0].llm_output, "hello");

  s.save_session(id, "Alpha Custom".into()).await.unwrap();

  let listed = s.list_persisted_sessions().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].session_id, id);
  assert_eq!(listed[0].name, "alpha");
  assert_eq!(listed[0].name_custom.as_deref(), Some("Alpha Custom"));
  assert_eq!(listed[0].description.as_deref(), Some("test"));
}
