//! Behaviour tests for `MemoryStore`.

use admission_core::{
  application::{Application, ApplicationStatus},
  intake::{self, IntakeDraft, SubmitError},
  store::ApplicationStore,
};
use chrono::Utc;

use crate::{MemoryStore, seed_application};

fn record(id: &str) -> Application {
  Application {
    id: id.into(),
    ..seed_application(Utc::now())
  }
}

async fn ids(store: &MemoryStore) -> Vec<String> {
  store
    .list()
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.id)
    .collect()
}

// ─── Seed ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seeded_store_holds_mock_record() {
  let store = MemoryStore::seeded();
  let all = store.list().await.unwrap();
  assert_eq!(all.len(), 1);
  let seed = &all[0];
  assert_eq!(seed.id, "APP-1001");
  assert_eq!(seed.name, "AHMAD BIN ZULKIFLI");
  assert_eq!(seed.status, ApplicationStatus::Pending);
  assert!(seed.referees.is_empty());
  assert!(seed.declaration_verified);
}

#[tokio::test]
async fn new_store_is_empty() {
  assert!(MemoryStore::new().list().await.unwrap().is_empty());
}

// ─── Append ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_prepends_and_keeps_prior_order() {
  let store = MemoryStore::with_applications(vec![record("APP-2"), record("APP-1")]);
  store.append(record("APP-3")).await.unwrap();
  assert_eq!(ids(&store).await, ["APP-3", "APP-2", "APP-1"]);
}

#[tokio::test]
async fn append_does_not_deduplicate() {
  let store = MemoryStore::new();
  store.append(record("APP-7")).await.unwrap();
  store.append(record("APP-7")).await.unwrap();
  assert_eq!(ids(&store).await, ["APP-7", "APP-7"]);
}

#[tokio::test]
async fn update_status_reaches_every_duplicate_id() {
  let store = MemoryStore::with_applications(vec![
    record("APP-7"),
    record("APP-8"),
    record("APP-7"),
  ]);
  let updated = store
    .update_status("APP-7", ApplicationStatus::Approved)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.status, ApplicationStatus::Approved);

  let statuses: Vec<_> = store
    .list()
    .await
    .unwrap()
    .into_iter()
    .map(|a| (a.id, a.status))
    .collect();
  assert_eq!(
    statuses,
    [
      ("APP-7".to_owned(), ApplicationStatus::Approved),
      ("APP-8".to_owned(), ApplicationStatus::Pending),
      ("APP-7".to_owned(), ApplicationStatus::Approved),
    ]
  );
}

#[tokio::test]
async fn clones_share_records() {
  let store = MemoryStore::new();
  let other = store.clone();
  store.append(record("APP-9")).await.unwrap();
  assert_eq!(ids(&other).await, ["APP-9"]);
}

// ─── Status updates ──────────────────────────────────────────────────────────

#[tokio::test]
async fn update_status_touches_only_status() {
  let store = MemoryStore::seeded();
  let before = store.get("APP-1001").await.unwrap().unwrap();

  let updated = store
    .update_status("APP-1001", ApplicationStatus::Approved)
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.status, ApplicationStatus::Approved);
  assert_eq!(
    Application {
      status: ApplicationStatus::Pending,
      ..updated.clone()
    },
    before
  );
  assert_eq!(store.get("APP-1001").await.unwrap(), Some(updated));
}

#[tokio::test]
async fn update_status_is_idempotent() {
  let store = MemoryStore::seeded();
  let once = store
    .update_status("APP-1001", ApplicationStatus::Rejected)
    .await
    .unwrap();
  let twice = store
    .update_status("APP-1001", ApplicationStatus::Rejected)
    .await
    .unwrap();
  assert_eq!(once, twice);
}

#[tokio::test]
async fn every_transition_is_permitted() {
  let store = MemoryStore::seeded();
  for status in [
    ApplicationStatus::Approved,
    ApplicationStatus::Pending,
    ApplicationStatus::Rejected,
    ApplicationStatus::Approved,
  ] {
    let updated = store.update_status("APP-1001", status).await.unwrap().unwrap();
    assert_eq!(updated.status, status);
  }
}

#[tokio::test]
async fn update_unknown_id_is_noop() {
  let store = MemoryStore::seeded();
  let before = store.list().await.unwrap();
  let result = store
    .update_status("APP-0000", ApplicationStatus::Approved)
    .await
    .unwrap();
  assert!(result.is_none());
  assert_eq!(store.list().await.unwrap(), before);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let store = MemoryStore::seeded();
  assert!(store.get("APP-4242").await.unwrap().is_none());
}

// ─── Intake submit ───────────────────────────────────────────────────────────

#[tokio::test]
async fn undeclared_draft_is_not_appended() {
  let store = MemoryStore::seeded();
  let draft = IntakeDraft::new("960101105544".parse().unwrap());

  let err = intake::submit(&store, draft).await.unwrap_err();
  assert!(matches!(err, SubmitError::Rejected(_)));
  assert_eq!(ids(&store).await, ["APP-1001"]);
}
