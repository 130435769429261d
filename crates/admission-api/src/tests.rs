//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::{
  Arc,
  atomic::{AtomicUsize, Ordering},
};

use admission_core::assistant::{
  BUSY_REPLY, GREETING, GenerationRequest, INSIGHT_UNAVAILABLE, TextGenerator,
};
use admission_store_memory::MemoryStore;
use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::{AppState, ServerConfig, router};

// ─── Fixtures ────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("collaborator offline")]
struct Offline;

/// Answers every request with `reply`, or fails when `reply` is `None`.
/// With `hang_first` the first call never resolves.
#[derive(Clone)]
struct Scripted {
  reply:      Option<String>,
  hang_first: bool,
  calls:      Arc<AtomicUsize>,
}

impl Scripted {
  fn replying(text: &str) -> Self {
    Self {
      reply:      Some(text.into()),
      hang_first: false,
      calls:      Arc::default(),
    }
  }

  fn failing() -> Self {
    Self {
      reply:      None,
      hang_first: false,
      calls:      Arc::default(),
    }
  }

  fn hanging_once(text: &str) -> Self {
    Self {
      hang_first: true,
      ..Self::replying(text)
    }
  }
}

impl TextGenerator for Scripted {
  type Error = Offline;

  async fn generate<'a>(&'a self, _request: &'a GenerationRequest) -> Result<String, Offline> {
    let call = self.calls.fetch_add(1, Ordering::SeqCst);
    if self.hang_first && call == 0 {
      std::future::pending::<()>().await;
    }
    self.reply.clone().ok_or(Offline)
  }
}

fn state_with(generator: Scripted) -> AppState<MemoryStore, Scripted> {
  AppState::new(
    MemoryStore::seeded(),
    generator,
    ServerConfig {
      login_delay_ms: 0,
      ..ServerConfig::default()
    },
  )
}

fn state() -> AppState<MemoryStore, Scripted> { state_with(Scripted::replying("Looks promising.")) }

fn admin() -> String { format!("Basic {}", B64.encode("admin:unisel2025")) }

async fn oneshot_raw(
  state:  AppState<MemoryStore, Scripted>,
  method: &str,
  uri:    &str,
  auth:   Option<&str>,
  body:   Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(auth) = auth {
    builder = builder.header(header::AUTHORIZATION, auth);
  }
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = router(state)
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, value)
}

fn complete_draft() -> Value {
  let referee = json!({
    "name": "DR. AMINAH", "address": "UNISEL", "postcode": "40000",
    "city": "SHAH ALAM", "state": "B00", "mobile": "0199999999", "email": ""
  });
  json!({
    "program1": "IT603", "program2": "EN601", "study_mode": "PART TIME",
    "name": "SITI BINTI ALI", "ic_number": "990202105566", "dob": "1999-02-02",
    "address1": "NO 2, JALAN DUA", "town": "Shah Alam", "postcode": "40000",
    "state": "B00", "race": "1", "marital_status": "1", "gender": "F",
    "sponsor_type": "5", "payment_method": "1",
    "referees": [referee.clone(), referee],
    "declaration_verified": true
  })
}

// ─── Reference & identity ────────────────────────────────────────────────────

#[tokio::test]
async fn reference_lists_programmes() {
  let (status, body) = oneshot_raw(state(), "GET", "/api/reference", None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["programs"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn identity_validation() {
  let (status, body) = oneshot_raw(
    state(),
    "POST",
    "/api/identity/validate",
    None,
    Some(json!({ "ic_number": "960101105544" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["ic_number"], "960101105544");

  for bad in ["96010110554", "96A101105544", "960101-10-5544"] {
    let (status, body) = oneshot_raw(
      state(),
      "POST",
      "/api/identity/validate",
      None,
      Some(json!({ "ic_number": bad })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{bad}");
    assert_eq!(
      body["error"],
      "Please enter a valid 12-digit IC number without dashes."
    );
  }
}

// ─── Intake ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn submit_creates_pending_record_at_front() {
  let state = state();
  let (status, created) = oneshot_raw(
    state.clone(),
    "POST",
    "/api/applications",
    None,
    Some(complete_draft()),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["status"], "PENDING");
  let id = created["id"].as_str().unwrap();
  assert!(id.starts_with("APP-") && id.len() == 8, "{id}");

  let (_, list) = oneshot_raw(state, "GET", "/api/applications", Some(&admin()), None).await;
  let ids: Vec<&str> = list
    .as_array()
    .unwrap()
    .iter()
    .map(|a| a["id"].as_str().unwrap())
    .collect();
  assert_eq!(ids, [id, "APP-1001"]);
}

#[tokio::test]
async fn undeclared_submit_is_rejected_and_not_stored() {
  let state = state();
  let mut draft = complete_draft();
  draft["declaration_verified"] = json!(false);
  let (status, body) =
    oneshot_raw(state.clone(), "POST", "/api/applications", None, Some(draft)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(
    body["error"],
    "Please verify the declaration checkbox before submitting."
  );

  let (_, list) = oneshot_raw(state, "GET", "/api/applications", Some(&admin()), None).await;
  assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn submit_applies_form_policies_to_the_body() {
  let mut draft = complete_draft();
  draft["name"] = json!("siti lowercase");
  draft["postcode"] = json!("40-00a0");
  draft["referees"][0]["city"] = json!("shah alam");
  let (status, created) =
    oneshot_raw(state(), "POST", "/api/applications", None, Some(draft)).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["name"], "SITI LOWERCASE");
  assert_eq!(created["postcode"], "40000");
  assert_eq!(created["referees"][0]["city"], "SHAH ALAM");
  assert_eq!(created["work_experience"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn submit_rejects_unknown_programme_key() {
  let state = state();
  let mut draft = complete_draft();
  draft["program1"] = json!("NOT-A-PROGRAM");
  let (status, body) =
    oneshot_raw(state.clone(), "POST", "/api/applications", None, Some(draft)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert!(body["error"].as_str().unwrap().contains("NOT-A-PROGRAM"));

  let (_, list) = oneshot_raw(state, "GET", "/api/applications", Some(&admin()), None).await;
  assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn submit_rejects_wrong_slot_counts() {
  let mut draft = complete_draft();
  let referee = draft["referees"][0].clone();
  draft["referees"].as_array_mut().unwrap().push(referee);
  let (status, body) =
    oneshot_raw(state(), "POST", "/api/applications", None, Some(draft)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(body["error"], "exactly 2 referees are required, got 3");

  let mut draft = complete_draft();
  let blank = json!({ "position": "", "start_year": "", "end_year": "", "organization": "" });
  draft["work_experience"] = json!([blank.clone(), blank.clone(), blank.clone(), blank]);
  let (status, body) =
    oneshot_raw(state(), "POST", "/api/applications", None, Some(draft)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(
    body["error"],
    "at most 3 work-experience entries are allowed, got 4"
  );
}

#[tokio::test]
async fn incomplete_submit_names_missing_fields() {
  let mut draft = complete_draft();
  draft["town"] = json!("");
  let (status, body) = oneshot_raw(state(), "POST", "/api/applications", None, Some(draft)).await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  let msg = body["error"].as_str().unwrap();
  assert!(msg.starts_with("Please fill in all required fields"), "{msg}");
}

// ─── Registry ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_routes_require_basic_auth() {
  for uri in ["/api/applications", "/api/applications/APP-1001", "/api/dashboard"] {
    let (status, _) = oneshot_raw(state(), "GET", uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
  }
  let wrong = format!("Basic {}", B64.encode("admin:unisel2026"));
  let (status, _) = oneshot_raw(state(), "GET", "/api/dashboard", Some(&wrong), None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn search_filters_by_name_case_insensitively() {
  let (_, hits) = oneshot_raw(
    state(),
    "GET",
    "/api/applications?q=ahmad",
    Some(&admin()),
    None,
  )
  .await;
  assert_eq!(hits.as_array().unwrap().len(), 1);

  let (_, misses) =
    oneshot_raw(state(), "GET", "/api/applications?q=zzz", Some(&admin()), None).await;
  assert!(misses.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn status_update_and_unknown_id() {
  let state = state();
  let (status, body) = oneshot_raw(
    state.clone(),
    "PUT",
    "/api/applications/APP-1001/status",
    Some(&admin()),
    Some(json!({ "status": "APPROVED" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "APPROVED");
  assert_eq!(body["name"], "AHMAD BIN ZULKIFLI");

  let (status, _) = oneshot_raw(
    state,
    "PUT",
    "/api/applications/APP-0000/status",
    Some(&admin()),
    Some(json!({ "status": "REJECTED" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_counts_add_up() {
  let state = state();
  oneshot_raw(state.clone(), "POST", "/api/applications", None, Some(complete_draft())).await;
  oneshot_raw(
    state.clone(),
    "PUT",
    "/api/applications/APP-1001/status",
    Some(&admin()),
    Some(json!({ "status": "REJECTED" })),
  )
  .await;

  let (status, stats) = oneshot_raw(state, "GET", "/api/dashboard", Some(&admin()), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(stats["total"], 2);
  assert_eq!(stats["pending"], 1);
  assert_eq!(stats["rejected"], 1);
  assert_eq!(stats["approved"], 0);
  assert_eq!(stats["full_time"], 1);
  assert_eq!(stats["part_time"], 1);
  assert_eq!(stats["programs"][0]["program"], "IT603");
  assert_eq!(stats["programs"][0]["count"], 2);
}

// ─── Documents ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn offer_letter_only_for_approved() {
  let state = state();
  let (status, _) = oneshot_raw(
    state.clone(),
    "GET",
    "/api/applications/APP-1001/offer-letter",
    Some(&admin()),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);

  oneshot_raw(
    state.clone(),
    "PUT",
    "/api/applications/APP-1001/status",
    Some(&admin()),
    Some(json!({ "status": "APPROVED" })),
  )
  .await;

  let (status, letter) = oneshot_raw(
    state,
    "GET",
    "/api/applications/APP-1001/offer-letter",
    Some(&admin()),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let reference = letter["reference"].as_str().unwrap();
  assert!(reference.starts_with("UNISEL/GS/APP-1001/"), "{reference}");
  assert_eq!(letter["programme"], "MASTER OF SCIENCE (COMPUTING)");
  assert!(letter["text"].as_str().unwrap().contains("PROF. DR. MOHAMAD SALLEH"));
}

#[tokio::test]
async fn slip_is_public() {
  let (status, slip) =
    oneshot_raw(state(), "GET", "/api/applications/APP-1001/slip", None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(slip["id"], "APP-1001");
  assert!(slip["text"].as_str().unwrap().contains("AHMAD BIN ZULKIFLI"));
}

#[tokio::test]
async fn insight_returns_reply_or_fallback() {
  let (status, body) = oneshot_raw(
    state(),
    "POST",
    "/api/applications/APP-1001/insight",
    Some(&admin()),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["text"], "Looks promising.");

  let (status, body) = oneshot_raw(
    state_with(Scripted::failing()),
    "POST",
    "/api/applications/APP-1001/insight",
    Some(&admin()),
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["text"], INSIGHT_UNAVAILABLE);
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_accepts_normalised_demo_pair() {
  let (status, body) = oneshot_raw(
    state(),
    "POST",
    "/api/admin/login",
    None,
    Some(json!({ "username": "ADMIN", "password": " unisel2025 " })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["authenticated"], true);
}

#[tokio::test]
async fn login_rejects_wrong_password() {
  let (status, body) = oneshot_raw(
    state(),
    "POST",
    "/api/admin/login",
    None,
    Some(json!({ "username": "admin", "password": "unisel2026" })),
  )
  .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(
    body["error"],
    "Invalid administrative credentials. Please verify your username and password."
  );
}

#[tokio::test]
async fn login_waits_for_configured_delay() {
  let state = AppState::new(
    MemoryStore::new(),
    Scripted::failing(),
    ServerConfig {
      login_delay_ms: 50,
      ..ServerConfig::default()
    },
  );
  let started = std::time::Instant::now();
  oneshot_raw(
    state,
    "POST",
    "/api/admin/login",
    None,
    Some(json!({ "username": "admin", "password": "x" })),
  )
  .await;
  assert!(started.elapsed() >= std::time::Duration::from_millis(50));
}

// ─── Assistant ───────────────────────────────────────────────────────────────

async fn new_conversation(state: &AppState<MemoryStore, Scripted>) -> String {
  let (status, body) =
    oneshot_raw(state.clone(), "POST", "/api/assistant/conversations", None, None).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["turns"][0]["text"], GREETING);
  body["id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn conversation_round_trip() {
  let state = state();
  let id = new_conversation(&state).await;

  let (status, body) = oneshot_raw(
    state.clone(),
    "POST",
    &format!("/api/assistant/conversations/{id}/messages"),
    None,
    Some(json!({ "text": "What programmes are offered?" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let turns = body["turns"].as_array().unwrap();
  assert_eq!(turns.len(), 3);
  assert_eq!(turns[1]["speaker"], "user");
  assert_eq!(turns[2]["speaker"], "ai");
  assert_eq!(turns[2]["text"], "Looks promising.");
  assert_eq!(body["pending"], false);

  let (status, fetched) = oneshot_raw(
    state,
    "GET",
    &format!("/api/assistant/conversations/{id}"),
    None,
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched["turns"], body["turns"]);
}

#[tokio::test]
async fn collaborator_failure_becomes_busy_reply() {
  let state = state_with(Scripted::failing());
  let id = new_conversation(&state).await;
  let (status, body) = oneshot_raw(
    state,
    "POST",
    &format!("/api/assistant/conversations/{id}/messages"),
    None,
    Some(json!({ "text": "Hello?" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["turns"][2]["text"], BUSY_REPLY);
}

#[tokio::test]
async fn blank_message_is_rejected_without_calling_collaborator() {
  let generator = Scripted::replying("unused");
  let calls = generator.calls.clone();
  let state = state_with(generator);
  let id = new_conversation(&state).await;
  let (status, _) = oneshot_raw(
    state,
    "POST",
    &format!("/api/assistant/conversations/{id}/messages"),
    None,
    Some(json!({ "text": "   " })),
  )
  .await;
  assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn message_while_pending_conflicts() {
  let state = state();
  let id = new_conversation(&state).await;
  let uuid: uuid::Uuid = id.parse().unwrap();
  state
    .conversations
    .lock()
    .await
    .get_mut(&uuid)
    .unwrap()
    .begin_turn("first")
    .unwrap();

  let (status, _) = oneshot_raw(
    state,
    "POST",
    &format!("/api/assistant/conversations/{id}/messages"),
    None,
    Some(json!({ "text": "second" })),
  )
  .await;
  assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn dropped_request_does_not_leave_turn_pending() {
  let state = state_with(Scripted::hanging_once("Here to help."));
  let id = new_conversation(&state).await;
  let uri = format!("/api/assistant/conversations/{id}/messages");

  let first = tokio::time::timeout(
    std::time::Duration::from_millis(50),
    oneshot_raw(state.clone(), "POST", &uri, None, Some(json!({ "text": "first" }))),
  )
  .await;
  assert!(first.is_err(), "first reply should never arrive");

  let (status, body) =
    oneshot_raw(state, "POST", &uri, None, Some(json!({ "text": "second" }))).await;
  assert_eq!(status, StatusCode::OK);
  let texts: Vec<&str> = body["turns"]
    .as_array()
    .unwrap()
    .iter()
    .map(|t| t["text"].as_str().unwrap())
    .collect();
  assert_eq!(texts, [GREETING, "first", BUSY_REPLY, "second", "Here to help."]);
  assert_eq!(body["pending"], false);
}

#[tokio::test]
async fn unknown_conversation_is_404() {
  let (status, _) = oneshot_raw(
    state(),
    "GET",
    &format!("/api/assistant/conversations/{}", uuid::Uuid::new_v4()),
    None,
    None,
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
