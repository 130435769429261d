//! Handlers for `/applications` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/applications` | Body: intake draft; 201 or 422 |
//! | `GET`  | `/applications` | Admin; optional `?q=` search |
//! | `GET`  | `/applications/{id}` | Admin; 404 if not found |
//! | `PUT`  | `/applications/{id}/status` | Admin; body `{"status":"APPROVED"}` |
//! | `GET`  | `/applications/{id}/offer-letter` | Admin; 409 unless approved |
//! | `GET`  | `/applications/{id}/slip` | Submission slip |
//! | `POST` | `/applications/{id}/insight` | Admin; `{"text":...}` |

use admission_core::{
  application::{Application, ApplicationStatus},
  assistant::{self, TextGenerator},
  dashboard::matches_search,
  intake::{self, IntakeDraft},
  letter::{OfferLetter, SubmissionSlip},
  store::ApplicationStore,
};
use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::{AppState, auth::Admin, error::ApiError};

async fn find<S, G>(state: &AppState<S, G>, id: &str) -> Result<Application, ApiError>
where
  S: ApplicationStore,
{
  state
    .store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::application_not_found(id))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /applications`: submit an intake draft.
pub async fn create<S, G>(
  State(state): State<AppState<S, G>>,
  Json(draft): Json<IntakeDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  let application = intake::submit(state.store.as_ref(), draft).await?;
  tracing::info!(id = %application.id, "application submitted");
  Ok((StatusCode::CREATED, Json(application)))
}

// ─── List / get ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub q: String,
}

/// `GET /applications[?q=<text>]`, newest first.
pub async fn list<S, G>(
  _admin: Admin,
  State(state): State<AppState<S, G>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Application>>, ApiError>
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  let applications = state.store.list().await.map_err(ApiError::store)?;
  Ok(Json(
    applications
      .into_iter()
      .filter(|a| matches_search(a, &params.q))
      .collect(),
  ))
}

/// `GET /applications/{id}`
pub async fn get_one<S, G>(
  _admin: Admin,
  State(state): State<AppState<S, G>>,
  Path(id): Path<String>,
) -> Result<Json<Application>, ApiError>
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  Ok(Json(find(&state, &id).await?))
}

// ─── Status ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: ApplicationStatus,
}

/// `PUT /applications/{id}/status`: any transition, including to the
/// current status.
pub async fn set_status<S, G>(
  _admin: Admin,
  State(state): State<AppState<S, G>>,
  Path(id): Path<String>,
  Json(body): Json<StatusBody>,
) -> Result<Json<Application>, ApiError>
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  let updated = state
    .store
    .update_status(&id, body.status)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::application_not_found(&id))?;
  tracing::info!(%id, status = %body.status, "status changed");
  Ok(Json(updated))
}

// ─── Documents ────────────────────────────────────────────────────────────────

/// A printable document: the structured fields and their plain-text layout.
#[derive(Debug, Serialize)]
pub struct Document<T> {
  #[serde(flatten)]
  pub content: T,
  pub text:    String,
}

/// `GET /applications/{id}/offer-letter`, dated today (server local time).
pub async fn offer_letter<S, G>(
  _admin: Admin,
  State(state): State<AppState<S, G>>,
  Path(id): Path<String>,
) -> Result<Json<Document<OfferLetter>>, ApiError>
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  let application = find(&state, &id).await?;
  if application.status != ApplicationStatus::Approved {
    return Err(ApiError::Conflict(format!(
      "application {id} is {}; offer letters are issued only for APPROVED applications",
      application.status
    )));
  }
  let letter = OfferLetter::issue(&application, Local::now().date_naive());
  let text = letter.render_text();
  Ok(Json(Document { content: letter, text }))
}

/// `GET /applications/{id}/slip`
pub async fn slip<S, G>(
  State(state): State<AppState<S, G>>,
  Path(id): Path<String>,
) -> Result<Json<Document<SubmissionSlip>>, ApiError>
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  let application = find(&state, &id).await?;
  let slip = SubmissionSlip::for_application(&application);
  let text = slip.render_text();
  Ok(Json(Document { content: slip, text }))
}

// ─── Insight ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct InsightResponse {
  pub text: String,
}

/// `POST /applications/{id}/insight`: collaborator failures become the
/// fixed fallback text, never an error status.
pub async fn insight<S, G>(
  _admin: Admin,
  State(state): State<AppState<S, G>>,
  Path(id): Path<String>,
) -> Result<Json<InsightResponse>, ApiError>
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  let application = find(&state, &id).await?;
  let text = assistant::insight(
    state.generator.as_ref(),
    &state.config.genai.model,
    &application,
  )
  .await;
  Ok(Json(InsightResponse { text }))
}
