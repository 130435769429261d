//! `POST /admin/login`
//!
//! Checks a credential pair after the configured delay. The service keeps no
//! session: a successful client sends the same pair as Basic auth afterwards.

use admission_core::{assistant::TextGenerator, auth::AdminCredentials, store::ApplicationStore};
use axum::{Json, extract::State};
use serde::Serialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub authenticated: bool,
}

pub async fn login<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<AdminCredentials>,
) -> Result<Json<LoginResponse>, ApiError>
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  tokio::time::sleep(state.config.login_delay()).await;
  if let Err(e) = state.gate.verify(&body.username, &body.password) {
    tracing::info!(username = %body.username, "admin login refused");
    return Err(e.into());
  }
  tracing::info!("admin login accepted");
  Ok(Json(LoginResponse { authenticated: true }))
}
