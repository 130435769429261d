use admission_core::{assistant::TextGenerator, dashboard::DashboardStats, store::ApplicationStore};
use axum::{Json, extract::State};

use crate::{AppState, auth::Admin, error::ApiError};

/// `GET /dashboard`: aggregates over the current registry.
pub async fn handler<S, G>(
  _admin: Admin,
  State(state): State<AppState<S, G>>,
) -> Result<Json<DashboardStats>, ApiError>
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  let applications = state.store.list().await.map_err(ApiError::store)?;
  Ok(Json(DashboardStats::compute(&applications)))
}
