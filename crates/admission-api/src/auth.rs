//! HTTP Basic-auth extractor for admin routes.
//!
//! Credentials travel with every admin request and are checked against the
//! [`AdminGate`]. There are no server-side sessions.

use admission_core::{assistant::TextGenerator, auth::AdminGate, store::ApplicationStore};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use crate::{AppState, error::ApiError};

/// Zero-size marker: present in the handler means the caller is the admin.
pub struct Admin;

/// Verify Basic credentials from `headers` against `gate`.
pub fn verify_auth(headers: &HeaderMap, gate: &AdminGate) -> Result<(), ApiError> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  gate
    .verify(username, password)
    .map_err(|_| ApiError::Unauthorized)
}

impl<S, G> FromRequestParts<AppState<S, G>> for Admin
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S, G>,
  ) -> Result<Self, Self::Rejection> {
    verify_auth(&parts.headers, &state.gate)?;
    Ok(Admin)
  }
}
