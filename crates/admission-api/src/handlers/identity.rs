//! `POST /identity/validate`
//!
//! Body: `{"ic_number":"960101105544"}`. Answers 200 with the accepted number
//! or 422 with the user-facing message.

use admission_core::identity::IcNumber;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ValidateBody {
  pub ic_number: String,
}

#[derive(Debug, Serialize)]
pub struct Validated {
  pub ic_number: IcNumber,
}

pub async fn validate(Json(body): Json<ValidateBody>) -> Result<Json<Validated>, ApiError> {
  let ic_number = IcNumber::parse(&body.ic_number)?;
  Ok(Json(Validated { ic_number }))
}
