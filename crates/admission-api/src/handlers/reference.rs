use admission_core::reference::ReferenceData;
use axum::Json;

/// `GET /reference`: every dropdown table the intake form uses.
pub async fn handler() -> Json<ReferenceData> { Json(ReferenceData::get()) }
