//! JSON REST service for the admission portal.
//!
//! Exposes an axum [`Router`] backed by any [`ApplicationStore`] and any
//! [`TextGenerator`]. Admin routes take HTTP Basic credentials checked by the
//! [`AdminGate`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = admission_api::router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;

pub use config::ServerConfig;
pub use error::ApiError;

use std::{collections::HashMap, sync::Arc};

use admission_core::{
  assistant::{Conversation, TextGenerator},
  auth::AdminGate,
  store::ApplicationStore,
};
use axum::{
  Router,
  routing::{get, post, put},
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use handlers::{admin, applications, assistant, dashboard, identity, reference};

// ─── Application state ────────────────────────────────────────────────────────

/// Assistant transcripts keyed by conversation id.
pub type Conversations = Arc<Mutex<HashMap<Uuid, Conversation>>>;

/// Shared state threaded through all axum handlers.
pub struct AppState<S, G> {
  pub store:         Arc<S>,
  pub generator:     Arc<G>,
  pub gate:          Arc<AdminGate>,
  pub config:        Arc<ServerConfig>,
  pub conversations: Conversations,
}

impl<S, G> AppState<S, G> {
  pub fn new(store: S, generator: G, config: ServerConfig) -> Self {
    Self {
      store:         Arc::new(store),
      generator:     Arc::new(generator),
      gate:          Arc::new(AdminGate::default()),
      config:        Arc::new(config),
      conversations: Arc::default(),
    }
  }
}

impl<S, G> Clone for AppState<S, G> {
  fn clone(&self) -> Self {
    Self {
      store:         self.store.clone(),
      generator:     self.generator.clone(),
      gate:          self.gate.clone(),
      config:        self.config.clone(),
      conversations: self.conversations.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full service router, every route under `/api`.
pub fn router<S, G>(state: AppState<S, G>) -> Router
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  let api = Router::new()
    // Applicant
    .route("/reference", get(reference::handler))
    .route("/identity/validate", post(identity::validate))
    .route(
      "/applications",
      get(applications::list::<S, G>).post(applications::create::<S, G>),
    )
    .route("/applications/{id}", get(applications::get_one::<S, G>))
    .route("/applications/{id}/status", put(applications::set_status::<S, G>))
    .route("/applications/{id}/offer-letter", get(applications::offer_letter::<S, G>))
    .route("/applications/{id}/slip", get(applications::slip::<S, G>))
    .route("/applications/{id}/insight", post(applications::insight::<S, G>))
    // Admin
    .route("/dashboard", get(dashboard::handler::<S, G>))
    .route("/admin/login", post(admin::login::<S, G>))
    // Assistant
    .route("/assistant/conversations", post(assistant::create::<S, G>))
    .route("/assistant/conversations/{id}", get(assistant::get_one::<S, G>))
    .route(
      "/assistant/conversations/{id}/messages",
      post(assistant::send::<S, G>),
    );

  Router::new()
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests;
