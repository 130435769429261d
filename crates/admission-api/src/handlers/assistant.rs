//! Handlers for `/assistant/conversations` endpoints.
//!
//! The conversation map is locked only to read or mutate a transcript, never
//! across the collaborator call. A second message while a reply is pending
//! answers 409. A request dropped mid-reply still completes its turn, with
//! the busy reply, so the transcript never stays pending.

use std::collections::HashMap;

use admission_core::{
  assistant::{Conversation, GenerationRequest, TextGenerator},
  store::ApplicationStore,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, Conversations, error::ApiError};

#[derive(Debug, Serialize)]
pub struct ConversationBody {
  pub id:           Uuid,
  #[serde(flatten)]
  pub conversation: Conversation,
}

fn not_found(id: Uuid) -> ApiError { ApiError::NotFound(format!("conversation {id}")) }

/// `POST /assistant/conversations`: a new transcript holding the greeting.
pub async fn create<S, G>(State(state): State<AppState<S, G>>) -> impl IntoResponse
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  let id = Uuid::new_v4();
  let conversation = Conversation::new();
  state
    .conversations
    .lock()
    .await
    .insert(id, conversation.clone());
  (StatusCode::CREATED, Json(ConversationBody { id, conversation }))
}

/// `GET /assistant/conversations/{id}`
pub async fn get_one<S, G>(
  State(state): State<AppState<S, G>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ConversationBody>, ApiError>
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  let conversation = state
    .conversations
    .lock()
    .await
    .get(&id)
    .cloned()
    .ok_or_else(|| not_found(id))?;
  Ok(Json(ConversationBody { id, conversation }))
}

/// A begun turn. Dropped while still armed, it completes the turn with the
/// busy reply.
struct PendingTurn {
  id:            Uuid,
  conversations: Option<Conversations>,
}

impl PendingTurn {
  fn new(id: Uuid, conversations: Conversations) -> Self {
    Self { id, conversations: Some(conversations) }
  }

  fn disarm(mut self) { self.conversations = None; }
}

impl Drop for PendingTurn {
  fn drop(&mut self) {
    let Some(conversations) = self.conversations.take() else {
      return;
    };
    let id = self.id;
    let abandon = move |map: &mut HashMap<Uuid, Conversation>| {
      if let Some(conversation) = map.get_mut(&id) {
        conversation.complete_turn(Err::<String, _>("request dropped before the reply"));
      }
    };

    let done = conversations
      .try_lock()
      .map(|mut map| abandon(&mut *map))
      .is_ok();
    if !done && let Ok(handle) = tokio::runtime::Handle::try_current() {
      handle.spawn(async move { abandon(&mut *conversations.lock().await) });
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
  pub text: String,
}

/// `POST /assistant/conversations/{id}/messages`: append the user's turn,
/// ask the collaborator, append its reply and return the transcript.
pub async fn send<S, G>(
  State(state): State<AppState<S, G>>,
  Path(id): Path<Uuid>,
  Json(body): Json<MessageBody>,
) -> Result<Json<ConversationBody>, ApiError>
where
  S: ApplicationStore + 'static,
  G: TextGenerator + 'static,
{
  let prompt = {
    let mut conversations = state.conversations.lock().await;
    let conversation = conversations.get_mut(&id).ok_or_else(|| not_found(id))?;
    conversation.begin_turn(&body.text)?
  };
  let turn = PendingTurn::new(id, state.conversations.clone());

  let request = GenerationRequest {
    model: state.config.genai.model.clone(),
    prompt,
  };
  let outcome = state.generator.generate(&request).await;

  let mut conversations = state.conversations.lock().await;
  let conversation = conversations.get_mut(&id).ok_or_else(|| not_found(id))?;
  conversation.complete_turn(outcome);
  turn.disarm();
  Ok(Json(ConversationBody {
    id,
    conversation: conversation.clone(),
  }))
}
