//! The conversational assistant and the applicant-insight helper.
//!
//! Both talk to an external text-generation collaborator through the
//! [`TextGenerator`] trait. Collaborator failures never escape this module:
//! they become fixed fallback strings.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  application::Application,
  error::AssistantError,
  reference::{PROGRAMS, program_label},
};

pub const GREETING: &str =
  "Hello! I am your AI Admission Assistant. How can I help you today?";
/// Shown when the collaborator answers with no text.
pub const EMPTY_REPLY: &str = "Sorry, I can't help with that right now.";
/// Shown when the collaborator call fails.
pub const BUSY_REPLY: &str = "Service temporarily busy.";
pub const INSIGHT_UNAVAILABLE: &str = "AI insight is currently unavailable.";

// ─── Collaborator boundary ───────────────────────────────────────────────────

/// One outbound text-completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
  pub model:  String,
  pub prompt: String,
}

/// An external text-generation service.
///
/// No retry or backoff contract: one call, one answer or one error.
pub trait TextGenerator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn generate<'a>(
    &'a self,
    request: &'a GenerationRequest,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}

// ─── Transcript ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
  User,
  Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
  pub speaker: Speaker,
  pub text:    String,
}

/// Prompt context sent with every chat question.
pub fn chat_prompt(question: &str) -> String {
  let programs = PROGRAMS
    .iter()
    .map(|p| p.label)
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "User is applying for Master by Research at UNISEL. Programs: {programs}. \
     Question: {question}"
  )
}

/// An ordered chat transcript with at most one reply in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
  turns:   Vec<Turn>,
  pending: bool,
}

impl Default for Conversation {
  fn default() -> Self { Self::new() }
}

impl Conversation {
  /// A transcript seeded with the greeting.
  pub fn new() -> Self {
    Self {
      turns:   vec![Turn {
        speaker: Speaker::Ai,
        text:    GREETING.to_owned(),
      }],
      pending: false,
    }
  }

  pub fn turns(&self) -> &[Turn] { &self.turns }

  pub fn is_pending(&self) -> bool { self.pending }

  /// Record the user's `text` and mark a reply as pending. Returns the
  /// prompt to send to the collaborator.
  pub fn begin_turn(&mut self, text: &str) -> Result<String, AssistantError> {
    if text.trim().is_empty() {
      return Err(AssistantError::EmptyMessage);
    }
    if self.pending {
      return Err(AssistantError::ReplyPending);
    }
    self.turns.push(Turn {
      speaker: Speaker::User,
      text:    text.to_owned(),
    });
    self.pending = true;
    Ok(chat_prompt(text))
  }

  /// Append the collaborator's outcome (or its fallback) and clear the
  /// pending flag.
  pub fn complete_turn<E: std::fmt::Display>(
    &mut self,
    outcome: Result<String, E>,
  ) -> &Turn {
    let text = match outcome {
      Ok(reply) if reply.trim().is_empty() => EMPTY_REPLY.to_owned(),
      Ok(reply) => reply,
      Err(e) => {
        tracing::warn!(error = %e, "assistant request failed");
        BUSY_REPLY.to_owned()
      }
    };
    self.pending = false;
    self.turns.push(Turn {
      speaker: Speaker::Ai,
      text,
    });
    &self.turns[self.turns.len() - 1]
  }

  /// Send one user turn and wait for the reply.
  pub async fn send<G: TextGenerator>(
    &mut self,
    generator: &G,
    model: &str,
    text: &str,
  ) -> Result<&Turn, AssistantError> {
    let prompt = self.begin_turn(text)?;
    let request = GenerationRequest {
      model: model.to_owned(),
      prompt,
    };
    let outcome = generator.generate(&request).await;
    Ok(self.complete_turn(outcome))
  }
}

// ─── Applicant insight ───────────────────────────────────────────────────────

/// Prompt asking for a short assessment of one applicant.
pub fn insight_prompt(application: &Application) -> String {
  let experience = application
    .filled_work_experience()
    .map(|w| {
      format!(
        "{} at {} ({}-{})",
        w.position, w.organization, w.start_year, w.end_year
      )
    })
    .collect::<Vec<_>>();
  let experience = if experience.is_empty() {
    "none listed".to_owned()
  } else {
    experience.join("; ")
  };
  format!(
    "Give a brief admission insight for this postgraduate applicant. \
     Name: {}. Programme: {}. Work experience: {experience}.",
    application.name,
    program_label(&application.program1),
  )
}

/// Ask `generator` for an insight on `application`; the reply verbatim, or
/// [`INSIGHT_UNAVAILABLE`] on failure or an empty reply.
pub async fn insight<G: TextGenerator>(
  generator: &G,
  model: &str,
  application: &Application,
) -> String {
  let request = GenerationRequest {
    model:  model.to_owned(),
    prompt: insight_prompt(application),
  };
  match generator.generate(&request).await {
    Ok(text) if !text.trim().is_empty() => text,
    Ok(_) => INSIGHT_UNAVAILABLE.to_owned(),
    Err(e) => {
      tracing::warn!(error = %e, id = %application.id, "insight request failed");
      INSIGHT_UNAVAILABLE.to_owned()
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;
  use crate::{
    application::{ApplicationStatus, StudyMode, WorkExperience},
    dashboard::tests::app,
  };

  #[derive(Debug, thiserror::Error)]
  #[error("collaborator offline")]
  struct Offline;

  /// Replies with a fixed answer, or fails when `reply` is `None`. Records
  /// every request it sees.
  struct Scripted {
    reply: Option<String>,
    seen:  Mutex<Vec<GenerationRequest>>,
  }

  impl Scripted {
    fn replying(text: &str) -> Self {
      Self {
        reply: Some(text.to_owned()),
        seen:  Mutex::new(Vec::new()),
      }
    }

    fn failing() -> Self {
      Self {
        reply: None,
        seen:  Mutex::new(Vec::new()),
      }
    }
  }

  impl TextGenerator for Scripted {
    type Error = Offline;

    async fn generate<'a>(
      &'a self,
      request: &'a GenerationRequest,
    ) -> Result<String, Offline> {
      self.seen.lock().unwrap().push(request.clone());
      self.reply.clone().ok_or(Offline)
    }
  }

  #[test]
  fn new_conversation_starts_with_greeting() {
    let c = Conversation::new();
    assert_eq!(c.turns().len(), 1);
    assert_eq!(c.turns()[0].speaker, Speaker::Ai);
    assert_eq!(c.turns()[0].text, GREETING);
    assert!(!c.is_pending());
  }

  #[test]
  fn begin_turn_appends_user_text_and_blocks_second_turn() {
    let mut c = Conversation::new();
    let prompt = c.begin_turn("What is the fee?").unwrap();
    assert!(prompt.starts_with("User is applying for Master by Research at UNISEL."));
    assert!(prompt.contains("MASTER OF EDUCATION, MASTER OF LIFE SCIENCE"));
    assert!(prompt.ends_with("Question: What is the fee?"));
    assert!(c.is_pending());
    assert_eq!(c.begin_turn("again?"), Err(AssistantError::ReplyPending));
    assert_eq!(c.turns().len(), 2);
  }

  #[test]
  fn blank_message_is_ignored() {
    let mut c = Conversation::new();
    assert_eq!(c.begin_turn("   "), Err(AssistantError::EmptyMessage));
    assert_eq!(c.turns().len(), 1);
  }

  #[tokio::test]
  async fn send_appends_reply() {
    let generator = Scripted::replying("Fees are listed online.");
    let mut c = Conversation::new();
    let reply = c.send(&generator, "test-model", "Fees?").await.unwrap();
    assert_eq!(reply.text, "Fees are listed online.");
    assert!(!c.is_pending());
    assert_eq!(c.turns().len(), 3);
    let seen = generator.seen.lock().unwrap();
    assert_eq!(seen[0].model, "test-model");
  }

  #[tokio::test]
  async fn failure_becomes_busy_fallback() {
    let mut c = Conversation::new();
    let reply = c.send(&Scripted::failing(), "m", "Hello?").await.unwrap();
    assert_eq!(reply.text, BUSY_REPLY);
    assert!(!c.is_pending());
  }

  #[tokio::test]
  async fn empty_reply_becomes_apology() {
    let mut c = Conversation::new();
    let reply = c.send(&Scripted::replying(""), "m", "Hello?").await.unwrap();
    assert_eq!(reply.text, EMPTY_REPLY);
  }

  #[test]
  fn insight_prompt_lists_filled_experience_only() {
    let mut a = app("APP-1", ApplicationStatus::Pending, "IT603", StudyMode::FullTime);
    a.work_experience = vec![
      WorkExperience {
        position:     "SOFTWARE ENGINEER".into(),
        start_year:   "2018".into(),
        end_year:     "2023".into(),
        organization: "TECHCORP".into(),
      },
      WorkExperience::default(),
    ];
    let prompt = insight_prompt(&a);
    assert!(prompt.contains("Name: APPLICANT APP-1."));
    assert!(prompt.contains("Programme: MASTER OF SCIENCE (COMPUTING)."));
    assert!(prompt.contains("SOFTWARE ENGINEER at TECHCORP (2018-2023)."));
    assert!(!prompt.contains(";"));
  }

  #[tokio::test]
  async fn insight_falls_back_on_failure() {
    let a = app("APP-1", ApplicationStatus::Pending, "IT603", StudyMode::FullTime);
    assert_eq!(insight(&Scripted::failing(), "m", &a).await, INSIGHT_UNAVAILABLE);
    assert_eq!(insight(&Scripted::replying("Strong fit."), "m", &a).await, "Strong fit.");
  }
}
