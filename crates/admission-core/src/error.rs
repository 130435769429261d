//! Error types for `admission-core`.
//!
//! Every variant here is user-facing: the `Display` text is the message shown
//! next to the control that triggered it.

use thiserror::Error;

use crate::intake::IntakeField;

/// Identifier format errors raised by the identity step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Please enter a valid 12-digit IC number without dashes.")]
  InvalidIcNumber,
}

/// Reasons an intake draft is refused on submit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
  #[error("Please verify the declaration checkbox before submitting.")]
  DeclarationNotVerified,

  #[error("Please fill in all required fields: {}", display_fields(.0))]
  MissingFields(Vec<IntakeField>),

  #[error("field {0} is read-only")]
  ReadOnly(IntakeField),

  #[error("invalid value {value:?} for {field}")]
  InvalidValue { field: IntakeField, value: String },

  #[error("exactly {expected} referees are required, got {found}")]
  RefereeCount { expected: usize, found: usize },

  #[error("at most {max} work-experience entries are allowed, got {found}")]
  TooManyWorkEntries { max: usize, found: usize },
}

/// Admin credential mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
  #[error(
    "Invalid administrative credentials. Please verify your username and password."
  )]
  InvalidCredentials,
}

/// Refusals from the conversational assistant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
  #[error("message is empty")]
  EmptyMessage,

  #[error("a reply is still pending")]
  ReplyPending,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Intake(#[from] IntakeError),

  #[error(transparent)]
  Auth(#[from] AuthError),

  #[error(transparent)]
  Assistant(#[from] AssistantError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn display_fields(fields: &[IntakeField]) -> String {
  fields
    .iter()
    .map(|f| f.label())
    .collect::<Vec<_>>()
    .join(", ")
}
