//! Error type for `admission-genai`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no API key configured")]
  MissingApiKey,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("server returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("response carried no text")]
  EmptyResponse,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
