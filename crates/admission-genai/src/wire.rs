//! Request and response bodies of the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
  pub contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(crate) struct Content<'a> {
  pub parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(crate) struct Part<'a> {
  pub text: &'a str,
}

impl<'a> GenerateRequest<'a> {
  pub fn new(prompt: &'a str) -> Self {
    Self {
      contents: [Content {
        parts: [Part { text: prompt }],
      }],
    }
  }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
  #[serde(default)]
  pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Candidate {
  #[serde(default)]
  pub content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CandidateContent {
  #[serde(default)]
  pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CandidatePart {
  #[serde(default)]
  pub text: Option<String>,
}

/// Concatenated text parts of the first candidate in a `generateContent`
/// response body. `None` when the body is not a response or holds no text.
pub fn extract_text(body: &serde_json::Value) -> Option<String> {
  let response: GenerateResponse = serde_json::from_value(body.clone()).ok()?;
  let text: String = response
    .candidates
    .into_iter()
    .next()?
    .content
    .parts
    .into_iter()
    .filter_map(|p| p.text)
    .collect();
  (!text.is_empty()).then_some(text)
}
