use admission_core::assistant::{GenerationRequest, TextGenerator};
use serde::Deserialize;

use crate::{Error, Result, wire::GenerateRequest};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Connection settings for the Gemini API.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
  #[serde(default = "default_base_url")]
  pub base_url: String,
  /// Without a key every request fails with [`Error::MissingApiKey`].
  #[serde(default)]
  pub api_key:  Option<String>,
  #[serde(default = "default_model")]
  pub model:    String,
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }
fn default_model() -> String { DEFAULT_MODEL.to_owned() }

impl Default for GeminiConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      api_key:  None,
      model:    default_model(),
    }
  }
}

#[derive(Clone)]
pub struct GeminiClient {
  http:     reqwest::Client,
  base_url: String,
  api_key:  Option<String>,
}

impl GeminiClient {
  pub fn new(config: &GeminiConfig) -> Self {
    Self {
      http:     reqwest::Client::new(),
      base_url: config.base_url.trim_end_matches('/').to_owned(),
      api_key:  config.api_key.clone().filter(|k| !k.trim().is_empty()),
    }
  }

  fn url(&self, model: &str) -> String {
    format!("{}/v1beta/models/{model}:generateContent", self.base_url)
  }

  async fn generate_content(&self, request: &GenerationRequest) -> Result<String> {
    let key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;

    let resp = self
      .http
      .post(self.url(&request.model))
      .header("x-goog-api-key", key)
      .json(&GenerateRequest::new(&request.prompt))
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(Error::Status {
        status: status.as_u16(),
        body,
      });
    }

    let body: serde_json::Value = resp.json().await?;
    crate::extract_text(&body).ok_or(Error::EmptyResponse)
  }
}

impl TextGenerator for GeminiClient {
  type Error = Error;

  async fn generate<'a>(&'a self, request: &'a GenerationRequest) -> Result<String> {
    tracing::debug!(model = %request.model, "generateContent");
    self.generate_content(request).await
  }
}
