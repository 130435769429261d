//! Async HTTP client wrapping the admission JSON API.

use std::time::Duration;

use admission_core::{
  application::{Application, ApplicationStatus},
  assistant::Conversation,
  auth::AdminCredentials,
  dashboard::DashboardStats,
  intake::IntakeDraft,
};
use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use uuid::Uuid;

/// Connection settings for the admission API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// A transcript as returned by the assistant endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationView {
  pub id:           Uuid,
  #[serde(flatten)]
  pub conversation: Conversation,
}

#[derive(Deserialize)]
struct Document {
  text: String,
}

#[derive(Deserialize)]
struct Insight {
  text: String,
}

/// Async HTTP client for the admission REST API.
///
/// Admin requests carry the credentials accepted by the last successful
/// [`ApiClient::login`] as HTTP Basic auth.
pub struct ApiClient {
  client:      Client,
  config:      ApiConfig,
  credentials: Option<AdminCredentials>,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self {
      client,
      config,
      credentials: None,
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn admin(&self, req: RequestBuilder) -> RequestBuilder {
    match &self.credentials {
      Some(c) => req.basic_auth(&c.username, Some(&c.password)),
      None => req,
    }
  }

  /// Forget the admin credentials.
  pub fn logout(&mut self) { self.credentials = None; }

  /// Send `req` and decode a JSON success body. Error bodies carry
  /// `{"error": ...}`; that message becomes the error.
  async fn call<T: DeserializeOwned>(&self, what: &str, req: RequestBuilder) -> Result<T> {
    let resp = req.send().await.with_context(|| format!("{what} failed"))?;
    let resp = check(what, resp).await?;
    resp.json().await.with_context(|| format!("deserialising {what}"))
  }

  // ── Applicant ─────────────────────────────────────────────────────────────

  /// `POST /api/applications`
  pub async fn submit(&self, draft: &IntakeDraft) -> Result<Application> {
    self
      .call("POST /applications", self.client.post(self.url("/applications")).json(draft))
      .await
  }

  /// `GET /api/applications/{id}/slip`, rendered text only.
  pub async fn slip_text(&self, id: &str) -> Result<String> {
    let doc: Document = self
      .call(
        "GET /applications/{id}/slip",
        self.client.get(self.url(&format!("/applications/{id}/slip"))),
      )
      .await?;
    Ok(doc.text)
  }

  // ── Admin ─────────────────────────────────────────────────────────────────

  /// `POST /api/admin/login`. Keeps the pair for later admin calls on
  /// success.
  pub async fn login(&mut self, credentials: AdminCredentials) -> Result<()> {
    let _: serde_json::Value = self
      .call(
        "POST /admin/login",
        self.client.post(self.url("/admin/login")).json(&credentials),
      )
      .await?;
    self.credentials = Some(credentials);
    Ok(())
  }

  /// `GET /api/applications`
  pub async fn list_applications(&self) -> Result<Vec<Application>> {
    self
      .call(
        "GET /applications",
        self.admin(self.client.get(self.url("/applications"))),
      )
      .await
  }

  /// `GET /api/dashboard`
  pub async fn dashboard(&self) -> Result<DashboardStats> {
    self
      .call("GET /dashboard", self.admin(self.client.get(self.url("/dashboard"))))
      .await
  }

  /// `PUT /api/applications/{id}/status`
  pub async fn set_status(&self, id: &str, status: ApplicationStatus) -> Result<Application> {
    self
      .call(
        "PUT /applications/{id}/status",
        self.admin(
          self
            .client
            .put(self.url(&format!("/applications/{id}/status")))
            .json(&json!({ "status": status })),
        ),
      )
      .await
  }

  /// `GET /api/applications/{id}/offer-letter`, rendered text only.
  pub async fn offer_letter_text(&self, id: &str) -> Result<String> {
    let doc: Document = self
      .call(
        "GET /applications/{id}/offer-letter",
        self.admin(
          self
            .client
            .get(self.url(&format!("/applications/{id}/offer-letter"))),
        ),
      )
      .await?;
    Ok(doc.text)
  }

  /// `POST /api/applications/{id}/insight`
  pub async fn insight(&self, id: &str) -> Result<String> {
    let insight: Insight = self
      .call(
        "POST /applications/{id}/insight",
        self.admin(
          self
            .client
            .post(self.url(&format!("/applications/{id}/insight"))),
        ),
      )
      .await?;
    Ok(insight.text)
  }

  // ── Assistant ─────────────────────────────────────────────────────────────

  /// `POST /api/assistant/conversations`
  pub async fn new_conversation(&self) -> Result<ConversationView> {
    self
      .call(
        "POST /assistant/conversations",
        self.client.post(self.url("/assistant/conversations")),
      )
      .await
  }

  /// `POST /api/assistant/conversations/{id}/messages`
  pub async fn send_message(&self, id: Uuid, text: &str) -> Result<ConversationView> {
    self
      .call(
        "POST /assistant/conversations/{id}/messages",
        self
          .client
          .post(self.url(&format!("/assistant/conversations/{id}/messages")))
          .json(&json!({ "text": text })),
      )
      .await
  }
}

async fn check(what: &str, resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body: serde_json::Value = resp.json().await.unwrap_or_default();
  match body.get("error").and_then(|m| m.as_str()) {
    Some(message) => Err(anyhow!("{message}")),
    None => Err(anyhow!("{what} → {status}")),
  }
}
