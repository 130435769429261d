//! Runtime configuration for the `server` binary.

use std::time::Duration;

use admission_core::auth::LOGIN_DELAY;
use admission_genai::GeminiConfig;
use serde::Deserialize;

/// Server settings, deserialised from `config.toml` and `ADMISSION_*`
/// environment variables. Every field has a default.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  /// Artificial delay before a login attempt is answered.
  #[serde(default = "default_login_delay_ms")]
  pub login_delay_ms: u64,
  /// Start the registry with the mock record `APP-1001`.
  #[serde(default = "default_seed")]
  pub seed:           bool,
  #[serde(default)]
  pub genai:          GeminiConfig,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_login_delay_ms() -> u64 { LOGIN_DELAY.as_millis() as u64 }
fn default_seed() -> bool { true }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           default_host(),
      port:           default_port(),
      login_delay_ms: default_login_delay_ms(),
      seed:           default_seed(),
      genai:          GeminiConfig::default(),
    }
  }
}

impl ServerConfig {
  pub fn login_delay(&self) -> Duration { Duration::from_millis(self.login_delay_ms) }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
