//! Admin authentication gate and the session flag it controls.
//!
//! The gate compares against a single fixed credential pair. It is a
//! placeholder for a real credential-issuance boundary and must not be relied
//! on outside a demo deployment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Delay applied before a login attempt is answered.
pub const LOGIN_DELAY: Duration = Duration::from_millis(800);

/// A username / password pair as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
  pub username: String,
  pub password: String,
}

impl AdminCredentials {
  pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password: password.into(),
    }
  }

  /// The demo pair offered by "use demo credentials". Not for production.
  pub fn demo() -> Self { Self::new("admin", "unisel2025") }
}

/// Verifies entered credentials against the single administrator identity.
#[derive(Debug, Clone)]
pub struct AdminGate {
  expected: AdminCredentials,
}

impl Default for AdminGate {
  fn default() -> Self { Self::new(AdminCredentials::demo()) }
}

impl AdminGate {
  /// A gate accepting `expected`. The username is stored lower-cased and
  /// trimmed, the password trimmed.
  pub fn new(expected: AdminCredentials) -> Self {
    Self {
      expected: AdminCredentials {
        username: expected.username.trim().to_lowercase(),
        password: expected.password.trim().to_owned(),
      },
    }
  }

  /// Username: case-insensitive after trimming. Password: exact after
  /// trimming.
  pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
    let user_ok = username.trim().to_lowercase() == self.expected.username;
    let pass_ok = password.trim() == self.expected.password;
    if user_ok && pass_ok {
      Ok(())
    } else {
      Err(AuthError::InvalidCredentials)
    }
  }
}

/// The "admin authenticated" flag, owned by whoever drives navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminSession {
  authenticated: bool,
}

impl AdminSession {
  /// A session restored from a previously stored flag.
  pub fn restored(authenticated: bool) -> Self { Self { authenticated } }

  pub fn is_authenticated(&self) -> bool { self.authenticated }

  /// Check `username` / `password` at `gate`; sets the flag on success and
  /// leaves it untouched on failure.
  pub fn login(
    &mut self,
    gate: &AdminGate,
    username: &str,
    password: &str,
  ) -> Result<(), AuthError> {
    gate.verify(username, password)?;
    self.authenticated = true;
    Ok(())
  }

  pub fn logout(&mut self) { self.authenticated = false; }
}
