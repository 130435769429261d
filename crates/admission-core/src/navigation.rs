//! The step state machine that sequences the portal's views.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
  auth::{AdminGate, AdminSession},
  error::{AuthError, ValidationError},
  identity::IcNumber,
  intake::IntakeDraft,
};

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AppStep {
  #[default]
  Validation,
  Application,
  Success,
  AdminLogin,
  AdminDashboard,
}

impl AppStep {
  pub fn is_admin(self) -> bool {
    matches!(self, AppStep::AdminLogin | AppStep::AdminDashboard)
  }
}

/// Current step plus the context the steps hand to each other: the validated
/// IC number, the last submitted id and the admin session.
#[derive(Debug, Clone)]
pub struct Navigator {
  step:         AppStep,
  session:      AdminSession,
  ic_number:    Option<IcNumber>,
  submitted_id: Option<String>,
}

impl Navigator {
  pub fn new(session: AdminSession) -> Self {
    Self {
      step: AppStep::Validation,
      session,
      ic_number: None,
      submitted_id: None,
    }
  }

  pub fn step(&self) -> AppStep { self.step }

  pub fn session(&self) -> &AdminSession { &self.session }

  pub fn ic_number(&self) -> Option<&IcNumber> { self.ic_number.as_ref() }

  pub fn submitted_id(&self) -> Option<&str> { self.submitted_id.as_deref() }

  /// Check `raw` and, when it is a valid IC number, record it and move to
  /// the intake form. The step is unchanged on failure.
  pub fn validate_identity(&mut self, raw: &str) -> Result<&IcNumber, ValidationError> {
    let ic = IcNumber::parse(raw)?;
    self.step = AppStep::Application;
    Ok(&*self.ic_number.insert(ic))
  }

  /// A fresh draft prefilled with the validated IC number, if any.
  pub fn intake_draft(&self) -> Option<IntakeDraft> {
    self.ic_number.clone().map(IntakeDraft::new)
  }

  /// The registry accepted application `id`.
  pub fn submitted(&mut self, id: impl Into<String>) {
    self.submitted_id = Some(id.into());
    self.step = AppStep::Success;
  }

  /// The header's admin button: leaves the admin views, or enters them at
  /// the dashboard when already authenticated and at the login otherwise.
  pub fn toggle_admin_view(&mut self) {
    self.step = if self.step.is_admin() {
      AppStep::Validation
    } else if self.session.is_authenticated() {
      AppStep::AdminDashboard
    } else {
      AppStep::AdminLogin
    };
  }

  pub fn login(
    &mut self,
    gate: &AdminGate,
    username: &str,
    password: &str,
  ) -> Result<(), AuthError> {
    self.session.login(gate, username, password)?;
    self.step = AppStep::AdminDashboard;
    Ok(())
  }

  /// Mark the session authenticated after a login checked elsewhere (the
  /// REST service).
  pub fn logged_in(&mut self) {
    self.session = AdminSession::restored(true);
    self.step = AppStep::AdminDashboard;
  }

  pub fn logout(&mut self) {
    self.session.logout();
    self.step = AppStep::Validation;
  }

  /// Back to the start for a new applicant.
  pub fn reset(&mut self) {
    self.step = AppStep::Validation;
    self.ic_number = None;
    self.submitted_id = None;
  }

  /// The floating assistant is hidden on the admin views and on the
  /// success page.
  pub fn shows_assistant(&self) -> bool {
    !self.step.is_admin() && self.step != AppStep::Success
  }
}
