//! The application record (one admission submission) and its value objects.

use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Review status of an application. Every status is reachable from every
/// other; the registry applies no transition rule.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ApplicationStatus {
  #[default]
  Pending,
  Approved,
  Rejected,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
pub enum StudyMode {
  #[default]
  #[serde(rename = "FULL TIME")]
  #[strum(serialize = "FULL TIME")]
  FullTime,
  #[serde(rename = "PART TIME")]
  #[strum(serialize = "PART TIME")]
  PartTime,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
pub enum Gender {
  #[default]
  M,
  F,
}

// ─── Value objects ───────────────────────────────────────────────────────────

/// Number of work-experience slots offered by the intake form.
pub const WORK_EXPERIENCE_SLOTS: usize = 3;

/// Number of referees the intake form collects.
pub const REFEREE_SLOTS: usize = 2;

/// One past position. Any field may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
  pub position:     String,
  pub start_year:   String,
  pub end_year:     String,
  pub organization: String,
}

impl WorkExperience {
  pub fn is_blank(&self) -> bool {
    [&self.position, &self.start_year, &self.end_year, &self.organization]
      .iter()
      .all(|s| s.trim().is_empty())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referee {
  pub name:     String,
  pub address:  String,
  pub postcode: String,
  pub city:     String,
  /// Key into [`crate::reference::STATES`].
  pub state:    String,
  pub mobile:   String,
  pub email:    String,
}

// ─── Application ─────────────────────────────────────────────────────────────

/// A submitted application as held by the registry.
///
/// `id` and `submission_date` are fixed when the record is created; `status`
/// changes only through
/// [`ApplicationStore::update_status`](crate::store::ApplicationStore::update_status).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
  pub id:                   String,
  pub status:               ApplicationStatus,
  pub submission_date:      DateTime<Utc>,

  // ── Programme ───────────────────────────────────────────────────────────
  pub program1:             String,
  pub program2:             String,
  pub study_mode:           StudyMode,

  // ── Personal ────────────────────────────────────────────────────────────
  pub name:                 String,
  pub ic_number:            String,
  pub dob:                  String,
  pub address1:             String,
  pub address2:             String,
  pub town:                 String,
  pub postcode:             String,
  pub state:                String,
  pub race:                 String,
  pub marital_status:       String,
  pub gender:               Gender,
  pub family_income:        String,
  pub mobile:               String,
  pub email:                String,

  // ── Experience, funding, referees ───────────────────────────────────────
  #[serde(default)]
  pub work_experience:      Vec<WorkExperience>,
  pub sponsor_type:         String,
  pub sponsor_name:         String,
  pub payment_method:       String,
  #[serde(default)]
  pub referees:             Vec<Referee>,
  pub declaration_verified: bool,
}

impl Application {
  /// Work-experience entries with at least one non-blank field.
  pub fn filled_work_experience(&self) -> impl Iterator<Item = &WorkExperience> {
    self.work_experience.iter().filter(|w| !w.is_blank())
  }
}

/// Generate a registry identifier of the form `APP-NNNN` (1000–9999).
///
/// Uniqueness is not checked here or by the registry.
pub fn generate_id() -> String {
  let n = 1000 + OsRng.next_u32() % 9000;
  format!("APP-{n}")
}
