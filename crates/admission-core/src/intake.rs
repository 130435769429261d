//! The application intake form: an editable draft and its submit rule.
//!
//! Field edits go through [`IntakeDraft::set`], which applies the form's
//! case-folding and digit-filtering policies. Submission checks only the
//! declaration and the required-field markers; formats (email, mobile) are
//! never validated.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  application::{
    Application, ApplicationStatus, Gender, REFEREE_SLOTS, Referee, StudyMode,
    WORK_EXPERIENCE_SLOTS, WorkExperience, generate_id,
  },
  error::IntakeError,
  identity::{IcNumber, digits_only},
  reference::{
    self, Choice, INCOME_BRACKETS, MARITAL_STATUSES, PAYMENT_METHODS, PROGRAMS,
    RACES, SPONSOR_TYPES, STATES,
  },
  store::ApplicationStore,
};

// ─── Fields ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkField {
  Position,
  StartYear,
  EndYear,
  Organization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefereeField {
  Name,
  Address,
  Postcode,
  City,
  State,
  Mobile,
  Email,
}

/// Addresses one editable control of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum IntakeField {
  Program1,
  Program2,
  StudyMode,
  Name,
  IcNumber,
  Dob,
  Address1,
  Address2,
  Town,
  Postcode,
  State,
  Race,
  MaritalStatus,
  Gender,
  FamilyIncome,
  Mobile,
  Email,
  Work { slot: usize, part: WorkField },
  SponsorType,
  SponsorName,
  PaymentMethod,
  Referee { slot: usize, part: RefereeField },
  Declaration,
}

/// How a field is edited and normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  /// Free text; upper-cased on edit when `uppercase` is set.
  Text { uppercase: bool },
  /// Only decimal digits survive an edit, at most `max` of them.
  Digits { max: Option<usize> },
  /// One of the values of a reference table, or empty.
  Select(&'static [Choice]),
  /// A year from [`reference::years`], or empty.
  Year,
  Checkbox,
  ReadOnly,
}

pub const STUDY_MODES: &[Choice] = &[
  Choice { value: "FULL TIME", label: "Full Time" },
  Choice { value: "PART TIME", label: "Part Time" },
];

/// Length of a Malaysian postcode.
pub const POSTCODE_DIGITS: usize = 5;

pub const GENDERS: &[Choice] = &[
  Choice { value: "M", label: "Male" },
  Choice { value: "F", label: "Female" },
];

impl IntakeField {
  /// Every field in form order.
  pub fn all() -> Vec<IntakeField> {
    use IntakeField as F;
    let mut fields = vec![
      F::Program1,
      F::Program2,
      F::StudyMode,
      F::Name,
      F::IcNumber,
      F::Dob,
      F::Address1,
      F::Address2,
      F::Town,
      F::Postcode,
      F::State,
      F::Race,
      F::MaritalStatus,
      F::Gender,
      F::FamilyIncome,
      F::Mobile,
      F::Email,
    ];
    for slot in 0..WORK_EXPERIENCE_SLOTS {
      for part in [
        WorkField::Position,
        WorkField::StartYear,
        WorkField::EndYear,
        WorkField::Organization,
      ] {
        fields.push(F::Work { slot, part });
      }
    }
    fields.extend([F::SponsorType, F::SponsorName, F::PaymentMethod]);
    for slot in 0..REFEREE_SLOTS {
      for part in [
        RefereeField::Name,
        RefereeField::Address,
        RefereeField::Postcode,
        RefereeField::City,
        RefereeField::State,
        RefereeField::Mobile,
        RefereeField::Email,
      ] {
        fields.push(F::Referee { slot, part });
      }
    }
    fields.push(F::Declaration);
    fields
  }

  pub fn kind(self) -> FieldKind {
    use IntakeField as F;
    match self {
      F::Program1 | F::Program2 => FieldKind::Select(PROGRAMS),
      F::StudyMode => FieldKind::Select(STUDY_MODES),
      F::Name | F::Address1 | F::Address2 => {
        FieldKind::Text { uppercase: true }
      }
      F::IcNumber => FieldKind::ReadOnly,
      F::Dob | F::Town | F::Mobile | F::Email | F::SponsorName => {
        FieldKind::Text { uppercase: false }
      }
      F::Postcode => FieldKind::Digits { max: Some(POSTCODE_DIGITS) },
      F::State => FieldKind::Select(STATES),
      F::Race => FieldKind::Select(RACES),
      F::MaritalStatus => FieldKind::Select(MARITAL_STATUSES),
      F::Gender => FieldKind::Select(GENDERS),
      F::FamilyIncome => FieldKind::Select(INCOME_BRACKETS),
      F::Work { part: WorkField::StartYear | WorkField::EndYear, .. } => {
        FieldKind::Year
      }
      F::Work { .. } => FieldKind::Text { uppercase: true },
      F::SponsorType => FieldKind::Select(SPONSOR_TYPES),
      F::PaymentMethod => FieldKind::Select(PAYMENT_METHODS),
      F::Referee { part: RefereeField::State, .. } => FieldKind::Select(STATES),
      F::Referee { .. } => FieldKind::Text { uppercase: true },
      F::Declaration => FieldKind::Checkbox,
    }
  }

  /// Whether an empty value blocks submission.
  pub fn is_required(self) -> bool {
    use IntakeField as F;
    match self {
      F::Program1
      | F::Program2
      | F::Name
      | F::Dob
      | F::Address1
      | F::Town
      | F::Postcode
      | F::State
      | F::Race
      | F::MaritalStatus
      | F::SponsorType
      | F::PaymentMethod => true,
      F::Referee { part, .. } => part != RefereeField::Email,
      _ => false,
    }
  }

  /// Human-readable label used in forms and error messages.
  pub fn label(self) -> String {
    use IntakeField as F;
    match self {
      F::Program1 => "Programme Choice 1".into(),
      F::Program2 => "Programme Choice 2".into(),
      F::StudyMode => "Mode of Study".into(),
      F::Name => "Full Name".into(),
      F::IcNumber => "IC Number".into(),
      F::Dob => "Date of Birth".into(),
      F::Address1 => "Address Line 1".into(),
      F::Address2 => "Address Line 2".into(),
      F::Town => "Town".into(),
      F::Postcode => "Postcode".into(),
      F::State => "State".into(),
      F::Race => "Race".into(),
      F::MaritalStatus => "Marital Status".into(),
      F::Gender => "Gender".into(),
      F::FamilyIncome => "Family Income".into(),
      F::Mobile => "Mobile No.".into(),
      F::Email => "Email".into(),
      F::Work { slot, part } => {
        let part = match part {
          WorkField::Position => "Position",
          WorkField::StartYear => "From",
          WorkField::EndYear => "To",
          WorkField::Organization => "Organization",
        };
        format!("Work {} {part}", slot + 1)
      }
      F::SponsorType => "Sponsor Type".into(),
      F::SponsorName => "Sponsor Name".into(),
      F::PaymentMethod => "Payment Method".into(),
      F::Referee { slot, part } => {
        let part = match part {
          RefereeField::Name => "Name",
          RefereeField::Address => "Address",
          RefereeField::Postcode => "Postcode",
          RefereeField::City => "City",
          RefereeField::State => "State",
          RefereeField::Mobile => "Mobile",
          RefereeField::Email => "Email",
        };
        format!("Referee {} {part}", slot + 1)
      }
      F::Declaration => "Declaration".into(),
    }
  }
}

impl fmt::Display for IntakeField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.label())
  }
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// An in-progress application. Becomes an [`Application`] on submit.
///
/// Only `ic_number` is mandatory when deserialising; absent fields are
/// blank and reported by [`IntakeDraft::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeDraft {
  #[serde(default)]
  pub program1:             String,
  #[serde(default)]
  pub program2:             String,
  #[serde(default)]
  pub study_mode:           StudyMode,
  #[serde(default)]
  pub name:                 String,
  /// Fixed by the identity step; read-only within the form.
  pub ic_number:            IcNumber,
  #[serde(default)]
  pub dob:                  String,
  #[serde(default)]
  pub address1:             String,
  #[serde(default)]
  pub address2:             String,
  #[serde(default)]
  pub town:                 String,
  #[serde(default)]
  pub postcode:             String,
  #[serde(default)]
  pub state:                String,
  #[serde(default)]
  pub race:                 String,
  #[serde(default)]
  pub marital_status:       String,
  #[serde(default)]
  pub gender:               Gender,
  #[serde(default)]
  pub family_income:        String,
  #[serde(default)]
  pub mobile:               String,
  #[serde(default)]
  pub email:                String,
  #[serde(default)]
  pub work_experience:      Vec<WorkExperience>,
  #[serde(default)]
  pub sponsor_type:         String,
  #[serde(default)]
  pub sponsor_name:         String,
  #[serde(default)]
  pub payment_method:       String,
  #[serde(default)]
  pub referees:             Vec<Referee>,
  #[serde(default)]
  pub declaration_verified: bool,
}

impl IntakeDraft {
  /// A blank draft for the validated `ic_number`.
  pub fn new(ic_number: IcNumber) -> Self {
    Self {
      program1: String::new(),
      program2: String::new(),
      study_mode: StudyMode::FullTime,
      name: String::new(),
      ic_number,
      dob: String::new(),
      address1: String::new(),
      address2: String::new(),
      town: String::new(),
      postcode: String::new(),
      state: String::new(),
      race: String::new(),
      marital_status: String::new(),
      gender: Gender::M,
      family_income: String::new(),
      mobile: String::new(),
      email: String::new(),
      work_experience: vec![WorkExperience::default(); WORK_EXPERIENCE_SLOTS],
      sponsor_type: String::new(),
      sponsor_name: String::new(),
      payment_method: String::new(),
      referees: vec![Referee::default(); REFEREE_SLOTS],
      declaration_verified: false,
    }
  }

  /// Current value of `field` as text.
  pub fn get(&self, field: IntakeField) -> String {
    use IntakeField as F;
    match field {
      F::Program1 => self.program1.clone(),
      F::Program2 => self.program2.clone(),
      F::StudyMode => self.study_mode.to_string(),
      F::Name => self.name.clone(),
      F::IcNumber => self.ic_number.to_string(),
      F::Dob => self.dob.clone(),
      F::Address1 => self.address1.clone(),
      F::Address2 => self.address2.clone(),
      F::Town => self.town.clone(),
      F::Postcode => self.postcode.clone(),
      F::State => self.state.clone(),
      F::Race => self.race.clone(),
      F::MaritalStatus => self.marital_status.clone(),
      F::Gender => self.gender.to_string(),
      F::FamilyIncome => self.family_income.clone(),
      F::Mobile => self.mobile.clone(),
      F::Email => self.email.clone(),
      F::Work { slot, part } => self
        .work_experience
        .get(slot)
        .map(|w| work_part(w, part).to_owned())
        .unwrap_or_default(),
      F::SponsorType => self.sponsor_type.clone(),
      F::SponsorName => self.sponsor_name.clone(),
      F::PaymentMethod => self.payment_method.clone(),
      F::Referee { slot, part } => self
        .referees
        .get(slot)
        .map(|r| referee_part(r, part).to_owned())
        .unwrap_or_default(),
      F::Declaration => self.declaration_verified.to_string(),
    }
  }

  /// Edit `field`, applying the field's normalisation policy.
  pub fn set(
    &mut self,
    field: IntakeField,
    value: &str,
  ) -> Result<(), IntakeError> {
    let invalid = || IntakeError::InvalidValue {
      field,
      value: value.to_owned(),
    };

    let normalised = match field.kind() {
      FieldKind::ReadOnly => return Err(IntakeError::ReadOnly(field)),
      FieldKind::Checkbox => {
        self.declaration_verified = value.parse().map_err(|_| invalid())?;
        return Ok(());
      }
      FieldKind::Text { uppercase: true } => value.to_uppercase(),
      FieldKind::Text { uppercase: false } => value.to_owned(),
      FieldKind::Digits { max } => {
        let mut digits = digits_only(value);
        if let Some(max) = max {
          digits.truncate(max);
        }
        digits
      }
      FieldKind::Select(table) => {
        if !value.is_empty() && !table.iter().any(|c| c.value == value) {
          return Err(invalid());
        }
        value.to_owned()
      }
      FieldKind::Year => {
        let known = value
          .parse::<u16>()
          .is_ok_and(|y| reference::years().any(|k| k == y));
        if !value.is_empty() && !known {
          return Err(invalid());
        }
        value.to_owned()
      }
    };

    use IntakeField as F;
    match field {
      F::Program1 => self.program1 = normalised,
      F::Program2 => self.program2 = normalised,
      F::StudyMode => {
        self.study_mode = normalised.parse().map_err(|_| invalid())?;
      }
      F::Name => self.name = normalised,
      F::Dob => self.dob = normalised,
      F::Address1 => self.address1 = normalised,
      F::Address2 => self.address2 = normalised,
      F::Town => self.town = normalised,
      F::Postcode => self.postcode = normalised,
      F::State => self.state = normalised,
      F::Race => self.race = normalised,
      F::MaritalStatus => self.marital_status = normalised,
      F::Gender => self.gender = normalised.parse().map_err(|_| invalid())?,
      F::FamilyIncome => self.family_income = normalised,
      F::Mobile => self.mobile = normalised,
      F::Email => self.email = normalised,
      F::Work { slot, part } => {
        let entry = self.work_experience.get_mut(slot).ok_or_else(invalid)?;
        *work_part_mut(entry, part) = normalised;
      }
      F::SponsorType => self.sponsor_type = normalised,
      F::SponsorName => self.sponsor_name = normalised,
      F::PaymentMethod => self.payment_method = normalised,
      F::Referee { slot, part } => {
        let entry = self.referees.get_mut(slot).ok_or_else(invalid)?;
        *referee_part_mut(entry, part) = normalised;
      }
      F::IcNumber | F::Declaration => unreachable!("handled by field kind"),
    }
    Ok(())
  }

  /// Rebuild the draft by sending every editable value through
  /// [`IntakeDraft::set`], so a draft that arrived whole (e.g. as JSON) obeys
  /// the same policies as one edited field by field.
  ///
  /// Missing work-experience slots are filled with blank entries; surplus
  /// slots and a referee count other than [`REFEREE_SLOTS`] are refused.
  pub fn normalise(mut self) -> Result<Self, IntakeError> {
    self.check_slots()?;
    self
      .work_experience
      .resize(WORK_EXPERIENCE_SLOTS, WorkExperience::default());

    let mut clean = IntakeDraft::new(self.ic_number.clone());
    for field in IntakeField::all() {
      if field.kind() == FieldKind::ReadOnly {
        continue;
      }
      clean.set(field, &self.get(field))?;
    }
    Ok(clean)
  }

  fn check_slots(&self) -> Result<(), IntakeError> {
    if self.referees.len() != REFEREE_SLOTS {
      return Err(IntakeError::RefereeCount {
        expected: REFEREE_SLOTS,
        found:    self.referees.len(),
      });
    }
    if self.work_experience.len() > WORK_EXPERIENCE_SLOTS {
      return Err(IntakeError::TooManyWorkEntries {
        max:   WORK_EXPERIENCE_SLOTS,
        found: self.work_experience.len(),
      });
    }
    Ok(())
  }

  /// Required fields that are still empty, in form order.
  pub fn missing_required(&self) -> Vec<IntakeField> {
    IntakeField::all()
      .into_iter()
      .filter(|f| f.is_required() && self.get(*f).trim().is_empty())
      .collect()
  }

  /// Turn the draft into a PENDING [`Application`].
  ///
  /// A draft with the wrong number of referee or work slots is refused
  /// outright. After that the declaration is checked first, so an undeclared
  /// draft is refused with [`IntakeError::DeclarationNotVerified`] however
  /// complete it is.
  pub fn submit(
    self,
    id: String,
    now: DateTime<Utc>,
  ) -> Result<Application, IntakeError> {
    self.check_slots()?;
    if !self.declaration_verified {
      return Err(IntakeError::DeclarationNotVerified);
    }
    let missing = self.missing_required();
    if !missing.is_empty() {
      return Err(IntakeError::MissingFields(missing));
    }

    Ok(Application {
      id,
      status: ApplicationStatus::Pending,
      submission_date: now,
      program1: self.program1,
      program2: self.program2,
      study_mode: self.study_mode,
      name: self.name,
      ic_number: self.ic_number.into(),
      dob: self.dob,
      address1: self.address1,
      address2: self.address2,
      town: self.town,
      postcode: self.postcode,
      state: self.state,
      race: self.race,
      marital_status: self.marital_status,
      gender: self.gender,
      family_income: self.family_income,
      mobile: self.mobile,
      email: self.email,
      work_experience: self.work_experience,
      sponsor_type: self.sponsor_type,
      sponsor_name: self.sponsor_name,
      payment_method: self.payment_method,
      referees: self.referees,
      declaration_verified: self.declaration_verified,
    })
  }
}

fn work_part(w: &WorkExperience, part: WorkField) -> &str {
  match part {
    WorkField::Position => &w.position,
    WorkField::StartYear => &w.start_year,
    WorkField::EndYear => &w.end_year,
    WorkField::Organization => &w.organization,
  }
}

fn work_part_mut(w: &mut WorkExperience, part: WorkField) -> &mut String {
  match part {
    WorkField::Position => &mut w.position,
    WorkField::StartYear => &mut w.start_year,
    WorkField::EndYear => &mut w.end_year,
    WorkField::Organization => &mut w.organization,
  }
}

fn referee_part(r: &Referee, part: RefereeField) -> &str {
  match part {
    RefereeField::Name => &r.name,
    RefereeField::Address => &r.address,
    RefereeField::Postcode => &r.postcode,
    RefereeField::City => &r.city,
    RefereeField::State => &r.state,
    RefereeField::Mobile => &r.mobile,
    RefereeField::Email => &r.email,
  }
}

fn referee_part_mut(r: &mut Referee, part: RefereeField) -> &mut String {
  match part {
    RefereeField::Name => &mut r.name,
    RefereeField::Address => &mut r.address,
    RefereeField::Postcode => &mut r.postcode,
    RefereeField::City => &mut r.city,
    RefereeField::State => &mut r.state,
    RefereeField::Mobile => &mut r.mobile,
    RefereeField::Email => &mut r.email,
  }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// Failure of [`submit`]: either the draft was refused or the registry
/// failed.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError<E: std::error::Error + 'static> {
  #[error(transparent)]
  Rejected(#[from] IntakeError),

  #[error("store error: {0}")]
  Store(#[source] E),
}

/// Submit `draft`: normalise it, assign a fresh id, stamp the current time
/// and append the resulting record to `store`. Nothing is appended when the
/// draft is refused.
pub async fn submit<S>(
  store: &S,
  draft: IntakeDraft,
) -> Result<Application, SubmitError<S::Error>>
where
  S: ApplicationStore,
{
  let application = draft.normalise()?.submit(generate_id(), Utc::now())?;
  store
    .append(application.clone())
    .await
    .map_err(SubmitError::Store)?;
  Ok(application)
}
