use admission_core::application::{
  Application, ApplicationStatus, Gender, StudyMode, WorkExperience,
};
use chrono::{DateTime, Utc};

/// The mock record a fresh registry starts with, stamped `submitted_at`.
pub fn seed_application(submitted_at: DateTime<Utc>) -> Application {
  Application {
    id: "APP-1001".into(),
    status: ApplicationStatus::Pending,
    submission_date: submitted_at,
    program1: "IT603".into(),
    program2: "EN601".into(),
    study_mode: StudyMode::FullTime,
    name: "AHMAD BIN ZULKIFLI".into(),
    ic_number: "960101105544".into(),
    dob: "1996-01-01".into(),
    address1: "No 45, Jalan Indah".into(),
    address2: "Taman Melati".into(),
    town: "Kuala Lumpur".into(),
    postcode: "50000".into(),
    state: "W00".into(),
    race: "1".into(),
    marital_status: "1".into(),
    gender: Gender::M,
    family_income: "3".into(),
    mobile: "0123456789".into(),
    email: "ahmad@example.com".into(),
    work_experience: vec![WorkExperience {
      position:     "Software Engineer".into(),
      start_year:   "2018".into(),
      end_year:     "2023".into(),
      organization: "TechCorp".into(),
    }],
    sponsor_type: "5".into(),
    sponsor_name: "SELF".into(),
    payment_method: "1".into(),
    referees: Vec::new(),
    declaration_verified: true,
  }
}
