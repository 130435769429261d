//! Printable documents projected from a single application: the offer letter
//! issued for an approved applicant, and the slip printed after submission.
//!
//! Both are pure functions of the record and a date; printing is the caller's
//! concern.

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  application::{Application, ApplicationStatus, StudyMode},
  reference::{program_label, state_label},
};

pub const UNIVERSITY: &str = "UNISEL UNIVERSITY";
pub const OFFICE: &str = "Office of Graduate Studies";
pub const CAMPUS_ADDRESS: [&str; 4] = [
  "Main Campus: Bestari Jaya",
  "45600 Batang Berjuntai",
  "Selangor Darul Ehsan",
  "www.unisel.edu.my",
];
pub const REGISTRAR: &str = "PROF. DR. MOHAMAD SALLEH";
pub const SUBJECT: &str =
  "OFFER OF ADMISSION TO POSTGRADUATE PROGRAMME (BY RESEARCH)";
pub const FIELD_OF_STUDY: &str = "Research and Development";
pub const FOOTER: [&str; 2] = [
  "This is a computer-generated letter. No signature is required.",
  "UNISEL University is a member of the Malaysian Association of Private \
   Colleges and Universities.",
];

/// `UNISEL/GS/{id}/{year}`.
pub fn offer_reference(id: &str, year: i32) -> String {
  format!("UNISEL/GS/{id}/{year}")
}

/// Long-form date, e.g. `19 October 2026`.
pub fn long_date(date: NaiveDate) -> String { date.format("%-d %B %Y").to_string() }

// ─── Offer letter ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferLetter {
  pub reference:           String,
  pub date:                String,
  pub recipient_name:      String,
  /// Address block below the name, blank lines omitted.
  pub recipient_address:   Vec<String>,
  pub programme:           String,
  pub field_of_study:      String,
  pub study_mode:          StudyMode,
  pub intake:              String,
  pub acceptance_deadline: String,
  pub registrar:           String,
}

impl OfferLetter {
  /// Project `application` into a letter dated `today`.
  ///
  /// The caller decides whether an offer may be issued; this projection
  /// renders any record.
  pub fn issue(application: &Application, today: NaiveDate) -> Self {
    let year = today.year();
    let mut address = vec![application.address1.clone()];
    if !application.address2.trim().is_empty() {
      address.push(application.address2.clone());
    }
    address.push(format!("{} {}", application.postcode, application.town));
    address.push(state_label(&application.state).to_owned());

    Self {
      reference:           offer_reference(&application.id, year),
      date:                long_date(today),
      recipient_name:      application.name.clone(),
      recipient_address:   address,
      programme:           program_label(&application.program1).to_owned(),
      field_of_study:      FIELD_OF_STUDY.to_owned(),
      study_mode:          application.study_mode,
      intake:              format!("NOVEMBER {year}"),
      acceptance_deadline: format!("30th October {year}"),
      registrar:           REGISTRAR.to_owned(),
    }
  }

  /// Lay the letter out as plain text for printing.
  pub fn render_text(&self) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = self.write_text(&mut out);
    out
  }

  fn write_text(&self, out: &mut String) -> std::fmt::Result {
    writeln!(out, "{UNIVERSITY}")?;
    writeln!(out, "{OFFICE}")?;
    for line in CAMPUS_ADDRESS {
      writeln!(out, "{line}")?;
    }
    writeln!(out, "{}", "=".repeat(72))?;
    writeln!(out)?;
    writeln!(out, "Ref: {}", self.reference)?;
    writeln!(out, "Date: {}", self.date)?;
    writeln!(out)?;
    writeln!(out, "{}", self.recipient_name.to_uppercase())?;
    for line in &self.recipient_address {
      writeln!(out, "{}", line.to_uppercase())?;
    }
    writeln!(out)?;
    writeln!(out, "{SUBJECT}")?;
    writeln!(out, "{}", "-".repeat(SUBJECT.len()))?;
    writeln!(out)?;
    writeln!(out, "Dear {},", self.recipient_name)?;
    writeln!(out)?;
    writeln!(
      out,
      "We are pleased to inform you that the Postgraduate Committee of UNISEL \
       University has approved your application for admission to the \
       following postgraduate programme:"
    )?;
    writeln!(out)?;
    writeln!(out, "  Programme:       {}", self.programme)?;
    writeln!(out, "  Field of Study:  {}", self.field_of_study)?;
    writeln!(out, "  Mode of Study:   {}", self.study_mode)?;
    writeln!(out, "  Intake:          {}", self.intake)?;
    writeln!(out)?;
    writeln!(
      out,
      "Your admission is subject to the terms and conditions set out in the \
       Graduate Student Handbook. You are required to confirm your acceptance \
       of this offer by completing the Acceptance Form and paying the required \
       registration fees by {}.",
      self.acceptance_deadline
    )?;
    writeln!(out)?;
    writeln!(
      out,
      "We look forward to welcoming you to UNISEL and wish you success in your \
       research endeavors."
    )?;
    writeln!(out)?;
    writeln!(out, "Yours sincerely,")?;
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "{}", self.registrar)?;
    writeln!(out, "Registrar")?;
    writeln!(out, "UNISEL University")?;
    writeln!(out)?;
    for line in FOOTER {
      writeln!(out, "{line}")?;
    }
    Ok(())
  }
}

// ─── Submission slip ─────────────────────────────────────────────────────────

/// Acknowledgement printed from the success view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSlip {
  pub id:              String,
  pub name:            String,
  pub ic_number:       String,
  pub first_choice:    String,
  pub second_choice:   String,
  pub study_mode:      StudyMode,
  pub submitted_at:    DateTime<Utc>,
  pub status:          ApplicationStatus,
}

impl SubmissionSlip {
  pub fn for_application(application: &Application) -> Self {
    Self {
      id:            application.id.clone(),
      name:          application.name.clone(),
      ic_number:     application.ic_number.clone(),
      first_choice:  program_label(&application.program1).to_owned(),
      second_choice: program_label(&application.program2).to_owned(),
      study_mode:    application.study_mode,
      submitted_at:  application.submission_date,
      status:        application.status,
    }
  }

  pub fn render_text(&self) -> String {
    let rows = [
      ("Application ID", self.id.clone()),
      ("Name", self.name.clone()),
      ("IC Number", self.ic_number.clone()),
      ("Programme Choice 1", self.first_choice.clone()),
      ("Programme Choice 2", self.second_choice.clone()),
      ("Mode of Study", self.study_mode.to_string()),
      (
        "Submitted",
        self.submitted_at.format("%Y-%m-%d %H:%M UTC").to_string(),
      ),
      ("Status", self.status.to_string()),
    ];
    let mut out = format!("{UNIVERSITY}\nAPPLICATION SLIP: MASTER BY RESEARCH\n\n");
    for (label, value) in rows {
      out.push_str(&format!("{label:<20}{value}\n"));
    }
    out.push_str(
      "\nOur admissions team will review your documents and contact you \
       within 7-14 working days.\n",
    );
    out
  }
}
