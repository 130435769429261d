//! Static reference tables consumed by every form and view.
//!
//! Each table is an ordered list of `(value, label)` pairs; the value is what
//! an [`Application`](crate::application::Application) stores, the label is
//! what a human reads.

use serde::Serialize;

/// One selectable entry of a reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
  pub value: &'static str,
  pub label: &'static str,
}

const fn c(value: &'static str, label: &'static str) -> Choice {
  Choice { value, label }
}

pub const PROGRAMS: &[Choice] = &[
  c("EN601", "MASTER IN ENGINEERING"),
  c("ED609", "MASTER OF EDUCATION"),
  c("GS601", "MASTER OF LIFE SCIENCE"),
  c("MG604", "MASTER OF MANAGEMENT"),
  c("BT601", "MASTER OF SCIENCE (BIOTECHNOLOGY)"),
  c("IT603", "MASTER OF SCIENCE (COMPUTING)"),
  c("GS602", "POSTGRADUATE CERTIFICATE IN ISLAMIC CHAPLAINCY"),
];

pub const STATES: &[Choice] = &[
  c("A00", "PERAK"),
  c("B00", "SELANGOR"),
  c("C00", "PAHANG"),
  c("D00", "KELANTAN"),
  c("J00", "JOHOR"),
  c("K00", "KEDAH"),
  c("M00", "MELAKA"),
  c("N00", "NEGERI SEMBILAN"),
  c("P00", "PULAU PINANG"),
  c("R00", "PERLIS"),
  c("S00", "SINGAPURA"),
  c("T00", "TERENGGANU"),
  c("U00", "W.P. PUTRAJAYA"),
  c("W00", "W.P. KUALA LUMPUR"),
  c("X00", "SABAH"),
  c("Y00", "SARAWAK"),
  c("Z00", "W.P. LABUAN"),
  c("999", "Others"),
];

pub const RACES: &[Choice] = &[
  c("1", "MELAYU"),
  c("2", "CINA"),
  c("3", "INDIA"),
  c("10", "BUMIPUTERA"),
  c("11", "KADAZAN / DUSUN"),
  c("9", "IBAN"),
  c("14", "BAJAU / ILANAU"),
  c("7", "BIDAYUH"),
  c("12", "BRUNEI"),
  c("13", "MELANAU"),
  c("15", "MURUT"),
  c("16", "DAYAK"),
  c("17", "IRANUN"),
  c("19", "LUNBAWANG"),
  c("5", "ORG ASLI SEMENANJUNG"),
  c("6", "PERIBUMI"),
  c("8", "SIAM"),
  c("4", "SIKH"),
  c("100", "LAIN-LAIN - MSIA"),
  c("99", "LAIN-LAIN - EXP"),
];

pub const MARITAL_STATUSES: &[Choice] = &[c("1", "Single"), c("2", "Married")];

pub const INCOME_BRACKETS: &[Choice] = &[
  c("1", "Below RM1500"),
  c("2", "RM1501- RM2500"),
  c("3", "RM2501 - RM3500"),
  c("4", "RM3501 - RM4500"),
  c("5", "Over RM5000"),
];

pub const SPONSOR_TYPES: &[Choice] = &[
  c("1", "Bank Loan"),
  c("2", "Company Sponsor"),
  c("3", "EPF Withdrawal"),
  c("4", "Other Sponsor"),
  c("5", "Self Sponsor"),
];

pub const PAYMENT_METHODS: &[Choice] = &[
  c("1", "Full Payment"),
  c("2", "Yearly Payment"),
  c("3", "Payment per Module"),
  c("4", "Payment per Semester"),
];

/// First and last selectable work-experience year, inclusive.
pub const FIRST_YEAR: u16 = 1950;
pub const LAST_YEAR: u16 = 2023;

/// Selectable work-experience years, oldest first.
pub fn years() -> impl DoubleEndedIterator<Item = u16> + Clone {
  FIRST_YEAR..=LAST_YEAR
}

/// Resolve `value` to its label in `table`, falling back to the raw value.
pub fn label_for<'a>(table: &'static [Choice], value: &'a str) -> &'a str {
  table
    .iter()
    .find(|ch| ch.value == value)
    .map(|ch| ch.label)
    .unwrap_or(value)
}

pub fn program_label(value: &str) -> &str { label_for(PROGRAMS, value) }

pub fn state_label(value: &str) -> &str { label_for(STATES, value) }

/// Every table, keyed by name; served as-is by the reference endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceData {
  pub programs:         &'static [Choice],
  pub states:           &'static [Choice],
  pub races:            &'static [Choice],
  pub marital_statuses: &'static [Choice],
  pub income_brackets:  &'static [Choice],
  pub sponsor_types:    &'static [Choice],
  pub payment_methods:  &'static [Choice],
  pub years:            Vec<u16>,
}

impl ReferenceData {
  pub fn get() -> Self {
    Self {
      programs:         PROGRAMS,
      states:           STATES,
      races:            RACES,
      marital_statuses: MARITAL_STATUSES,
      income_brackets:  INCOME_BRACKETS,
      sponsor_types:    SPONSOR_TYPES,
      payment_methods:  PAYMENT_METHODS,
      years:            years().collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn year_range_has_74_entries() {
    assert_eq!(years().count(), 74);
    assert_eq!(years().next(), Some(1950));
    assert_eq!(years().next_back(), Some(2023));
  }

  #[test]
  fn unknown_key_falls_back_to_raw_value() {
    assert_eq!(program_label("IT603"), "MASTER OF SCIENCE (COMPUTING)");
    assert_eq!(program_label("XX000"), "XX000");
    assert_eq!(state_label("W00"), "W.P. KUALA LUMPUR");
  }
}
