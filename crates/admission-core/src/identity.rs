//! Identity validation: the gate in front of the intake form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Length of a Malaysian identity card number without dashes.
pub const IC_NUMBER_LEN: usize = 12;

/// A validated identity card number: exactly 12 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IcNumber(String);

impl IcNumber {
  pub fn parse(raw: &str) -> Result<Self, ValidationError> {
    if raw.len() == IC_NUMBER_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
      Ok(Self(raw.to_owned()))
    } else {
      Err(ValidationError::InvalidIcNumber)
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl FromStr for IcNumber {
  type Err = ValidationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl TryFrom<String> for IcNumber {
  type Error = ValidationError;

  fn try_from(s: String) -> Result<Self, Self::Error> { Self::parse(&s) }
}

impl From<IcNumber> for String {
  fn from(ic: IcNumber) -> Self { ic.0 }
}

impl fmt::Display for IcNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Keep only the decimal digits of `input`; used while the number is typed.
pub fn digits_only(input: &str) -> String {
  input.chars().filter(|c| c.is_ascii_digit()).collect()
}
