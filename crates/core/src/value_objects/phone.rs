use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

/// Contact phone number.
///
/// Spaces and dashes are allowed as separators and kept in the stored value;
/// what remains must be 7 to 15 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("phone cannot be empty"));
        }

        let digits = Self::strip_separators(&value);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation("phone may only contain digits"));
        }
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
            return Err(DomainError::validation(format!(
                "phone must have between {MIN_DIGITS} and {MAX_DIGITS} digits"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number without separators.
    pub fn digits(&self) -> String {
        Self::strip_separators(&self.0)
    }

    fn strip_separators(value: &str) -> String {
        value.chars().filter(|c| *c != ' ' && *c != '-').collect()
    }
}

impl ValueObject for Phone {}

impl core::fmt::Display for Phone {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Phone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Phone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Phone> for String {
    fn from(value: Phone) -> Self {
        value.0
    }
}
