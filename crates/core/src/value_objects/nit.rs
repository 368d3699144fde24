use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const MIN_LEN: usize = 5;

/// Company tax-identification number. Primary key of an empresa.
///
/// Digits and dashes only, at least 5 characters. Compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nit(String);

impl Nit {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("NIT cannot be empty"));
        }
        if value.chars().count() < MIN_LEN {
            return Err(DomainError::validation(format!(
                "NIT must have at least {MIN_LEN} characters"
            )));
        }
        if !value.chars().all(|c| c.is_ascii_digit() || c == '-') {
            return Err(DomainError::validation(
                "NIT may only contain digits and dashes",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Nit {}

impl core::fmt::Display for Nit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Nit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Nit {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Nit> for String {
    fn from(value: Nit) -> Self {
        value.0
    }
}
