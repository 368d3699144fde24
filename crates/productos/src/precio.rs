use core::str::FromStr;
use serde::{Deserialize, Serialize};

use nexus_core::{DomainError, DomainResult, ValueObject};

/// Largest representable price: twelve digits with two decimals.
pub const MAX_PRECIO_MINOR: u64 = 999_999_999_999;

/// Currencies a producto can be priced in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Moneda {
    Usd,
    Eur,
    Cop,
    Mxn,
}

impl Moneda {
    pub const ALL: [Moneda; 4] = [Moneda::Usd, Moneda::Eur, Moneda::Cop, Moneda::Mxn];

    pub fn as_str(self) -> &'static str {
        match self {
            Moneda::Usd => "USD",
            Moneda::Eur => "EUR",
            Moneda::Cop => "COP",
            Moneda::Mxn => "MXN",
        }
    }
}

impl ValueObject for Moneda {}

impl core::fmt::Display for Moneda {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Moneda {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Moneda::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation(format!("unsupported moneda: {s}")))
    }
}

/// Price in minor units (cents). Always positive.
///
/// Text form is a plain decimal with up to two fractional digits
/// (`"1500"`, `"12.5"`, `"12.50"`); `Display` always prints two.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Precio(u64);

impl Precio {
    pub fn from_minor(minor: u64) -> DomainResult<Self> {
        if minor == 0 {
            return Err(DomainError::validation("precio must be greater than zero"));
        }
        if minor > MAX_PRECIO_MINOR {
            return Err(DomainError::validation("precio exceeds the maximum amount"));
        }
        Ok(Self(minor))
    }

    pub fn minor_units(self) -> u64 {
        self.0
    }
}

impl ValueObject for Precio {}

impl core::fmt::Display for Precio {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Precio {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::validation(format!("invalid precio: {s}"));

        let (whole, fraction) = s.trim().split_once('.').unwrap_or((s.trim(), ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) || fraction.len() > 2 {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse::<u64>().map_err(|_| invalid())?,
        };

        let minor = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(cents))
            .ok_or_else(|| DomainError::validation("precio exceeds the maximum amount"))?;
        Self::from_minor(minor)
    }
}

impl TryFrom<String> for Precio {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Precio> for String {
    fn from(value: Precio) -> Self {
        value.to_string()
    }
}
