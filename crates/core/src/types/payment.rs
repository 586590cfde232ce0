//! Payment modes accepted at the till.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the buyer settles the sale.
///
/// Serialized lowercase on the wire (`"cash"`, `"card"`, `"upi"`), matching
/// what the sales backend records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    Cash,
    Card,
    Upi,
}

impl PaymentMode {
    /// Wire/display form of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Upi => "upi",
        }
    }
}

impl core::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a payment mode from user input.
#[derive(Debug, Error)]
#[error("unknown payment mode: {0}")]
pub struct ParsePaymentModeError(String);

impl core::str::FromStr for PaymentMode {
    type Err = ParsePaymentModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            other => Err(ParsePaymentModeError(other.to_string())),
        }
    }
}
