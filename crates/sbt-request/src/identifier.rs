use crate::SbtError;
use std::fmt;
use std::str::FromStr;

/// A user-supplied Farcaster ID. Not checked against any registry.
///
/// Held as normalized decimal digits so IDs of any size survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FarcasterId(String);

impl FarcasterId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for FarcasterId {
    type Err = SbtError;

    /// Accepts surrounding whitespace and leading zeros; rejects anything
    /// that is not a whole number of at least 1.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SbtError::InvalidIdentifier("empty".to_string()));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SbtError::InvalidIdentifier(format!(
                "{trimmed} is not a whole number"
            )));
        }
        match trimmed.trim_start_matches('0') {
            "" => Err(SbtError::InvalidIdentifier(format!("{trimmed} is below 1"))),
            digits => Ok(Self(digits.to_string())),
        }
    }
}

impl fmt::Display for FarcasterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loose check used while typing: any positive number counts.
pub(crate) fn is_positive_number(s: &str) -> bool {
    s.parse::<f64>()
        .map(|n| n.is_finite() && n > 0.0)
        .unwrap_or(false)
}
