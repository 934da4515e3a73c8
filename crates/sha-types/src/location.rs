//! Location fields collected on the survey location step and the
//! landing-page interview form.
//!
//! State is a required single choice from a fixed enumeration of US states
//! and territories plus `outside_us`; zip code is free text with a soft
//! length cap and is always optional.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Soft cap on zip code length, matching the form input's limit.
pub const ZIP_CODE_MAX_LEN: usize = 10;

/// Errors for location field construction.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("unknown state code: '{0}'")]
    UnknownState(String),
    #[error("zip code exceeds maximum length of {ZIP_CODE_MAX_LEN} characters")]
    ZipTooLong,
}

/// Accepted state codes: the 50 states, DC, and an explicit
/// "outside the US" option.
pub const STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY", "outside_us",
];

/// A validated state selection.
///
/// Once constructed, the contained code is guaranteed to be a member of
/// [`STATE_CODES`]. Construct with [`StateCode::parse`]; deserialization
/// applies the same validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCode(&'static str);

impl StateCode {
    /// Validates an externally supplied state code.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::UnknownState`] if the input is not one of
    /// the accepted codes. Matching is exact; no case normalisation.
    pub fn parse(input: &str) -> Result<Self, LocationError> {
        STATE_CODES
            .iter()
            .find(|code| **code == input)
            .map(|code| Self(code))
            .ok_or_else(|| LocationError::UnknownState(input.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// True for the explicit outside-US option.
    pub fn is_outside_us(&self) -> bool {
        self.0 == "outside_us"
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for StateCode {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl Serialize for StateCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for StateCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        StateCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Checks a zip code against the soft length cap.
///
/// Contents are deliberately unconstrained (international visitors may
/// enter postal codes); only the length is bounded.
///
/// # Errors
///
/// Returns [`LocationError::ZipTooLong`] if the trimmed input exceeds
/// [`ZIP_CODE_MAX_LEN`] characters.
pub fn validate_zip_code(zip: &str) -> Result<(), LocationError> {
    if zip.trim().chars().count() > ZIP_CODE_MAX_LEN {
        return Err(LocationError::ZipTooLong);
    }
    Ok(())
}
