//! The optional contact sub-record collected on the final survey step and
//! by the landing-page interview form.
//!
//! Every field is optional by itself; which combinations are acceptable is
//! decided by the segment schemas in `sha-core`, not here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// How a respondent prefers to be contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    Email,
    Phone,
    Text,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Phone => "phone",
            ContactMethod::Text => "text",
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(ContactMethod::Email),
            "phone" => Ok(ContactMethod::Phone),
            "text" => Ok(ContactMethod::Text),
            other => Err(format!("unknown contact method: '{other}'")),
        }
    }
}

/// Contact details and consent flags for one respondent.
///
/// Availability holds time-window codes (e.g. `weekday_mornings`), kept as
/// a set because selection order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub preferred_contact: Option<ContactMethod>,
    #[serde(default)]
    pub availability: BTreeSet<String>,
    #[serde(default)]
    pub wants_updates: bool,
    #[serde(default)]
    pub wants_interview: bool,
}

impl ContactInfo {
    /// True if no detail field carries a value and both consent flags are off.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.email.trim().is_empty()
            && self.phone.trim().is_empty()
            && self.preferred_contact.is_none()
            && self.availability.is_empty()
            && !self.wants_updates
            && !self.wants_interview
    }

    /// True if either consent flag is set. The contact detail sub-fields are
    /// only shown (and email only required) once the respondent opts in.
    pub fn has_consent(&self) -> bool {
        self.wants_updates || self.wants_interview
    }

    /// Toggle one availability window: add if absent, remove if present.
    pub fn toggle_availability(&mut self, window: &str) {
        if !self.availability.remove(window) {
            self.availability.insert(window.to_string());
        }
    }
}
