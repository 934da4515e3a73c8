//! Audience segments.
//!
//! A segment is fixed when a survey flow starts and determines which
//! question set, validation schema, and accent styling apply.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing a segment tag.
#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    /// The input was not one of the known segment tags.
    #[error("unknown segment: '{0}' (expected one of: hp, derm, client)")]
    Unknown(String),
}

/// One of the three audience roles the site addresses.
///
/// Wire form is the short tag used in URLs and persisted records
/// (`hp`, `derm`, `client`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Hair professionals ("Community Observers").
    Hp,
    /// Dermatologists ("Clinical Anchors").
    Derm,
    /// Clients ("Care Seekers").
    Client,
}

/// Accent styling applied to a segment's pages and survey chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Gold,
    Teal,
    Coral,
}

impl Segment {
    /// All segments, in home-page card order.
    pub const ALL: [Segment; 3] = [Segment::Hp, Segment::Derm, Segment::Client];

    /// The canonical wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Hp => "hp",
            Segment::Derm => "derm",
            Segment::Client => "client",
        }
    }

    /// Display title used on cards and survey headers.
    pub fn title(&self) -> &'static str {
        match self {
            Segment::Hp => "Hair Professionals",
            Segment::Derm => "Dermatologists",
            Segment::Client => "Clients",
        }
    }

    /// Role subtitle shown under the title.
    pub fn subtitle(&self) -> &'static str {
        match self {
            Segment::Hp => "Community Observers",
            Segment::Derm => "Clinical Anchors",
            Segment::Client => "Care Seekers",
        }
    }

    /// Accent colour for this segment's pages.
    pub fn accent(&self) -> Accent {
        match self {
            Segment::Hp => Accent::Gold,
            Segment::Derm => Accent::Teal,
            Segment::Client => Accent::Coral,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Segment {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hp" => Ok(Segment::Hp),
            "derm" => Ok(Segment::Derm),
            "client" => Ok(Segment::Client),
            other => Err(SegmentError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags() {
        assert_eq!("hp".parse::<Segment>().unwrap(), Segment::Hp);
        assert_eq!("derm".parse::<Segment>().unwrap(), Segment::Derm);
        assert_eq!("client".parse::<Segment>().unwrap(), Segment::Client);
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = "doctor".parse::<Segment>().expect_err("should reject");
        assert!(matches!(err, SegmentError::Unknown(tag) if tag == "doctor"));
    }

    #[test]
    fn wire_form_is_the_short_tag() {
        let json = serde_json::to_string(&Segment::Client).unwrap();
        assert_eq!(json, "\"client\"");
        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Segment::Client);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for segment in Segment::ALL {
            assert_eq!(segment.to_string().parse::<Segment>().unwrap(), segment);
        }
    }
}
