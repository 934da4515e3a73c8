//! The persisted discovery record.
//!
//! One record is created per submission event: either a completed survey
//! or a landing-page interview-interest sign-up. Records are written once
//! by the submission service and never read back, updated, or deleted by
//! this system; read access belongs to an external administrative surface.

use crate::{ContactMethod, Segment, StateCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// How a record was produced.
///
/// `Both` is set iff a full survey submission carried an explicit
/// interview-interest flag; `InterviewOnly` is reserved for the reduced
/// landing-page path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    Survey,
    InterviewOnly,
    Both,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Survey => "survey",
            SourceTag::InterviewOnly => "interview_only",
            SourceTag::Both => "both",
        }
    }
}

/// The durable outcome of one submission.
///
/// `responses` is the opaque response bag: every answer except the
/// contact, location, and consent fields, keyed by question key. Its keys
/// are always a subset of the segment's defined question keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub segment: Segment,
    pub responses: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_contact: Option<ContactMethod>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub availability: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<StateCode>,
    pub wants_updates: bool,
    pub wants_interview: bool,
    pub source: SourceTag,
}

impl DiscoveryRecord {
    /// Allocates a fresh record shell for the given segment and source,
    /// stamped with a new id and the current time. The submission service
    /// fills in the remaining fields before the single insert.
    pub fn new(segment: Segment, source: SourceTag) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            segment,
            responses: serde_json::Map::new(),
            contact_name: None,
            contact_email: None,
            contact_phone: None,
            preferred_contact: None,
            availability: BTreeSet::new(),
            zip_code: None,
            state: None,
            wants_updates: false,
            wants_interview: false,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_tag_wire_form() {
        assert_eq!(
            serde_json::to_string(&SourceTag::InterviewOnly).unwrap(),
            "\"interview_only\""
        );
        assert_eq!(SourceTag::Both.as_str(), "both");
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let record = DiscoveryRecord::new(Segment::Derm, SourceTag::Survey);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("contact_email").is_none());
        assert!(json.get("availability").is_none());
        assert_eq!(json["segment"], "derm");
        assert_eq!(json["source"], "survey");
        assert_eq!(json["wants_interview"], false);
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut record = DiscoveryRecord::new(Segment::Hp, SourceTag::Both);
        record.contact_email = Some("pro@example.com".into());
        record.state = Some(StateCode::parse("MA").unwrap());
        record
            .responses
            .insert("years_experience".into(), "2_to_5".into());
        let json = serde_json::to_string(&record).unwrap();
        let back: DiscoveryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
