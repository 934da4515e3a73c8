//! Turning validated answer sets into persisted discovery records.
//!
//! The service assumes its survey input has already passed full-schema
//! validation inside the flow engine; it never re-validates question
//! answers. The reduced landing-page interview path has no flow in front
//! of it, so that entry point carries its own field checks.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;
use sha_types::{
    AnswerSet, AnswerValue, ContactInfo, DiscoveryRecord, Segment, SourceTag, StateCode,
    validate_zip_code,
};

use crate::error::{DiscoveryError, DiscoveryResult};
use crate::schema::{self, FieldError};

/// Answer keys lifted out of the response bag into dedicated record
/// columns.
const RESERVED_KEYS: &[&str] = &["state", "zip_code"];

/// Input to the landing-page interview-interest path. Name and email are
/// required; everything else is optional.
#[derive(Debug, Clone, Default)]
pub struct InterviewSignup {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub zip_code: Option<String>,
    pub availability: BTreeSet<String>,
}

/// Assembles and persists discovery records through a [`RecordStore`].
///
/// [`RecordStore`]: crate::store::RecordStore
#[derive(Clone)]
pub struct SubmissionService {
    store: Arc<dyn crate::store::RecordStore>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn crate::store::RecordStore>) -> Self {
        Self { store }
    }

    /// Persists a completed survey.
    ///
    /// Builds one [`DiscoveryRecord`] from the answer set: location and
    /// contact answers become dedicated columns, all remaining answers go
    /// into the opaque response bag verbatim. Empty contact strings are
    /// recorded as absent. The source tag is `both` when the respondent
    /// flagged interview interest, otherwise `survey`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Store`] if the single insert fails; no
    /// partial record is retained in that case.
    pub fn submit_survey(&self, answers: &AnswerSet) -> DiscoveryResult<DiscoveryRecord> {
        let contact = answers.contact();
        let source = if contact.wants_interview {
            SourceTag::Both
        } else {
            SourceTag::Survey
        };
        let mut record = DiscoveryRecord::new(answers.segment(), source);

        for (key, value) in answers.values() {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            record.responses.insert(key.clone(), bag_value(value));
        }
        // Validated upstream; an unparseable state can only mean the flow
        // was bypassed.
        record.state = match answers.entry_str("state") {
            Some(code) if !code.trim().is_empty() => Some(
                StateCode::parse(code)
                    .map_err(|e| DiscoveryError::InvalidInput(e.to_string()))?,
            ),
            _ => None,
        };
        record.zip_code = answers
            .entry_str("zip_code")
            .map(str::trim)
            .filter(|z| !z.is_empty())
            .map(str::to_string);
        fill_contact(&mut record, contact);

        self.store.insert(&record)?;
        Ok(record)
    }

    /// Persists a landing-page interview-interest sign-up.
    ///
    /// This path bypasses the survey flow, so the required fields are
    /// checked here: name and email must be present, the email must look
    /// like an address, and the zip code is bounded. The record carries an
    /// empty response bag, both consent flags set, and source
    /// `interview_only`.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::Validation`] with per-field messages, or
    /// [`DiscoveryError::Store`] if the insert fails.
    pub fn submit_interview_interest(
        &self,
        segment: Segment,
        signup: &InterviewSignup,
    ) -> DiscoveryResult<DiscoveryRecord> {
        let mut errors = Vec::new();
        if signup.name.trim().is_empty() {
            errors.push(FieldError::new("name", "Please enter your name"));
        }
        let email = signup.email.trim();
        if email.is_empty() {
            errors.push(FieldError::new("email", "Please enter your email"));
        } else if !schema::looks_like_email(email) {
            errors.push(FieldError::new(
                "email",
                "Please enter a valid email address",
            ));
        }
        if let Some(zip) = &signup.zip_code {
            if validate_zip_code(zip).is_err() {
                errors.push(FieldError::new("zip_code", "ZIP code is too long"));
            }
        }
        if !errors.is_empty() {
            return Err(DiscoveryError::Validation(errors));
        }

        let mut record = DiscoveryRecord::new(segment, SourceTag::InterviewOnly);
        record.contact_name = Some(signup.name.trim().to_string());
        record.contact_email = Some(email.to_string());
        record.contact_phone = signup
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        record.zip_code = signup
            .zip_code
            .as_deref()
            .map(str::trim)
            .filter(|z| !z.is_empty())
            .map(str::to_string);
        record.availability = signup.availability.clone();
        record.wants_updates = true;
        record.wants_interview = true;

        self.store.insert(&record)?;
        Ok(record)
    }
}

/// Answer representation in the response bag: multi-choice answers become
/// JSON arrays, everything else a plain string.
fn bag_value(value: &AnswerValue) -> Value {
    match value {
        AnswerValue::Multi(set) => Value::Array(
            set.iter().map(|code| Value::String(code.clone())).collect(),
        ),
        AnswerValue::Single(s) | AnswerValue::Text(s) => Value::String(s.clone()),
    }
}

fn fill_contact(record: &mut DiscoveryRecord, contact: &ContactInfo) {
    let non_empty = |s: &str| {
        let t = s.trim();
        (!t.is_empty()).then(|| t.to_string())
    };
    record.contact_name = non_empty(&contact.name);
    record.contact_email = non_empty(&contact.email);
    record.contact_phone = non_empty(&contact.phone);
    record.preferred_contact = contact.preferred_contact;
    record.availability = contact.availability.clone();
    record.wants_updates = contact.wants_updates;
    record.wants_interview = contact.wants_interview;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{FieldInput, SurveyFlow};
    use crate::store::{FailingStore, MemoryStore};

    fn service() -> (Arc<MemoryStore>, SubmissionService) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), SubmissionService::new(store))
    }

    fn hp_answers() -> AnswerSet {
        let mut flow = SurveyFlow::new(Segment::Hp);
        let set = |flow: &mut SurveyFlow, key: &str, v: &str| {
            flow.set_field(key, FieldInput::Value(v.to_string())).unwrap()
        };
        set(&mut flow, "professional_type", "hairstylist");
        set(&mut flow, "years_experience", "2_to_5");
        set(&mut flow, "scalp_condition_frequency", "weekly");
        set(&mut flow, "current_action", "mention_client");
        set(&mut flow, "current_action", "recommend_doctor");
        set(&mut flow, "client_reaction", "grateful");
        set(&mut flow, "referral_tool_interest", "very_interested");
        set(&mut flow, "training_interest", "somewhat_interested");
        set(&mut flow, "state", "MA");
        set(&mut flow, "zip_code", "02101");
        flow.answers().clone()
    }

    #[test]
    fn survey_without_contact_is_tagged_survey() {
        let (store, service) = service();
        let record = service.submit_survey(&hp_answers()).unwrap();

        assert_eq!(record.segment, Segment::Hp);
        assert_eq!(record.source, SourceTag::Survey);
        assert!(!record.wants_updates);
        assert!(!record.wants_interview);
        assert_eq!(record.contact_name, None);
        assert_eq!(record.state.as_ref().unwrap().as_str(), "MA");
        assert_eq!(record.zip_code.as_deref(), Some("02101"));

        assert_eq!(record.responses["years_experience"], "2_to_5");
        assert_eq!(
            record.responses["current_action"],
            serde_json::json!(["mention_client", "recommend_doctor"])
        );
        // Location fields are columns, not bag entries.
        assert!(!record.responses.contains_key("state"));
        assert!(!record.responses.contains_key("zip_code"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0], record);
    }

    #[test]
    fn interview_interest_flag_tags_the_record_both() {
        let (_, service) = service();
        let mut answers = hp_answers();
        let contact = answers.contact_mut();
        contact.wants_interview = true;
        contact.name = "Sam Rivera".into();
        contact.email = "sam@example.com".into();
        contact.toggle_availability("weekday_evenings");

        let record = service.submit_survey(&answers).unwrap();
        assert_eq!(record.source, SourceTag::Both);
        assert_eq!(record.contact_email.as_deref(), Some("sam@example.com"));
        assert!(record.availability.contains("weekday_evenings"));
    }

    #[test]
    fn empty_contact_strings_become_absent_columns() {
        let (_, service) = service();
        let mut answers = hp_answers();
        answers.contact_mut().name = "   ".into();
        let record = service.submit_survey(&answers).unwrap();
        assert_eq!(record.contact_name, None);
    }

    #[test]
    fn store_failure_surfaces_and_keeps_nothing() {
        let service = SubmissionService::new(Arc::new(FailingStore));
        let answers = hp_answers();
        let err = service.submit_survey(&answers).unwrap_err();
        assert!(matches!(err, DiscoveryError::Store(_)));
        // The caller's answers survive for a retry.
        assert_eq!(answers.entry_str("professional_type"), Some("hairstylist"));
    }

    #[test]
    fn interview_only_record_has_empty_bag_and_both_flags() {
        let (store, service) = service();
        let signup = InterviewSignup {
            name: "Dr. Okafor".into(),
            email: "okafor@clinic.example".into(),
            phone: Some("555-0100".into()),
            zip_code: Some("02139".into()),
            availability: ["weekday_mornings".to_string()].into(),
        };
        let record = service
            .submit_interview_interest(Segment::Derm, &signup)
            .unwrap();

        assert_eq!(record.source, SourceTag::InterviewOnly);
        assert!(record.responses.is_empty());
        assert!(record.wants_updates);
        assert!(record.wants_interview);
        assert_eq!(record.contact_phone.as_deref(), Some("555-0100"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn interview_signup_requires_name_and_valid_email() {
        let (store, service) = service();
        let signup = InterviewSignup {
            name: "".into(),
            email: "not-an-email".into(),
            ..InterviewSignup::default()
        };
        let err = service
            .submit_interview_interest(Segment::Client, &signup)
            .unwrap_err();
        let errors = err.field_errors();
        let keys: Vec<_> = errors.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["name", "email"]);
        assert!(store.is_empty());
    }

    #[test]
    fn interview_signup_zip_cap() {
        let (_, service) = service();
        let signup = InterviewSignup {
            name: "A".into(),
            email: "a@b.example".into(),
            zip_code: Some("12345-678901".into()),
            ..InterviewSignup::default()
        };
        let err = service
            .submit_interview_interest(Segment::Hp, &signup)
            .unwrap_err();
        assert_eq!(err.field_errors()[0].key, "zip_code");
    }
}
