//! Request and response bodies for the survey session and submission
//! endpoints.
//!
//! Domain enums from `sha-types` keep their serde wire forms here; the
//! `value_type = String` schema overrides exist only so the OpenAPI
//! document stays accurate without `sha-types` depending on `utoipa`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sha_types::Segment;
use utoipa::ToSchema;

/// Body for `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StartSessionReq {
    #[schema(value_type = String, example = "hp")]
    pub segment: Segment,
}

/// One field edit: option codes and free text arrive as strings, consent
/// checkboxes as booleans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

/// Body for `POST /sessions/{id}/fields`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetFieldReq {
    #[schema(example = "professional_type")]
    pub key: String,
    pub value: FieldValue,
}

/// One selectable option of a choice field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChoiceDto {
    pub code: String,
    pub label: String,
}

/// One renderable field on the current step.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionBlockDto {
    pub key: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    /// Widget kind, e.g. `radio_group`, `checkbox_group`, `state_select`.
    pub widget: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<ChoiceDto>,
    /// Current value: a string, a string array, or a boolean depending on
    /// the widget.
    #[schema(value_type = Object)]
    pub value: serde_json::Value,
}

/// An inline validation message attributed to one field key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorDto {
    pub key: String,
    pub message: String,
}

/// Snapshot of a survey session after any session operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StepViewRes {
    #[schema(value_type = String)]
    pub session_id: uuid::Uuid,
    #[schema(value_type = String, example = "derm")]
    pub segment: Segment,
    /// Survey header title.
    pub title: String,
    /// Current 1-based step.
    pub step: usize,
    pub total_steps: usize,
    /// Progress, rounded to whole percent.
    pub percent: u8,
    pub blocks: Vec<QuestionBlockDto>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<FieldErrorDto>,
    /// Retryable message from a failed submission attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_error: Option<String>,
}

/// Response for a successful submission, survey or interview-interest.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitRes {
    #[schema(value_type = String)]
    pub id: uuid::Uuid,
    /// Record source: `survey`, `interview_only`, or `both`.
    pub source: String,
    /// Thank-you page path the client should navigate to.
    #[schema(example = "/thank-you?segment=hp")]
    pub redirect: String,
}

/// Contact block of a direct survey submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ContactDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub preferred_contact: Option<String>,
    #[serde(default)]
    pub availability: BTreeSet<String>,
    #[serde(default)]
    pub wants_updates: bool,
    #[serde(default)]
    pub wants_interview: bool,
}

/// Body for `POST /surveys`: a complete survey in one request, for
/// clients that collect all answers before talking to the server.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitSurveyReq {
    #[schema(value_type = String, example = "client")]
    pub segment: Segment,
    /// Question answers keyed by question key: strings for single-choice
    /// and text fields, string arrays for multi-choice fields.
    #[schema(value_type = Object)]
    pub responses: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub contact: ContactDto,
}

/// Body for `POST /interview-interest`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InterviewInterestReq {
    #[schema(value_type = String, example = "derm")]
    pub segment: Segment,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub availability: BTreeSet<String>,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub details: Vec<FieldErrorDto>,
}

impl ErrorRes {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<FieldErrorDto>) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_is_untagged() {
        let flag: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(flag, FieldValue::Flag(true));
        let text: FieldValue = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(text, FieldValue::Text("weekly".into()));
    }

    #[test]
    fn interview_request_defaults_optional_fields() {
        let req: InterviewInterestReq =
            serde_json::from_str(r#"{"segment":"derm","name":"A","email":"a@b.example"}"#).unwrap();
        assert_eq!(req.segment, Segment::Derm);
        assert!(req.phone.is_none());
        assert!(req.availability.is_empty());
    }

    #[test]
    fn error_body_omits_empty_details() {
        let json = serde_json::to_value(ErrorRes::message("nope")).unwrap();
        assert!(json.get("details").is_none());
    }
}
