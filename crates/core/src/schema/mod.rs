//! Declarative per-segment survey schemas.
//!
//! The three discovery flows share one engine; everything that differs
//! between them lives here as data: the ordered steps, the fields each
//! step gates, each field's widget, options, and validation rule.
//!
//! Validation is a single pure function over a whole answer set
//! ([`validate_all`]); the per-step gate used by the flow engine is the
//! same function filtered to the gated keys ([`validate_fields`]), so
//! step-level and submit-level validation cannot diverge.

mod client;
mod derm;
mod hp;

use serde::Serialize;
use sha_types::{AnswerSet, Segment, StateCode, validate_zip_code};

/// One selectable option of a choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub code: &'static str,
    pub label: &'static str,
}

/// Presentational input control a field renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    RadioGroup,
    CheckboxGroup,
    TextInput,
    EmailInput,
    TelInput,
    StateSelect,
    ConsentCheckbox,
}

impl WidgetKind {
    /// The snake_case wire tag, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::RadioGroup => "radio_group",
            WidgetKind::CheckboxGroup => "checkbox_group",
            WidgetKind::TextInput => "text_input",
            WidgetKind::EmailInput => "email_input",
            WidgetKind::TelInput => "tel_input",
            WidgetKind::StateSelect => "state_select",
            WidgetKind::ConsentCheckbox => "consent_checkbox",
        }
    }
}

/// Validation rule attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// A single option code must be selected.
    RequiredSingle,
    /// At least `min` option codes must be selected.
    RequiredMulti { min: usize },
    OptionalSingle,
    OptionalMulti,
    /// State must be selected and must be a valid [`StateCode`].
    RequiredState,
    /// Zip code is optional but bounded by the soft length cap.
    OptionalZip,
    /// Email must be well-formed when present, and becomes mandatory when
    /// either consent flag is set.
    ContactEmail,
    /// No validation (consent checkboxes, optional contact details).
    Unchecked,
}

/// One survey field: key, display copy, widget, options, and rule.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub prompt: &'static str,
    pub description: Option<&'static str>,
    pub widget: WidgetKind,
    pub options: &'static [Choice],
    pub rule: FieldRule,
    /// Inline error shown when the rule fails.
    pub message: &'static str,
    /// Rendered only once a consent flag is set (contact details).
    pub consent_gated: bool,
}

impl FieldSpec {
    pub fn is_required(&self) -> bool {
        matches!(
            self.rule,
            FieldRule::RequiredSingle | FieldRule::RequiredMulti { .. } | FieldRule::RequiredState
        )
    }
}

/// A field-level validation failure, attributable to one named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub key: String,
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(key: &str, message: &str) -> Self {
        Self {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

/// The full descriptor of one segment's survey.
#[derive(Debug, Clone, Copy)]
pub struct SegmentSchema {
    pub segment: Segment,
    /// Survey header title, e.g. "Hair Professional Discovery Survey".
    pub title: &'static str,
    field_groups: &'static [&'static [FieldSpec]],
    /// Gated field keys per step, in step order (1-based externally).
    steps: &'static [&'static [&'static str]],
}

impl SegmentSchema {
    /// The schema for a segment.
    pub fn for_segment(segment: Segment) -> &'static SegmentSchema {
        match segment {
            Segment::Hp => &hp::SCHEMA,
            Segment::Derm => &derm::SCHEMA,
            Segment::Client => &client::SCHEMA,
        }
    }

    /// All fields in schema (and therefore error) order.
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        self.field_groups.iter().flat_map(|group| group.iter())
    }

    /// Looks up one field by key.
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields().find(|spec| spec.key == key)
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Keys gated at the given 1-based step. Out-of-range steps gate
    /// nothing.
    pub fn step_keys(&self, step: usize) -> &'static [&'static str] {
        self.steps.get(step.wrapping_sub(1)).copied().unwrap_or(&[])
    }

    /// Field specs rendered at the given 1-based step.
    pub fn step_fields(&self, step: usize) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        self.step_keys(step)
            .iter()
            .filter_map(move |key| self.field(key))
    }
}

/// Time windows offered for interview availability.
pub const AVAILABILITY_WINDOWS: &[Choice] = &[
    Choice { code: "weekday_mornings", label: "Weekday mornings" },
    Choice { code: "weekday_afternoons", label: "Weekday afternoons" },
    Choice { code: "weekday_evenings", label: "Weekday evenings" },
    Choice { code: "weekends", label: "Weekends" },
];

/// Preferred contact method options.
pub const CONTACT_METHOD_OPTIONS: &[Choice] = &[
    Choice { code: "email", label: "Email" },
    Choice { code: "phone", label: "Phone call" },
    Choice { code: "text", label: "Text message" },
];

/// Location step fields, shared across all segments. State is mandatory
/// for full survey submissions; zip code is always optional. The state
/// select carries no inline options; renderers source the codes from
/// [`sha_types::STATE_CODES`].
pub(crate) const LOCATION_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "state",
        prompt: "Which state are you in?",
        description: None,
        widget: WidgetKind::StateSelect,
        options: &[],
        rule: FieldRule::RequiredState,
        message: "Please select your state",
        consent_gated: false,
    },
    FieldSpec {
        key: "zip_code",
        prompt: "ZIP code (optional)",
        description: Some("Helps us understand where to launch first"),
        widget: WidgetKind::TextInput,
        options: &[],
        rule: FieldRule::OptionalZip,
        message: "ZIP code is too long",
        consent_gated: false,
    },
];

/// Contact step fields, shared across all segments. The consent
/// checkboxes are always visible; the detail sub-fields only render once
/// a consent flag is set, and keep their values when it is toggled off.
pub(crate) const CONTACT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "contact.wants_updates",
        prompt: "Yes, send me updates about SHA launch and early access",
        description: None,
        widget: WidgetKind::ConsentCheckbox,
        options: &[],
        rule: FieldRule::Unchecked,
        message: "",
        consent_gated: false,
    },
    FieldSpec {
        key: "contact.wants_interview",
        prompt: "I'm interested in a 15-minute interview",
        description: None,
        widget: WidgetKind::ConsentCheckbox,
        options: &[],
        rule: FieldRule::Unchecked,
        message: "",
        consent_gated: false,
    },
    FieldSpec {
        key: "contact.name",
        prompt: "Name",
        description: None,
        widget: WidgetKind::TextInput,
        options: &[],
        rule: FieldRule::Unchecked,
        message: "",
        consent_gated: true,
    },
    FieldSpec {
        key: "contact.email",
        prompt: "Email",
        description: None,
        widget: WidgetKind::EmailInput,
        options: &[],
        rule: FieldRule::ContactEmail,
        message: "Please enter your email so we can reach you",
        consent_gated: true,
    },
    FieldSpec {
        key: "contact.phone",
        prompt: "Phone (optional)",
        description: None,
        widget: WidgetKind::TelInput,
        options: &[],
        rule: FieldRule::Unchecked,
        message: "",
        consent_gated: true,
    },
    FieldSpec {
        key: "contact.preferred_contact",
        prompt: "Preferred contact method",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: CONTACT_METHOD_OPTIONS,
        rule: FieldRule::Unchecked,
        message: "",
        consent_gated: true,
    },
    FieldSpec {
        key: "contact.availability",
        prompt: "Best times to reach you",
        description: None,
        widget: WidgetKind::CheckboxGroup,
        options: AVAILABILITY_WINDOWS,
        rule: FieldRule::Unchecked,
        message: "",
        consent_gated: true,
    },
];

pub(crate) const LOCATION_STEP: &[&str] = &["state", "zip_code"];
pub(crate) const CONTACT_STEP: &[&str] = &[
    "contact.wants_updates",
    "contact.wants_interview",
    "contact.name",
    "contact.email",
    "contact.phone",
    "contact.preferred_contact",
    "contact.availability",
];

/// Runs the full rule set against a candidate answer set and returns the
/// field-level errors, in schema order. Empty means valid.
pub fn validate_all(schema: &SegmentSchema, answers: &AnswerSet) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for spec in schema.fields() {
        if let Some(error) = validate_field(spec, answers) {
            errors.push(error);
        }
    }
    errors
}

/// Validates only the named fields. By construction this is exactly
/// [`validate_all`] filtered to `keys`, so the per-step gate and the
/// final-submit check share one rule set.
pub fn validate_fields(
    schema: &SegmentSchema,
    answers: &AnswerSet,
    keys: &[&str],
) -> Vec<FieldError> {
    validate_all(schema, answers)
        .into_iter()
        .filter(|error| keys.contains(&error.key.as_str()))
        .collect()
}

fn validate_field(spec: &FieldSpec, answers: &AnswerSet) -> Option<FieldError> {
    match spec.rule {
        FieldRule::RequiredSingle => {
            let blank = answers
                .entry_str(spec.key)
                .map(|s| s.trim().is_empty())
                .unwrap_or(true);
            blank.then(|| FieldError::new(spec.key, spec.message))
        }
        FieldRule::RequiredMulti { min } => {
            let count = answers.entry_set(spec.key).map(|s| s.len()).unwrap_or(0);
            (count < min).then(|| FieldError::new(spec.key, spec.message))
        }
        FieldRule::RequiredState => match answers.entry_str(spec.key) {
            None => Some(FieldError::new(spec.key, spec.message)),
            Some(code) if code.trim().is_empty() => Some(FieldError::new(spec.key, spec.message)),
            Some(code) => StateCode::parse(code)
                .is_err()
                .then(|| FieldError::new(spec.key, "Please select a valid state")),
        },
        FieldRule::OptionalZip => {
            let zip = answers.entry_str(spec.key).unwrap_or("");
            validate_zip_code(zip)
                .is_err()
                .then(|| FieldError::new(spec.key, spec.message))
        }
        FieldRule::ContactEmail => {
            let contact = answers.contact();
            let email = contact.email.trim();
            if email.is_empty() {
                return contact
                    .has_consent()
                    .then(|| FieldError::new(spec.key, spec.message));
            }
            (!looks_like_email(email))
                .then(|| FieldError::new(spec.key, "Please enter a valid email address"))
        }
        FieldRule::OptionalSingle | FieldRule::OptionalMulti | FieldRule::Unchecked => None,
    }
}

/// Minimal well-formedness check: one `@` with a non-empty local part and
/// a dotted, whitespace-free domain.
pub(crate) fn looks_like_email(input: &str) -> bool {
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains(char::is_whitespace)
        && !domain.contains('@')
}
