//! The multi-step survey flow engine.
//!
//! One [`SurveyFlow`] drives a linear, numbered sequence of question steps
//! for a given segment. It holds the in-progress answer set, validates the
//! current step's gated fields before allowing forward progress, and hands
//! the completed answer set to the submission service on the final step.
//!
//! The engine is generic: all three segment flows run through this one
//! type, parameterised by their [`SegmentSchema`].
//!
//! ## State machine
//!
//! States are {step 1..N} × {InProgress, Submitting, Submitted,
//! SubmissionFailed}. Initial state is step 1 / InProgress; Submitted is
//! terminal. SubmissionFailed keeps the flow on the last step with the
//! answers intact, so the user may retry without re-entering anything.
//!
//! ## Single-flight submission
//!
//! [`SurveyFlow::begin_submit`] hands out the answer set at most once per
//! attempt: while the resulting store call is pending the flow sits in
//! `Submitting` and rejects further `begin_submit` calls, preventing
//! duplicate records from rapid repeated activation. The caller reports
//! the outcome through [`SurveyFlow::complete_submit`], which releases the
//! guard.

use crate::error::{DiscoveryError, DiscoveryResult};
use crate::schema::{self, FieldError, FieldSpec, SegmentSchema, WidgetKind};
use sha_types::{AnswerSet, AnswerValue, ContactMethod, Segment};

/// One user edit to a field: a string value (option code or free text) or
/// a boolean consent flag. How a string value is applied depends on the
/// field's widget: multi-choice fields toggle membership; everything else
/// replaces.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Value(String),
    Flag(bool),
}

/// Submission lifecycle phase of a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    InProgress,
    Submitting,
    Submitted,
    SubmissionFailed,
}

/// A stateful, per-session survey flow.
#[derive(Debug, Clone)]
pub struct SurveyFlow {
    schema: &'static SegmentSchema,
    answers: AnswerSet,
    step: usize,
    phase: FlowPhase,
    errors: Vec<FieldError>,
    submit_error: Option<String>,
}

impl SurveyFlow {
    /// Starts a flow at step 1 with empty defaults for every field the
    /// segment's schema defines.
    pub fn new(segment: Segment) -> Self {
        let schema = SegmentSchema::for_segment(segment);
        let mut answers = AnswerSet::new(segment);
        for spec in schema.fields() {
            if spec.key.starts_with("contact.") {
                continue; // lives in the contact sub-record, default-initialised
            }
            let default = match spec.widget {
                WidgetKind::CheckboxGroup => AnswerValue::empty_multi(),
                WidgetKind::TextInput | WidgetKind::EmailInput | WidgetKind::TelInput => {
                    AnswerValue::empty_text()
                }
                _ => AnswerValue::empty_single(),
            };
            answers.insert(spec.key, default);
        }
        Self {
            schema,
            answers,
            step: 1,
            phase: FlowPhase::InProgress,
            errors: Vec::new(),
            submit_error: None,
        }
    }

    pub fn segment(&self) -> Segment {
        self.answers.segment()
    }

    pub fn schema(&self) -> &'static SegmentSchema {
        self.schema
    }

    /// Current 1-based step.
    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.schema.total_steps()
    }

    pub fn is_final_step(&self) -> bool {
        self.step == self.total_steps()
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    /// The in-progress answer set.
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Field errors surfaced by the last failed advance or submit.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Retryable message from the last failed submission, if any.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Fields rendered on the current step: consent-gated contact details
    /// are a derived view, visible only while a consent flag is set. The
    /// underlying values are never discarded by hiding them.
    pub fn visible_fields(&self) -> Vec<&'static FieldSpec> {
        let consent = self.answers.contact().has_consent();
        self.schema
            .step_fields(self.step)
            .filter(|spec| !spec.consent_gated || consent)
            .collect()
    }

    /// Overwrites one answer-set entry.
    ///
    /// Multi-choice fields treat a [`FieldInput::Value`] as a toggle:
    /// the code is added if absent and removed if present. `contact.*`
    /// keys route into the contact sub-record.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidInput`] for unknown keys or a
    /// value shape that does not fit the field, and the lifecycle errors
    /// when the flow is submitting or already submitted.
    pub fn set_field(&mut self, key: &str, input: FieldInput) -> DiscoveryResult<()> {
        self.ensure_editable()?;
        if let Some(contact_field) = key.strip_prefix("contact.") {
            return self.set_contact_field(key, contact_field, input);
        }

        let spec = self
            .schema
            .field(key)
            .ok_or_else(|| DiscoveryError::InvalidInput(format!("unknown field: '{key}'")))?;
        let value = match input {
            FieldInput::Value(value) => value,
            FieldInput::Flag(_) => {
                return Err(DiscoveryError::InvalidInput(format!(
                    "field '{key}' expects a string value"
                )));
            }
        };
        match spec.widget {
            WidgetKind::CheckboxGroup => self.answers.toggle_choice(key, &value),
            WidgetKind::RadioGroup | WidgetKind::StateSelect => self.answers.set_single(key, value),
            WidgetKind::TextInput | WidgetKind::EmailInput | WidgetKind::TelInput => {
                self.answers.set_text(key, value)
            }
            WidgetKind::ConsentCheckbox => {
                // Consent checkboxes only exist under contact.*.
                return Err(DiscoveryError::InvalidInput(format!(
                    "field '{key}' expects a flag"
                )));
            }
        }
        Ok(())
    }

    fn set_contact_field(
        &mut self,
        key: &str,
        contact_field: &str,
        input: FieldInput,
    ) -> DiscoveryResult<()> {
        let contact = self.answers.contact_mut();
        match (contact_field, input) {
            ("name", FieldInput::Value(v)) => contact.name = v,
            ("email", FieldInput::Value(v)) => contact.email = v,
            ("phone", FieldInput::Value(v)) => contact.phone = v,
            ("preferred_contact", FieldInput::Value(v)) => {
                contact.preferred_contact = if v.trim().is_empty() {
                    None
                } else {
                    Some(v.parse::<ContactMethod>().map_err(DiscoveryError::InvalidInput)?)
                };
            }
            ("availability", FieldInput::Value(v)) => contact.toggle_availability(&v),
            ("wants_updates", FieldInput::Flag(flag)) => contact.wants_updates = flag,
            ("wants_interview", FieldInput::Flag(flag)) => contact.wants_interview = flag,
            _ => {
                return Err(DiscoveryError::InvalidInput(format!(
                    "unknown or mismatched contact field: '{key}'"
                )));
            }
        }
        Ok(())
    }

    /// Validates the current step's gated fields and moves forward on
    /// success. Returns `true` if the step advanced; on failure the step
    /// is unchanged and [`SurveyFlow::errors`] holds the inline messages.
    pub fn advance(&mut self) -> bool {
        if !matches!(
            self.phase,
            FlowPhase::InProgress | FlowPhase::SubmissionFailed
        ) {
            return false;
        }
        self.errors =
            schema::validate_fields(self.schema, &self.answers, self.schema.step_keys(self.step));
        if !self.errors.is_empty() {
            return false;
        }
        self.step = (self.step + 1).min(self.total_steps());
        true
    }

    /// Moves back one step, clamped to step 1. Back navigation never
    /// validates and clears surfaced errors.
    pub fn retreat(&mut self) {
        if !matches!(
            self.phase,
            FlowPhase::InProgress | FlowPhase::SubmissionFailed
        ) {
            return;
        }
        self.step = self.step.saturating_sub(1).max(1);
        self.errors.clear();
    }

    /// Starts a submission attempt from the final step.
    ///
    /// Runs full-schema validation across all fields (not just the current
    /// step's) and, on success, transitions to `Submitting` and yields a
    /// copy of the complete answer set for the submission service. The
    /// caller must report the outcome via [`SurveyFlow::complete_submit`].
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::SubmissionInFlight`] while a prior attempt is
    ///   pending (the single-flight guard).
    /// - [`DiscoveryError::AlreadySubmitted`] in the terminal state.
    /// - [`DiscoveryError::NotOnFinalStep`] before the last step.
    /// - [`DiscoveryError::Validation`] with every accumulated field error.
    pub fn begin_submit(&mut self) -> DiscoveryResult<AnswerSet> {
        match self.phase {
            FlowPhase::Submitting => return Err(DiscoveryError::SubmissionInFlight),
            FlowPhase::Submitted => return Err(DiscoveryError::AlreadySubmitted),
            FlowPhase::InProgress | FlowPhase::SubmissionFailed => {}
        }
        if !self.is_final_step() {
            return Err(DiscoveryError::NotOnFinalStep);
        }
        self.errors = schema::validate_all(self.schema, &self.answers);
        if !self.errors.is_empty() {
            return Err(DiscoveryError::Validation(self.errors.clone()));
        }
        self.phase = FlowPhase::Submitting;
        self.submit_error = None;
        Ok(self.answers.clone())
    }

    /// Reports the outcome of the in-flight submission, releasing the
    /// single-flight guard. Success reaches the terminal `Submitted`
    /// state; failure returns the flow to the last step with a retryable
    /// error and the answer set intact.
    pub fn complete_submit(&mut self, outcome: Result<(), String>) {
        if self.phase != FlowPhase::Submitting {
            tracing::warn!("complete_submit called outside a submission attempt");
            return;
        }
        match outcome {
            Ok(()) => self.phase = FlowPhase::Submitted,
            Err(reason) => {
                self.phase = FlowPhase::SubmissionFailed;
                self.submit_error = Some(reason);
            }
        }
    }

    fn ensure_editable(&self) -> DiscoveryResult<()> {
        match self.phase {
            FlowPhase::Submitting => Err(DiscoveryError::SubmissionInFlight),
            FlowPhase::Submitted => Err(DiscoveryError::AlreadySubmitted),
            FlowPhase::InProgress | FlowPhase::SubmissionFailed => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(v: &str) -> FieldInput {
        FieldInput::Value(v.to_string())
    }

    /// Drives an hp flow through every question step up to the contact
    /// step, filling required fields along the way.
    fn complete_hp_flow() -> SurveyFlow {
        let mut flow = SurveyFlow::new(Segment::Hp);
        flow.set_field("professional_type", value("hairstylist")).unwrap();
        assert!(flow.advance());
        flow.set_field("years_experience", value("2_to_5")).unwrap();
        assert!(flow.advance());
        flow.set_field("scalp_condition_frequency", value("weekly")).unwrap();
        assert!(flow.advance());
        flow.set_field("current_action", value("mention_client")).unwrap();
        flow.set_field("current_action", value("recommend_doctor")).unwrap();
        assert!(flow.advance());
        flow.set_field("client_reaction", value("grateful")).unwrap();
        assert!(flow.advance());
        flow.set_field("referral_tool_interest", value("very_interested")).unwrap();
        assert!(flow.advance());
        flow.set_field("training_interest", value("somewhat_interested")).unwrap();
        assert!(flow.advance());
        flow.set_field("state", value("MA")).unwrap();
        assert!(flow.advance());
        assert!(flow.is_final_step());
        flow
    }

    #[test]
    fn starts_at_step_one_with_empty_defaults() {
        let flow = SurveyFlow::new(Segment::Hp);
        assert_eq!(flow.current_step(), 1);
        assert_eq!(flow.total_steps(), 9);
        assert_eq!(flow.phase(), FlowPhase::InProgress);
        assert!(flow.answers().entry_str("professional_type").unwrap().is_empty());
        assert!(flow.answers().entry_set("current_action").unwrap().is_empty());
        assert!(flow.answers().contact().is_empty());
    }

    #[test]
    fn advance_with_empty_required_field_blocks_with_one_error() {
        for segment in Segment::ALL {
            let mut flow = SurveyFlow::new(segment);
            assert!(!flow.advance());
            assert_eq!(flow.current_step(), 1);
            assert_eq!(flow.errors().len(), 1, "{segment}");
        }
    }

    #[test]
    fn completing_required_fields_reaches_the_final_step() {
        let flow = complete_hp_flow();
        assert_eq!(flow.current_step(), flow.total_steps());
        assert!(flow.errors().is_empty());
    }

    #[test]
    fn optional_steps_advance_unfilled() {
        let mut flow = SurveyFlow::new(Segment::Client);
        flow.set_field("has_experience", value("no")).unwrap();
        assert!(flow.advance());
        // Steps 2-4 are optional follow-ups.
        assert!(flow.advance());
        assert!(flow.advance());
        assert!(flow.advance());
        assert_eq!(flow.current_step(), 5);
    }

    #[test]
    fn retreat_is_unconditional_and_clamped() {
        let mut flow = SurveyFlow::new(Segment::Derm);
        flow.retreat();
        assert_eq!(flow.current_step(), 1);

        assert!(!flow.advance());
        assert!(!flow.errors().is_empty());
        flow.retreat();
        assert!(flow.errors().is_empty());
    }

    #[test]
    fn multi_choice_toggle_twice_restores_prior_state() {
        let mut flow = SurveyFlow::new(Segment::Hp);
        flow.set_field("current_action", value("take_photo")).unwrap();
        let before = flow.answers().clone();
        flow.set_field("current_action", value("nothing")).unwrap();
        flow.set_field("current_action", value("nothing")).unwrap();
        assert_eq!(flow.answers(), &before);
    }

    #[test]
    fn client_location_step_requires_state() {
        let mut flow = SurveyFlow::new(Segment::Client);
        flow.set_field("has_experience", value("yes_past")).unwrap();
        for _ in 0..4 {
            assert!(flow.advance());
        }
        flow.set_field("trust_hp_referral", value("very_trust")).unwrap();
        assert!(flow.advance());
        flow.set_field("willingness_to_pay", value("yes_reasonable")).unwrap();
        assert!(flow.advance());
        flow.set_field("photo_sharing_comfort", value("somewhat_comfortable")).unwrap();
        assert!(flow.advance());
        assert!(flow.advance());
        assert_eq!(flow.current_step(), 9); // location step

        assert!(!flow.advance());
        assert_eq!(flow.errors().len(), 1);
        assert_eq!(flow.errors()[0].key, "state");
        assert_eq!(flow.errors()[0].message, "Please select your state");

        flow.set_field("state", value("MA")).unwrap();
        assert!(flow.advance());
        assert!(flow.errors().is_empty());
        assert_eq!(flow.current_step(), 10);
    }

    #[test]
    fn consent_flag_derives_contact_visibility_without_discarding_values() {
        let mut flow = complete_hp_flow();
        let visible: Vec<_> = flow.visible_fields().iter().map(|f| f.key).collect();
        assert_eq!(visible, ["contact.wants_updates", "contact.wants_interview"]);

        flow.set_field("contact.wants_updates", FieldInput::Flag(true)).unwrap();
        flow.set_field("contact.name", value("Sam")).unwrap();
        flow.set_field("contact.email", value("sam@example.com")).unwrap();
        assert!(flow.visible_fields().iter().any(|f| f.key == "contact.email"));

        // Toggling consent off hides the details but keeps the input.
        flow.set_field("contact.wants_updates", FieldInput::Flag(false)).unwrap();
        assert!(!flow.visible_fields().iter().any(|f| f.key == "contact.email"));
        assert_eq!(flow.answers().contact().name, "Sam");
        assert_eq!(flow.answers().contact().email, "sam@example.com");
    }

    #[test]
    fn submit_only_from_final_step() {
        let mut flow = SurveyFlow::new(Segment::Hp);
        assert!(matches!(
            flow.begin_submit(),
            Err(DiscoveryError::NotOnFinalStep)
        ));
    }

    #[test]
    fn submit_runs_full_validation_not_just_current_step() {
        let mut flow = complete_hp_flow();
        // Break an earlier step's field, then try to submit from the end.
        flow.set_field("client_reaction", value("")).unwrap();
        let err = flow.begin_submit().expect_err("must fail validation");
        let errors = err.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key, "client_reaction");
        assert_eq!(flow.current_step(), flow.total_steps());
        assert_eq!(flow.phase(), FlowPhase::InProgress);
    }

    #[test]
    fn second_submit_while_pending_is_rejected() {
        let mut flow = complete_hp_flow();
        let _answers = flow.begin_submit().unwrap();
        assert_eq!(flow.phase(), FlowPhase::Submitting);
        assert!(matches!(
            flow.begin_submit(),
            Err(DiscoveryError::SubmissionInFlight)
        ));
        // Editing is blocked too while in flight.
        assert!(matches!(
            flow.set_field("contact.name", value("x")),
            Err(DiscoveryError::SubmissionInFlight)
        ));
    }

    #[test]
    fn failed_submission_keeps_answers_and_allows_retry() {
        let mut flow = complete_hp_flow();
        let before = flow.answers().clone();
        let _ = flow.begin_submit().unwrap();
        flow.complete_submit(Err("store unavailable".into()));

        assert_eq!(flow.phase(), FlowPhase::SubmissionFailed);
        assert_eq!(flow.submit_error(), Some("store unavailable"));
        assert_eq!(flow.answers(), &before);
        assert_eq!(flow.current_step(), flow.total_steps());

        // Retry succeeds without re-entering earlier steps.
        let answers = flow.begin_submit().unwrap();
        assert_eq!(&answers, &before);
        flow.complete_submit(Ok(()));
        assert_eq!(flow.phase(), FlowPhase::Submitted);
    }

    #[test]
    fn submitted_is_terminal() {
        let mut flow = complete_hp_flow();
        let _ = flow.begin_submit().unwrap();
        flow.complete_submit(Ok(()));
        assert!(matches!(
            flow.begin_submit(),
            Err(DiscoveryError::AlreadySubmitted)
        ));
        assert!(flow.set_field("contact.name", value("x")).is_err());
    }

    #[test]
    fn unknown_field_and_shape_mismatches_are_rejected() {
        let mut flow = SurveyFlow::new(Segment::Derm);
        assert!(flow.set_field("favourite_colour", value("blue")).is_err());
        assert!(flow
            .set_field("practice_type", FieldInput::Flag(true))
            .is_err());
        assert!(flow
            .set_field("contact.wants_updates", value("yes"))
            .is_err());
        assert!(flow
            .set_field("contact.preferred_contact", value("fax"))
            .is_err());
    }
}
