//! Client ("Care Seekers") survey descriptor.
//!
//! Several questions here are deliberately optional: people who have
//! never had a scalp concern cannot answer the follow-ups about it.

use super::{
    CONTACT_FIELDS, CONTACT_STEP, Choice, FieldRule, FieldSpec, LOCATION_FIELDS, LOCATION_STEP,
    SegmentSchema, WidgetKind,
};
use sha_types::Segment;

const HAS_EXPERIENCE_OPTIONS: &[Choice] = &[
    Choice { code: "yes_current", label: "Yes, currently dealing with one" },
    Choice { code: "yes_past", label: "Yes, in the past" },
    Choice { code: "no", label: "No, never" },
    Choice { code: "unsure", label: "Not sure" },
];

const CONDITION_TYPE_OPTIONS: &[Choice] = &[
    Choice { code: "dandruff", label: "Dandruff / Flaking" },
    Choice { code: "hair_loss", label: "Hair loss / Thinning" },
    Choice { code: "itching", label: "Itching / Irritation" },
    Choice { code: "redness", label: "Redness / Inflammation" },
    Choice { code: "bumps", label: "Bumps / Lesions" },
    Choice { code: "dryness", label: "Dryness" },
    Choice { code: "other", label: "Other" },
];

const PREVIOUS_ACTION_OPTIONS: &[Choice] = &[
    Choice { code: "doctor", label: "Saw a dermatologist" },
    Choice { code: "primary", label: "Saw a primary care doctor" },
    Choice { code: "products", label: "Tried over-the-counter products" },
    Choice { code: "hp_advice", label: "Asked my hair professional for advice" },
    Choice { code: "internet", label: "Researched online" },
    Choice { code: "nothing", label: "Did nothing / Waited it out" },
];

const WAIT_TIME_OPTIONS: &[Choice] = &[
    Choice { code: "under_2_weeks", label: "Under 2 weeks" },
    Choice { code: "2_4_weeks", label: "2-4 weeks" },
    Choice { code: "1_2_months", label: "1-2 months" },
    Choice { code: "2_3_months", label: "2-3 months" },
    Choice { code: "over_3_months", label: "Over 3 months" },
    Choice { code: "never_tried", label: "Never tried to see one" },
];

const TRUST_OPTIONS: &[Choice] = &[
    Choice { code: "very_trust", label: "Very much - they see my scalp regularly" },
    Choice { code: "somewhat_trust", label: "Somewhat - depends on the concern" },
    Choice { code: "neutral", label: "Neutral" },
    Choice { code: "not_trust", label: "Not really - prefer to go straight to a doctor" },
];

const WILLINGNESS_OPTIONS: &[Choice] = &[
    Choice { code: "yes_definitely", label: "Yes, definitely worth it" },
    Choice { code: "yes_reasonable", label: "Yes, if the price is reasonable" },
    Choice { code: "maybe", label: "Maybe, depends on the situation" },
    Choice { code: "no", label: "No, I expect insurance to cover it" },
];

const PHOTO_COMFORT_OPTIONS: &[Choice] = &[
    Choice { code: "very_comfortable", label: "Very comfortable" },
    Choice { code: "somewhat_comfortable", label: "Somewhat comfortable" },
    Choice { code: "neutral", label: "Neutral" },
    Choice { code: "uncomfortable", label: "Uncomfortable" },
    Choice { code: "very_uncomfortable", label: "Very uncomfortable" },
];

const PHOTO_FACTOR_OPTIONS: &[Choice] = &[
    Choice { code: "hp_takes", label: "If my hair professional takes the photo" },
    Choice { code: "not_stored", label: "Knowing the photo is not stored long-term" },
    Choice { code: "doctor_only", label: "Knowing only a doctor sees it" },
    Choice { code: "encrypted", label: "If the photo is encrypted" },
    Choice { code: "urgent", label: "If I knew it would speed up my care" },
    Choice { code: "nothing", label: "Nothing would make me comfortable" },
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "has_experience",
        prompt: "Have you ever experienced a scalp condition that concerned you?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: HAS_EXPERIENCE_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please indicate your experience",
        consent_gated: false,
    },
    FieldSpec {
        key: "condition_types",
        prompt: "What type of scalp condition(s) have you experienced?",
        description: Some("Select all that apply"),
        widget: WidgetKind::CheckboxGroup,
        options: CONDITION_TYPE_OPTIONS,
        rule: FieldRule::OptionalMulti,
        message: "",
        consent_gated: false,
    },
    FieldSpec {
        key: "previous_actions",
        prompt: "What actions did you take when you had a scalp concern?",
        description: Some("Select all that apply"),
        widget: WidgetKind::CheckboxGroup,
        options: PREVIOUS_ACTION_OPTIONS,
        rule: FieldRule::OptionalMulti,
        message: "",
        consent_gated: false,
    },
    FieldSpec {
        key: "derm_wait_time",
        prompt: "How long did you wait to see a dermatologist (or how long was the wait time quoted)?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: WAIT_TIME_OPTIONS,
        rule: FieldRule::OptionalSingle,
        message: "",
        consent_gated: false,
    },
    FieldSpec {
        key: "trust_hp_referral",
        prompt: "Would you trust your hair professional to recommend when you should see a dermatologist?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: TRUST_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please indicate your trust level",
        consent_gated: false,
    },
    FieldSpec {
        key: "willingness_to_pay",
        prompt: "Would you pay a small fee for faster access to a dermatologist for a scalp concern?",
        description: Some("For example, to skip a months-long wait"),
        widget: WidgetKind::RadioGroup,
        options: WILLINGNESS_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please indicate your willingness",
        consent_gated: false,
    },
    FieldSpec {
        key: "photo_sharing_comfort",
        prompt: "How comfortable would you be with your hair professional taking a photo of your scalp to share with a dermatologist?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: PHOTO_COMFORT_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please indicate your comfort level",
        consent_gated: false,
    },
    FieldSpec {
        key: "photo_comfort_factors",
        prompt: "What would make you more comfortable with photo sharing?",
        description: Some("Select all that apply"),
        widget: WidgetKind::CheckboxGroup,
        options: PHOTO_FACTOR_OPTIONS,
        rule: FieldRule::OptionalMulti,
        message: "",
        consent_gated: false,
    },
];

pub(super) static SCHEMA: SegmentSchema = SegmentSchema {
    segment: Segment::Client,
    title: "Client Discovery Survey",
    field_groups: &[FIELDS, LOCATION_FIELDS, CONTACT_FIELDS],
    steps: &[
        &["has_experience"],
        &["condition_types"],
        &["previous_actions"],
        &["derm_wait_time"],
        &["trust_hp_referral"],
        &["willingness_to_pay"],
        &["photo_sharing_comfort"],
        &["photo_comfort_factors"],
        LOCATION_STEP,
        CONTACT_STEP,
    ],
};
