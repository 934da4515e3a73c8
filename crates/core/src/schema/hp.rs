//! Hair professional ("Community Observers") survey descriptor.

use super::{
    CONTACT_FIELDS, CONTACT_STEP, Choice, FieldRule, FieldSpec, LOCATION_FIELDS, LOCATION_STEP,
    SegmentSchema, WidgetKind,
};
use sha_types::Segment;

const PROFESSIONAL_TYPE_OPTIONS: &[Choice] = &[
    Choice { code: "hairstylist", label: "Hairstylist / Cosmetologist" },
    Choice { code: "barber", label: "Barber" },
    Choice { code: "braider", label: "Braider / Loctician" },
    Choice { code: "salon_owner", label: "Salon / Shop Owner" },
    Choice { code: "other", label: "Other Hair Professional" },
];

const EXPERIENCE_OPTIONS: &[Choice] = &[
    Choice { code: "less_than_2", label: "Less than 2 years" },
    Choice { code: "2_to_5", label: "2-5 years" },
    Choice { code: "5_to_10", label: "5-10 years" },
    Choice { code: "more_than_10", label: "More than 10 years" },
];

const FREQUENCY_OPTIONS: &[Choice] = &[
    Choice { code: "daily", label: "Daily" },
    Choice { code: "weekly", label: "Weekly" },
    Choice { code: "monthly", label: "Monthly" },
    Choice { code: "rarely", label: "Rarely" },
];

const CURRENT_ACTION_OPTIONS: &[Choice] = &[
    Choice { code: "mention_client", label: "Mention it to the client" },
    Choice { code: "recommend_doctor", label: "Recommend they see a doctor" },
    Choice { code: "recommend_products", label: "Recommend hair/scalp products" },
    Choice { code: "nothing", label: "Nothing - not my place" },
    Choice { code: "take_photo", label: "Take a photo to show them" },
    Choice { code: "other", label: "Other" },
];

const CLIENT_REACTION_OPTIONS: &[Choice] = &[
    Choice { code: "grateful", label: "Grateful for the heads up" },
    Choice { code: "dismissive", label: "Dismissive - they already know" },
    Choice { code: "concerned", label: "Concerned but unsure what to do" },
    Choice { code: "uncomfortable", label: "Uncomfortable discussing it" },
];

const INTEREST_OPTIONS: &[Choice] = &[
    Choice { code: "very_interested", label: "Very interested" },
    Choice { code: "somewhat_interested", label: "Somewhat interested" },
    Choice { code: "neutral", label: "Neutral" },
    Choice { code: "not_interested", label: "Not interested" },
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "professional_type",
        prompt: "What type of hair professional are you?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: PROFESSIONAL_TYPE_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please select your professional type",
        consent_gated: false,
    },
    FieldSpec {
        key: "years_experience",
        prompt: "How many years have you been in the industry?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: EXPERIENCE_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please select your experience level",
        consent_gated: false,
    },
    FieldSpec {
        key: "scalp_condition_frequency",
        prompt: "How often do you notice scalp conditions (flaking, redness, hair loss, lesions) on clients?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: FREQUENCY_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please select how often you see scalp conditions",
        consent_gated: false,
    },
    FieldSpec {
        key: "current_action",
        prompt: "When you notice a concerning scalp condition, what do you typically do?",
        description: Some("Select all that apply"),
        widget: WidgetKind::CheckboxGroup,
        options: CURRENT_ACTION_OPTIONS,
        rule: FieldRule::RequiredMulti { min: 1 },
        message: "Please select at least one action",
        consent_gated: false,
    },
    FieldSpec {
        key: "client_reaction",
        prompt: "How do clients typically react when you mention a scalp concern?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: CLIENT_REACTION_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please select a typical client reaction",
        consent_gated: false,
    },
    FieldSpec {
        key: "referral_tool_interest",
        prompt: "How interested would you be in a secure tool that helps you refer clients to dermatologists?",
        description: Some("A tool that protects your liability and helps clients get care faster"),
        widget: WidgetKind::RadioGroup,
        options: INTEREST_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please indicate your interest level",
        consent_gated: false,
    },
    FieldSpec {
        key: "training_interest",
        prompt: "Would you be interested in training to become a certified scalp health observer?",
        description: Some("A 90-minute course designed by dermatologists to help you spot conditions"),
        widget: WidgetKind::RadioGroup,
        options: INTEREST_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please indicate your interest in training",
        consent_gated: false,
    },
];

pub(super) static SCHEMA: SegmentSchema = SegmentSchema {
    segment: Segment::Hp,
    title: "Hair Professional Discovery Survey",
    field_groups: &[FIELDS, LOCATION_FIELDS, CONTACT_FIELDS],
    steps: &[
        &["professional_type"],
        &["years_experience"],
        &["scalp_condition_frequency"],
        &["current_action"],
        &["client_reaction"],
        &["referral_tool_interest"],
        &["training_interest"],
        LOCATION_STEP,
        CONTACT_STEP,
    ],
};
