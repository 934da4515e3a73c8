//! Dermatologist ("Clinical Anchors") survey descriptor.

use super::{
    CONTACT_FIELDS, CONTACT_STEP, Choice, FieldRule, FieldSpec, LOCATION_FIELDS, LOCATION_STEP,
    SegmentSchema, WidgetKind,
};
use sha_types::Segment;

const PRACTICE_TYPE_OPTIONS: &[Choice] = &[
    Choice { code: "general_derm", label: "General Dermatology" },
    Choice { code: "medical_derm", label: "Medical Dermatology" },
    Choice { code: "cosmetic", label: "Cosmetic / Aesthetic" },
    Choice { code: "surgical", label: "Surgical Dermatology" },
    Choice { code: "mixed", label: "Mixed Practice" },
];

const PRACTICE_SETTING_OPTIONS: &[Choice] = &[
    Choice { code: "solo", label: "Solo Practice" },
    Choice { code: "group", label: "Group Practice" },
    Choice { code: "hospital", label: "Hospital / Health System" },
    Choice { code: "academic", label: "Academic Medical Center" },
    Choice { code: "telehealth", label: "Telehealth-focused" },
];

const PATIENT_VOLUME_OPTIONS: &[Choice] = &[
    Choice { code: "under_50", label: "Under 50 patients" },
    Choice { code: "50_100", label: "50-100 patients" },
    Choice { code: "100_150", label: "100-150 patients" },
    Choice { code: "over_150", label: "Over 150 patients" },
];

const ACQUISITION_COST_OPTIONS: &[Choice] = &[
    Choice { code: "under_50", label: "Under $50" },
    Choice { code: "50_100", label: "$50-$100" },
    Choice { code: "100_200", label: "$100-$200" },
    Choice { code: "over_200", label: "Over $200" },
    Choice { code: "unknown", label: "Don't know" },
];

const NO_SHOW_RATE_OPTIONS: &[Choice] = &[
    Choice { code: "under_5", label: "Under 5%" },
    Choice { code: "5_10", label: "5-10%" },
    Choice { code: "10_20", label: "10-20%" },
    Choice { code: "over_20", label: "Over 20%" },
];

const INTEREST_OPTIONS: &[Choice] = &[
    Choice { code: "very_interested", label: "Very interested" },
    Choice { code: "somewhat_interested", label: "Somewhat interested" },
    Choice { code: "neutral", label: "Neutral" },
    Choice { code: "not_interested", label: "Not interested" },
];

const ASYNC_FIT_OPTIONS: &[Choice] = &[
    Choice { code: "great_fit", label: "Great fit - would love this" },
    Choice { code: "good_fit", label: "Good fit for some cases" },
    Choice { code: "maybe", label: "Maybe - need to learn more" },
    Choice { code: "not_fit", label: "Not a fit for my practice" },
];

const MONTHLY_FEE_OPTIONS: &[Choice] = &[
    Choice { code: "under_100", label: "Under $100/month" },
    Choice { code: "100_250", label: "$100-$250/month" },
    Choice { code: "250_500", label: "$250-$500/month" },
    Choice { code: "over_500", label: "Over $500/month" },
    Choice { code: "performance", label: "Prefer performance-based" },
];

const EMR_SYSTEM_OPTIONS: &[Choice] = &[
    Choice { code: "modmed", label: "ModMed / EMA" },
    Choice { code: "epic", label: "Epic" },
    Choice { code: "athena", label: "athenahealth" },
    Choice { code: "advancedmd", label: "AdvancedMD" },
    Choice { code: "drchrono", label: "DrChrono" },
    Choice { code: "other", label: "Other" },
    Choice { code: "none", label: "No EMR" },
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "practice_type",
        prompt: "What type of dermatology practice do you have?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: PRACTICE_TYPE_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please select your practice type",
        consent_gated: false,
    },
    FieldSpec {
        key: "practice_setting",
        prompt: "What is your practice setting?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: PRACTICE_SETTING_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please select your practice setting",
        consent_gated: false,
    },
    FieldSpec {
        key: "patient_volume",
        prompt: "How many patients do you see per week?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: PATIENT_VOLUME_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please select your patient volume",
        consent_gated: false,
    },
    FieldSpec {
        key: "acquisition_cost",
        prompt: "What is your estimated patient acquisition cost?",
        description: Some("Approximate cost to acquire a new patient through marketing/referrals"),
        widget: WidgetKind::RadioGroup,
        options: ACQUISITION_COST_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please select patient acquisition cost",
        consent_gated: false,
    },
    FieldSpec {
        key: "no_show_rate",
        prompt: "What is your current no-show rate for new patients?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: NO_SHOW_RATE_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please select your no-show rate",
        consent_gated: false,
    },
    FieldSpec {
        key: "referral_interest",
        prompt: "How interested are you in receiving pre-screened scalp condition referrals?",
        description: Some("Patients observed by trained hair professionals with documented concerns"),
        widget: WidgetKind::RadioGroup,
        options: INTEREST_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please indicate your interest",
        consent_gated: false,
    },
    FieldSpec {
        key: "async_review_fit",
        prompt: "How well would async/store-and-forward review fit your workflow?",
        description: Some("Reviewing documented images and observations before scheduling"),
        widget: WidgetKind::RadioGroup,
        options: ASYNC_FIT_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please indicate fit for async review",
        consent_gated: false,
    },
    FieldSpec {
        key: "max_monthly_fee",
        prompt: "What would you pay monthly for a quality referral pipeline?",
        description: Some("For a steady stream of pre-vetted, high-intent patients"),
        widget: WidgetKind::RadioGroup,
        options: MONTHLY_FEE_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please select maximum monthly fee",
        consent_gated: false,
    },
    FieldSpec {
        key: "emr_system",
        prompt: "What EMR/EHR system does your practice use?",
        description: None,
        widget: WidgetKind::RadioGroup,
        options: EMR_SYSTEM_OPTIONS,
        rule: FieldRule::RequiredSingle,
        message: "Please select your EMR system",
        consent_gated: false,
    },
];

pub(super) static SCHEMA: SegmentSchema = SegmentSchema {
    segment: Segment::Derm,
    title: "Dermatologist Discovery Survey",
    field_groups: &[FIELDS, LOCATION_FIELDS, CONTACT_FIELDS],
    steps: &[
        &["practice_type"],
        &["practice_setting"],
        &["patient_volume"],
        &["acquisition_cost"],
        &["no_show_rate"],
        &["referral_interest"],
        &["async_review_fit"],
        &["max_monthly_fee"],
        &["emr_system"],
        LOCATION_STEP,
        CONTACT_STEP,
    ],
};
