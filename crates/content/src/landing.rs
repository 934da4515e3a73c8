//! Per-segment landing pages: hero, value propositions, stat callouts,
//! the survey/interview path cards, and the interview-interest form
//! descriptor.

use serde::{Deserialize, Serialize};
use sha_core::schema::{self, WidgetKind};
use sha_types::{Accent, Segment};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValueProp {
    pub title: String,
    pub copy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatCallout {
    pub figure: String,
    pub caption: String,
}

/// One of the two participation path cards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PathCard {
    pub title: String,
    pub copy: String,
    pub cta: String,
    /// Present for the survey path; the interview path expands in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A field of the interview-interest form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InterviewFormField {
    pub key: String,
    pub label: String,
    pub required: bool,
    /// Widget kind, e.g. `text_input`, `checkbox_group`.
    pub widget: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<FormChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FormChoice {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InterviewForm {
    pub heading: String,
    pub fields: Vec<InterviewFormField>,
    pub submit_label: String,
    pub footnote: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LandingPage {
    #[schema(value_type = String, example = "derm")]
    pub segment: Segment,
    #[schema(value_type = String, example = "teal")]
    pub accent: Accent,
    pub badge: String,
    pub heading: String,
    pub intro: String,
    pub value_heading: String,
    pub value_props: Vec<ValueProp>,
    pub stats: Vec<StatCallout>,
    pub survey_path: PathCard,
    pub interview_path: PathCard,
    pub both_note: String,
    pub interview_form: InterviewForm,
}

fn widget_tag(widget: WidgetKind) -> String {
    widget.as_str().into()
}

fn interview_form() -> InterviewForm {
    let text = |key: &str, label: &str, required: bool| InterviewFormField {
        key: key.into(),
        label: label.into(),
        required,
        widget: widget_tag(WidgetKind::TextInput),
        placeholder: None,
        options: Vec::new(),
    };
    let mut fields = vec![
        text("name", "Name", true),
        InterviewFormField {
            widget: widget_tag(WidgetKind::EmailInput),
            ..text("email", "Email", true)
        },
        InterviewFormField {
            widget: widget_tag(WidgetKind::TelInput),
            ..text("phone", "Phone (optional)", false)
        },
        InterviewFormField {
            placeholder: Some("e.g., 02101".into()),
            ..text("zip_code", "ZIP Code (optional)", false)
        },
    ];
    fields.push(InterviewFormField {
        key: "availability".into(),
        label: "Best times to reach you".into(),
        required: false,
        widget: widget_tag(WidgetKind::CheckboxGroup),
        placeholder: None,
        options: schema::AVAILABILITY_WINDOWS
            .iter()
            .map(|choice| FormChoice {
                code: choice.code.into(),
                label: choice.label.into(),
            })
            .collect(),
    });
    InterviewForm {
        heading: "Interview Interest".into(),
        fields,
        submit_label: "Submit Interview Interest".into(),
        footnote: "We'll reach out to schedule a 15-minute conversation.".into(),
    }
}

fn value_props(segment: Segment) -> Vec<ValueProp> {
    let prop = |title: &str, copy: &str| ValueProp {
        title: title.into(),
        copy: copy.into(),
    };
    match segment {
        Segment::Hp => vec![
            prop(
                "Strengthen Client Relationships",
                "Turn awkward moments into trust-building opportunities. Help your clients \
                 get the care they need.",
            ),
            prop(
                "Expand Your Expertise",
                "Be recognized for your scalp health observations. Grow professionally while \
                 staying in your scope.",
            ),
            prop(
                "Join a Movement",
                "Be part of a network of professionals changing how scalp care works. Your \
                 input shapes what we build.",
            ),
        ],
        Segment::Derm => vec![
            prop(
                "Reduced No-Shows",
                "Patients who come through trained observers are pre-vetted and motivated to \
                 seek care.",
            ),
            prop(
                "Administrative Relief",
                "Standardized data packets delivered directly to your team, reducing intake \
                 friction.",
            ),
            prop(
                "EMR Integration",
                "Seamless data packets designed for ModMed, Epic, and other major systems.",
            ),
        ],
        Segment::Client => vec![
            prop(
                "Get Connected Faster",
                "Get connected to specialists faster through people you already trust.",
            ),
            prop(
                "Trusted Observers",
                "Your stylist sees what you can't—and can help you get care.",
            ),
            prop(
                "Privacy Protected",
                "Your health information stays secure—we're building with privacy as a \
                 foundation.",
            ),
        ],
    }
}

fn stats(segment: Segment) -> Vec<StatCallout> {
    let stat = |figure: &str, caption: &str| StatCallout {
        figure: figure.into(),
        caption: caption.into(),
    };
    match segment {
        Segment::Hp => vec![stat(
            "1.2M+",
            "hair professionals in the US see 2-4 scalp conditions per week on average",
        )],
        Segment::Derm => vec![
            stat("18-30%", "Average no-show rate in dermatology"),
            stat("3+ months", "Average wait for new patients"),
        ],
        Segment::Client => vec![stat(
            "3+ months",
            "average wait for a dermatology appointment. You deserve better.",
        )],
    }
}

pub fn landing_page(segment: Segment) -> LandingPage {
    let (badge, heading, intro, value_heading, survey_copy, interview_copy) = match segment {
        Segment::Hp => (
            "For Hair Professionals",
            "Your Observations Matter",
            "Every day, you're inches away from your clients' scalps. You notice the \
             changes, the concerns, the conditions that might need medical attention. But \
             what do you do with that knowledge?",
            "Why Your Voice Matters",
            "Answer a few questions about your experience with scalp conditions. Your \
             responses help us understand what you need.",
            "We're conducting 15-minute interviews with hair professionals. Share your \
             perspective directly and shape what we build.",
        ),
        Segment::Derm => (
            "For Dermatologists",
            "A Better Patient Pipeline",
            "What if your new patient pipeline was filled with people who actually show \
             up? Patients who've already been observed by trained professionals and are \
             ready for clinical evaluation.",
            "Why Your Input Matters",
            "Share your practice challenges and what matters most in a patient pipeline \
             solution.",
            "We're conducting 15-minute interviews with dermatologists. Share your \
             perspective directly and shape what we build.",
        ),
        Segment::Client => (
            "For Clients",
            "You Shouldn't Have to Wait Months for Answers",
            "Noticed something unusual on your scalp? You're not alone. Many people \
             struggle to know when to seek help and how to get it quickly. We're building \
             something to fix the broken system.",
            "Why Your Experience Matters",
            "Share your experience with scalp health concerns. Your story helps us \
             understand what you need.",
            "We're conducting 15-minute interviews with people about their scalp health \
             journeys. Share your story directly and shape what we build.",
        ),
    };

    LandingPage {
        segment,
        accent: segment.accent(),
        badge: badge.into(),
        heading: heading.into(),
        intro: intro.into(),
        value_heading: value_heading.into(),
        value_props: value_props(segment),
        stats: stats(segment),
        survey_path: PathCard {
            title: "Take the 3-Minute Survey".into(),
            copy: survey_copy.into(),
            cta: "Start Survey".into(),
            href: Some(format!("/{segment}/survey")),
            note: None,
        },
        interview_path: PathCard {
            title: "Prefer to Talk?".into(),
            copy: interview_copy.into(),
            cta: "I'm Interested in an Interview".into(),
            href: None,
            note: Some("Be first in line to use SHA when we launch".into()),
        },
        both_note: "Ideal: Do both! Survey + Interview = Maximum impact on what we build".into(),
        interview_form: interview_form(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_segment_has_a_complete_landing_page() {
        for segment in Segment::ALL {
            let page = landing_page(segment);
            assert_eq!(page.segment, segment);
            assert_eq!(page.accent, segment.accent());
            assert_eq!(page.value_props.len(), 3);
            assert!(!page.stats.is_empty());
            assert_eq!(
                page.survey_path.href.as_deref(),
                Some(format!("/{segment}/survey").as_str())
            );
        }
    }

    #[test]
    fn interview_form_requires_name_and_email_only() {
        let form = landing_page(Segment::Derm).interview_form;
        let required: Vec<_> = form
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key.as_str())
            .collect();
        assert_eq!(required, ["name", "email"]);

        let availability = form.fields.last().unwrap();
        assert_eq!(availability.widget, "checkbox_group");
        assert_eq!(availability.options.len(), 4);
        assert_eq!(availability.options[0].code, "weekday_mornings");
    }
}
