//! The thank-you page shown after any submission.
//!
//! Copy is selected by the `segment` query parameter; an unrecognised or
//! missing segment falls back to the client copy rather than erroring.
//! When the submission carried interview interest, an extra line confirms
//! the follow-up.

use serde::{Deserialize, Serialize};
use sha_types::{Accent, Segment};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NextStepCard {
    pub step: u8,
    pub title: String,
    pub copy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ThankYouPage {
    #[schema(value_type = String, example = "hp")]
    pub segment: Segment,
    #[schema(value_type = String, example = "gold")]
    pub accent: Accent,
    pub title: String,
    pub message: String,
    pub next_step: String,
    /// Confirmation line shown when the submission included interview
    /// interest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_note: Option<String>,
    pub share_prompt: String,
    pub what_happens_heading: String,
    pub what_happens: Vec<NextStepCard>,
}

fn copy_for(segment: Segment) -> (&'static str, &'static str, &'static str) {
    match segment {
        Segment::Hp => (
            "Thank You, Hair Professional!",
            "Your insights from the frontlines of scalp health are invaluable. You see what \
             others miss, and your experience will help us build a platform that empowers \
             you to serve your clients even better.",
            "We'll be in touch soon with updates on SHA and early access opportunities for \
             Community Observers.",
        ),
        Segment::Derm => (
            "Thank You, Doctor!",
            "Your clinical perspective is essential to building a platform that actually \
             works for dermatologists. We're committed to creating something that reduces \
             your administrative burden while improving patient outcomes.",
            "We'll be in touch soon with updates on SHA and clinical anchor partnership \
             opportunities.",
        ),
        Segment::Client => (
            "Thank You for Sharing!",
            "Your experience with scalp health matters. By sharing your journey, you're \
             helping us build something that will make it easier for others to get the \
             care they need.",
            "We'll keep you updated on our progress and let you know when SHA launches.",
        ),
    }
}

/// Builds the thank-you page for a raw `segment` query value. Unknown or
/// absent segments fall back to the client copy.
pub fn thank_you_page(segment: Option<&str>, interview: bool) -> ThankYouPage {
    let segment = segment
        .and_then(|s| s.parse::<Segment>().ok())
        .unwrap_or(Segment::Client);
    let (title, message, next_step) = copy_for(segment);
    let card = |step: u8, title: &str, copy: &str| NextStepCard {
        step,
        title: title.into(),
        copy: copy.into(),
    };
    ThankYouPage {
        segment,
        accent: segment.accent(),
        title: title.into(),
        message: message.into(),
        next_step: next_step.into(),
        interview_note: interview.then(|| {
            "Thanks for your interview interest! We'll be in touch to schedule your \
             15-minute conversation."
                .into()
        }),
        share_prompt: "Want to spread the word? Share SHA with others who might benefit.".into(),
        what_happens_heading: "What Happens Next?".into(),
        what_happens: vec![
            card(
                1,
                "We Analyze",
                "Your responses help us understand real needs and priorities.",
            ),
            card(
                2,
                "We Build",
                "We design features based on what matters most to you.",
            ),
            card(
                3,
                "We Launch",
                "Early supporters like you get first access to SHA.",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_segments_get_their_own_copy() {
        let page = thank_you_page(Some("derm"), false);
        assert_eq!(page.segment, Segment::Derm);
        assert_eq!(page.title, "Thank You, Doctor!");
        assert_eq!(page.accent, Accent::Teal);
        assert!(page.interview_note.is_none());
    }

    #[test]
    fn unknown_or_missing_segment_falls_back_to_client() {
        for raw in [Some("stylist"), Some(""), None] {
            let page = thank_you_page(raw, false);
            assert_eq!(page.segment, Segment::Client);
            assert_eq!(page.title, "Thank You for Sharing!");
        }
    }

    #[test]
    fn interview_flag_adds_the_confirmation_line() {
        let page = thank_you_page(Some("hp"), true);
        assert!(page.interview_note.is_some());
        assert_eq!(page.what_happens.len(), 3);
    }
}
