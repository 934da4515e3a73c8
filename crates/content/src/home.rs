//! The home page: hero plus one discovery card per segment.

use serde::{Deserialize, Serialize};
use sha_types::{Accent, Segment};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Hero {
    pub badge: String,
    pub heading: String,
    pub copy: String,
    pub prompt: String,
}

/// One role card linking to a segment landing page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiscoveryCard {
    #[schema(value_type = String, example = "hp")]
    pub segment: Segment,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub href: String,
    #[schema(value_type = String, example = "gold")]
    pub accent: Accent,
    pub cta: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomePage {
    pub hero: Hero,
    pub cards: Vec<DiscoveryCard>,
    pub why_heading: String,
    pub why_copy: String,
}

fn card_description(segment: Segment) -> &'static str {
    match segment {
        Segment::Hp => {
            "You see scalp conditions every day. Help us build tools that turn \
             observations into action."
        }
        Segment::Derm => {
            "Build a qualified patient pipeline on your terms. Tell us what matters to you."
        }
        Segment::Client => "Tired of waiting months for answers? Help us fix the broken system.",
    }
}

pub fn home_page() -> HomePage {
    HomePage {
        hero: Hero {
            badge: "Customer Discovery Survey".into(),
            heading: "The Bridge That Benefits Everyone".into(),
            copy: "Help us build the future of scalp health. Share your experience and \
                   perspective to shape a platform that connects hair professionals, \
                   dermatologists, and clients for better outcomes."
                .into(),
            prompt: "Select your role below to begin".into(),
        },
        cards: Segment::ALL
            .into_iter()
            .map(|segment| DiscoveryCard {
                segment,
                title: segment.title().into(),
                subtitle: segment.subtitle().into(),
                description: card_description(segment).into(),
                href: format!("/{segment}"),
                accent: segment.accent(),
                cta: "Start Discovery".into(),
            })
            .collect(),
        why_heading: "Why Your Input Matters".into(),
        why_copy: "We're building something new—a bridge between the salon chair and the \
                   dermatologist's office. Your honest feedback will directly shape how we \
                   design this platform to serve everyone better. This survey takes about \
                   5 minutes and your responses are confidential."
            .into(),
    }
}
