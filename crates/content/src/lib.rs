//! # SHA Content
//!
//! Site copy for the discovery pages, served as structured data.
//!
//! The intake server does not render markup; each page is a JSON document
//! of headings, copy blocks, and form descriptors that any front end can
//! lay out. Copy lives here as code so the pages, the survey schemas, and
//! the thank-you flow version together.

pub mod home;
pub mod landing;
pub mod thank_you;

pub use home::{home_page, DiscoveryCard, HomePage};
pub use landing::{landing_page, InterviewFormField, LandingPage};
pub use thank_you::{thank_you_page, ThankYouPage};
