//! # SHA Types
//!
//! Domain vocabulary for the SHA discovery intake system.
//!
//! This crate defines the data shapes shared across the workspace:
//! - [`Segment`]: the three audience roles and their display metadata
//! - [`AnswerSet`] / [`AnswerValue`]: the in-progress survey answer map
//! - [`ContactInfo`]: the optional contact sub-record with consent flags
//! - [`StateCode`]: validated US state selection for the location step
//! - [`DiscoveryRecord`] / [`SourceTag`]: the persisted submission record
//!
//! Types here carry their own invariants (validated construction, canonical
//! wire forms) but no storage, validation-schema, or API concerns; those
//! belong in `sha-core` and the REST binary.

pub mod answer;
pub mod contact;
pub mod location;
pub mod record;
pub mod segment;

pub use answer::{AnswerSet, AnswerValue};
pub use contact::{ContactInfo, ContactMethod};
pub use location::{LocationError, STATE_CODES, StateCode, ZIP_CODE_MAX_LEN, validate_zip_code};
pub use record::{DiscoveryRecord, SourceTag};
pub use segment::{Accent, Segment, SegmentError};
