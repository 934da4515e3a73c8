//! # SHA Core
//!
//! Core business logic for the SHA discovery intake system.
//!
//! This crate contains the survey machinery and persistence seam:
//! - Declarative per-segment question schemas with a single pure validator
//! - The generic multi-step survey flow (one engine, three segment
//!   descriptors)
//! - The submission service that reshapes a completed answer set into one
//!   durable [`sha_types::DiscoveryRecord`] and performs the single insert
//! - The write-only [`RecordStore`] seam and its sharded JSON file
//!   implementation
//!
//! **No API concerns**: HTTP handlers, sessions, and OpenAPI documentation
//! belong to the REST binary.

pub mod config;
pub mod error;
pub mod flow;
pub mod schema;
pub mod store;
pub mod submit;

pub use config::{CoreConfig, DEFAULT_RESPONSE_DATA_DIR};
pub use error::{DiscoveryError, DiscoveryResult};
pub use flow::{FieldInput, FlowPhase, SurveyFlow};
pub use schema::{FieldError, FieldRule, FieldSpec, SegmentSchema, WidgetKind};
pub use store::{JsonFileStore, MemoryStore, RecordStore, StoreError};
pub use submit::{InterviewSignup, SubmissionService};
