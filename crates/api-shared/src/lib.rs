//! # API Shared
//!
//! Shared wire-level definitions for the SHA intake API.
//!
//! Contains:
//! - Request/response DTOs for the survey session and submission endpoints
//! - Shared services like `HealthService`
//!
//! Everything here is serialisation shape only; the behaviour lives in
//! `sha-core`.

pub mod dto;
pub mod health;

pub use dto::{
    ChoiceDto, ContactDto, ErrorRes, FieldErrorDto, FieldValue, InterviewInterestReq,
    QuestionBlockDto, SetFieldReq, StartSessionReq, StepViewRes, SubmitRes, SubmitSurveyReq,
};
pub use health::{HealthRes, HealthService};
