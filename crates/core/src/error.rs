use crate::schema::FieldError;
use crate::store::StoreError;

/// Errors surfaced by the core survey and submission machinery.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// One or more fields failed validation. Always recoverable; blocks
    /// forward progress or submission, never backward navigation.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// A submission is already in flight for this flow; re-submission is
    /// blocked until the pending store call resolves.
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// The flow reached its terminal state; no further mutation is allowed.
    #[error("this survey has already been submitted")]
    AlreadySubmitted,

    #[error("submit is only available on the final step")]
    NotOnFinalStep,

    #[error("record store error: {0}")]
    Store(#[from] StoreError),
}

pub type DiscoveryResult<T> = std::result::Result<T, DiscoveryError>;

impl DiscoveryError {
    /// The field errors carried by a validation failure, if any.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            DiscoveryError::Validation(errors) => errors,
            _ => &[],
        }
    }
}
