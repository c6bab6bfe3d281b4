//! Domain error types.
//!
//! Validation and lookup failures are typed so callers can match on them.
//! Operations that also touch the filesystem return `anyhow::Result`; these
//! errors travel inside it and can be recovered with `downcast_ref`.

use thiserror::Error;

/// A value was rejected before it could be stored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The student name is not title-cased letters and spaces.
    #[error("name must contain only letters and spaces and every word must start with a capital letter: {0:?}")]
    InvalidName(String),

    /// The grade is an integer outside 2..=5.
    #[error("grade must be an integer from 2 to 5, got {0}")]
    GradeOutOfRange(i64),

    /// The test score is an integer outside 0..=100.
    #[error("test score must be an integer from 0 to 100, got {0}")]
    TestScoreOutOfRange(i64),

    /// The value is not an integer at all (e.g. `3.4` or `"abc"`).
    #[error("{field} must be an integer, got {value:?}")]
    NotAnInteger { field: &'static str, value: String },
}

/// A subject was referenced that the student does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Statistics were requested for an unregistered subject.
    #[error("subject {0} not found")]
    UnknownSubject(String),

    /// Attribute-style access to an unregistered subject.
    #[error("subject {0} is not an attribute of this student")]
    SubjectNotFound(String),
}

impl LookupError {
    /// Returns `true` for failures of the attribute-style accessor.
    pub fn is_attribute_lookup(&self) -> bool {
        matches!(self, LookupError::SubjectNotFound(_))
    }
}
