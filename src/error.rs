//! Error taxonomy for route computation and visit intake.

use thiserror::Error;

use crate::store::StoreError;
use crate::visit::AgentId;

/// Errors surfaced by the planner.
///
/// Every variant maps onto one [`ErrorKind`], which is what a transport
/// layer should match on when choosing a response code.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// Malformed input: non-numeric coordinates, non-positive speed,
    /// unparseable configuration.
    #[error("{0}")]
    InvalidArgument(String),

    /// Numeric input outside its valid domain.
    #[error("{0}")]
    OutOfRange(String),

    /// The referenced agent does not exist.
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    /// The store rejected a write on a referential constraint.
    #[error("data integrity violation: {0}")]
    IntegrityViolation(String),

    /// The store failed for a reason unrelated to the input.
    #[error("visit store unavailable: {0}")]
    Store(String),
}

/// Flat classification of [`PlannerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    OutOfRange,
    NotFound,
    IntegrityViolation,
    Unavailable,
}

impl PlannerError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn out_of_range(message: impl Into<String>) -> Self {
        Self::OutOfRange(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::OutOfRange(_) => ErrorKind::OutOfRange,
            Self::AgentNotFound(_) => ErrorKind::NotFound,
            Self::IntegrityViolation(_) => ErrorKind::IntegrityViolation,
            Self::Store(_) => ErrorKind::Unavailable,
        }
    }

    /// True for errors the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Unavailable)
    }
}

impl From<StoreError> for PlannerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ForeignKey(detail) => Self::IntegrityViolation(detail),
            StoreError::Backend(detail) => Self::Store(detail),
        }
    }
}
