//! Error taxonomy for the projection engine

use thiserror::Error;

/// Errors raised by the calculators and their primitives
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// An input is missing, zero, or outside its domain. Raised before any
    /// computation starts.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A primitive was asked for a value that is mathematically undefined
    /// and has no documented fallback.
    #[error("{operation} is undefined: {reason}")]
    Domain { operation: &'static str, reason: String },

    /// A computed monetary output was NaN or infinite
    #[error("{field} is not a finite amount")]
    NonFinite { field: &'static str },
}

impl ProjectionError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn domain(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Domain {
            operation,
            reason: reason.into(),
        }
    }

    /// Field name for validation and finiteness errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } | Self::NonFinite { field } => Some(field),
            Self::Domain { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
