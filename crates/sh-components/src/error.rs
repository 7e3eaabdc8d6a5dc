//! Errors raised when seeding a simulator from a resolved entity

use sh_core::Platform;
use thiserror::Error;

pub type ComponentResult<T> = Result<T, ComponentError>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ComponentError {
    #[error("expected a {expected} entity, got {actual}")]
    WrongPlatform { expected: Platform, actual: Platform },

    #[error("invalid value for attribute '{attribute}': {reason}")]
    InvalidAttribute { attribute: String, reason: String },
}

impl ComponentError {
    pub(crate) fn invalid(attribute: &str, reason: impl Into<String>) -> Self {
        ComponentError::InvalidAttribute {
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }
}
