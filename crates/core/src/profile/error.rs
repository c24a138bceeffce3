use thiserror::Error;

/// Errors raised when validating a profile form before submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Full name is required")]
    EmptyFullName,
    #[error("Email is required")]
    EmptyEmail,
}
