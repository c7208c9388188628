use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    Validation,
    NotFound,
    Conflict,
    Unauthorized,
    Forbidden,
    Timeout,
    Internal,
}

impl KernelError {
    /// Storage failures that may succeed when attempted again.
    pub fn is_transient(&self) -> bool {
        matches!(self, KernelError::Timeout | KernelError::Internal)
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Validation error"),
            KernelError::NotFound => write!(f, "Entity not found"),
            KernelError::Conflict => write!(f, "Conflicting entity state"),
            KernelError::Unauthorized => write!(f, "Authentication required"),
            KernelError::Forbidden => write!(f, "Permission denied"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

/// Client facing description attached to a [`KernelError`] report.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ErrorMessage(String);

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl AsRef<str> for ErrorMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait KernelErrorExt {
    fn with_message(self, message: impl Into<String>) -> Self;
}

impl KernelErrorExt for error_stack::Report<KernelError> {
    fn with_message(self, message: impl Into<String>) -> Self {
        self.attach_printable(ErrorMessage::new(message))
    }
}

pub fn fail(kind: KernelError, message: impl Into<String>) -> error_stack::Report<KernelError> {
    error_stack::Report::new(kind).with_message(message)
}
