use kernel::KernelError;

use crate::error::ConvertError;

pub mod auth;
pub mod config;
pub mod database;
pub mod error;

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key).convert_error()
}

/// `None` when the variable is not set at all.
pub(crate) fn optional_env(key: &str) -> error_stack::Result<Option<String>, KernelError> {
    match dotenvy::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(error) => Err(error).convert_error(),
    }
}
