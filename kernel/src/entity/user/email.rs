use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{fail, KernelError};

/// Stored trimmed and lowercased, so lookups by email are exact matches.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let email = email.into().trim().to_lowercase();
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(fail(
                KernelError::Validation,
                "Please provide a valid email address.",
            ));
        }
        Ok(Self(email))
    }
}
