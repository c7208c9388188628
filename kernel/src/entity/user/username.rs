use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::bounded_text;
use crate::{fail, KernelError};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Username(String);

impl Username {
    pub fn new(username: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let username = bounded_text(username.into(), "A username", 1, 64)?;
        if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(fail(KernelError::Validation, "Username is invalid"));
        }
        Ok(Self(username))
    }
}
