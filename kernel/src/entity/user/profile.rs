use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::bounded_text;
use crate::{fail, KernelError};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct UserPhone(String);

impl UserPhone {
    pub fn new(phone: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text(phone.into(), "A phone number", 5, 32).map(Self)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct UserBio(String);

impl UserBio {
    pub fn new(bio: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text(bio.into(), "A user's bio", 0, 200).map(Self)
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl Address {
    pub fn is_blank(&self) -> bool {
        self.street_address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip_code.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = error_stack::Report<KernelError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(fail(
                KernelError::Validation,
                format!("`{other}` is not a role (user, admin)"),
            )),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Photo(String);

impl Photo {
    pub fn new(photo: impl Into<String>) -> Self {
        Self(photo.into())
    }
}

impl Default for Photo {
    fn default() -> Self {
        Self::new("default.jpg")
    }
}
