use crate::entity::{Document, UserId};
use crate::{fail, KernelError};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::{AsRefln, Fromln, References};

/// Encoded password hash (PHC string format).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }
}

/// A password as typed by the user, checked against its confirmation.
/// Never stored; only its hash is.
pub struct PlainPassword(String);

impl PlainPassword {
    pub const MIN_LENGTH: usize = 8;

    pub fn new(
        password: impl Into<String>,
        confirm: &str,
    ) -> error_stack::Result<Self, KernelError> {
        let password = password.into();
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(fail(
                KernelError::Validation,
                "Password must be atleast 8 characters long",
            ));
        }
        if password != confirm {
            return Err(fail(KernelError::Validation, "Passwords do not match"));
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for PlainPassword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Login secret of a [`User`](crate::entity::User), keyed by the user's id.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    id: UserId,
    password: PasswordHash,
    #[serde(with = "time::serde::rfc3339::option")]
    password_changed_at: Option<OffsetDateTime>,
    active: bool,
}

impl Credential {
    pub fn new(
        id: UserId,
        password: PasswordHash,
        password_changed_at: Option<OffsetDateTime>,
        active: bool,
    ) -> Self {
        Self {
            id,
            password,
            password_changed_at,
            active,
        }
    }

    /// Whether the password changed after a token issued at `issued_at`
    /// (unix seconds). Such tokens are no longer honoured.
    pub fn changed_password_after(&self, issued_at: i64) -> bool {
        self.password_changed_at
            .map(|changed| issued_at < changed.unix_timestamp())
            .unwrap_or(false)
    }
}

impl Document for Credential {
    type Id = UserId;
    const COLLECTION: &'static str = "credentials";

    fn document_id(&self) -> &Self::Id {
        &self.id
    }
}
