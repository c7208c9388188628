//! Password hashing and access tokens, implemented by the driver.

use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::{PasswordHash, Role, UserId};
use crate::KernelError;

pub trait PasswordHasher: Sync + Send + 'static {
    fn hash(&self, password: &str) -> error_stack::Result<PasswordHash, KernelError>;

    /// `Ok(false)` for a wrong password; errors only when the stored hash
    /// cannot be read.
    fn verify(&self, password: &str, hash: &PasswordHash)
        -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnPasswordHasher: Sync + Send + 'static {
    type PasswordHasher: PasswordHasher;
    fn password_hasher(&self) -> &Self::PasswordHasher;
}

/// What a verified access token says about its bearer.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct AccessClaims {
    sub: UserId,
    role: Role,
    iat: i64,
    exp: i64,
}

impl AccessClaims {
    pub fn new(sub: UserId, role: Role, iat: i64, exp: i64) -> Self {
        Self { sub, role, iat, exp }
    }
}

pub trait TokenCodec: Sync + Send + 'static {
    fn issue(&self, user: &UserId, role: Role) -> error_stack::Result<String, KernelError>;

    /// Fails with [`KernelError::Unauthorized`] for a malformed, forged or
    /// expired token.
    fn verify(&self, token: &str) -> error_stack::Result<AccessClaims, KernelError>;
}

pub trait DependOnTokenCodec: Sync + Send + 'static {
    type TokenCodec: TokenCodec;
    fn token_codec(&self) -> &Self::TokenCodec;
}
