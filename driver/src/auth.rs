use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use error_stack::Report;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};

use kernel::interface::auth::{AccessClaims, PasswordHasher, TokenCodec};
use kernel::prelude::entity::{PasswordHash, Role, UserId};
use kernel::{fail, KernelError, KernelErrorExt};

use crate::config::{token_lifetime, token_secret};

/// Argon2id with the crate's default parameters and a fresh salt per hash.
#[derive(Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> error_stack::Result<PasswordHash, KernelError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|error| {
                Report::new(KernelError::Internal).with_message(format!("failed to hash password: {error}"))
            })?;
        Ok(PasswordHash::new(hash.to_string()))
    }

    fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> error_stack::Result<bool, KernelError> {
        let parsed = password_hash::PasswordHash::new(hash.as_ref()).map_err(|error| {
            Report::new(KernelError::Internal).with_message(format!("unreadable password hash: {error}"))
        })?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(error) => Err(Report::new(KernelError::Internal)
                .with_message(format!("failed to verify password: {error}"))),
        }
    }
}

/// HS256 access tokens carrying [`AccessClaims`].
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl JwtTokenCodec {
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            lifetime,
        }
    }

    /// Reads `JWT_SECRET` and `JWT_EXPIRES_IN`. Without a secret a random
    /// one is generated, so tokens do not survive a restart.
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let lifetime = token_lifetime()?;
        match token_secret()? {
            Some(secret) => Ok(Self::new(secret.as_bytes(), lifetime)),
            None => {
                tracing::warn!("JWT_SECRET is not set, signing with a random per-process secret");
                Ok(Self::new(uuid::Uuid::new_v4().as_bytes(), lifetime))
            }
        }
    }
}

impl Default for JwtTokenCodec {
    fn default() -> Self {
        let secret = uuid::Uuid::new_v4();
        Self::new(secret.as_bytes(), Duration::days(90))
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user: &UserId, role: Role) -> error_stack::Result<String, KernelError> {
        let now = OffsetDateTime::now_utc();
        let claims = AccessClaims::new(
            user.clone(),
            role,
            now.unix_timestamp(),
            (now + self.lifetime).unix_timestamp(),
        );
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|error| {
            Report::from(error)
                .change_context(KernelError::Internal)
                .with_message("failed to sign access token")
        })
    }

    fn verify(&self, token: &str) -> error_stack::Result<AccessClaims, KernelError> {
        let validation = Validation::new(Algorithm::HS256);
        match decode::<AccessClaims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(error) => {
                let message = match error.kind() {
                    ErrorKind::ExpiredSignature => "Your token has expired! Please log in again.",
                    _ => "Invalid token. Please log in again!",
                };
                Err(fail(KernelError::Unauthorized, message))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::auth::{PasswordHasher, TokenCodec};
    use kernel::prelude::entity::{PasswordHash, Role, UserId};
    use kernel::KernelError;
    use time::Duration;

    use super::{Argon2Hasher, JwtTokenCodec};

    #[test]
    fn hash_verifies_only_the_hashed_password() -> error_stack::Result<(), KernelError> {
        let hash = Argon2Hasher.hash("pass1234")?;
        assert_ne!(hash.as_ref(), "pass1234");
        assert!(Argon2Hasher.verify("pass1234", &hash)?);
        assert!(!Argon2Hasher.verify("pass12345", &hash)?);

        let report = Argon2Hasher
            .verify("pass1234", &PasswordHash::new("plain text"))
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
        Ok(())
    }

    #[test]
    fn issued_token_round_trips_its_claims() -> error_stack::Result<(), KernelError> {
        let codec = JwtTokenCodec::new(b"secret", Duration::hours(1));
        let user = UserId::new(uuid::Uuid::new_v4());
        let token = codec.issue(&user, Role::Admin)?;
        let claims = codec.verify(&token)?;
        assert_eq!(claims.sub(), &user);
        assert_eq!(claims.role(), &Role::Admin);
        assert_eq!(claims.exp() - claims.iat(), 3600);
        Ok(())
    }

    #[test]
    fn foreign_or_expired_tokens_are_unauthorized() -> error_stack::Result<(), KernelError> {
        let user = UserId::new(uuid::Uuid::new_v4());
        let token = JwtTokenCodec::new(b"other", Duration::hours(1)).issue(&user, Role::User)?;
        let codec = JwtTokenCodec::new(b"secret", Duration::hours(1));
        let report = codec.verify(&token).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Unauthorized);

        let expired = JwtTokenCodec::new(b"secret", Duration::hours(-2)).issue(&user, Role::User)?;
        let report = codec.verify(&expired).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Unauthorized);

        assert!(codec.verify("not-a-token").is_err());
        Ok(())
    }
}
