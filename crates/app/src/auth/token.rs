//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the user UUID and role. Verification is
//! stateless; revocation is handled by account deactivation, which is
//! checked wherever the account itself is loaded.

use std::fmt;

use jiff::Timestamp;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::{
    auth::models::Actor,
    domain::users::models::{Role, UserUuid},
};

/// Default token lifetime.
pub const DEFAULT_TTL_DAYS: u32 = 7;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("session token has expired")]
    Expired,

    #[error("session token is invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign session token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user UUID.
    sub: Uuid,
    role: Role,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_days: u32,
}

impl TokenSigner {
    /// Build a signer from the shared secret, consuming and wiping it.
    #[must_use]
    pub fn from_secret(mut secret: String, ttl_days: u32) -> Self {
        let signer = Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_days,
        };

        secret.zeroize();

        signer
    }

    /// Issue a token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error when signing fails.
    pub fn issue(&self, user: UserUuid, role: Role) -> Result<String, TokenError> {
        let now = Timestamp::now().as_second();

        let claims = Claims {
            sub: user.into_uuid(),
            role,
            iat: now,
            exp: now + i64::from(self.ttl_days) * SECONDS_PER_DAY,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)
    }

    /// Verify a token and decode the actor it carries.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] past the expiry instant and
    /// [`TokenError::Invalid`] for every other defect (bad signature,
    /// malformed payload, wrong algorithm).
    pub fn verify(&self, token: &str) -> Result<Actor, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|error| match error.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(error),
            })?;

        Ok(Actor::new(
            UserUuid::from_uuid(data.claims.sub),
            data.claims.role,
        ))
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl_days", &self.ttl_days)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::from_secret("test-secret".to_string(), DEFAULT_TTL_DAYS)
    }

    #[test]
    fn issue_then_verify_round_trip() -> TestResult {
        let signer = signer();
        let user = UserUuid::new();

        let token = signer.issue(user, Role::Admin)?;
        let actor = signer.verify(&token)?;

        assert_eq!(actor.user, user);
        assert_eq!(actor.role, Role::Admin);

        Ok(())
    }

    #[test]
    fn garbage_token_is_invalid() {
        let result = signer().verify("not.a.token");

        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn token_signed_with_other_secret_rejected() -> TestResult {
        let other = TokenSigner::from_secret("other-secret".to_string(), DEFAULT_TTL_DAYS);
        let token = other.issue(UserUuid::new(), Role::User)?;

        let result = signer().verify(&token);

        assert!(matches!(result, Err(TokenError::Invalid(_))));

        Ok(())
    }
}
