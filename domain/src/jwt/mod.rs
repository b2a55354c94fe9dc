//! Issuing and verifying the HS256 tokens handed out at login.
//!
//! Tokens are signed with the configured `JWT_SECRET`. Without a secret no
//! token can be issued or verified; both operations fail with a configuration
//! error instead of falling back to a default key.
//!
//! # Example
//!
//! ```rust,no_run
//! use domain::jwt;
//! use service::config::Config;
//!
//! fn example(config: &Config, user: &domain::users::Model) {
//!     let token = jwt::issue_token(config, user).unwrap();
//!     let claims = jwt::verify_token(config, &token).unwrap();
//!     assert_eq!(claims.user_id, user.id);
//! }
//! ```

use crate::error::Error;
use crate::users;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::*;
use service::config::Config;

pub use claims::Claims;

mod claims;

/// Signs a token for `user` that expires after the configured lifetime.
pub fn issue_token(config: &Config, user: &users::Model) -> Result<String, Error> {
    let secret = signing_secret(config)?;
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();

    let claims = Claims {
        user_id: user.id,
        email: user.email.clone(),
        exp: now + config.jwt_expiry_seconds,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Checks the signature and expiry of `token` and returns its claims.
pub fn verify_token(config: &Config, token: &str) -> Result<Claims, Error> {
    let secret = signing_secret(config)?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|token_data| token_data.claims)
    .map_err(|err| {
        debug!("Rejected token: {err}");
        let mut error = Error::unauthenticated();
        error.source = Some(Box::new(err));
        error
    })
}

fn signing_secret(config: &Config) -> Result<&str, Error> {
    match config.jwt_secret() {
        Some(secret) if !secret.is_empty() => Ok(secret),
        _ => {
            warn!("JWT_SECRET is not configured");
            Err(Error::config("JWT_SECRET is not set"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, EntityErrorKind, InternalErrorKind};
    use clap::Parser;

    fn config() -> Config {
        Config::try_parse_from(["tonish"])
            .unwrap()
            .set_jwt_secret("test-secret".to_owned())
    }

    fn user() -> users::Model {
        let now = Utc::now();
        users::Model {
            id: 12,
            email: "me@example.com".to_owned(),
            password: String::new(),
            name: "Me".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn issued_token_verifies_with_the_same_secret() {
        let config = config();

        let token = issue_token(&config, &user()).unwrap();
        let claims = verify_token(&config, &token).unwrap();

        assert_eq!(claims.user_id, 12);
        assert_eq!(claims.email, "me@example.com");
        assert!(claims.exp > u64::try_from(Utc::now().timestamp()).unwrap());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = issue_token(&config(), &user()).unwrap();
        let other = config().set_jwt_secret("another-secret".to_owned());

        let err = verify_token(&other, &token).unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Unauthenticated))
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config();
        let claims = Claims {
            user_id: 1,
            email: "old@example.com".to_owned(),
            exp: 1_000,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(verify_token(&config, &token).is_err());
    }

    #[test]
    fn missing_secret_is_a_config_error() {
        let config = Config::try_parse_from(["tonish"]).unwrap();
        if config.jwt_secret().is_some() {
            // JWT_SECRET is set in this environment
            return;
        }

        let err = issue_token(&config, &user()).unwrap_err();

        assert!(matches!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config(_))
        ));
    }
}
