pub(crate) mod authenticated_user;
pub(crate) mod optional_user;

use crate::error::Rejection;
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use domain::error::{DomainErrorKind, InternalErrorKind};
use domain::jwt::{self, Claims};
use log::*;
use service::config::Config;

/// Reads `Authorization: Bearer <token>` and verifies the token.
pub(crate) fn verified_claims(headers: &HeaderMap, config: &Config) -> Result<Claims, Rejection> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(Rejection::unauthorized("Authorization header required"))?;

    let token = header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or(Rejection::unauthorized("Invalid authorization header format"))?;

    jwt::verify_token(config, token).map_err(|err| match err.error_kind {
        DomainErrorKind::Internal(InternalErrorKind::Config(_)) => {
            error!("Cannot verify tokens: {err}");
            Rejection {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Internal server error",
            }
        }
        _ => Rejection::unauthorized("Invalid or expired token"),
    })
}

fn bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use clap::Parser;

    fn config() -> Config {
        Config::try_parse_from(["tonish"])
            .unwrap()
            .set_jwt_secret("extractor-secret".to_owned())
    }

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(authorization).unwrap());
        headers
    }

    #[test]
    fn bearer_token_needs_exactly_two_parts() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer abc"), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer a b"), None);
    }

    #[test]
    fn missing_header_is_reported() {
        let rejection = verified_claims(&HeaderMap::new(), &config()).unwrap_err();
        assert_eq!(rejection.status, StatusCode::UNAUTHORIZED);
        assert_eq!(rejection.message, "Authorization header required");
    }

    #[test]
    fn malformed_header_is_reported() {
        let rejection = verified_claims(&headers("Token abc"), &config()).unwrap_err();
        assert_eq!(rejection.message, "Invalid authorization header format");
    }

    #[test]
    fn bad_token_is_reported() {
        let rejection = verified_claims(&headers("Bearer not-a-jwt"), &config()).unwrap_err();
        assert_eq!(rejection.message, "Invalid or expired token");
    }

    #[test]
    fn missing_secret_is_a_server_error() {
        let config = Config::try_parse_from(["tonish"]).unwrap();
        let rejection = verified_claims(&headers("Bearer not-a-jwt"), &config).unwrap_err();
        assert_eq!(rejection.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
