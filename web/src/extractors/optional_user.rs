use crate::extractors::verified_claims;
use crate::AppState;
use axum::{extract::FromRequestParts, http::request::Parts};
use domain::jwt::Claims;
use domain::Id;
use log::*;
use std::convert::Infallible;

/// Owner of anything created without a token.
pub(crate) const ANONYMOUS_OWNER: Id = 0;

/// Claims of the bearer token when the request carries a valid one.
///
/// Never rejects: a missing or invalid token just means an anonymous caller.
/// Claims already verified by the `require_auth` middleware are reused.
pub(crate) struct OptionalUser(pub Option<Claims>);

impl OptionalUser {
    pub(crate) fn owner_id(&self) -> Id {
        self.0
            .as_ref()
            .map_or(ANONYMOUS_OWNER, |claims| claims.user_id)
    }
}

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(OptionalUser(Some(claims.clone())));
        }

        if parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
            match verified_claims(&parts.headers, &state.config) {
                Ok(claims) => return Ok(OptionalUser(Some(claims))),
                Err(rejection) => {
                    debug!("Ignoring unusable token: {}", rejection.message)
                }
            }
        }

        Ok(OptionalUser(None))
    }
}
