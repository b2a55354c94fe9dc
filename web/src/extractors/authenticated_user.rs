use crate::error::Rejection;
use crate::extractors::verified_claims;
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use domain::error::{DomainErrorKind, EntityErrorKind, InternalErrorKind};
use domain::{user as UserApi, users};
use log::*;

/// The user named by a valid bearer token. Rejects with 401 when the token is
/// missing or invalid and with 404 when its user no longer exists.
pub(crate) struct AuthenticatedUser(pub users::Model);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = Rejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = verified_claims(&parts.headers, &state.config)?;

        match UserApi::find_by_id(state.db_conn_ref(), claims.user_id).await {
            Ok(user) => Ok(AuthenticatedUser(user)),
            Err(err) => match domain::error::Error::from(err).error_kind {
                DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound)) => {
                    Err(Rejection {
                        status: StatusCode::NOT_FOUND,
                        message: "User not found",
                    })
                }
                kind => {
                    error!("Failed to load user {}: {kind:?}", claims.user_id);
                    Err(Rejection {
                        status: StatusCode::INTERNAL_SERVER_ERROR,
                        message: "Internal server error",
                    })
                }
            },
        }
    }
}
