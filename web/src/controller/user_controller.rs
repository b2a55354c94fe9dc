use crate::extractors::authenticated_user::AuthenticatedUser;
use axum::{response::IntoResponse, Json};
use domain::user::SessionUser;

use log::*;

/// GET the user the bearer token belongs to
#[utoipa::path(
    get,
    path = "/api/user/me",
    responses(
        (status = 200, description = "The current user", body = domain::user::SessionUser),
        (status = 401, description = "Missing, malformed or expired token"),
        (status = 404, description = "User not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn me(AuthenticatedUser(user): AuthenticatedUser) -> impl IntoResponse {
    debug!("GET current user {}", user.id);

    Json(SessionUser::from(&user))
}
