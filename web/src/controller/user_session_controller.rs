use crate::error::Result as WebResult;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use domain::user::{self as UserApi, Credentials};
use log::*;
use serde_json::json;

use crate::AppState;

/// Logs the user in and returns a bearer token.
///
/// Pass the token back on later requests, e.g.:
/// curl -H "Authorization: Bearer <token>" http://localhost:8080/api/user/me
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = domain::user::Credentials,
    responses(
        (status = 200, description = "Logged in, returns a token and the user", body = domain::user::Session),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Tokens cannot be issued")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> WebResult<impl IntoResponse> {
    debug!("POST login for {}", creds.email);

    let session = UserApi::login(
        app_state.db_conn_ref(),
        &app_state.config,
        &creds.email,
        &creds.password,
    )
    .await
    .inspect_err(|e| warn!("Authentication failed for {}: {e}", creds.email))?;

    Ok(Json(session))
}

/// Self-service sign up is turned off; accounts come from the configured
/// default user.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    responses(
        (status = 403, description = "Registration is disabled")
    )
)]
pub async fn register() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": "User registration is currently disabled" })),
    )
}
