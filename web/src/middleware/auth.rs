use crate::extractors::verified_claims;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Rejects requests without a valid bearer token when `require_auth` is on.
///
/// Verified claims are stored in the request extensions for the handlers.
/// With `require_auth` off every request passes through untouched.
pub async fn require_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if !app_state.config.require_auth {
        return next.run(request).await;
    }

    match verified_claims(request.headers(), &app_state.config) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(rejection) => rejection.into_response(),
    }
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use crate::error::body_json;
    use crate::extractors::optional_user::OptionalUser;
    use crate::test_support::app_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use chrono::Utc;
    use clap::Parser;
    use domain::{jwt, users};
    use serde_json::json;
    use service::config::Config;
    use tower::ServiceExt;

    async fn owner(user: OptionalUser) -> String {
        user.owner_id().to_string()
    }

    fn app(config: Config) -> Router {
        let app_state = app_state(config);
        Router::new()
            .route("/test", get(owner))
            .route_layer(from_fn_with_state(app_state.clone(), require_auth))
            .with_state(app_state)
    }

    fn config(require_auth: &str) -> Config {
        Config::try_parse_from(["tonish", "--require-auth", require_auth])
            .unwrap()
            .set_jwt_secret("middleware-secret".to_owned())
    }

    fn token_for(config: &Config, id: domain::Id) -> String {
        let now = Utc::now();
        let user = users::Model {
            id,
            email: "owner@example.com".to_owned(),
            password: String::new(),
            name: "Owner".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        };
        jwt::issue_token(config, &user).unwrap()
    }

    #[tokio::test]
    async fn open_mode_lets_anonymous_requests_through() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

        let response = app(config("false")).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn required_auth_rejects_a_missing_token() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

        let response = app(config("true")).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Authorization header required"})
        );
    }

    #[tokio::test]
    async fn required_auth_passes_the_token_owner_on() {
        let config = config("true");
        let request = Request::builder()
            .uri("/test")
            .header("authorization", format!("Bearer {}", token_for(&config, 42)))
            .body(Body::empty())
            .unwrap();

        let response = app(config).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], b"42");
    }
}
