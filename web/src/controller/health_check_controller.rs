use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// GET service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API name and version")
    )
)]
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Tonish API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API router is up and responding to requests", body = String),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "healthy")
}
