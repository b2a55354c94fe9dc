use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domain::error::{
    DomainErrorKind, EntityErrorKind, Error as DomainError, ExternalErrorKind, InternalErrorKind,
};

use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{}", self.0)
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let description = self.0.to_string();
        match self.0.error_kind {
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Entity(entity_error_kind) => match entity_error_kind {
                    EntityErrorKind::NotFound => error_body(StatusCode::NOT_FOUND, "Not found"),
                    EntityErrorKind::Invalid => {
                        error_body(StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable entity")
                    }
                    EntityErrorKind::Unauthenticated => {
                        error_body(StatusCode::UNAUTHORIZED, "Invalid credentials")
                    }
                    EntityErrorKind::DbTransaction | EntityErrorKind::Other(_) => {
                        error!("Database error: {description}");
                        error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                    }
                },
                InternalErrorKind::Config(_) | InternalErrorKind::Other(_) => {
                    error!("Internal error: {description}");
                    error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
            DomainErrorKind::External(external_error_kind) => match external_error_kind {
                ExternalErrorKind::Network | ExternalErrorKind::Other(_) => {
                    warn!("AI request failed: {description}");
                    error_body(
                        StatusCode::BAD_GATEWAY,
                        format!("AI processing failed: {description}"),
                    )
                }
                ExternalErrorKind::InvalidResponse(raw) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to parse AI response", "raw": raw })),
                )
                    .into_response(),
            },
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Rejection used by the auth extractors and middleware: a status code and a
/// JSON `{"error": ..}` body.
#[derive(Debug)]
pub(crate) struct Rejection {
    pub(crate) status: StatusCode,
    pub(crate) message: &'static str,
}

impl Rejection {
    pub(crate) fn unauthorized(message: &'static str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message,
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        error_body(self.status, self.message)
    }
}

#[cfg(test)]
pub(crate) async fn body_json(response: Response) -> serde_json::Value {
    use http_body_util::BodyExt;

    let bytes = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
