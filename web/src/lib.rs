use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
    HeaderValue, Method,
};
use hub::Hub;
use log::*;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub use error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod middleware;
mod params;
mod router;
mod ws;

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let server_url = format!(
        "{}:{}",
        app_state.config.interface, app_state.config.port
    );
    let cors_layer = cors_layer(&app_state.config.allowed_origins);
    let hub = app_state.hub.clone();

    let listener = TcpListener::bind(&server_url).await?;
    info!("Server starting... listening for connections on http://{server_url}");

    axum::serve(listener, router::define_routes(app_state).layer(cors_layer))
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c(), hub))
        .await
}

/// Resolves once `signal` fires, after disconnecting live clients. When the
/// signal cannot be listened for it never resolves, so the server keeps running.
async fn shutdown_signal(
    signal: impl std::future::Future<Output = std::io::Result<()>>,
    hub: Hub,
) {
    if let Err(e) = signal.await {
        error!("Failed to listen for the shutdown signal, graceful shutdown disabled: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, disconnecting live clients");
    hub.shutdown();
}

/// Configured origins may send credentials; without any, every origin is
/// allowed and credentials are not.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ORIGIN, CONTENT_TYPE, ACCEPT, AUTHORIZATION]);

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring unusable CORS origin: {origin}");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header::ACCESS_CONTROL_ALLOW_CREDENTIALS, Request, StatusCode};
    use axum::{routing::get, Router};
    use tower::ServiceExt;

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .header(ORIGIN, origin)
            .header("access-control-request-method", "GET")
            .body(Body::empty())
            .unwrap()
    }

    fn app(allowed_origins: &[String]) -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(cors_layer(allowed_origins))
    }

    #[tokio::test]
    async fn failing_signal_listener_never_triggers_shutdown() {
        let (hub, _hub_loop) = Hub::new();
        let signal = async { Err(std::io::Error::other("no signal handler")) };

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            shutdown_signal(signal, hub),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn delivered_signal_triggers_shutdown() {
        let (hub, _hub_loop) = Hub::new();

        tokio::time::timeout(
            std::time::Duration::from_secs(1),
            shutdown_signal(async { Ok(()) }, hub),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn configured_origin_may_send_credentials() {
        let response = app(&["http://localhost:5173".to_owned()])
            .oneshot(preflight("http://localhost:5173"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:5173"
        );
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn without_configured_origins_anyone_may_call_without_credentials() {
        let response = app(&[])
            .oneshot(preflight("http://elsewhere.test"))
            .await
            .unwrap();

        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert!(response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .is_none());
    }
}
