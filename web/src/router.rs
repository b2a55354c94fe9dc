use crate::{controller::health_check_controller, middleware::auth::require_auth, params, AppState};
use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::controller::{
    ai_controller, notebook_controller, page_controller, task_controller, user_controller,
    user_session_controller,
};
use crate::ws::handler::ws_handler;

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Tonish API"
        ),
        paths(
            health_check_controller::index,
            health_check_controller::health_check,
            task_controller::index,
            task_controller::archived,
            task_controller::by_status,
            task_controller::by_quadrant,
            task_controller::read,
            task_controller::create,
            task_controller::update,
            task_controller::delete,
            task_controller::archive,
            task_controller::restore,
            task_controller::delete_permanently,
            notebook_controller::index,
            notebook_controller::read,
            notebook_controller::create,
            notebook_controller::update,
            notebook_controller::delete,
            page_controller::search,
            page_controller::read,
            page_controller::create,
            page_controller::update,
            page_controller::delete,
            ai_controller::enhance_task,
            ai_controller::suggest_breakdown,
            ai_controller::analyze_notebook,
            ai_controller::generate_page_ideas,
            ai_controller::health,
            user_session_controller::login,
            user_session_controller::register,
            user_controller::me,
        ),
        components(
            schemas(
                domain::tasks::Model,
                domain::notebooks::Model,
                domain::notebooks::NotebookWithPages,
                domain::pages::Model,
                domain::priority::Priority,
                domain::task_status::TaskStatus,
                domain::user::Credentials,
                domain::user::Session,
                domain::user::SessionUser,
                params::task::UpdateParams,
                params::notebook::UpdateParams,
                params::page::UpdateParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "tonish", description = "Tonish task and notebook API")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines the bearer token requirement for gaining access to our API endpoints
// for OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned from a successful login"))
                        .build(),
                ),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(user_session_routes(app_state.clone()))
        .merge(user_routes(app_state.clone()))
        .merge(task_routes(app_state.clone()))
        .merge(notebook_routes(app_state.clone()))
        .merge(page_routes(app_state.clone()))
        .merge(ai_routes(app_state.clone()))
        .merge(ws_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new()
        .route("/", get(health_check_controller::index))
        .route("/health", get(health_check_controller::health_check))
}

fn user_session_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(user_session_controller::login))
        .route("/api/auth/register", post(user_session_controller::register))
        .with_state(app_state)
}

fn user_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/user/me", get(user_controller::me))
        .with_state(app_state)
}

fn task_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/tasks",
            get(task_controller::index).post(task_controller::create),
        )
        .route("/api/tasks/archived", get(task_controller::archived))
        .route("/api/tasks/status", get(task_controller::by_status))
        .route(
            "/api/tasks/quadrant/{quadrant}",
            get(task_controller::by_quadrant),
        )
        .route("/api/tasks/{id}", get(task_controller::read))
        .route("/api/tasks/{id}", put(task_controller::update))
        .route("/api/tasks/{id}", delete(task_controller::delete))
        .route("/api/tasks/{id}/archive", post(task_controller::archive))
        .route("/api/tasks/{id}/restore", post(task_controller::restore))
        .route(
            "/api/tasks/{id}/permanent",
            delete(task_controller::delete_permanently),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn notebook_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/notebooks",
            get(notebook_controller::index).post(notebook_controller::create),
        )
        .route("/api/notebooks/{id}", get(notebook_controller::read))
        .route("/api/notebooks/{id}", put(notebook_controller::update))
        .route("/api/notebooks/{id}", delete(notebook_controller::delete))
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn page_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/pages", post(page_controller::create))
        .route("/api/pages/search", get(page_controller::search))
        .route("/api/pages/{id}", get(page_controller::read))
        .route("/api/pages/{id}", put(page_controller::update))
        .route("/api/pages/{id}", delete(page_controller::delete))
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        .with_state(app_state)
}

fn ai_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/ai/tasks/enhance", post(ai_controller::enhance_task))
        .route(
            "/api/ai/tasks/breakdown",
            post(ai_controller::suggest_breakdown),
        )
        .route(
            "/api/ai/notebooks/{id}/analyze",
            post(ai_controller::analyze_notebook),
        )
        .route(
            "/api/ai/notebooks/{id}/page-ideas",
            post(ai_controller::generate_page_ideas),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_auth))
        // health stays reachable without a token
        .route("/api/ai/health", get(ai_controller::health))
        .with_state(app_state)
}

fn ws_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(app_state)
}
