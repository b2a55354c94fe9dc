use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::{AppState, Error};
use domain::gateway::ollama::OllamaClient;
use domain::{assist as AssistApi, tasks::Model, Id};
use log::*;

/// POST ask the model to improve a Task
#[utoipa::path(
    post,
    path = "/api/ai/tasks/enhance",
    request_body = domain::tasks::Model,
    responses(
        (status = 200, description = "Suggested improvements next to the original Task"),
        (status = 500, description = "The model reply was not usable JSON"),
        (status = 502, description = "The model server failed or could not be reached"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn enhance_task(
    State(app_state): State<AppState>,
    Json(task): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST enhance Task: {}", task.title);

    let client = OllamaClient::new(&app_state.config)?;
    let result = AssistApi::enhance_task(&client, task).await?;

    Ok(Json(result))
}

/// POST ask the model to split a Task into subtasks
#[utoipa::path(
    post,
    path = "/api/ai/tasks/breakdown",
    request_body = domain::tasks::Model,
    responses(
        (status = 200, description = "Suggested subtasks"),
        (status = 500, description = "The model reply was not usable JSON"),
        (status = 502, description = "The model server failed or could not be reached"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn suggest_breakdown(
    State(app_state): State<AppState>,
    Json(task): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST break down Task: {}", task.title);

    let client = OllamaClient::new(&app_state.config)?;
    let result = AssistApi::suggest_breakdown(&client, &task).await?;

    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/ai/notebooks/{id}/analyze",
    params(
        ("id" = Id, Path, description = "Notebook id to analyze")
    ),
    responses(
        (status = 200, description = "Summary, topics and insights for the Notebook"),
        (status = 404, description = "Notebook not found"),
        (status = 500, description = "The model reply was not usable JSON"),
        (status = 502, description = "The model server failed or could not be reached"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn analyze_notebook(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST analyze Notebook {id}");

    let client = OllamaClient::new(&app_state.config)?;
    let result = AssistApi::analyze_notebook(app_state.db_conn_ref(), &client, id).await?;

    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/ai/notebooks/{id}/page-ideas",
    params(
        ("id" = Id, Path, description = "Notebook id to suggest pages for")
    ),
    responses(
        (status = 200, description = "Ideas for new Pages"),
        (status = 404, description = "Notebook not found"),
        (status = 500, description = "The model reply was not usable JSON"),
        (status = 502, description = "The model server failed or could not be reached"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn generate_page_ideas(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST page ideas for Notebook {id}");

    let client = OllamaClient::new(&app_state.config)?;
    let result = AssistApi::generate_page_ideas(app_state.db_conn_ref(), &client, id).await?;

    Ok(Json(result))
}

/// GET whether the model server is reachable
#[utoipa::path(
    get,
    path = "/api/ai/health",
    responses(
        (status = 200, description = "Model server reachable; reports model and URL"),
        (status = 503, description = "Model server unavailable"),
    )
)]
pub async fn health(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let client = OllamaClient::new(&app_state.config)?;

    let response = match AssistApi::health(&client).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "model": client.model(),
                "url": client.base_url(),
            })),
        ),
        Err(e) => {
            warn!("AI health check failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "error": e.to_string() })),
            )
        }
    };

    Ok(response)
}
