use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::extractors::optional_user::OptionalUser;
use crate::params::task::{StatusParams, UpdateParams};
use crate::{AppState, Error};
use domain::{task as TaskApi, tasks::Model, Id};
use log::*;

/// GET all active Tasks, neither archived nor deleted.
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Successfully retrieved all active Tasks", body = [domain::tasks::Model]),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    debug!("GET all active Tasks");

    let tasks = TaskApi::find_all(app_state.db_conn_ref()).await?;

    Ok(Json(tasks))
}

/// GET archived, completed and deleted Tasks, most recently retired first.
#[utoipa::path(
    get,
    path = "/api/tasks/archived",
    responses(
        (status = 200, description = "Successfully retrieved retired Tasks", body = [domain::tasks::Model]),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn archived(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    debug!("GET archived Tasks");

    let tasks = TaskApi::find_archived(app_state.db_conn_ref()).await?;

    Ok(Json(tasks))
}

#[utoipa::path(
    get,
    path = "/api/tasks/status",
    params(StatusParams),
    responses(
        (status = 200, description = "Successfully retrieved active Tasks by status, none for an unknown status", body = [domain::tasks::Model]),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn by_status(
    State(app_state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Tasks by status: {:?}", params.status);

    let tasks = match params.status() {
        Ok(status) => TaskApi::find_by_status(app_state.db_conn_ref(), status).await?,
        Err(unknown) => {
            debug!("No Task can have status {unknown}");
            Vec::new()
        }
    };

    Ok(Json(tasks))
}

#[utoipa::path(
    get,
    path = "/api/tasks/quadrant/{quadrant}",
    params(
        ("quadrant" = String, Path, description = "Eisenhower matrix quadrant")
    ),
    responses(
        (status = 200, description = "Successfully retrieved active Tasks in a quadrant", body = [domain::tasks::Model]),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn by_quadrant(
    State(app_state): State<AppState>,
    Path(quadrant): Path<String>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Tasks in quadrant: {quadrant}");

    let tasks = TaskApi::find_by_quadrant(app_state.db_conn_ref(), &quadrant).await?;

    Ok(Json(tasks))
}

/// GET a particular Task specified by its id.
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(
        ("id" = Id, Path, description = "Task id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Task by its id", body = domain::tasks::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Task by id: {id}");

    let task = TaskApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(task))
}

/// POST create a new Task owned by the caller
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = domain::tasks::Model,
    responses(
        (status = 201, description = "Successfully Created a New Task", body = domain::tasks::Model),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Unprocessable Entity"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create(
    user: OptionalUser,
    State(app_state): State<AppState>,
    Json(task_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Task from: {task_model:?}");

    let task = TaskApi::create(
        app_state.db_conn_ref(),
        &app_state.event_publisher,
        task_model,
        user.owner_id(),
    )
    .await?;

    debug!("New Task: {task:?}");

    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(
        ("id" = Id, Path, description = "Id of task to update"),
    ),
    request_body = crate::params::task::UpdateParams,
    responses(
        (status = 200, description = "Successfully Updated Task", body = domain::tasks::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PUT Update Task with id: {id}");

    let task =
        TaskApi::update(app_state.db_conn_ref(), &app_state.event_publisher, id, params).await?;

    debug!("Updated Task: {task:?}");

    Ok(Json(task))
}

/// DELETE a Task. The row is kept and shows up among the archived Tasks.
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(
        ("id" = Id, Path, description = "Task id to delete")
    ),
    responses(
        (status = 204, description = "Successfully deleted a Task"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Task by id: {id}");

    TaskApi::delete(app_state.db_conn_ref(), &app_state.event_publisher, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/tasks/{id}/archive",
    params(
        ("id" = Id, Path, description = "Task id to archive")
    ),
    responses(
        (status = 200, description = "Successfully archived a Task", body = domain::tasks::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn archive(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Archive Task with id: {id}");

    let task = TaskApi::archive(app_state.db_conn_ref(), &app_state.event_publisher, id).await?;

    Ok(Json(task))
}

/// POST restore an archived, completed or deleted Task to the board
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/restore",
    params(
        ("id" = Id, Path, description = "Task id to restore")
    ),
    responses(
        (status = 200, description = "Successfully restored a Task", body = domain::tasks::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn restore(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Restore Task with id: {id}");

    let task = TaskApi::restore(app_state.db_conn_ref(), &app_state.event_publisher, id).await?;

    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}/permanent",
    params(
        ("id" = Id, Path, description = "Task id to remove for good")
    ),
    responses(
        (status = 204, description = "Successfully removed a Task"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_permanently(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Task permanently by id: {id}");

    TaskApi::delete_permanently(app_state.db_conn_ref(), &app_state.event_publisher, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
