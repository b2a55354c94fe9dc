use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::extractors::optional_user::OptionalUser;
use crate::params::notebook::UpdateParams;
use crate::{AppState, Error};
use domain::{notebook as NotebookApi, notebooks::Model, Id};
use log::*;

/// GET all Notebooks, each with its pages.
#[utoipa::path(
    get,
    path = "/api/notebooks",
    responses(
        (status = 200, description = "Successfully retrieved all Notebooks", body = [domain::notebooks::NotebookWithPages]),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    debug!("GET all Notebooks");

    let notebooks = NotebookApi::find_all(app_state.db_conn_ref()).await?;

    Ok(Json(notebooks))
}

#[utoipa::path(
    get,
    path = "/api/notebooks/{id}",
    params(
        ("id" = Id, Path, description = "Notebook id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a Notebook with its pages", body = domain::notebooks::NotebookWithPages),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notebook not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Notebook by id: {id}");

    let notebook = NotebookApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(notebook))
}

/// POST create a new, empty Notebook owned by the caller
#[utoipa::path(
    post,
    path = "/api/notebooks",
    request_body = domain::notebooks::Model,
    responses(
        (status = 201, description = "Successfully Created a New Notebook", body = domain::notebooks::NotebookWithPages),
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
    Json(notebook_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Notebook from: {notebook_model:?}");

    let notebook = NotebookApi::create(
        app_state.db_conn_ref(),
        &app_state.event_publisher,
        notebook_model,
        user.owner_id(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(notebook)))
}

#[utoipa::path(
    put,
    path = "/api/notebooks/{id}",
    params(
        ("id" = Id, Path, description = "Id of notebook to update"),
    ),
    request_body = crate::params::notebook::UpdateParams,
    responses(
        (status = 200, description = "Successfully Updated Notebook", body = domain::notebooks::NotebookWithPages),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notebook not found"),
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
    debug!("PUT Update Notebook with id: {id}");

    let notebook =
        NotebookApi::update(app_state.db_conn_ref(), &app_state.event_publisher, id, params)
            .await?;

    Ok(Json(notebook))
}

/// DELETE a Notebook together with all of its pages
#[utoipa::path(
    delete,
    path = "/api/notebooks/{id}",
    params(
        ("id" = Id, Path, description = "Notebook id to delete")
    ),
    responses(
        (status = 204, description = "Successfully deleted a Notebook and its pages"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Notebook not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Notebook by id: {id}");

    NotebookApi::delete(app_state.db_conn_ref(), &app_state.event_publisher, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
