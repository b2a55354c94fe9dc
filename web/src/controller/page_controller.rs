use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::params::page::{SearchParams, UpdateParams};
use crate::{AppState, Error};
use domain::{page as PageApi, pages::Model, Id};
use log::*;

/// GET Pages whose title or content contains `q`
#[utoipa::path(
    get,
    path = "/api/pages/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Successfully searched Pages", body = [domain::pages::Model]),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET search Pages for: {:?}", params.q);

    let pages = PageApi::search(app_state.db_conn_ref(), &params.q).await?;

    Ok(Json(pages))
}

#[utoipa::path(
    get,
    path = "/api/pages/{id}",
    params(
        ("id" = Id, Path, description = "Page id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a Page", body = domain::pages::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Page not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Page by id: {id}");

    let page = PageApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(page))
}

/// POST create a new Page inside an existing Notebook
#[utoipa::path(
    post,
    path = "/api/pages",
    request_body = domain::pages::Model,
    responses(
        (status = 201, description = "Successfully Created a New Page", body = domain::pages::Model),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "The Notebook does not exist"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(page_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Page in Notebook {}", page_model.notebook_id);

    let page = PageApi::create(app_state.db_conn_ref(), &app_state.event_publisher, page_model)
        .await?;

    Ok((StatusCode::CREATED, Json(page)))
}

#[utoipa::path(
    put,
    path = "/api/pages/{id}",
    params(
        ("id" = Id, Path, description = "Id of page to update"),
    ),
    request_body = crate::params::page::UpdateParams,
    responses(
        (status = 200, description = "Successfully Updated Page", body = domain::pages::Model),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Page not found"),
        (status = 422, description = "The target Notebook does not exist"),
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
    debug!("PUT Update Page with id: {id}");

    let page =
        PageApi::update(app_state.db_conn_ref(), &app_state.event_publisher, id, params).await?;

    Ok(Json(page))
}

#[utoipa::path(
    delete,
    path = "/api/pages/{id}",
    params(
        ("id" = Id, Path, description = "Page id to delete")
    ),
    responses(
        (status = 204, description = "Successfully deleted a Page"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Page not found"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Page by id: {id}");

    PageApi::delete(app_state.db_conn_ref(), &app_state.event_publisher, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
