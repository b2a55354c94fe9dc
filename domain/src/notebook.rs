use crate::error::Error;
use crate::notebooks::{Model, NotebookWithPages};
use crate::notify::{self, Change};
use crate::{IntoUpdateMap, Id};
use entity_api::notebook;
use events::EventPublisher;
use sea_orm::DatabaseConnection;

pub use entity_api::notebook::{find_all, find_by_id};

pub async fn create(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    notebook_model: Model,
    user_id: Id,
) -> Result<NotebookWithPages, Error> {
    let notebook = notebook::create(db, notebook_model, user_id).await?;
    notify::notebook(event_publisher, Change::Created, &notebook).await;
    Ok(notebook)
}

pub async fn update(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
    params: impl IntoUpdateMap,
) -> Result<NotebookWithPages, Error> {
    let notebook = notebook::update(db, id, params.into_update_map()).await?;
    notify::notebook(event_publisher, Change::Updated, &notebook).await;
    Ok(notebook)
}

/// Deletes the notebook together with its pages.
pub async fn delete(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
) -> Result<(), Error> {
    let notebook = notebook::delete(db, id).await?;
    notify::notebook(event_publisher, Change::Deleted, &notebook).await;
    Ok(())
}
