//! Pages live inside notebooks, so every page change is announced as an
//! update of the notebook that holds it.

use crate::error::Error;
use crate::notify::{self, Change};
use crate::pages::Model;
use crate::{IntoUpdateMap, Id};
use entity_api::{notebook, page};
use events::EventPublisher;
use log::*;
use sea_orm::DatabaseConnection;

pub use entity_api::page::{find_by_id, search};

pub async fn create(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    page_model: Model,
) -> Result<Model, Error> {
    let page = page::create(db, page_model).await?;
    announce_notebook(db, event_publisher, page.notebook_id).await;
    Ok(page)
}

/// Applies a partial update. When the page moves to another notebook both
/// the old and the new notebook are announced.
pub async fn update(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
    params: impl IntoUpdateMap,
) -> Result<Model, Error> {
    let previous_notebook_id = page::find_by_id(db, id).await?.notebook_id;
    let page = page::update(db, id, params.into_update_map()).await?;

    if previous_notebook_id != page.notebook_id {
        announce_notebook(db, event_publisher, previous_notebook_id).await;
    }
    announce_notebook(db, event_publisher, page.notebook_id).await;
    Ok(page)
}

pub async fn delete(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
) -> Result<(), Error> {
    let page = page::delete(db, id).await?;
    announce_notebook(db, event_publisher, page.notebook_id).await;
    Ok(())
}

async fn announce_notebook(db: &DatabaseConnection, event_publisher: &EventPublisher, notebook_id: Id) {
    match notebook::find_by_id(db, notebook_id).await {
        Ok(notebook) => notify::notebook(event_publisher, Change::Updated, &notebook).await,
        Err(e) => warn!("Could not reload Notebook {notebook_id} after a page change: {e}"),
    }
}
