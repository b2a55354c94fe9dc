use super::error::{EntityApiErrorKind, Error};
use crate::mutate::{self, UpdateMap};
use chrono::Utc;
use entity::notebooks::{ActiveModel, Column, Entity, Model, NotebookWithPages};
use entity::{pages, Id};
use log::*;
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ConnectionTrait, IntoActiveModel, QueryOrder,
    TransactionTrait,
};

pub async fn create(
    db: &impl ConnectionTrait,
    notebook_model: Model,
    user_id: Id,
) -> Result<NotebookWithPages, Error> {
    debug!("New Notebook Model to be inserted: {notebook_model:?}");

    let now = Utc::now();
    let notebook_active_model = ActiveModel {
        name: Set(notebook_model.name),
        tags: Set(notebook_model.tags),
        is_pinned: Set(notebook_model.is_pinned),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        user_id: Set(user_id),
        ..Default::default()
    };

    let notebook = notebook_active_model.insert(db).await?;
    Ok(NotebookWithPages::new(notebook, Vec::new()))
}

pub async fn find_all(db: &impl ConnectionTrait) -> Result<Vec<NotebookWithPages>, Error> {
    let results = Entity::find()
        .order_by_asc(Column::Id)
        .find_with_related(pages::Entity)
        .all(db)
        .await?;

    Ok(results
        .into_iter()
        .map(|(notebook, pages)| NotebookWithPages::new(notebook, pages))
        .collect())
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<NotebookWithPages, Error> {
    let results = Entity::find_by_id(id)
        .find_with_related(pages::Entity)
        .all(db)
        .await?;

    match results.into_iter().next() {
        Some((notebook, pages)) => Ok(NotebookWithPages::new(notebook, pages)),
        None => Err(Error::new(EntityApiErrorKind::RecordNotFound)),
    }
}

/// Applies a partial update and returns the notebook with its current pages.
pub async fn update(
    db: &impl ConnectionTrait,
    id: Id,
    update_map: UpdateMap,
) -> Result<NotebookWithPages, Error> {
    let NotebookWithPages { notebook, pages } = find_by_id(db, id).await?;
    debug!("Existing Notebook model to be Updated: {notebook:?}");

    let mut active_model = notebook.into_active_model();
    active_model.updated_at = Set(Utc::now().into());
    let notebook = mutate::update::<ActiveModel, Column>(db, active_model, update_map).await?;

    Ok(NotebookWithPages::new(notebook, pages))
}

/// Deletes the notebook and every page in it, all or nothing.
/// Returns the notebook as it was just before deletion.
pub async fn delete(db: &impl TransactionTrait, id: Id) -> Result<NotebookWithPages, Error> {
    let txn = db.begin().await?;

    let notebook = find_by_id(&txn, id).await?;
    let removed_pages = pages::Entity::delete_many()
        .filter(pages::Column::NotebookId.eq(id))
        .exec(&txn)
        .await?;
    Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    info!(
        "Deleted Notebook {id} and {} page(s)",
        removed_pages.rows_affected
    );
    Ok(notebook)
}
