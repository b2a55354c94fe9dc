use crate::error::Error;
use crate::notify::{self, Change};
use crate::tasks::Model;
use crate::{IntoUpdateMap, Id};
use entity_api::task;
use events::EventPublisher;
use sea_orm::DatabaseConnection;

pub use entity_api::task::{find_all, find_archived, find_by_id, find_by_quadrant, find_by_status};

pub async fn create(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    task_model: Model,
    user_id: Id,
) -> Result<Model, Error> {
    let task = task::create(db, task_model, user_id).await?;
    notify::task(event_publisher, Change::Created, &task).await;
    Ok(task)
}

pub async fn update(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
    params: impl IntoUpdateMap,
) -> Result<Model, Error> {
    let task = task::update(db, id, params.into_update_map()).await?;
    notify::task(event_publisher, Change::Updated, &task).await;
    Ok(task)
}

pub async fn delete(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
) -> Result<(), Error> {
    let task = task::soft_delete(db, id).await?;
    notify::task(event_publisher, Change::Deleted, &task).await;
    Ok(())
}

pub async fn archive(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
) -> Result<Model, Error> {
    let task = task::archive(db, id).await?;
    notify::task(event_publisher, Change::Updated, &task).await;
    Ok(task)
}

pub async fn restore(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
) -> Result<Model, Error> {
    let task = task::restore(db, id).await?;
    notify::task(event_publisher, Change::Updated, &task).await;
    Ok(task)
}

pub async fn delete_permanently(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
) -> Result<(), Error> {
    let task = task::delete_permanently(db, id).await?;
    notify::task(event_publisher, Change::Deleted, &task).await;
    Ok(())
}
