use super::error::{EntityApiErrorKind, Error};
use crate::mutate::{self, UpdateMap};
use chrono::Utc;
use entity::pages::{ActiveModel, Column, Entity, Model};
use entity::{notebooks, Id};
use log::*;
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, Condition, ConnectionTrait, IntoActiveModel, QueryOrder,
};

/// Inserts a page into an existing notebook.
pub async fn create(db: &impl ConnectionTrait, page_model: Model) -> Result<Model, Error> {
    debug!("New Page Model to be inserted: {page_model:?}");

    ensure_notebook_exists(db, page_model.notebook_id).await?;

    let now = Utc::now();
    let page_active_model = ActiveModel {
        notebook_id: Set(page_model.notebook_id),
        title: Set(page_model.title),
        content: Set(page_model.content),
        tags: Set(page_model.tags),
        is_pinned: Set(page_model.is_pinned),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(page_active_model.insert(db).await?)
}

pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::new(EntityApiErrorKind::RecordNotFound))
}

pub async fn update(db: &impl ConnectionTrait, id: Id, update_map: UpdateMap) -> Result<Model, Error> {
    let page = find_by_id(db, id).await?;
    debug!("Existing Page model to be Updated: {page:?}");

    if let Some(Value::Int(Some(notebook_id))) = update_map.get(&Column::NotebookId.to_string()) {
        ensure_notebook_exists(db, *notebook_id).await?;
    }

    let mut active_model = page.into_active_model();
    active_model.updated_at = Set(Utc::now().into());
    mutate::update::<ActiveModel, Column>(db, active_model, update_map).await
}

/// Removes the page and returns what was removed.
pub async fn delete(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    let page = find_by_id(db, id).await?;
    Entity::delete_by_id(id).exec(db).await?;
    Ok(page)
}

/// Pages whose title or content contains `query`. An empty query matches every page.
pub async fn search(db: &impl ConnectionTrait, query: &str) -> Result<Vec<Model>, Error> {
    let mut select = Entity::find();

    if !query.is_empty() {
        select = select.filter(
            Condition::any()
                .add(Column::Title.contains(query))
                .add(Column::Content.contains(query)),
        );
    }

    Ok(select.order_by_asc(Column::Id).all(db).await?)
}

async fn ensure_notebook_exists(db: &impl ConnectionTrait, notebook_id: Id) -> Result<(), Error> {
    match notebooks::Entity::find_by_id(notebook_id).one(db).await? {
        Some(_) => Ok(()),
        None => {
            warn!("Page refers to missing Notebook {notebook_id}");
            Err(Error::new(EntityApiErrorKind::ValidationError))
        }
    }
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn page(id: Id, notebook_id: Id) -> Model {
        let now = Utc::now();
        Model {
            id,
            notebook_id,
            title: "Meeting notes".to_owned(),
            content: "{\"type\":\"doc\"}".to_owned(),
            tags: String::new(),
            is_pinned: false,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn create_rejects_a_missing_notebook() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![Vec::<notebooks::Model>::new()])
            .into_connection();

        let result = create(&db, page(0, 99)).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::ValidationError
        );
    }

    #[tokio::test]
    async fn search_matches_title_or_content() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![page(1, 1)]])
            .into_connection();

        let pages = search(&db, "notes").await?;
        assert_eq!(pages.len(), 1);

        let log = format!("{:?}", db.into_transaction_log());
        assert_eq!(log.matches("LIKE").count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn empty_search_is_unfiltered() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![page(1, 1), page(2, 1)]])
            .into_connection();

        let pages = search(&db, "").await?;
        assert_eq!(pages.len(), 2);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("LIKE"));
        Ok(())
    }

    #[tokio::test]
    async fn delete_returns_the_removed_page() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![page(5, 2)]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let removed = delete(&db, 5).await?;

        assert_eq!(removed.notebook_id, 2);
        Ok(())
    }
}
