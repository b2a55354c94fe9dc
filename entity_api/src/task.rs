use super::error::{EntityApiErrorKind, Error};
use crate::mutate::{self, UpdateMap};
use chrono::{DateTime, Utc};
use entity::tasks::{ActiveModel, Column, Entity, Model, KANBAN_TASK_TYPE, MATRIX_TASK_TYPE};
use entity::{task_status::TaskStatus, Id};
use log::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    Condition, ConnectionTrait, IntoActiveModel, QueryOrder, TryIntoModel,
};

pub async fn create(db: &impl ConnectionTrait, task_model: Model, user_id: Id) -> Result<Model, Error> {
    debug!("New Task Model to be inserted: {task_model:?}");

    let now = Utc::now();
    let mut task = task_model;
    apply_task_type_default(&mut task);
    stamp_completion(&mut task, false, now);

    let task_active_model = ActiveModel {
        title: Set(task.title),
        description: Set(task.description),
        priority: Set(task.priority),
        status: Set(task.status),
        tags: Set(task.tags),
        due_date: Set(task.due_date),
        is_quick_task: Set(task.is_quick_task),
        quadrant: Set(task.quadrant),
        task_type: Set(task.task_type),
        is_archived: Set(task.is_archived),
        completed_at: Set(task.completed_at),
        deleted_at: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        user_id: Set(user_id),
        ..Default::default()
    };

    Ok(task_active_model.insert(db).await?)
}

/// Finds a task that has not been soft deleted. Archived tasks are found.
pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or_else(|| Error::new(EntityApiErrorKind::RecordNotFound))
}

async fn find_including_deleted(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::new(EntityApiErrorKind::RecordNotFound))
}

/// All tasks that are neither archived nor deleted.
pub async fn find_all(db: &impl ConnectionTrait) -> Result<Vec<Model>, Error> {
    find_by_status(db, None).await
}

/// Active tasks, narrowed to `status` when one is given.
pub async fn find_by_status(
    db: &impl ConnectionTrait,
    status: Option<TaskStatus>,
) -> Result<Vec<Model>, Error> {
    let mut query = Entity::find()
        .filter(Column::IsArchived.eq(false))
        .filter(Column::DeletedAt.is_null());

    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status));
    }

    Ok(query.order_by_asc(Column::Id).all(db).await?)
}

pub async fn find_by_quadrant(db: &impl ConnectionTrait, quadrant: &str) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Quadrant.eq(quadrant))
        .filter(Column::IsArchived.eq(false))
        .filter(Column::DeletedAt.is_null())
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

/// Tasks that are archived, completed or soft deleted, most recently retired first.
pub async fn find_archived(db: &impl ConnectionTrait) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(
            Condition::any()
                .add(Column::IsArchived.eq(true))
                .add(Column::CompletedAt.is_not_null())
                .add(Column::DeletedAt.is_not_null()),
        )
        .order_by_desc(Expr::cust("COALESCE(deleted_at, completed_at, updated_at)"))
        .all(db)
        .await?)
}

/// Applies a partial update. The owner, creation time and deletion marker of
/// the stored task are always kept.
pub async fn update(db: &impl ConnectionTrait, id: Id, update_map: UpdateMap) -> Result<Model, Error> {
    let existing = find_by_id(db, id).await?;
    debug!("Existing Task model to be Updated: {existing:?}");

    let previously_done = existing.status.is_done();
    let mut merged = existing.clone().into_active_model();
    mutate::apply::<ActiveModel, Column>(&mut merged, &update_map);
    let mut task = merged.try_into_model()?;

    let now = Utc::now();
    apply_task_type_default(&mut task);
    stamp_completion(&mut task, previously_done, now);

    let active_model = ActiveModel {
        id: Unchanged(existing.id),
        title: Set(task.title),
        description: Set(task.description),
        priority: Set(task.priority),
        status: Set(task.status),
        tags: Set(task.tags),
        due_date: Set(task.due_date),
        is_quick_task: Set(task.is_quick_task),
        quadrant: Set(task.quadrant),
        task_type: Set(task.task_type),
        is_archived: Set(task.is_archived),
        completed_at: Set(task.completed_at),
        deleted_at: Unchanged(existing.deleted_at),
        created_at: Unchanged(existing.created_at),
        updated_at: Set(now.into()),
        user_id: Unchanged(existing.user_id),
    };

    Ok(active_model.update(db).await?)
}

/// Marks the task deleted without removing the row.
pub async fn soft_delete(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    let task = find_by_id(db, id).await?;
    debug!("Soft deleting Task {id}");

    let mut active_model = task.into_active_model();
    active_model.deleted_at = Set(Some(Utc::now().into()));

    Ok(active_model.update(db).await?)
}

pub async fn archive(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    let task = find_by_id(db, id).await?;

    let mut active_model = task.into_active_model();
    active_model.is_archived = Set(true);
    active_model.updated_at = Set(Utc::now().into());

    Ok(active_model.update(db).await?)
}

/// Brings an archived, completed or deleted task back onto the board.
/// A completed task comes back as `todo`.
pub async fn restore(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    let task = find_including_deleted(db, id).await?;
    let was_completed = task.completed_at.is_some();

    let mut active_model = task.into_active_model();
    active_model.is_archived = Set(false);
    active_model.deleted_at = Set(None);
    if was_completed {
        active_model.completed_at = Set(None);
        active_model.status = Set(TaskStatus::Todo);
    }
    active_model.updated_at = Set(Utc::now().into());

    Ok(active_model.update(db).await?)
}

/// Removes the row, whether or not it was soft deleted first, and returns
/// what was removed.
pub async fn delete_permanently(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    let task = find_including_deleted(db, id).await?;
    Entity::delete_by_id(id).exec(db).await?;
    info!("Permanently deleted Task {id}");
    Ok(task)
}

/// Tasks with a quadrant live on the matrix board; the rest default to kanban.
fn apply_task_type_default(task: &mut Model) {
    if !task.quadrant.is_empty() {
        task.task_type = MATRIX_TASK_TYPE.to_owned();
    } else if task.task_type.is_empty() {
        task.task_type = KANBAN_TASK_TYPE.to_owned();
    }
}

fn stamp_completion(task: &mut Model, previously_done: bool, now: DateTime<Utc>) {
    if task.status.is_done() {
        if task.completed_at.is_none() {
            task.completed_at = Some(now.into());
        }
    } else if previously_done {
        task.completed_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task() -> Model {
        serde_json::from_value(serde_json::json!({"title": "Write report"})).unwrap()
    }

    #[test]
    fn quadrant_forces_matrix_task_type() {
        let mut task = task();
        task.quadrant = "urgent-important".to_owned();
        task.task_type = KANBAN_TASK_TYPE.to_owned();

        apply_task_type_default(&mut task);

        assert_eq!(task.task_type, MATRIX_TASK_TYPE);
    }

    #[test]
    fn empty_task_type_defaults_to_kanban() {
        let mut task = task();

        apply_task_type_default(&mut task);

        assert_eq!(task.task_type, KANBAN_TASK_TYPE);
    }

    #[test]
    fn explicit_task_type_without_quadrant_is_kept() {
        let mut task = task();
        task.task_type = "quick".to_owned();

        apply_task_type_default(&mut task);

        assert_eq!(task.task_type, "quick");
    }

    #[test]
    fn moving_to_done_stamps_completion() {
        let mut task = task();
        task.status = TaskStatus::Done;
        let now = Utc::now();

        stamp_completion(&mut task, false, now);

        assert_eq!(task.completed_at, Some(now.into()));
    }

    #[test]
    fn staying_done_keeps_the_original_stamp() {
        let mut task = task();
        let earlier = Utc::now() - chrono::Duration::hours(3);
        task.status = TaskStatus::Done;
        task.completed_at = Some(earlier.into());

        stamp_completion(&mut task, true, Utc::now());

        assert_eq!(task.completed_at, Some(earlier.into()));
    }

    #[test]
    fn leaving_done_clears_completion() {
        let mut task = task();
        task.status = TaskStatus::InProgress;
        task.completed_at = Some(Utc::now().into());

        stamp_completion(&mut task, true, Utc::now());

        assert!(task.completed_at.is_none());
    }

    #[test]
    fn never_done_leaves_completion_alone() {
        let mut task = task();
        let stamp = Utc::now();
        task.completed_at = Some(stamp.into());

        stamp_completion(&mut task, false, Utc::now());

        assert_eq!(task.completed_at, Some(stamp.into()));
    }
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod mock_tests {
    use super::*;
    use entity::priority::Priority;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn stored_task(id: Id) -> Model {
        let now = Utc::now();
        Model {
            id,
            title: "Write report".to_owned(),
            description: String::new(),
            priority: Priority::High,
            status: TaskStatus::Todo,
            tags: "[]".to_owned(),
            due_date: None,
            is_quick_task: false,
            quadrant: String::new(),
            task_type: KANBAN_TASK_TYPE.to_owned(),
            is_archived: false,
            completed_at: None,
            deleted_at: None,
            created_at: now.into(),
            updated_at: now.into(),
            user_id: 3,
        }
    }

    fn exec_ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 1,
            rows_affected: 1,
        }
    }

    #[tokio::test]
    async fn create_returns_the_inserted_task() -> Result<(), Error> {
        let task = stored_task(1);
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_exec_results(vec![exec_ok()])
            .append_query_results(vec![vec![task.clone()]])
            .into_connection();

        let created = create(&db, task.clone(), 3).await?;

        assert_eq!(created.id, task.id);
        assert_eq!(created.user_id, 3);
        Ok(())
    }

    #[tokio::test]
    async fn update_returns_error_when_task_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        let result = update(&db, 42, UpdateMap::new()).await;

        assert_eq!(
            result.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn update_returns_the_updated_task() -> Result<(), Error> {
        let existing = stored_task(5);
        let mut updated = existing.clone();
        updated.status = TaskStatus::Done;
        updated.completed_at = Some(Utc::now().into());

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![existing.clone()], vec![updated.clone()]])
            .append_exec_results(vec![exec_ok()])
            .into_connection();

        let mut update_map = UpdateMap::new();
        update_map.insert("status".to_owned(), Some(TaskStatus::Done.into()));
        let task = update(&db, existing.id, update_map).await?;

        assert_eq!(task.status, TaskStatus::Done);
        assert!(task.completed_at.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn find_archived_orders_by_most_recent_retirement() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![stored_task(1)]])
            .into_connection();

        let tasks = find_archived(&db).await?;
        assert_eq!(tasks.len(), 1);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("COALESCE(deleted_at, completed_at, updated_at) DESC"));
        Ok(())
    }

    #[tokio::test]
    async fn delete_permanently_returns_the_removed_task() -> Result<(), Error> {
        let mut deleted = stored_task(9);
        deleted.deleted_at = Some(Utc::now().into());
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![vec![deleted.clone()]])
            .append_exec_results(vec![exec_ok()])
            .into_connection();

        let removed = delete_permanently(&db, 9).await?;

        assert_eq!(removed.id, 9);
        Ok(())
    }

    #[tokio::test]
    async fn restore_returns_error_when_task_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results(vec![Vec::<Model>::new()])
            .into_connection();

        assert!(restore(&db, 1).await.is_err());
    }
}
