use crate::{priority::Priority, task_status::TaskStatus, Id};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Task type given to tasks placed on the Eisenhower matrix.
pub const MATRIX_TASK_TYPE: &str = "matrix";
/// Task type given to tasks without a quadrant.
pub const KANBAN_TASK_TYPE: &str = "kanban";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::tasks::Model)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    /// JSON array of tag names, stored as text.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub due_date: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub is_quick_task: bool,
    /// One of `urgent-important`, `not-urgent-important`,
    /// `urgent-not-important`, `not-urgent-not-important`, or empty.
    #[serde(default)]
    pub quadrant: String,
    #[serde(default)]
    pub task_type: String,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub completed_at: Option<DateTimeWithTimeZone>,
    #[serde(skip_deserializing)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub deleted_at: Option<DateTimeWithTimeZone>,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    pub user_id: Id,
}

impl Model {
    /// A task is active while it is neither archived nor soft deleted.
    pub fn is_active(&self) -> bool {
        !self.is_archived && self.deleted_at.is_none()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
