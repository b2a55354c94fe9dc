use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::pages::Model)]
#[sea_orm(table_name = "pages")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    pub notebook_id: Id,
    pub title: String,
    /// Rich-text document from the editor, as JSON text.
    #[serde(default)]
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::notebooks::Entity",
        from = "Column::NotebookId",
        to = "super::notebooks::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Notebooks,
}

impl Related<super::notebooks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notebooks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
