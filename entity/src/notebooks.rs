use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[schema(as = entity::notebooks::Model)]
#[sea_orm(table_name = "notebooks")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    pub id: Id,
    pub name: String,
    /// JSON array of tag names, stored as text.
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
    #[serde(skip_deserializing)]
    pub user_id: Id,
}

/// A notebook together with its pages, the shape every notebook read and
/// notebook notification carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[schema(as = entity::notebooks::NotebookWithPages)]
pub struct NotebookWithPages {
    #[serde(flatten)]
    pub notebook: Model,
    pub pages: Vec<super::pages::Model>,
}

impl NotebookWithPages {
    pub fn new(notebook: Model, pages: Vec<super::pages::Model>) -> Self {
        Self { notebook, pages }
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
    #[sea_orm(has_many = "super::pages::Entity")]
    Pages,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::pages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_serialize_alongside_notebook_fields() {
        let now = chrono::Utc::now();
        let notebook = Model {
            id: 3,
            name: "Ideas".to_owned(),
            tags: "[]".to_owned(),
            is_pinned: true,
            created_at: now.into(),
            updated_at: now.into(),
            user_id: 1,
        };

        let json = serde_json::to_value(NotebookWithPages::new(notebook, vec![])).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Ideas");
        assert_eq!(json["pages"], serde_json::json!([]));
    }
}
