use sea_orm::Value;
use serde::Deserialize;
use utoipa::ToSchema;

use domain::{IntoUpdateMap, UpdateMap};

#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = NotebookUpdateParams)]
pub struct UpdateParams {
    pub name: Option<String>,
    pub tags: Option<String>,
    pub is_pinned: Option<bool>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(name) = self.name {
            update_map.insert(
                "name".to_string(),
                Some(Value::String(Some(Box::new(name)))),
            );
        }
        if let Some(tags) = self.tags {
            update_map.insert(
                "tags".to_string(),
                Some(Value::String(Some(Box::new(tags)))),
            );
        }
        if let Some(is_pinned) = self.is_pinned {
            update_map.insert("is_pinned".to_string(), Some(Value::Bool(Some(is_pinned))));
        }
        update_map
    }
}
