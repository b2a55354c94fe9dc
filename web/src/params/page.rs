use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::{Id, IntoUpdateMap, UpdateMap};

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct SearchParams {
    /// Text to look for in page titles and contents.
    #[serde(default)]
    pub(crate) q: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = PageUpdateParams)]
pub struct UpdateParams {
    /// Moves the page to another notebook.
    pub notebook_id: Option<Id>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
    pub is_pinned: Option<bool>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(notebook_id) = self.notebook_id {
            update_map.insert("notebook_id".to_string(), Some(Value::Int(Some(notebook_id))));
        }
        if let Some(title) = self.title {
            update_map.insert(
                "title".to_string(),
                Some(Value::String(Some(Box::new(title)))),
            );
        }
        if let Some(content) = self.content {
            update_map.insert(
                "content".to_string(),
                Some(Value::String(Some(Box::new(content)))),
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn moving_a_page_sets_its_notebook_id() {
        let params: UpdateParams = serde_json::from_value(json!({"notebook_id": 4})).unwrap();

        let update_map = params.into_update_map();

        assert_eq!(update_map.get("notebook_id"), Some(&Value::Int(Some(4))));
        assert!(update_map.get("title").is_none());
    }
}
