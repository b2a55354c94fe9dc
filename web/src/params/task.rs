use chrono::{DateTime, FixedOffset};
use sea_orm::{Iterable, Value};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::{priority::Priority, task_status::TaskStatus, IntoUpdateMap, UpdateMap};

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct StatusParams {
    /// Only tasks with this status; every active task when omitted or empty.
    #[param(value_type = Option<TaskStatus>)]
    pub(crate) status: Option<String>,
}

impl StatusParams {
    /// The requested filter. `Ok(None)` means no filter; an unrecognised
    /// status comes back as `Err` with the raw value.
    pub(crate) fn status(&self) -> Result<Option<TaskStatus>, &str> {
        match self.status.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => TaskStatus::iter()
                .find(|status| status.to_string() == raw)
                .map(Some)
                .ok_or(raw),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = TaskUpdateParams)]
pub struct UpdateParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub tags: Option<String>,
    /// `null` clears the due date.
    #[serde(default, deserialize_with = "super::nullable")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub due_date: Option<Option<DateTime<FixedOffset>>>,
    pub is_quick_task: Option<bool>,
    pub quadrant: Option<String>,
    pub task_type: Option<String>,
    pub is_archived: Option<bool>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        let strings = [
            ("title", self.title),
            ("description", self.description),
            ("tags", self.tags),
            ("quadrant", self.quadrant),
            ("task_type", self.task_type),
        ];
        for (column, value) in strings {
            if let Some(value) = value {
                update_map.insert(
                    column.to_string(),
                    Some(Value::String(Some(Box::new(value)))),
                );
            }
        }
        if let Some(priority) = self.priority {
            update_map.insert("priority".to_string(), Some(priority.into()));
        }
        if let Some(status) = self.status {
            update_map.insert("status".to_string(), Some(status.into()));
        }
        if let Some(due_date) = self.due_date {
            update_map.insert(
                "due_date".to_string(),
                Some(Value::ChronoDateTimeWithTimeZone(due_date.map(Box::new))),
            );
        }
        if let Some(is_quick_task) = self.is_quick_task {
            update_map.insert("is_quick_task".to_string(), Some(Value::Bool(Some(is_quick_task))));
        }
        if let Some(is_archived) = self.is_archived {
            update_map.insert("is_archived".to_string(), Some(Value::Bool(Some(is_archived))));
        }
        update_map
    }
}
