use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where a task sits on the board. Serialized in kebab case, so
/// `InProgress` travels as `in-progress`.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, EnumIter, Deserialize, Serialize, Default, DeriveActiveEnum,
    ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum TaskStatus {
    #[sea_orm(string_value = "todo")]
    #[default]
    Todo,
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "done")]
    Done,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(fmt, "todo"),
            TaskStatus::InProgress => write!(fmt, "in-progress"),
            TaskStatus::Done => write!(fmt, "done"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn serde_names_match_the_stored_values() {
        for status in TaskStatus::iter() {
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                serde_json::json!(status.to_value())
            );
        }
    }

    #[test]
    fn in_progress_parses_from_kebab_case() {
        let status: TaskStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
    }
}
