use crate::client::{UserId, UNSCOPED};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Kind of change a message announces. Serialized as the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum MessageType {
    TaskUpdate,
    TaskCreate,
    TaskDelete,
    NotebookUpdate,
    NotebookCreate,
    NotebookDelete,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::TaskUpdate => "task_update",
            MessageType::TaskCreate => "task_create",
            MessageType::TaskDelete => "task_delete",
            MessageType::NotebookUpdate => "notebook_update",
            MessageType::NotebookCreate => "notebook_create",
            MessageType::NotebookDelete => "notebook_delete",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change notification on its way to connected clients.
///
/// Wire form: `{"type": "...", "data": ..., "user_id": N}` with `user_id`
/// left out for unscoped messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub data: Value,
    #[serde(default, skip_serializing_if = "is_unscoped")]
    pub user_id: UserId,
}

impl Message {
    pub fn new(user_id: UserId, message_type: MessageType, data: Value) -> Self {
        Self {
            message_type,
            data,
            user_id,
        }
    }

    /// A message for every connected client.
    pub fn to_all(message_type: MessageType, data: Value) -> Self {
        Self::new(UNSCOPED, message_type, data)
    }
}

fn is_unscoped(user_id: &UserId) -> bool {
    *user_id == UNSCOPED
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scoped_message_serializes_its_user_id() {
        let message = Message::new(1, MessageType::TaskUpdate, json!({"id": 9}));

        let value: Value = serde_json::to_value(&message).unwrap();

        assert_eq!(
            value,
            json!({"type": "task_update", "data": {"id": 9}, "user_id": 1})
        );
    }

    #[test]
    fn unscoped_message_omits_user_id() {
        let message = Message::to_all(MessageType::NotebookDelete, json!(null));

        let value: Value = serde_json::to_value(&message).unwrap();

        assert_eq!(value, json!({"type": "notebook_delete", "data": null}));
    }

    #[test]
    fn message_type_names_match_their_serialized_form() {
        for message_type in [
            MessageType::TaskUpdate,
            MessageType::TaskCreate,
            MessageType::TaskDelete,
            MessageType::NotebookUpdate,
            MessageType::NotebookCreate,
            MessageType::NotebookDelete,
        ] {
            assert_eq!(
                serde_json::to_value(message_type).unwrap(),
                json!(message_type.as_str())
            );
        }
    }

    #[test]
    fn missing_user_id_deserializes_as_unscoped() {
        let message: Message =
            serde_json::from_str(r#"{"type":"task_create","data":{"title":"t"}}"#).unwrap();

        assert_eq!(message.user_id, UNSCOPED);
        assert_eq!(message.message_type, MessageType::TaskCreate);
    }
}
