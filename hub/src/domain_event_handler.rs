use crate::client::UserId;
use crate::hub::Hub;
use crate::message::MessageType;
use async_trait::async_trait;
use events::{DomainEvent, EventHandler};
use log::*;
use serde_json::Value;

/// Handles domain events by turning them into hub messages.
///
/// The domain layer decides whose clients hear about a change by putting the
/// owner's id in the event; this handler only maps the event onto a message
/// type and hands it to the hub.
pub struct HubDomainEventHandler {
    hub: Hub,
}

impl HubDomainEventHandler {
    pub fn new(hub: Hub) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl EventHandler for HubDomainEventHandler {
    async fn handle(&self, event: &DomainEvent) {
        let (message_type, data) = message_for(event);

        let user_id = match UserId::try_from(event.notify_user_id()) {
            Ok(user_id) => user_id,
            Err(_) => {
                warn!(
                    "Not broadcasting {message_type}: invalid owner id {}",
                    event.notify_user_id()
                );
                return;
            }
        };

        debug!("Broadcasting {message_type} to user {user_id}");
        self.hub
            .broadcast_to_user(user_id, message_type, data.clone())
            .await;
    }
}

fn message_for(event: &DomainEvent) -> (MessageType, &Value) {
    match event {
        DomainEvent::TaskCreated { task, .. } => (MessageType::TaskCreate, task),
        DomainEvent::TaskUpdated { task, .. } => (MessageType::TaskUpdate, task),
        DomainEvent::TaskDeleted { task, .. } => (MessageType::TaskDelete, task),
        DomainEvent::NotebookCreated { notebook, .. } => (MessageType::NotebookCreate, notebook),
        DomainEvent::NotebookUpdated { notebook, .. } => (MessageType::NotebookUpdate, notebook),
        DomainEvent::NotebookDeleted { notebook, .. } => (MessageType::NotebookDelete, notebook),
    }
}
