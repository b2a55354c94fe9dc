//! Event system infrastructure for Tonish.
//!
//! This crate provides the event system that decouples domain logic from
//! infrastructure concerns such as WebSocket notifications.
//!
//! # Architecture
//!
//! - **DomainEvent**: Enum representing all business events in the system
//! - **EventHandler**: Trait for implementing event handlers
//! - **EventPublisher**: Publishes events to registered handlers
//!
//! This crate has no dependencies on internal crates (entity, domain, etc.),
//! avoiding circular dependencies. Entity data is carried as serialized JSON values.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A type alias that represents any Entity's internal id field data type.
/// This matches the definition in the entity crate to maintain compatibility.
pub type Id = i32;

/// Domain events that represent business-level changes in the system.
/// These events are emitted after a mutation has been persisted.
///
/// `notify_user_id` is the owner of the changed entity. `0` means the entity
/// has no owner and every connected client should hear about it.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    /// A new task was created.
    TaskCreated { task: Value, notify_user_id: Id },
    /// A task's fields, archive flag or soft-delete state changed.
    TaskUpdated { task: Value, notify_user_id: Id },
    /// A task was soft deleted or permanently removed. Carries the task as it
    /// was at deletion time.
    TaskDeleted { task: Value, notify_user_id: Id },
    /// A new notebook was created.
    NotebookCreated { notebook: Value, notify_user_id: Id },
    /// A notebook or one of its pages changed. Carries the notebook with its
    /// current pages.
    NotebookUpdated { notebook: Value, notify_user_id: Id },
    /// A notebook and all of its pages were deleted.
    NotebookDeleted { notebook: Value, notify_user_id: Id },
}

impl DomainEvent {
    /// The user whose clients should be notified, `0` for everyone.
    pub fn notify_user_id(&self) -> Id {
        match self {
            DomainEvent::TaskCreated { notify_user_id, .. }
            | DomainEvent::TaskUpdated { notify_user_id, .. }
            | DomainEvent::TaskDeleted { notify_user_id, .. }
            | DomainEvent::NotebookCreated { notify_user_id, .. }
            | DomainEvent::NotebookUpdated { notify_user_id, .. }
            | DomainEvent::NotebookDeleted { notify_user_id, .. } => *notify_user_id,
        }
    }
}

/// Trait for handling domain events.
/// Implementations can perform side effects like sending notifications,
/// updating caches, logging, etc.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &DomainEvent);
}

/// Publishes domain events to registered handlers.
/// Handlers are called sequentially in registration order.
#[derive(Clone)]
pub struct EventPublisher {
    handlers: Arc<Vec<Arc<dyn EventHandler>>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new()),
        }
    }

    /// Register a new event handler.
    /// Note: This creates a new publisher instance with the additional handler.
    /// Store the returned publisher in your application state.
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        let mut handlers = (*self.handlers).clone();
        handlers.push(handler);
        self.handlers = Arc::new(handlers);
        self
    }

    /// Publish an event to all registered handlers, in registration order.
    pub async fn publish(&self, event: DomainEvent) {
        for handler in self.handlers.iter() {
            handler.handle(&event).await;
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
