//! Turns persisted changes into domain events for whoever listens.

use crate::notebooks::NotebookWithPages;
use crate::tasks;
use events::{DomainEvent, EventPublisher};
use log::*;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Change {
    Created,
    Updated,
    Deleted,
}

pub(crate) async fn task(event_publisher: &EventPublisher, change: Change, task: &tasks::Model) {
    let task_json = match serde_json::to_value(task) {
        Ok(json) => json,
        Err(e) => {
            warn!("Not publishing {change:?} for task {}: {e}", task.id);
            return;
        }
    };
    let notify_user_id = task.user_id;

    let event = match change {
        Change::Created => DomainEvent::TaskCreated {
            task: task_json,
            notify_user_id,
        },
        Change::Updated => DomainEvent::TaskUpdated {
            task: task_json,
            notify_user_id,
        },
        Change::Deleted => DomainEvent::TaskDeleted {
            task: task_json,
            notify_user_id,
        },
    };

    event_publisher.publish(event).await;
}

pub(crate) async fn notebook(
    event_publisher: &EventPublisher,
    change: Change,
    notebook: &NotebookWithPages,
) {
    let notebook_json = match serde_json::to_value(notebook) {
        Ok(json) => json,
        Err(e) => {
            warn!(
                "Not publishing {change:?} for notebook {}: {e}",
                notebook.notebook.id
            );
            return;
        }
    };
    let notify_user_id = notebook.notebook.user_id;

    let event = match change {
        Change::Created => DomainEvent::NotebookCreated {
            notebook: notebook_json,
            notify_user_id,
        },
        Change::Updated => DomainEvent::NotebookUpdated {
            notebook: notebook_json,
            notify_user_id,
        },
        Change::Deleted => DomainEvent::NotebookDeleted {
            notebook: notebook_json,
            notify_user_id,
        },
    };

    event_publisher.publish(event).await;
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use events::{DomainEvent, EventHandler};
    use std::sync::{Arc, Mutex};

    /// Keeps every event it is handed.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingHandler {
        pub(crate) events: Arc<Mutex<Vec<DomainEvent>>>,
    }

    impl RecordingHandler {
        pub(crate) fn recorded(&self) -> Vec<DomainEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn handle(&self, event: &DomainEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }
}
