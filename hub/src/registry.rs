use crate::client::{Client, ClientId};
use crate::message::Message;
use log::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;

/// The set of registered clients.
///
/// Owned by the hub's control loop and never shared, so it needs no lock.
/// Only the size is published, through `count`, for readers on other tasks.
pub(crate) struct ClientRegistry {
    clients: HashMap<ClientId, Client>,
    count: Arc<AtomicUsize>,
}

impl ClientRegistry {
    pub(crate) fn new(count: Arc<AtomicUsize>) -> Self {
        Self {
            clients: HashMap::new(),
            count,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.clients.len()
    }

    pub(crate) fn register(&mut self, client: Client) {
        let user_id = client.user_id();
        self.clients.insert(client.id().clone(), client);
        self.publish_count();
        info!(
            "Client connected. UserID: {user_id}. Total clients: {}",
            self.len()
        );
    }

    /// Removes a client, which drops its sender and so closes its queue.
    /// Returns `false` when the client was not registered.
    pub(crate) fn unregister(&mut self, client_id: &ClientId) -> bool {
        match self.clients.remove(client_id) {
            Some(client) => {
                self.publish_count();
                info!(
                    "Client disconnected. UserID: {}. Total clients: {}",
                    client.user_id(),
                    self.len()
                );
                true
            }
            None => {
                trace!("Ignoring unregister of unknown client {client_id}");
                false
            }
        }
    }

    /// Serializes `message` once and enqueues it for every matching client.
    ///
    /// A client whose queue is full is evicted on the spot. The broadcaster is
    /// not told about it: delivery is best effort.
    pub(crate) fn fan_out(&mut self, message: &Message) {
        let payload = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                error!(
                    "Failed to serialize {} message, dropping it: {e}",
                    message.message_type
                );
                return;
            }
        };

        let mut evicted = Vec::new();
        let mut delivered = 0usize;

        for (client_id, client) in self.clients.iter() {
            if !client.accepts(message.user_id) {
                continue;
            }

            match client.try_send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!(
                        "Send queue full for client {client_id} (user {}), evicting",
                        client.user_id()
                    );
                    evicted.push(client_id.clone());
                }
                Err(TrySendError::Closed(_)) => {
                    debug!("Client {client_id} already stopped reading, evicting");
                    evicted.push(client_id.clone());
                }
            }
        }

        for client_id in evicted {
            self.unregister(&client_id);
        }

        debug!(
            "Delivered {} message to {delivered} client(s)",
            message.message_type
        );
    }

    /// Drops every client, closing all queues.
    pub(crate) fn clear(&mut self) {
        self.clients.clear();
        self.publish_count();
    }

    fn publish_count(&self) {
        self.count.store(self.clients.len(), Ordering::Release);
    }
}
