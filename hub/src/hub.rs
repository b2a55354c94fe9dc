use crate::client::{Client, ClientId, UserId};
use crate::message::{Message, MessageType};
use crate::registry::ClientRegistry;
use log::*;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Commands are buffered so that request handlers rarely wait on fan-out.
const COMMAND_CHANNEL_CAPACITY: usize = 256;

/// Work handed to the control loop. Every entry point shares one channel, so
/// commands are applied in the order they were handed off.
enum Command {
    Register(Client),
    Unregister(ClientId),
    Broadcast(Message),
}

/// Cloneable handle to the broadcast hub.
///
/// Every operation is a message hand-off to the single [`HubLoop`], which is
/// the only code that touches the set of registered clients. Build one hub per
/// process with [`Hub::new`], spawn the returned loop, and share the handle.
#[derive(Clone)]
pub struct Hub {
    command_tx: mpsc::Sender<Command>,
    shutdown_tx: Arc<watch::Sender<bool>>,
    client_count: Arc<AtomicUsize>,
}

/// The hub's control loop. Run it exactly once, typically with `tokio::spawn`.
pub struct HubLoop {
    registry: ClientRegistry,
    command_rx: mpsc::Receiver<Command>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Hub {
    pub fn new() -> (Self, HubLoop) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let client_count = Arc::new(AtomicUsize::new(0));

        let hub = Self {
            command_tx,
            shutdown_tx: Arc::new(shutdown_tx),
            client_count: client_count.clone(),
        };

        let hub_loop = HubLoop {
            registry: ClientRegistry::new(client_count),
            command_rx,
            shutdown_rx,
        };

        (hub, hub_loop)
    }

    /// Adds a client to the active set. Once this returns, the client receives
    /// every broadcast issued afterwards that targets its user id.
    pub async fn register(&self, client: Client) {
        if let Err(e) = self.command_tx.send(Command::Register(client)).await {
            if let Command::Register(client) = e.0 {
                debug!("Hub is not running, dropping client {}", client.id());
            }
        }
    }

    /// Removes a client and closes its queue. Unknown ids are ignored, so
    /// calling this twice for the same client is harmless.
    pub async fn unregister(&self, client_id: &ClientId) {
        let command = Command::Unregister(client_id.clone());
        if self.command_tx.send(command).await.is_err() {
            debug!("Hub is not running, ignoring unregister of {client_id}");
        }
    }

    /// Queues a message for fan-out. Fire-and-forget: the caller never learns
    /// whether, or to whom, it was delivered.
    pub async fn broadcast(&self, message: Message) {
        if let Err(e) = self.command_tx.send(Command::Broadcast(message)).await {
            if let Command::Broadcast(message) = e.0 {
                debug!("Hub is not running, dropping {} message", message.message_type);
            }
        }
    }

    /// Broadcasts to the clients of `user_id`, or to everyone when it is `0`.
    pub async fn broadcast_to_user(&self, user_id: UserId, message_type: MessageType, data: Value) {
        self.broadcast(Message::new(user_id, message_type, data))
            .await;
    }

    /// Number of clients currently registered, as last published by the loop.
    pub fn client_count(&self) -> usize {
        self.client_count.load(Ordering::Acquire)
    }

    /// Asks the control loop to stop. Pending commands are discarded and every
    /// client queue is closed.
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }
}

impl HubLoop {
    /// Processes hub commands one at a time, in hand-off order, until
    /// shutdown or until every [`Hub`] handle has been dropped.
    pub async fn run(self) {
        let HubLoop {
            mut registry,
            mut command_rx,
            mut shutdown_rx,
        } = self;

        info!("WebSocket hub started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown_rx.changed() => break,
                command = command_rx.recv() => match command {
                    Some(Command::Register(client)) => registry.register(client),
                    Some(Command::Unregister(client_id)) => {
                        registry.unregister(&client_id);
                    }
                    Some(Command::Broadcast(message)) => registry.fan_out(&message),
                    None => break,
                },
            }
        }

        registry.clear();
        info!("WebSocket hub stopped");
    }
}
