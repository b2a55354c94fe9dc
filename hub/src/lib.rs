//! WebSocket broadcast hub for real-time change notifications.
//!
//! # Architecture
//!
//! - **Single owner**: the set of connected clients lives inside one control
//!   loop ([`HubLoop`]). Register, unregister and broadcast are messages sent
//!   to that loop through a cloneable [`Hub`] handle, so the set is never
//!   shared and never locked.
//! - **User and global scopes**: a [`Message`] with `user_id == 0` goes to
//!   every client; any other value goes only to clients of that user. A client
//!   connected without a user id only receives global messages.
//! - **Bounded queues, fail-fast eviction**: each [`Client`] has a queue of
//!   [`SEND_QUEUE_CAPACITY`] serialized messages. When a broadcast finds the
//!   queue full the client is dropped on the spot and its queue closed, so one
//!   stalled connection cannot hold up the others. The application layer is not
//!   told about evictions; notifications are best effort and a reconnecting
//!   client reloads fresh state anyway.
//! - **Ephemeral messages**: nothing is persisted, acknowledged or retried.
//!
//! # Message Flow
//!
//! 1. The WebSocket adapter builds a [`Client`] and calls [`Hub::register`]
//! 2. A controller mutates a task or notebook and publishes a domain event
//! 3. [`HubDomainEventHandler`] maps it to [`Hub::broadcast_to_user`]
//! 4. The loop serializes the message once and enqueues it for each match
//! 5. The adapter's writer drains its queue onto the socket; when the queue
//!    closes it sends a close frame
//!
//! # Example
//!
//! ```rust,no_run
//! use hub::{Client, Hub, MessageType};
//! use serde_json::json;
//!
//! # async fn example() {
//! let (hub, hub_loop) = Hub::new();
//! tokio::spawn(hub_loop.run());
//!
//! let (client, mut queue) = Client::new(42);
//! hub.register(client).await;
//!
//! hub.broadcast_to_user(42, MessageType::TaskCreate, json!({"id": 1})).await;
//! let payload = queue.recv().await;
//! # }
//! ```

pub mod client;
pub mod domain_event_handler;
pub mod hub;
pub mod message;
mod registry;

pub use client::{Client, ClientId, ClientQueue, UserId, SEND_QUEUE_CAPACITY, UNSCOPED};
pub use domain_event_handler::HubDomainEventHandler;
pub use hub::{Hub, HubLoop};
pub use message::{Message, MessageType};
