use std::fmt;
use tokio::sync::mpsc::{self, error::TrySendError};

/// User scope of a client or a message. `0` means "no specific user".
pub type UserId = u64;

/// The unscoped user id. A message carrying it reaches every client; a client
/// carrying it only receives messages that are themselves unscoped.
pub const UNSCOPED: UserId = 0;

/// Number of serialized messages a client may have waiting before the hub
/// considers it unresponsive and evicts it.
pub const SEND_QUEUE_CAPACITY: usize = 256;

/// Receiving half of a client's outbound queue, drained by the connection writer.
/// `recv()` yielding `None` means the hub has dropped the client.
pub type ClientQueue = mpsc::Receiver<String>;

/// Unique identifier for a client connection (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-side handle of one WebSocket connection.
///
/// A `Client` holds the only sending half of its outbound queue. Once it has
/// been handed to [`crate::Hub::register`] the hub owns it, so dropping the
/// registry entry is what closes the queue. The connection adapter keeps the
/// [`ClientId`] and the [`ClientQueue`].
#[derive(Debug)]
pub struct Client {
    id: ClientId,
    user_id: UserId,
    sender: mpsc::Sender<String>,
}

impl Client {
    /// Creates a client with the standard queue capacity.
    pub fn new(user_id: UserId) -> (Self, ClientQueue) {
        Self::with_capacity(user_id, SEND_QUEUE_CAPACITY)
    }

    /// Creates a client whose outbound queue holds at most `capacity` payloads.
    pub fn with_capacity(user_id: UserId, capacity: usize) -> (Self, ClientQueue) {
        let (sender, queue) = mpsc::channel(capacity);
        (
            Self {
                id: ClientId::new(),
                user_id,
                sender,
            },
            queue,
        )
    }

    pub fn id(&self) -> &ClientId {
        &self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Whether a message scoped to `target` should be delivered to this client.
    pub fn accepts(&self, target: UserId) -> bool {
        target == UNSCOPED || self.user_id == target
    }

    /// Non-blocking enqueue of an already serialized payload.
    pub(crate) fn try_send(&self, payload: String) -> Result<(), TrySendError<String>> {
        self.sender.try_send(payload)
    }
}
