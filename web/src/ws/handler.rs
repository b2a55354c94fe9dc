use axum::extract::ws::{Message as WsMessage, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use hub::{Client, ClientQueue, UserId, UNSCOPED};
use log::*;
use std::collections::HashMap;

use crate::AppState;

/// Reads `user_id` from the query string; absent or unparsable means unscoped.
fn requested_user_id(query: &HashMap<String, String>) -> UserId {
    query
        .get("user_id")
        .and_then(|raw| raw.parse::<UserId>().ok())
        .unwrap_or(UNSCOPED)
}

/// Upgrades the connection and attaches it to the hub. One connection per
/// browser tab; it lives until the client goes away or the hub drops it.
pub(crate) async fn ws_handler(
    State(app_state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    ws: WebSocketUpgrade,
) -> Response {
    let user_id = requested_user_id(&query);
    debug!("Upgrading WebSocket connection for user {user_id}");

    ws.on_upgrade(move |socket| handle_socket(socket, app_state, user_id))
}

async fn handle_socket(socket: WebSocket, app_state: AppState, user_id: UserId) {
    let (client, queue) = Client::new(user_id);
    let client_id = client.id().clone();
    let hub = app_state.hub.clone();

    hub.register(client).await;

    let (sender, mut receiver) = socket.split();
    let writer = tokio::spawn(write_queue(sender, queue));

    // Incoming frames carry nothing for us; reading only notices when the
    // peer goes away.
    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(WsMessage::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                debug!("WebSocket read error for client {client_id}: {e}");
                break;
            }
        }
    }

    hub.unregister(&client_id).await;
    writer.abort();
    debug!("WebSocket connection for client {client_id} closed");
}

/// Drains the client's queue onto the socket as text frames. When the hub
/// closes the queue a close frame is sent and the writer ends.
async fn write_queue(
    mut sender: futures::stream::SplitSink<WebSocket, WsMessage>,
    mut queue: ClientQueue,
) {
    while let Some(payload) = queue.recv().await {
        if let Err(e) = sender.send(WsMessage::Text(payload.into())).await {
            debug!("WebSocket write failed: {e}");
            return;
        }
    }

    let _ = sender.send(WsMessage::Close(None)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn user_id_comes_from_the_query() {
        assert_eq!(requested_user_id(&query(&[("user_id", "17")])), 17);
    }

    #[test]
    fn missing_or_garbled_user_id_is_unscoped() {
        assert_eq!(requested_user_id(&query(&[])), UNSCOPED);
        assert_eq!(requested_user_id(&query(&[("user_id", "abc")])), UNSCOPED);
        assert_eq!(requested_user_id(&query(&[("user_id", "-3")])), UNSCOPED);
    }

    #[cfg(feature = "mock")]
    mod live {
        use crate::test_support::app_state;
        use clap::Parser;
        use futures::StreamExt;
        use hub::{Hub, Message, MessageType};
        use serde_json::json;
        use service::config::Config;
        use std::time::Duration;
        use tokio::net::TcpListener;
        use tokio_tungstenite::connect_async;

        async fn wait_for_clients(hub: &Hub, expected: usize) {
            for _ in 0..100 {
                if hub.client_count() == expected {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            panic!("hub never reached {expected} clients");
        }

        #[tokio::test]
        async fn socket_receives_broadcasts_for_its_user() {
            let mut app_state = app_state(Config::try_parse_from(["tonish"]).unwrap());
            let (hub, hub_loop) = Hub::new();
            tokio::spawn(hub_loop.run());
            app_state.hub = hub.clone();

            let app = axum::Router::new()
                .route("/ws", axum::routing::get(super::super::ws_handler))
                .with_state(app_state);
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move { axum::serve(listener, app).await });

            let (mut socket, _) = connect_async(format!("ws://{addr}/ws?user_id=5"))
                .await
                .unwrap();
            wait_for_clients(&hub, 1).await;

            hub.broadcast_to_user(6, MessageType::TaskUpdate, json!({"id": 1}))
                .await;
            hub.broadcast_to_user(5, MessageType::TaskCreate, json!({"id": 2}))
                .await;

            let frame = tokio::time::timeout(Duration::from_secs(1), socket.next())
                .await
                .unwrap()
                .unwrap()
                .unwrap();
            let text = frame.into_text().unwrap();
            let message: Message = serde_json::from_str(&text).unwrap();

            assert_eq!(message.message_type, MessageType::TaskCreate);
            assert_eq!(message.data, json!({"id": 2}));
            assert_eq!(message.user_id, 5);

            drop(socket);
            wait_for_clients(&hub, 0).await;
            hub.shutdown();
        }
    }
}
