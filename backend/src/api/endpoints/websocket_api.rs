use crate::api::model::{handle_chat_message, AppState};
use crate::utils::debug_if_enabled;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use log::{error, info, warn};
use shared::model::{ChatClientMessage, ChatServerEvent};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

// WebSocket upgrade handler
async fn websocket_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(app_state): State<Arc<AppState>>,
) -> impl IntoResponse {
    debug_if_enabled!("Chat websocket connected {}", addr);
    ws.on_upgrade(move |socket| handle_socket(socket, app_state, addr))
}

pub fn ws_api_register() -> axum::Router<Arc<AppState>> {
    axum::Router::new().route("/ws", axum::routing::get(websocket_handler))
}

async fn send_event(socket: &mut WebSocket, event: &ChatServerEvent) -> bool {
    match event.to_json() {
        Ok(json) => socket.send(Message::text(json)).await.is_ok(),
        Err(err) => {
            error!("Failed to serialize chat event: {err}");
            true
        }
    }
}

async fn next_room_event(events: Option<&mut broadcast::Receiver<ChatServerEvent>>) -> Result<ChatServerEvent, RecvError> {
    match events {
        Some(rx) => rx.recv().await,
        // not joined yet, room events are not delivered
        None => std::future::pending().await,
    }
}

// WebSocket communication logic
async fn handle_socket(mut socket: WebSocket, app_state: Arc<AppState>, addr: SocketAddr) {
    let room = Arc::clone(&app_state.chat_room);
    let mut nickname: Option<String> = None;
    let mut events: Option<broadcast::Receiver<ChatServerEvent>> = None;

    loop {
        tokio::select! {
            maybe_msg = socket.recv() => {
                match maybe_msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ChatClientMessage>(text.as_str()) {
                            Ok(ChatClientMessage::Join { nickname: requested }) => {
                                if nickname.is_some() {
                                    debug_if_enabled!("Ignoring second join from {}", addr);
                                } else {
                                    // subscribe first, the own join event is delivered too
                                    let rx = room.subscribe();
                                    let reply = match room.join(&requested, addr).await {
                                        Ok(_) => {
                                            let name = requested.trim().to_string();
                                            info!("{name} joined {}", room.name());
                                            let welcome = ChatServerEvent::Welcome { message: format!("Welcome {name} to {}!", room.name()) };
                                            nickname = Some(name);
                                            events = Some(rx);
                                            welcome
                                        }
                                        Err(err) => ChatServerEvent::JoinError { message: err.to_string() },
                                    };
                                    if !send_event(&mut socket, &reply).await {
                                        break;
                                    }
                                }
                            }
                            Ok(ChatClientMessage::SendMessage { message, timestamp, .. }) => {
                                if let Some(sender) = nickname.as_deref() {
                                    let chat_config = &app_state.app_config.config.chat;
                                    for event in handle_chat_message(&app_state.classifier, chat_config, sender, &message, &timestamp) {
                                        room.broadcast(event);
                                    }
                                } else {
                                    debug_if_enabled!("Ignoring message from {} before join", addr);
                                }
                            }
                            Err(err) => {
                                debug_if_enabled!("Invalid chat message from {}: {}", addr, err);
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        debug_if_enabled!("Chat websocket error {}: {}", addr, err);
                        break;
                    }
                }
            }

            event = next_room_event(events.as_mut()) => {
                match event {
                    Ok(event) => {
                        if !send_event(&mut socket, &event).await {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => warn!("Chat client {addr} is lagging, {skipped} events skipped"),
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    if nickname.is_some() {
        if let Some(name) = room.leave(&addr).await {
            info!("{name} left {}", room.name());
        }
    }
}
