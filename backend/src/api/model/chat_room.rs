use crate::utils::trace_if_enabled;
use indexmap::IndexMap;
use shared::model::ChatServerEvent;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use tokio::sync::{broadcast, Mutex};

const EVENT_CHANNEL_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    InvalidNickname,
    NicknameTaken,
}

impl Display for JoinError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinError::InvalidNickname => write!(f, "Nickname must not be empty"),
            JoinError::NicknameTaken => write!(f, "Nickname is already in use"),
        }
    }
}

/// Members of the chat room keyed by nickname, in join order.
///
/// All membership changes go through the one mutex, join and leave events are
/// broadcast while it is held so every subscriber sees them in order.
pub struct ChatRoom {
    name: String,
    members: Mutex<IndexMap<String, SocketAddr>>,
    events_tx: broadcast::Sender<ChatServerEvent>,
}

impl ChatRoom {
    pub fn new(name: &str) -> Self {
        let (events_tx, _events_rx) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self {
            name: name.to_string(),
            members: Mutex::new(IndexMap::new()),
            events_tx,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChatServerEvent> {
        self.events_tx.subscribe()
    }

    pub fn broadcast(&self, event: ChatServerEvent) -> bool {
        if let Err(err) = self.events_tx.send(event) {
            trace_if_enabled!("Failed to send chat event: {}", err);
            false
        } else {
            true
        }
    }

    pub async fn join(&self, nickname: &str, addr: SocketAddr) -> Result<Vec<String>, JoinError> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(JoinError::InvalidNickname);
        }
        let mut members = self.members.lock().await;
        if members.contains_key(nickname) {
            return Err(JoinError::NicknameTaken);
        }
        members.insert(nickname.to_string(), addr);
        let online_users: Vec<String> = members.keys().cloned().collect();
        self.broadcast(ChatServerEvent::UserJoined {
            nickname: nickname.to_string(),
            online_users: online_users.clone(),
        });
        Ok(online_users)
    }

    pub async fn leave(&self, addr: &SocketAddr) -> Option<String> {
        let mut members = self.members.lock().await;
        let nickname = members.iter().find_map(|(nickname, member_addr)| (member_addr == addr).then(|| nickname.clone()))?;
        members.shift_remove(&nickname);
        self.broadcast(ChatServerEvent::UserLeft {
            nickname: nickname.clone(),
            online_users: members.keys().cloned().collect(),
        });
        Some(nickname)
    }

    pub async fn is_nickname_available(&self, nickname: &str) -> bool {
        let nickname = nickname.trim();
        !nickname.is_empty() && !self.members.lock().await.contains_key(nickname)
    }

    pub async fn online_users(&self) -> Vec<String> {
        self.members.lock().await.keys().cloned().collect()
    }
}
