use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatMessageType {
    Text,
    Bot,
}

/// Messages sent by the browser over the chat websocket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ChatClientMessage {
    Join {
        nickname: String,
    },
    SendMessage {
        nickname: String,
        message: String,
        timestamp: String,
    },
}

/// Events pushed to the browser. `Welcome` and `JoinError` go to a single socket,
/// everything else is broadcast to the room.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ChatServerEvent {
    Welcome {
        message: String,
    },
    JoinError {
        message: String,
    },
    UserJoined {
        nickname: String,
        online_users: Vec<String>,
    },
    UserLeft {
        nickname: String,
        online_users: Vec<String>,
    },
    NewMessage {
        nickname: String,
        message: String,
        timestamp: String,
        #[serde(rename = "type")]
        message_type: ChatMessageType,
    },
    MovieLink {
        url: String,
        sender: String,
    },
}

impl ChatServerEvent {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
