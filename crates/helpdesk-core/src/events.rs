//! ChatEvent enum — broadcast from a ChatWidget to frontends via tokio::broadcast.

use serde::{Deserialize, Serialize};

use crate::types::{Message, TypingState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ChatEvent {
    /// A message was appended (user or bot)
    #[serde(rename = "message")]
    Message(Message),

    /// The typing indicator changed
    #[serde(rename = "typing")]
    Typing(TypingState),

    /// The widget was opened, closed, minimized or restored
    #[serde(rename = "visibility")]
    Visibility { open: bool, minimized: bool },
}

impl ChatEvent {
    /// Serialize as `{"event": "...", "data": ...}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
