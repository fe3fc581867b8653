//! Core types — Message, Sender, Skin, TypingState, tracking records, etc.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Skins ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    Support,
    Nibbly,
}

impl Skin {
    pub const ALL: [Skin; 2] = [Skin::Support, Skin::Nibbly];
}

impl std::fmt::Display for Skin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Skin::Support => write!(f, "support"),
            Skin::Nibbly => write!(f, "nibbly"),
        }
    }
}

impl std::str::FromStr for Skin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "support" => Ok(Skin::Support),
            "nibbly" => Ok(Skin::Nibbly),
            other => Err(format!("unknown skin '{}'", other)),
        }
    }
}

// ── Messages ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One chat bubble. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

// ── Typing indicator ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypingState {
    Idle,
    Typing,
}

impl std::fmt::Display for TypingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypingState::Idle => write!(f, "idle"),
            TypingState::Typing => write!(f, "typing"),
        }
    }
}

// ── Delayed reply handles ──

/// The one outstanding bot reply, handed out by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub ticket: u64,
    pub query: String,
}

/// A resolved reply, ready to be appended once its delay has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    pub ticket: u64,
    pub text: String,
}

// ── Quick actions ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub label: String,
    pub query: String,
}

impl QuickAction {
    pub fn new(label: &str, query: &str) -> Self {
        Self {
            label: label.to_string(),
            query: query.to_string(),
        }
    }
}

// ── Drone tracking ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Preparing,
    InFlight,
    Delayed,
    Delivered,
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryStatus::Preparing => write!(f, "Preparing for takeoff"),
            DeliveryStatus::InFlight => write!(f, "In flight"),
            DeliveryStatus::Delayed => write!(f, "Delayed"),
            DeliveryStatus::Delivered => write!(f, "Delivered"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub location: String,
    pub eta_minutes: u32,
    pub status: DeliveryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skin_parse() {
        assert_eq!("support".parse::<Skin>(), Ok(Skin::Support));
        assert_eq!(" Nibbly ".parse::<Skin>(), Ok(Skin::Nibbly));
        assert!("drone".parse::<Skin>().is_err());
    }

    #[test]
    fn test_skin_display_round_trips() {
        for skin in Skin::ALL {
            assert_eq!(skin.to_string().parse::<Skin>(), Ok(skin));
        }
    }

    #[test]
    fn test_message_serializes_lowercase_sender() {
        let msg = Message {
            id: 1,
            text: "hi".to_string(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["sender"], "bot");
    }
}
