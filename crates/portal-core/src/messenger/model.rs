//! Messenger domain types: sessions, threads and messages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::contact::Presence;

/// Sender id of the local user.
pub const ME: &str = "me";
/// Sender id of shell-generated notices.
pub const SYSTEM: &str = "system";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessageSession {
    pub id: String,
    pub peer_id: String,
    pub display_name: String,
    pub role: String,
    pub avatar: String,
    pub last_message_preview: String,
    pub last_timestamp: String,
    pub unread_count: u32,
    pub presence: Presence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSession {
    pub id: String,
    pub name: String,
    pub unread_count: u32,
}

/// A conversation in the session list: either a DM or a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatSession {
    Direct(DirectMessageSession),
    Channel(ChannelSession),
}

impl ChatSession {
    pub fn id(&self) -> &str {
        match self {
            Self::Direct(dm) => &dm.id,
            Self::Channel(channel) => &channel.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Direct(dm) => &dm.display_name,
            Self::Channel(channel) => &channel.name,
        }
    }

    pub fn unread_count(&self) -> u32 {
        match self {
            Self::Direct(dm) => dm.unread_count,
            Self::Channel(channel) => channel.unread_count,
        }
    }

    pub fn as_direct(&self) -> Option<&DirectMessageSession> {
        match self {
            Self::Direct(dm) => Some(dm),
            Self::Channel(_) => None,
        }
    }

    pub fn as_channel(&self) -> Option<&ChannelSession> {
        match self {
            Self::Channel(channel) => Some(channel),
            Self::Direct(_) => None,
        }
    }
}

/// A named sub-conversation inside a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub channel_id: String,
    pub title: String,
    pub author_name: String,
    pub author_avatar: String,
    pub reply_count: u32,
    pub last_activity: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One entry of a timeline.
///
/// Fields are private so `is_me` can never disagree with `sender_id == "me"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    id: String,
    sender_id: String,
    text: String,
    timestamp: String,
    is_me: bool,
}

impl Message {
    /// A message with a caller-chosen id, used for seed data.
    pub fn seeded(id: &str, sender_id: &str, text: &str, timestamp: &str) -> Self {
        Self {
            id: id.to_string(),
            sender_id: sender_id.to_string(),
            text: text.to_string(),
            timestamp: timestamp.to_string(),
            is_me: sender_id == ME,
        }
    }

    /// A message written by the local user.
    pub fn outgoing(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender_id: ME.to_string(),
            text: text.into(),
            timestamp: timestamp.into(),
            is_me: true,
        }
    }

    /// A message from a peer. A peer id equal to `"me"` is still marked as mine.
    pub fn incoming(
        sender_id: impl Into<String>,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        let sender_id = sender_id.into();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            is_me: sender_id == ME,
            sender_id,
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    /// A shell-generated notice.
    pub fn system(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self::incoming(SYSTEM, text, timestamp)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn is_me(&self) -> bool {
        self.is_me
    }

    pub fn is_system(&self) -> bool {
        self.sender_id == SYSTEM
    }
}

/// Identifies one append-only timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum TimelineKey {
    /// Timeline of a DM session, keyed by session id.
    Direct(String),
    /// Timeline of a channel thread, keyed by thread id.
    Thread(String),
}

impl fmt::Display for TimelineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(id) => write!(f, "dm:{id}"),
            Self::Thread(id) => write!(f, "thread:{id}"),
        }
    }
}

/// Wall-clock `HH:MM` label for new messages.
pub fn now_timestamp() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
