use std::collections::HashSet;

use super::model::{ChannelSession, ChatSession, DirectMessageSession, Thread};
use crate::error::{PortalError, Result};

/// Validated session and thread lists.
///
/// Session ids are unique across DMs and channels, and every thread belongs to
/// a channel in the list.
#[derive(Debug, Clone)]
pub struct SessionDirectory {
    sessions: Vec<ChatSession>,
    threads: Vec<Thread>,
}

impl SessionDirectory {
    pub fn new(sessions: Vec<ChatSession>, threads: Vec<Thread>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut peers = HashSet::new();
        for session in &sessions {
            if !ids.insert(session.id()) {
                return Err(PortalError::validation(format!(
                    "duplicate session id '{}'",
                    session.id()
                )));
            }
            if let ChatSession::Direct(dm) = session {
                if !peers.insert(dm.peer_id.as_str()) {
                    return Err(PortalError::validation(format!(
                        "peer '{}' has more than one direct session",
                        dm.peer_id
                    )));
                }
            }
        }

        let mut thread_ids = HashSet::new();
        for thread in &threads {
            if !thread_ids.insert(thread.id.as_str()) {
                return Err(PortalError::validation(format!(
                    "duplicate thread id '{}'",
                    thread.id
                )));
            }
            let parent = sessions
                .iter()
                .find(|s| s.id() == thread.channel_id)
                .and_then(ChatSession::as_channel);
            if parent.is_none() {
                return Err(PortalError::validation(format!(
                    "thread '{}' references unknown channel '{}'",
                    thread.id, thread.channel_id
                )));
            }
        }

        Ok(Self { sessions, threads })
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn channels(&self) -> impl Iterator<Item = &ChannelSession> {
        self.sessions.iter().filter_map(ChatSession::as_channel)
    }

    pub fn direct_messages(&self) -> impl Iterator<Item = &DirectMessageSession> {
        self.sessions.iter().filter_map(ChatSession::as_direct)
    }

    pub fn find(&self, id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    pub fn find_direct_by_peer(&self, peer_id: &str) -> Option<&DirectMessageSession> {
        self.direct_messages().find(|dm| dm.peer_id == peer_id)
    }

    pub fn thread(&self, id: &str) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == id)
    }

    pub fn threads_in(&self, channel_id: &str) -> Vec<&Thread> {
        self.threads
            .iter()
            .filter(|t| t.channel_id == channel_id)
            .collect()
    }

    /// DMs whose display name contains `query`, ignoring case.
    pub fn filter_direct_messages(&self, query: &str) -> Vec<&DirectMessageSession> {
        let needle = query.trim().to_lowercase();
        self.direct_messages()
            .filter(|dm| needle.is_empty() || dm.display_name.to_lowercase().contains(&needle))
            .collect()
    }
}
