use std::collections::HashMap;

use serde::Serialize;

use super::directory::SessionDirectory;
use super::model::{
    ChannelSession, ChatSession, DirectMessageSession, Message, Thread, TimelineKey,
};
use super::seed;
use crate::error::{PortalError, Result};

/// Sender id used for replies in channel threads.
pub const UNKNOWN_SENDER: &str = "unknown";

/// Who the local user is talking to in a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Counterpart {
    Direct { display_name: String, role: String },
    Thread { title: String, channel_name: String },
}

/// An outgoing message that is waiting for a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    /// Timeline the reply belongs to, fixed at send time.
    pub key: TimelineKey,
    pub reply_sender: String,
    pub counterpart: Counterpart,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionListView {
    pub channels: Vec<ChannelSession>,
    pub direct_messages: Vec<DirectMessageSession>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationView {
    pub key: TimelineKey,
    pub title: String,
    pub subtitle: String,
    pub avatar: Option<String>,
    pub messages: Vec<Message>,
    pub typing: bool,
}

/// What the messenger's main pane shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessengerView {
    SessionList(SessionListView),
    ThreadList {
        channel: ChannelSession,
        threads: Vec<Thread>,
    },
    Conversation(ConversationView),
}

/// Sessions, selection, timelines and typing flags of the messenger.
#[derive(Debug, Clone)]
pub struct MessengerState {
    directory: SessionDirectory,
    active_session: Option<String>,
    active_thread: Option<String>,
    timelines: HashMap<TimelineKey, Vec<Message>>,
    /// Replies still awaited per timeline.
    typing: HashMap<TimelineKey, usize>,
    search_query: String,
}

impl MessengerState {
    pub fn new(directory: SessionDirectory) -> Self {
        Self {
            directory,
            active_session: None,
            active_thread: None,
            timelines: HashMap::new(),
            typing: HashMap::new(),
            search_query: String::new(),
        }
    }

    pub fn seeded() -> Result<Self> {
        Ok(Self::new(seed::session_directory()?))
    }

    pub fn directory(&self) -> &SessionDirectory {
        &self.directory
    }

    pub fn active_session(&self) -> Option<&ChatSession> {
        self.active_session
            .as_deref()
            .and_then(|id| self.directory.find(id))
    }

    pub fn active_thread(&self) -> Option<&Thread> {
        self.active_thread
            .as_deref()
            .and_then(|id| self.directory.thread(id))
    }

    /// Selects a DM or channel and clears the thread selection.
    ///
    /// A DM opens its timeline right away; a channel shows its thread list.
    pub fn select_session(&mut self, id: &str) -> Result<()> {
        let session = self
            .directory
            .find(id)
            .ok_or_else(|| PortalError::not_found("session", id))?;
        let is_direct = session.as_direct().is_some();

        self.active_session = Some(id.to_string());
        self.active_thread = None;
        if is_direct {
            self.ensure_timeline(&TimelineKey::Direct(id.to_string()));
        }
        Ok(())
    }

    /// Opens a thread. Its channel becomes the active session.
    pub fn select_thread(&mut self, id: &str) -> Result<()> {
        let channel_id = self
            .directory
            .thread(id)
            .map(|t| t.channel_id.clone())
            .ok_or_else(|| PortalError::not_found("thread", id))?;

        self.active_session = Some(channel_id);
        self.active_thread = Some(id.to_string());
        self.ensure_timeline(&TimelineKey::Thread(id.to_string()));
        Ok(())
    }

    /// Thread to thread list, then DM or thread list to session list.
    ///
    /// Returns false when already at the session list.
    pub fn go_back(&mut self) -> bool {
        if self.active_thread.take().is_some() {
            return true;
        }
        self.active_session.take().is_some()
    }

    /// Resolves a peer id to its DM and selects it.
    ///
    /// A miss leaves the selection untouched and returns false.
    pub fn open_direct_with(&mut self, peer_id: &str) -> bool {
        let Some(session_id) = self
            .directory
            .find_direct_by_peer(peer_id)
            .map(|dm| dm.id.clone())
        else {
            tracing::warn!("[Messenger] No direct session for peer '{}'", peer_id);
            return false;
        };
        self.active_session = Some(session_id.clone());
        self.active_thread = None;
        self.ensure_timeline(&TimelineKey::Direct(session_id));
        true
    }

    /// Key of the timeline on screen, if a conversation is open.
    pub fn active_timeline_key(&self) -> Option<TimelineKey> {
        if let Some(thread_id) = &self.active_thread {
            return Some(TimelineKey::Thread(thread_id.clone()));
        }
        match self.active_session()? {
            ChatSession::Direct(dm) => Some(TimelineKey::Direct(dm.id.clone())),
            ChatSession::Channel(_) => None,
        }
    }

    pub fn timeline(&self, key: &TimelineKey) -> &[Message] {
        self.timelines.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Appends to `key`, seeding it first if it was never opened.
    pub fn append(&mut self, key: &TimelineKey, message: Message) {
        self.ensure_timeline(key);
        if let Some(timeline) = self.timelines.get_mut(key) {
            timeline.push(message);
        }
    }

    /// Registers one more reply awaited on `key`.
    pub fn begin_typing(&mut self, key: &TimelineKey) {
        *self.typing.entry(key.clone()).or_insert(0) += 1;
    }

    /// Releases one awaited reply; the indicator stays on while others remain.
    pub fn end_typing(&mut self, key: &TimelineKey) {
        if let Some(count) = self.typing.get_mut(key) {
            *count -= 1;
            if *count == 0 {
                self.typing.remove(key);
            }
        }
    }

    pub fn is_typing(&self, key: &TimelineKey) -> bool {
        self.typing.contains_key(key)
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Appends the user's message to the active timeline.
    ///
    /// Blank text is ignored and yields `Ok(None)`. The returned
    /// [`PendingReply`] stays bound to the timeline it was sent from.
    pub fn begin_send(&mut self, text: &str, timestamp: &str) -> Result<Option<PendingReply>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let key = self
            .active_timeline_key()
            .ok_or_else(|| PortalError::invalid_state("no conversation is open"))?;
        let (reply_sender, counterpart) = self
            .reply_target(&key)
            .ok_or_else(|| PortalError::internal(format!("timeline {key} has no session")))?;

        self.append(&key, Message::outgoing(text, timestamp));
        Ok(Some(PendingReply {
            key,
            reply_sender,
            counterpart,
            text: text.to_string(),
        }))
    }

    pub fn session_list(&self) -> SessionListView {
        SessionListView {
            channels: self.directory.channels().cloned().collect(),
            direct_messages: self
                .directory
                .filter_direct_messages(&self.search_query)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    pub fn view(&self) -> MessengerView {
        if let Some(key) = self.active_timeline_key() {
            if let Some(conversation) = self.conversation(&key) {
                return MessengerView::Conversation(conversation);
            }
        }
        if let Some(ChatSession::Channel(channel)) = self.active_session() {
            return MessengerView::ThreadList {
                channel: channel.clone(),
                threads: self
                    .directory
                    .threads_in(&channel.id)
                    .into_iter()
                    .cloned()
                    .collect(),
            };
        }
        MessengerView::SessionList(self.session_list())
    }

    fn conversation(&self, key: &TimelineKey) -> Option<ConversationView> {
        let (_, counterpart) = self.reply_target(key)?;
        let (title, subtitle, avatar) = match (key, counterpart) {
            (TimelineKey::Direct(id), Counterpart::Direct { display_name, role }) => {
                let avatar = self
                    .directory
                    .find(id)
                    .and_then(ChatSession::as_direct)
                    .map(|dm| dm.avatar.clone());
                (display_name, role, avatar)
            }
            (_, Counterpart::Thread { title, channel_name }) => {
                (title, format!("Thread in #{channel_name}"), None)
            }
            (TimelineKey::Thread(_), Counterpart::Direct { .. }) => return None,
        };
        Some(ConversationView {
            key: key.clone(),
            title,
            subtitle,
            avatar,
            messages: self.timeline(key).to_vec(),
            typing: self.is_typing(key),
        })
    }

    fn reply_target(&self, key: &TimelineKey) -> Option<(String, Counterpart)> {
        match key {
            TimelineKey::Direct(id) => {
                let dm = self.directory.find(id)?.as_direct()?;
                Some((
                    dm.peer_id.clone(),
                    Counterpart::Direct {
                        display_name: dm.display_name.clone(),
                        role: dm.role.clone(),
                    },
                ))
            }
            TimelineKey::Thread(id) => {
                let thread = self.directory.thread(id)?;
                let channel = self.directory.find(&thread.channel_id)?.as_channel()?;
                Some((
                    UNKNOWN_SENDER.to_string(),
                    Counterpart::Thread {
                        title: thread.title.clone(),
                        channel_name: channel.name.clone(),
                    },
                ))
            }
        }
    }

    fn ensure_timeline(&mut self, key: &TimelineKey) {
        if self.timelines.contains_key(key) {
            return;
        }
        let history = match key {
            TimelineKey::Direct(id) => {
                let session = self.directory.find(id).and_then(ChatSession::as_direct);
                match session {
                    Some(dm) => seed::direct_history(dm),
                    None => return,
                }
            }
            TimelineKey::Thread(id) => {
                if self.directory.thread(id).is_none() {
                    return;
                }
                seed::thread_history(id)
            }
        };
        self.timelines.insert(key.clone(), history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> MessengerState {
        MessengerState::seeded().unwrap()
    }

    #[test]
    fn test_starts_at_session_list() {
        let state = state();
        assert!(state.active_session().is_none());
        assert!(matches!(state.view(), MessengerView::SessionList(_)));
    }

    #[test]
    fn test_select_direct_opens_timeline() {
        let mut state = state();
        state.select_session("chat_andrey").unwrap();

        let MessengerView::Conversation(conversation) = state.view() else {
            panic!("expected conversation");
        };
        assert_eq!(conversation.title, "Andrey Shtanov");
        assert_eq!(conversation.subtitle, "CCO");
        assert_eq!(conversation.messages.len(), 2);
        assert!(!conversation.typing);
    }

    #[test]
    fn test_select_channel_shows_thread_list() {
        let mut state = state();
        state.select_session("chan_engineering").unwrap();

        assert!(state.active_timeline_key().is_none());
        let MessengerView::ThreadList { channel, threads } = state.view() else {
            panic!("expected thread list");
        };
        assert_eq!(channel.name, "engineering");
        assert_eq!(threads.len(), 3);
    }

    #[test]
    fn test_select_unknown_session_fails() {
        let mut state = state();
        let err = state.select_session("chat_nobody").unwrap_err();
        assert!(err.is_not_found());
        assert!(state.active_session().is_none());
    }

    #[test]
    fn test_back_stack_has_two_levels() {
        let mut state = state();
        state.select_session("chan_engineering").unwrap();
        state.select_thread("th_1").unwrap();
        assert!(matches!(state.view(), MessengerView::Conversation(_)));

        assert!(state.go_back());
        assert!(matches!(state.view(), MessengerView::ThreadList { .. }));

        assert!(state.go_back());
        assert!(matches!(state.view(), MessengerView::SessionList(_)));

        assert!(!state.go_back());
    }

    #[test]
    fn test_back_from_direct_goes_to_session_list() {
        let mut state = state();
        state.select_session("chat_igor").unwrap();
        assert!(state.go_back());
        assert!(state.active_session().is_none());
    }

    #[test]
    fn test_thread_header() {
        let mut state = state();
        state.select_thread("th_1").unwrap();
        assert_eq!(state.active_session().unwrap().id(), "chan_engineering");

        let MessengerView::Conversation(conversation) = state.view() else {
            panic!("expected conversation");
        };
        assert_eq!(conversation.title, "API Gateway Latency Spike");
        assert_eq!(conversation.subtitle, "Thread in #engineering");
        assert_eq!(conversation.messages.len(), 4);
    }

    #[test]
    fn test_deep_link_selects_dm_and_clears_thread() {
        let mut state = state();
        state.select_thread("th_1").unwrap();

        assert!(state.open_direct_with("igor"));
        assert!(state.active_thread().is_none());
        let dm = state
            .active_session()
            .and_then(ChatSession::as_direct)
            .unwrap();
        assert_eq!(dm.peer_id, "igor");
    }

    #[test]
    fn test_deep_link_miss_keeps_selection() {
        let mut state = state();
        state.select_session("chat_oleg").unwrap();
        assert!(!state.open_direct_with("nonexistent"));
        assert_eq!(state.active_session().unwrap().id(), "chat_oleg");
    }

    #[test]
    fn test_blank_send_is_noop() {
        let mut state = state();
        state.select_session("chat_igor").unwrap();
        let key = state.active_timeline_key().unwrap();
        let before = state.timeline(&key).len();

        assert!(state.begin_send("", "10:00").unwrap().is_none());
        assert!(state.begin_send("   ", "10:00").unwrap().is_none());
        assert_eq!(state.timeline(&key).len(), before);
    }

    #[test]
    fn test_send_appends_immediately() {
        let mut state = state();
        state.select_session("chat_igor").unwrap();
        let key = state.active_timeline_key().unwrap();

        let pending = state
            .begin_send("Please check MWS-1024", "10:00")
            .unwrap()
            .unwrap();

        let timeline = state.timeline(&key);
        assert_eq!(timeline.len(), 2);
        assert!(timeline[1].is_me());
        assert_eq!(timeline[1].text(), "Please check MWS-1024");
        assert_eq!(pending.key, key);
        assert_eq!(pending.reply_sender, "igor");
    }

    #[test]
    fn test_send_without_conversation_is_invalid() {
        let mut state = state();
        state.select_session("chan_general").unwrap();
        let err = state.begin_send("hi", "10:00").unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_thread_replies_use_unknown_sender() {
        let mut state = state();
        state.select_thread("th_2").unwrap();
        let pending = state.begin_send("status?", "10:00").unwrap().unwrap();
        assert_eq!(pending.reply_sender, UNKNOWN_SENDER);
        assert_eq!(
            pending.counterpart,
            Counterpart::Thread {
                title: "Migration to Kubernetes v1.28".to_string(),
                channel_name: "engineering".to_string(),
            }
        );
    }

    #[test]
    fn test_timelines_survive_switching() {
        let mut state = state();
        state.select_session("chat_igor").unwrap();
        state.begin_send("first", "10:00").unwrap();
        state.select_session("chat_oleg").unwrap();
        state.select_session("chat_igor").unwrap();

        let key = state.active_timeline_key().unwrap();
        assert_eq!(state.timeline(&key).last().unwrap().text(), "first");
    }

    #[test]
    fn test_typing_is_per_timeline() {
        let mut state = state();
        let igor = TimelineKey::Direct("chat_igor".to_string());
        let oleg = TimelineKey::Direct("chat_oleg".to_string());

        state.begin_typing(&igor);
        state.select_session("chat_oleg").unwrap();
        assert!(!state.is_typing(&oleg));
        let MessengerView::Conversation(conversation) = state.view() else {
            panic!("expected conversation");
        };
        assert!(!conversation.typing);

        state.end_typing(&igor);
        assert!(!state.is_typing(&igor));
    }

    #[test]
    fn test_typing_counts_overlapping_replies() {
        let mut state = state();
        let igor = TimelineKey::Direct("chat_igor".to_string());

        state.begin_typing(&igor);
        state.begin_typing(&igor);
        state.end_typing(&igor);
        assert!(state.is_typing(&igor));

        state.end_typing(&igor);
        assert!(!state.is_typing(&igor));

        state.end_typing(&igor);
        assert!(!state.is_typing(&igor));
    }

    #[test]
    fn test_search_filters_only_direct_messages() {
        let mut state = state();
        state.set_search_query("oleg");
        let list = state.session_list();
        assert_eq!(list.channels.len(), 4);
        assert_eq!(list.direct_messages.len(), 1);
        assert_eq!(list.direct_messages[0].peer_id, "oleg");
    }
}
