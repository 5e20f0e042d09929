//! Messenger service: optimistic sends and AI-generated replies.
//!
//! [`MessengerState`] is shared behind a mutex with the reply tasks. A reply
//! is always appended to the timeline it was requested from, whichever
//! conversation is on screen when it arrives.

use std::sync::{Arc, Mutex};

use portal_core::Result;
use portal_core::completion::{CompletionAgent, CompletionRequest};
use portal_core::config::MessengerConfig;
use portal_core::messenger::{
    Message, MessengerState, MessengerView, PendingReply, RenderedText, TicketDirectory,
    TimelineKey, now_timestamp, seed,
};
use tokio::task::JoinHandle;

use crate::lock;
use crate::prompts::PromptRenderer;

/// Appended when the completion call fails.
pub const UNAVAILABLE_NOTICE: &str =
    "The assistant is temporarily unavailable. Please try again later.";

/// Reply used when the model answers with nothing.
pub const EMPTY_REPLY: &str = "Received.";

/// Marks a timeline as "typing" for as long as it is alive.
struct TypingGuard {
    state: Arc<Mutex<MessengerState>>,
    key: TimelineKey,
}

impl TypingGuard {
    fn acquire(state: Arc<Mutex<MessengerState>>, key: TimelineKey) -> Self {
        lock(&state).begin_typing(&key);
        Self { state, key }
    }
}

impl Drop for TypingGuard {
    fn drop(&mut self) {
        lock(&self.state).end_typing(&self.key);
    }
}

pub struct MessengerService {
    state: Arc<Mutex<MessengerState>>,
    tickets: TicketDirectory,
    agent: Arc<dyn CompletionAgent>,
    prompts: Arc<PromptRenderer>,
    persona: Arc<MessengerConfig>,
}

impl MessengerService {
    pub fn new(
        state: MessengerState,
        tickets: TicketDirectory,
        agent: Arc<dyn CompletionAgent>,
        prompts: Arc<PromptRenderer>,
        persona: MessengerConfig,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            tickets,
            agent,
            prompts,
            persona: Arc::new(persona),
        }
    }

    /// Service over the built-in sessions and ticket directory.
    pub fn seeded(
        persona: MessengerConfig,
        agent: Arc<dyn CompletionAgent>,
        prompts: Arc<PromptRenderer>,
    ) -> Result<Self> {
        let tickets = seed::ticket_directory(&persona.ticket_prefix)?;
        Ok(Self::new(
            MessengerState::seeded()?,
            tickets,
            agent,
            prompts,
            persona,
        ))
    }

    /// Runs `f` against the current state.
    pub fn with_state<R>(&self, f: impl FnOnce(&MessengerState) -> R) -> R {
        f(&lock(&self.state))
    }

    pub fn view(&self) -> MessengerView {
        lock(&self.state).view()
    }

    pub fn select_session(&self, id: &str) -> Result<()> {
        lock(&self.state).select_session(id)
    }

    pub fn select_thread(&self, id: &str) -> Result<()> {
        lock(&self.state).select_thread(id)
    }

    pub fn go_back(&self) -> bool {
        lock(&self.state).go_back()
    }

    /// Filters the DM list by display name.
    pub fn set_filter(&self, query: &str) {
        lock(&self.state).set_search_query(query);
    }

    pub fn render_text(&self, text: &str) -> RenderedText {
        self.tickets.render_text(text)
    }

    pub fn tickets(&self) -> &TicketDirectory {
        &self.tickets
    }

    /// Applies a deep-link target.
    ///
    /// With a target, the matching DM is opened (a miss is logged and ignored)
    /// and `clear` is called exactly once. Without one, nothing happens.
    pub fn consume_target(&self, target: Option<&str>, clear: impl FnOnce()) -> bool {
        let Some(peer_id) = target else {
            return false;
        };
        let opened = lock(&self.state).open_direct_with(peer_id);
        clear();
        opened
    }

    /// Appends `text` to the active conversation and requests a reply.
    ///
    /// Blank text is a no-op returning `Ok(None)`. The user's message is in the
    /// timeline before this returns; the reply arrives on the returned task.
    pub fn send_message(&self, text: &str) -> Result<Option<JoinHandle<()>>> {
        let pending = lock(&self.state).begin_send(text, &now_timestamp())?;
        let Some(pending) = pending else {
            return Ok(None);
        };
        tracing::debug!("[Messenger] Sent message to {}", pending.key);

        let typing = TypingGuard::acquire(Arc::clone(&self.state), pending.key.clone());
        let shared = Arc::clone(&self.state);
        let agent = Arc::clone(&self.agent);
        let prompts = Arc::clone(&self.prompts);
        let persona = Arc::clone(&self.persona);

        Ok(Some(tokio::spawn(async move {
            let reply = request_reply(agent.as_ref(), &prompts, &persona, &pending).await;
            {
                let mut state = lock(&shared);
                if state.active_timeline_key().as_ref() != Some(&pending.key) {
                    tracing::debug!(
                        "[Messenger] Reply for {} arrived after switching away",
                        pending.key
                    );
                }
                state.append(&pending.key, reply);
            }
            drop(typing);
        })))
    }
}

async fn request_reply(
    agent: &dyn CompletionAgent,
    prompts: &PromptRenderer,
    persona: &MessengerConfig,
    pending: &PendingReply,
) -> Message {
    let system_instruction = match prompts.messenger_reply(persona, &pending.counterpart) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("[Messenger] Failed to build reply prompt: {}", e);
            return Message::system(UNAVAILABLE_NOTICE, now_timestamp());
        }
    };
    let request = CompletionRequest::text(system_instruction, pending.text.clone());

    match agent.complete(request).await {
        Ok(text) if text.trim().is_empty() => {
            Message::incoming(&pending.reply_sender, EMPTY_REPLY, now_timestamp())
        }
        Ok(text) => Message::incoming(&pending.reply_sender, text.trim(), now_timestamp()),
        Err(e) => {
            tracing::warn!("[Messenger] Reply for {} failed: {}", pending.key, e);
            Message::system(UNAVAILABLE_NOTICE, now_timestamp())
        }
    }
}
