//! Messenger: DM and channel sessions, threads, timelines and ticket rendering.

mod directory;
mod model;
pub mod seed;
mod state;
mod ticket;

pub use directory::SessionDirectory;
pub use model::{
    ChannelSession, ChatSession, DirectMessageSession, ME, Message, SYSTEM, Thread, TimelineKey,
    now_timestamp,
};
pub use state::{
    ConversationView, Counterpart, MessengerState, MessengerView, PendingReply, SessionListView,
    UNKNOWN_SENDER,
};
pub use ticket::{
    DEFAULT_TICKET_PREFIX, RenderedText, TextSegment, Ticket, TicketDirectory, TicketPriority,
    TicketStatus,
};
