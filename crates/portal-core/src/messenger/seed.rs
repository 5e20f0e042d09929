//! Built-in messenger data.

use super::directory::SessionDirectory;
use super::model::{ChannelSession, ChatSession, DirectMessageSession, Message, SYSTEM, Thread};
use super::ticket::{Ticket, TicketDirectory, TicketPriority, TicketStatus};
use crate::contact::{Presence, avatar_url};
use crate::error::Result;

fn channel(id: &str, name: &str, unread_count: u32) -> ChatSession {
    ChatSession::Channel(ChannelSession {
        id: id.to_string(),
        name: name.to_string(),
        unread_count,
    })
}

#[allow(clippy::too_many_arguments)]
fn direct(
    peer_id: &str,
    display_name: &str,
    role: &str,
    preview: &str,
    timestamp: &str,
    unread_count: u32,
    presence: Presence,
) -> ChatSession {
    ChatSession::Direct(DirectMessageSession {
        id: format!("chat_{peer_id}"),
        peer_id: peer_id.to_string(),
        display_name: display_name.to_string(),
        role: role.to_string(),
        avatar: avatar_url(peer_id),
        last_message_preview: preview.to_string(),
        last_timestamp: timestamp.to_string(),
        unread_count,
        presence,
    })
}

fn thread(
    id: &str,
    channel_id: &str,
    title: &str,
    (author_name, author_id): (&str, &str),
    reply_count: u32,
    last_activity: &str,
    tags: &[&str],
) -> Thread {
    Thread {
        id: id.to_string(),
        channel_id: channel_id.to_string(),
        title: title.to_string(),
        author_name: author_name.to_string(),
        author_avatar: avatar_url(author_id),
        reply_count,
        last_activity: last_activity.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn sessions() -> Vec<ChatSession> {
    vec![
        channel("chan_general", "general", 0),
        channel("chan_engineering", "engineering", 3),
        channel("chan_releases", "releases", 0),
        channel("chan_random", "random", 0),
        direct(
            "andrey",
            "Andrey Shtanov",
            "CCO",
            "Let's review the client acquisition strategy.",
            "11:12",
            2,
            Presence::Online,
        ),
        direct(
            "igor",
            "Igor Malysh",
            "Chief DevEx",
            "The platform stability index is up by 5%!",
            "10:45",
            5,
            Presence::Online,
        ),
        direct(
            "oleg",
            "Oleg Sidorenkov",
            "CTO",
            "Approved the new architectural decision record.",
            "Yesterday",
            1,
            Presence::Busy,
        ),
        direct(
            "artem",
            "Artem Zhulin",
            "Head of WB",
            "Budget forecast for Q4 is ready for review.",
            "Mon",
            0,
            Presence::Offline,
        ),
    ]
}

pub fn threads() -> Vec<Thread> {
    vec![
        thread(
            "th_1",
            "chan_engineering",
            "API Gateway Latency Spike",
            ("Oleg Sidorenkov", "oleg"),
            14,
            "10 min ago",
            &["Incident", "P1"],
        ),
        thread(
            "th_2",
            "chan_engineering",
            "Migration to Kubernetes v1.28",
            ("Igor Malysh", "igor"),
            45,
            "2 hours ago",
            &["DevOps"],
        ),
        thread(
            "th_3",
            "chan_engineering",
            "Front-end Architecture Review",
            ("Ekaterina T.", "ekaterina"),
            8,
            "Yesterday",
            &["RFC"],
        ),
        thread(
            "th_4",
            "chan_general",
            "Q4 All-Hands Meeting",
            ("Andrey Shtanov", "andrey"),
            120,
            "1 hour ago",
            &[],
        ),
    ]
}

pub fn session_directory() -> Result<SessionDirectory> {
    SessionDirectory::new(sessions(), threads())
}

pub fn tickets() -> Vec<Ticket> {
    use TicketPriority::*;
    use TicketStatus::*;
    vec![
        Ticket::new(
            "MWS-1024",
            "Implement Dark Mode for Dashboard",
            Done,
            Medium,
            "Igor Malysh",
        ),
        Ticket::new(
            "MWS-1045",
            "Fix Login Latency on Mobile",
            Done,
            High,
            "Andrey Shtanov",
        ),
        Ticket::new(
            "MWS-1100",
            "New Corporate News Feed Layout",
            InProgress,
            Low,
            "Ekaterina T.",
        ),
        Ticket::new(
            "MWS-1102",
            "Integrate Tamagotchi Metrics API",
            ToDo,
            Medium,
            "Oleg S.",
        ),
        Ticket::new(
            "MWS-1099",
            "Optimize Video Streaming Codec",
            InProgress,
            High,
            "Artem Zhulin",
        ),
    ]
}

pub fn ticket_directory(prefix: &str) -> Result<TicketDirectory> {
    TicketDirectory::new(prefix, tickets())
}

/// First messages shown when a DM timeline is opened.
pub fn direct_history(session: &DirectMessageSession) -> Vec<Message> {
    if session.peer_id == "andrey" {
        return vec![
            Message::seeded(
                "1",
                "andrey",
                "Ekaterina, have you seen the latest NPS numbers?",
                "11:02",
            ),
            Message::seeded("2", "me", "Yes, they look promising! Good work.", "11:08"),
        ];
    }
    vec![Message::seeded(
        "100",
        &session.peer_id,
        &session.last_message_preview,
        "09:00",
    )]
}

/// First messages shown when a thread timeline is opened.
pub fn thread_history(thread_id: &str) -> Vec<Message> {
    match thread_id {
        "th_1" => vec![
            Message::seeded(
                "m1",
                "oleg",
                "Team, we are seeing a 200ms increase in latency on the main gateway. Investigation started.",
                "09:00",
            ),
            Message::seeded(
                "m2",
                "me",
                "I see it too on the dashboard. Is it related to the deployment of MWS-1099?",
                "09:05",
            ),
            Message::seeded(
                "m3",
                "oleg",
                "Checking logs now. MWS-1099 might be the culprit.",
                "09:07",
            ),
            Message::seeded(
                "m4",
                "igor",
                "Rolled back MWS-1099. Latency stabilizing.",
                "09:15",
            ),
        ],
        _ => vec![Message::seeded("init", SYSTEM, "Start of thread history...", "00:00")],
    }
}
