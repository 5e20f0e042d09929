//! Ticket references embedded in message text.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::error::{PortalError, Result};

pub const DEFAULT_TICKET_PREFIX: &str = "MWS";

static DEFAULT_TICKET_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"MWS-\d+").expect("valid ticket pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
pub enum TicketStatus {
    #[serde(rename = "To Do")]
    #[strum(serialize = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    #[strum(serialize = "In Progress")]
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
pub enum TicketPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub key: String,
    pub title: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub assignee: String,
}

impl Ticket {
    pub fn new(
        key: &str,
        title: &str,
        status: TicketStatus,
        priority: TicketPriority,
        assignee: &str,
    ) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            status,
            priority,
            assignee: assignee.to_string(),
        }
    }
}

/// A run of message text: either plain or a highlighted ticket key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextSegment {
    Plain { text: String },
    TicketKey { key: String, known: bool },
}

/// Rendering instructions for one message body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedText {
    pub segments: Vec<TextSegment>,
    /// One card per known key occurrence, in order of appearance.
    pub cards: Vec<Ticket>,
}

impl RenderedText {
    pub fn highlighted_keys(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            TextSegment::TicketKey { key, .. } => Some(key.as_str()),
            TextSegment::Plain { .. } => None,
        })
    }
}

/// Static ticket lookup plus the `<PREFIX>-<digits>` key pattern.
#[derive(Debug, Clone)]
pub struct TicketDirectory {
    pattern: Regex,
    tickets: HashMap<String, Ticket>,
}

impl TicketDirectory {
    /// Builds a directory whose keys look like `<prefix>-<digits>`.
    pub fn new(prefix: &str, tickets: Vec<Ticket>) -> Result<Self> {
        if prefix.trim().is_empty() {
            return Err(PortalError::config("ticket prefix must not be empty"));
        }
        let pattern = if prefix == DEFAULT_TICKET_PREFIX {
            DEFAULT_TICKET_PATTERN.clone()
        } else {
            Regex::new(&format!(r"{}-\d+", regex::escape(prefix)))
                .map_err(|e| PortalError::config(format!("invalid ticket prefix: {e}")))?
        };
        Ok(Self {
            pattern,
            tickets: tickets
                .into_iter()
                .map(|t| (t.key.clone(), t))
                .collect(),
        })
    }

    pub fn get(&self, key: &str) -> Option<&Ticket> {
        self.tickets.get(key)
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Splits `text` into plain and key segments and collects cards.
    ///
    /// Every match is highlighted. Only keys present in the directory get a
    /// card, and a key that appears twice gets two cards.
    pub fn render_text(&self, text: &str) -> RenderedText {
        let mut rendered = RenderedText::default();
        let mut cursor = 0;

        for found in self.pattern.find_iter(text) {
            if found.start() > cursor {
                rendered.segments.push(TextSegment::Plain {
                    text: text[cursor..found.start()].to_string(),
                });
            }
            let key = found.as_str();
            let ticket = self.tickets.get(key);
            rendered.segments.push(TextSegment::TicketKey {
                key: key.to_string(),
                known: ticket.is_some(),
            });
            if let Some(ticket) = ticket {
                rendered.cards.push(ticket.clone());
            }
            cursor = found.end();
        }

        if cursor < text.len() {
            rendered.segments.push(TextSegment::Plain {
                text: text[cursor..].to_string(),
            });
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messenger::seed;

    fn directory() -> TicketDirectory {
        seed::ticket_directory(DEFAULT_TICKET_PREFIX).unwrap()
    }

    #[test]
    fn test_known_key_gets_highlight_and_card() {
        let rendered = directory().render_text("Please check MWS-1024");

        assert_eq!(
            rendered.segments,
            vec![
                TextSegment::Plain {
                    text: "Please check ".to_string()
                },
                TextSegment::TicketKey {
                    key: "MWS-1024".to_string(),
                    known: true
                },
            ]
        );
        assert_eq!(rendered.cards.len(), 1);
        let card = &rendered.cards[0];
        assert_eq!(card.title, "Implement Dark Mode for Dashboard");
        assert_eq!(card.status, TicketStatus::Done);
        assert_eq!(card.priority, TicketPriority::Medium);
        assert_eq!(card.assignee, "Igor Malysh");
    }

    #[test]
    fn test_duplicate_keys_render_duplicate_cards() {
        let rendered = directory().render_text("See MWS-1024 and MWS-1024 again");
        assert_eq!(rendered.cards.len(), 2);
        assert_eq!(rendered.highlighted_keys().count(), 2);
        assert_eq!(rendered.cards[0], rendered.cards[1]);
    }

    #[test]
    fn test_unknown_key_is_highlighted_without_card() {
        let rendered = directory().render_text("MWS-9999 is new");
        assert!(rendered.cards.is_empty());
        assert_eq!(
            rendered.segments[0],
            TextSegment::TicketKey {
                key: "MWS-9999".to_string(),
                known: false
            }
        );
    }

    #[test]
    fn test_cards_follow_text_order() {
        let rendered = directory().render_text("MWS-1099 then MWS-1045");
        let keys: Vec<&str> = rendered.cards.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["MWS-1099", "MWS-1045"]);
    }

    #[test]
    fn test_plain_text_is_one_segment() {
        let rendered = directory().render_text("no tickets here, MWS- alone");
        assert_eq!(rendered.segments.len(), 1);
        assert!(rendered.cards.is_empty());
    }

    #[test]
    fn test_match_has_no_word_boundary() {
        let rendered = directory().render_text("xMWS-1024y");
        let keys: Vec<_> = rendered.highlighted_keys().collect();
        assert_eq!(keys, vec!["MWS-1024"]);
        assert_eq!(rendered.segments.len(), 3);
    }

    #[test]
    fn test_custom_prefix_is_escaped() {
        let directory = TicketDirectory::new("A.B", vec![]).unwrap();
        let count = |text: &str| directory.render_text(text).highlighted_keys().count();
        assert_eq!(count("A.B-7"), 1);
        assert_eq!(count("AxB-7"), 0);
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        assert!(TicketDirectory::new(" ", vec![]).unwrap_err().is_config());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(TicketStatus::InProgress.to_string(), "In Progress");
        assert_eq!(TicketStatus::ToDo.as_ref(), "To Do");
    }
}
