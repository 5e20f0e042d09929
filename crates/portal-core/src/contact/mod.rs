//! People directory shown in the right panel.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Presence {
    Online,
    Offline,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub presence: Presence,
}

impl Contact {
    pub fn new(id: &str, name: &str, role: &str, presence: Presence) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            avatar: avatar_url(id),
            presence,
        }
    }
}

/// Placeholder avatar for a person id.
pub fn avatar_url(id: &str) -> String {
    format!("https://i.pravatar.cc/150?u={id}")
}

#[derive(Debug, Clone)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
}

impl ContactDirectory {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn find(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }
}

impl Default for ContactDirectory {
    fn default() -> Self {
        Self::new(vec![
            Contact::new("andrey", "Andrey Shtanov", "CCO", Presence::Online),
            Contact::new("oleg", "Oleg Sidorenkov", "CTO", Presence::Busy),
            Contact::new("igor", "Igor Malysh", "Chief DevEx", Presence::Online),
            Contact::new("artem", "Artem Zhulin", "Head of WB", Presence::Offline),
        ])
    }
}
