//! Simulated voice call state.
//!
//! This is the synchronous half of the call machine; the timers that drive it
//! live in `portal-application`.

use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::contact::Contact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, AsRefStr, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CallStatus {
    #[default]
    Idle,
    Ringing,
    Connected,
}

/// `idle -> ringing -> connected -> idle`.
///
/// Duration is zero outside `Connected`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CallState {
    status: CallStatus,
    contact: Option<Contact>,
    duration_secs: u64,
}

impl CallState {
    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn is_active(&self) -> bool {
        self.status != CallStatus::Idle
    }

    /// Binds `contact` and starts ringing. Any previous call is replaced.
    pub fn start(&mut self, contact: Contact) {
        self.status = CallStatus::Ringing;
        self.contact = Some(contact);
        self.duration_secs = 0;
    }

    /// Ringing to connected. Returns false in any other state.
    pub fn connect(&mut self) -> bool {
        if self.status != CallStatus::Ringing {
            return false;
        }
        self.status = CallStatus::Connected;
        self.duration_secs = 0;
        true
    }

    /// Adds one second to a connected call. Returns false in any other state.
    pub fn tick(&mut self) -> bool {
        if self.status != CallStatus::Connected {
            return false;
        }
        self.duration_secs += 1;
        true
    }

    /// Back to idle from any state.
    pub fn end(&mut self) {
        self.status = CallStatus::Idle;
        self.contact = None;
        self.duration_secs = 0;
    }

    /// Overlay status line: "Calling..." while ringing, `mm:ss` once connected.
    pub fn status_label(&self) -> String {
        match self.status {
            CallStatus::Idle => String::new(),
            CallStatus::Ringing => "Calling...".to_string(),
            CallStatus::Connected => format_duration(self.duration_secs),
        }
    }
}

pub fn format_duration(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactDirectory;

    fn igor() -> Contact {
        ContactDirectory::default().find("igor").cloned().unwrap()
    }

    #[test]
    fn test_full_lifecycle() {
        let mut call = CallState::default();
        call.start(igor());
        assert_eq!(call.status(), CallStatus::Ringing);
        assert_eq!(call.status_label(), "Calling...");

        assert!(call.connect());
        assert!(call.tick());
        assert!(call.tick());
        assert_eq!(call.duration_secs(), 2);
        assert_eq!(call.status_label(), "00:02");

        call.end();
        assert_eq!(call.status(), CallStatus::Idle);
        assert!(call.contact().is_none());
        assert_eq!(call.duration_secs(), 0);
    }

    #[test]
    fn test_tick_outside_connected_is_ignored() {
        let mut call = CallState::default();
        assert!(!call.tick());
        call.start(igor());
        assert!(!call.tick());
        assert_eq!(call.duration_secs(), 0);
    }

    #[test]
    fn test_connect_after_end_is_ignored() {
        let mut call = CallState::default();
        call.start(igor());
        call.end();
        assert!(!call.connect());
        assert_eq!(call.status(), CallStatus::Idle);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(75), "01:15");
        assert_eq!(format_duration(3600), "60:00");
    }
}
