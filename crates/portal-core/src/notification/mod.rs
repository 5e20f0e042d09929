//! Header notifications.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRecord {
    pub id: u32,
    pub text: String,
    pub relative_time: String,
    pub read: bool,
}

impl NotificationRecord {
    pub fn unread(id: u32, text: impl Into<String>, relative_time: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            relative_time: relative_time.into(),
            read: false,
        }
    }
}

/// Ordered notification list with a bulk read transition.
///
/// Records are never re-sorted or deleted; the unread count is always derived.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    records: Vec<NotificationRecord>,
    panel_open: bool,
}

impl NotificationCenter {
    pub fn new(records: Vec<NotificationRecord>) -> Self {
        Self {
            records,
            panel_open: false,
        }
    }

    pub fn records(&self) -> &[NotificationRecord] {
        &self.records
    }

    pub fn unread_count(&self) -> usize {
        self.records.iter().filter(|n| !n.read).count()
    }

    pub fn mark_all_read(&mut self) {
        for record in &mut self.records {
            record.read = true;
        }
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn toggle_panel(&mut self) -> bool {
        self.panel_open = !self.panel_open;
        self.panel_open
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(vec![
            NotificationRecord::unread(1, "New comment on Project X", "2 hours ago"),
            NotificationRecord::unread(2, "Server load warning (98%)", "4 hours ago"),
            NotificationRecord::unread(3, "Jared invited you to \"Standup\"", "5 hours ago"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_all_unread() {
        let center = NotificationCenter::default();
        assert_eq!(center.records().len(), 3);
        assert_eq!(center.unread_count(), 3);
    }

    #[test]
    fn test_mark_all_read_keeps_order() {
        let mut center = NotificationCenter::default();
        let ids_before: Vec<u32> = center.records().iter().map(|n| n.id).collect();

        center.mark_all_read();

        assert_eq!(center.unread_count(), 0);
        let ids_after: Vec<u32> = center.records().iter().map(|n| n.id).collect();
        assert_eq!(ids_before, ids_after);
    }

    #[test]
    fn test_unread_count_is_derived() {
        let mut center = NotificationCenter::new(vec![
            NotificationRecord::unread(1, "a", "now"),
            NotificationRecord {
                read: true,
                ..NotificationRecord::unread(2, "b", "now")
            },
        ]);
        assert_eq!(center.unread_count(), 1);
        center.mark_all_read();
        center.mark_all_read();
        assert_eq!(center.unread_count(), 0);
    }

    #[test]
    fn test_panel_toggle() {
        let mut center = NotificationCenter::default();
        assert!(center.toggle_panel());
        assert!(!center.toggle_panel());
    }
}
