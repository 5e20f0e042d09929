use std::sync::Arc;

use serde::Serialize;

use super::theme::{PreferenceStore, THEME_KEY, Theme};
use crate::config::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutState {
    pub sidebar_open: bool,
    pub right_panel_open: bool,
    pub dark_mode: bool,
}

/// Owns [`LayoutState`] and is the only writer of the theme preference.
pub struct LayoutShell {
    config: LayoutConfig,
    viewport_width: u32,
    state: LayoutState,
    store: Arc<dyn PreferenceStore>,
}

impl LayoutShell {
    /// Derives panel flags from `viewport_width` and reads the stored theme.
    ///
    /// A missing or unreadable theme defaults to light; the system preference is
    /// never consulted.
    pub fn new(
        config: LayoutConfig,
        viewport_width: u32,
        store: Arc<dyn PreferenceStore>,
    ) -> Self {
        let stored = match store.get(THEME_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("[Preferences] Failed to read theme, using light: {}", e);
                None
            }
        };
        let theme = Theme::from_stored(stored.as_deref());

        Self {
            state: LayoutState {
                sidebar_open: viewport_width >= config.sidebar_min_width,
                right_panel_open: viewport_width >= config.right_panel_min_width,
                dark_mode: theme.is_dark(),
            },
            config,
            viewport_width,
            store,
        }
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn theme(&self) -> Theme {
        if self.state.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// True below the sidebar threshold, where navigation auto-collapses the sidebar.
    pub fn is_narrow(&self) -> bool {
        self.viewport_width < self.config.sidebar_min_width
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.state.sidebar_open = !self.state.sidebar_open;
        self.state.sidebar_open
    }

    pub fn toggle_right_panel(&mut self) -> bool {
        self.state.right_panel_open = !self.state.right_panel_open;
        self.state.right_panel_open
    }

    pub fn close_sidebar(&mut self) {
        self.state.sidebar_open = false;
    }

    /// Flips the theme and persists it. A failed write keeps the in-memory flip.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme().toggled();
        self.state.dark_mode = theme.is_dark();
        if let Err(e) = self.store.set(THEME_KEY, theme.as_ref()) {
            tracing::warn!("[Preferences] Failed to persist theme '{}': {}", theme, e);
        }
        theme
    }

    /// Re-derives both panel flags from the new width.
    ///
    /// This overwrites any manual toggle made before the resize.
    pub fn resize(&mut self, viewport_width: u32) {
        self.viewport_width = viewport_width;
        self.state.sidebar_open = viewport_width >= self.config.sidebar_min_width;
        self.state.right_panel_open = viewport_width >= self.config.right_panel_min_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PortalError, Result};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockPreferenceStore {
        values: Mutex<HashMap<String, String>>,
        fail_writes: bool,
    }

    impl MockPreferenceStore {
        fn with_theme(value: &str) -> Self {
            let store = Self::default();
            store
                .values
                .lock()
                .unwrap()
                .insert(THEME_KEY.to_string(), value.to_string());
            store
        }

        fn stored_theme(&self) -> Option<String> {
            self.values.lock().unwrap().get(THEME_KEY).cloned()
        }
    }

    impl PreferenceStore for MockPreferenceStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(PortalError::io("read-only"));
            }
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn shell(width: u32, store: Arc<MockPreferenceStore>) -> LayoutShell {
        LayoutShell::new(LayoutConfig::default(), width, store)
    }

    #[test]
    fn test_wide_viewport_opens_both_panels() {
        let layout = shell(1440, Arc::new(MockPreferenceStore::default()));
        assert!(layout.state().sidebar_open);
        assert!(layout.state().right_panel_open);
        assert!(!layout.is_narrow());
    }

    #[test]
    fn test_thresholds_are_independent() {
        let layout = shell(1100, Arc::new(MockPreferenceStore::default()));
        assert!(layout.state().sidebar_open);
        assert!(!layout.state().right_panel_open);

        let layout = shell(800, Arc::new(MockPreferenceStore::default()));
        assert!(!layout.state().sidebar_open);
        assert!(!layout.state().right_panel_open);
        assert!(layout.is_narrow());
    }

    #[test]
    fn test_missing_theme_defaults_to_light() {
        let layout = shell(1440, Arc::new(MockPreferenceStore::default()));
        assert_eq!(layout.theme(), Theme::Light);
    }

    #[test]
    fn test_stored_dark_theme_is_restored() {
        let layout = shell(1440, Arc::new(MockPreferenceStore::with_theme("dark")));
        assert!(layout.state().dark_mode);
    }

    #[test]
    fn test_toggle_theme_round_trip_persists_each_time() {
        let store = Arc::new(MockPreferenceStore::default());
        let mut layout = shell(1440, store.clone());

        assert_eq!(layout.toggle_theme(), Theme::Dark);
        assert_eq!(store.stored_theme().as_deref(), Some("dark"));

        assert_eq!(layout.toggle_theme(), Theme::Light);
        assert_eq!(store.stored_theme().as_deref(), Some("light"));
        assert!(!layout.state().dark_mode);
    }

    #[test]
    fn test_failed_persist_keeps_in_memory_theme() {
        let store = Arc::new(MockPreferenceStore {
            fail_writes: true,
            ..Default::default()
        });
        let mut layout = shell(1440, store);
        assert_eq!(layout.toggle_theme(), Theme::Dark);
        assert!(layout.state().dark_mode);
    }

    #[test]
    fn test_resize_overwrites_manual_toggle() {
        let mut layout = shell(1440, Arc::new(MockPreferenceStore::default()));
        layout.toggle_sidebar();
        layout.toggle_right_panel();
        assert!(!layout.state().sidebar_open);
        assert!(!layout.state().right_panel_open);

        // Same width tier: the manual choice is discarded.
        layout.resize(1500);
        assert!(layout.state().sidebar_open);
        assert!(layout.state().right_panel_open);

        layout.resize(900);
        assert!(!layout.state().sidebar_open);
        assert!(!layout.state().right_panel_open);
        assert_eq!(layout.viewport_width(), 900);
    }
}
