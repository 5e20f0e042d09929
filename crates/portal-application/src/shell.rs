//! Root composition of the intranet shell.
//!
//! [`Shell`] owns navigation, layout, the quick-jump search box, notifications
//! and the contact panel. Navigation side effects that span several of these
//! (clearing search, collapsing the sidebar on narrow screens) live here.

use std::sync::Arc;

use portal_core::config::LayoutConfig;
use portal_core::contact::{Contact, ContactDirectory};
use portal_core::layout::{LayoutShell, LayoutState, PreferenceStore, Theme};
use portal_core::navigation::{NavParams, NavigationController, NavigationState};
use portal_core::notification::NotificationCenter;
use portal_core::search::{SearchEntry, SearchIndex};
use portal_core::view::{Breadcrumb, ViewId, ViewRegistry};
use portal_core::{PortalError, Result};
use serde::Serialize;

/// Search box contents and results-panel visibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchBox {
    pub query: String,
    pub results_visible: bool,
}

pub struct Shell {
    navigation: NavigationController,
    layout: LayoutShell,
    index: SearchIndex,
    search: SearchBox,
    notifications: NotificationCenter,
    contacts: ContactDirectory,
}

impl Shell {
    pub fn new(
        config: LayoutConfig,
        viewport_width: u32,
        store: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            navigation: NavigationController::new(ViewRegistry::default()),
            layout: LayoutShell::new(config, viewport_width, store),
            index: SearchIndex::default(),
            search: SearchBox::default(),
            notifications: NotificationCenter::default(),
            contacts: ContactDirectory::default(),
        }
    }

    // === Navigation ===

    pub fn navigation(&self) -> &NavigationState {
        self.navigation.state()
    }

    pub fn current_view(&self) -> ViewId {
        self.navigation.current_view()
    }

    pub fn breadcrumb(&self) -> Breadcrumb {
        self.navigation.breadcrumb()
    }

    pub fn registry(&self) -> &ViewRegistry {
        self.navigation.registry()
    }

    /// Switches view, clears the search box and collapses the sidebar when the
    /// viewport is narrow.
    pub fn navigate(&mut self, view: ViewId, params: NavParams) {
        self.navigation.navigate(view, params);
        self.after_navigation();
    }

    /// Navigates by route string. Unknown routes land on the default view.
    pub fn navigate_route(&mut self, route: &str, params: NavParams) -> ViewId {
        let view = self.navigation.navigate_route(route, params);
        self.after_navigation();
        view
    }

    fn after_navigation(&mut self) {
        self.search = SearchBox::default();
        if self.layout.is_narrow() {
            self.layout.close_sidebar();
        }
    }

    pub fn target_chat_user(&self) -> Option<&str> {
        self.navigation.target_chat_user()
    }

    pub fn clear_target_chat_user(&mut self) {
        self.navigation.clear_target_chat_user();
    }

    // === Layout ===

    pub fn layout(&self) -> LayoutState {
        self.layout.state()
    }

    pub fn theme(&self) -> Theme {
        self.layout.theme()
    }

    pub fn viewport_width(&self) -> u32 {
        self.layout.viewport_width()
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.layout.toggle_sidebar()
    }

    pub fn toggle_right_panel(&mut self) -> bool {
        self.layout.toggle_right_panel()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.layout.toggle_theme()
    }

    pub fn resize(&mut self, viewport_width: u32) {
        self.layout.resize(viewport_width);
    }

    // === Search ===

    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    /// Updates the query; the results panel shows while the query is non-empty.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.search.results_visible = !query.is_empty();
        self.search.query = query;
    }

    pub fn search_results(&self) -> Vec<&SearchEntry> {
        self.index.filter(&self.search.query)
    }

    // === Notifications ===

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn toggle_notifications(&mut self) -> bool {
        self.notifications.toggle_panel()
    }

    pub fn mark_all_read(&mut self) {
        self.notifications.mark_all_read();
    }

    // === Contacts ===

    pub fn contacts(&self) -> &[Contact] {
        self.contacts.all()
    }

    pub fn contact(&self, id: &str) -> Result<&Contact> {
        self.contacts
            .find(id)
            .ok_or_else(|| PortalError::not_found("contact", id))
    }

    /// Opens the messenger with a deep link to the contact's DM.
    pub fn message_contact(&mut self, id: &str) -> Result<()> {
        let contact_id = self.contact(id)?.id.clone();
        self.navigate(ViewId::Messenger, NavParams::user(contact_id));
        Ok(())
    }
}
