//! Navigation state and the controller that owns it.

use serde::Serialize;

use crate::view::{Breadcrumb, ViewId, ViewRegistry};

/// Optional parameters carried by a navigation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavParams {
    /// Peer to open when navigating to the messenger.
    pub user_id: Option<String>,
}

impl NavParams {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }
}

/// Current view plus the one-shot deep-link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub current_view: ViewId,
    /// Set by messenger navigation, cleared only by the messenger once consumed.
    pub target_chat_user: Option<String>,
}

/// Sole writer of [`NavigationState`].
#[derive(Debug, Clone)]
pub struct NavigationController {
    registry: ViewRegistry,
    state: NavigationState,
}

impl NavigationController {
    pub fn new(registry: ViewRegistry) -> Self {
        Self {
            state: NavigationState {
                current_view: registry.default_view(),
                target_chat_user: None,
            },
            registry,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_view(&self) -> ViewId {
        self.state.current_view
    }

    pub fn target_chat_user(&self) -> Option<&str> {
        self.state.target_chat_user.as_deref()
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn breadcrumb(&self) -> Breadcrumb {
        self.registry.breadcrumb(self.state.current_view)
    }

    /// Switches to `view`.
    ///
    /// A `user_id` is only recorded for messenger navigation; every other view
    /// leaves the pending target untouched.
    pub fn navigate(&mut self, view: ViewId, params: NavParams) {
        self.state.current_view = view;
        if view.is_messenger() {
            if let Some(user_id) = params.user_id {
                self.state.target_chat_user = Some(user_id);
            }
        }
        tracing::debug!("[Shell] Navigated to '{}'", view);
    }

    /// Navigates by route string; unknown routes go to the default view.
    pub fn navigate_route(&mut self, route: &str, params: NavParams) -> ViewId {
        let view = self.registry.resolve(route);
        self.navigate(view, params);
        view
    }

    /// Clears the deep-link target. Called by the consumer, never by `navigate`.
    pub fn clear_target_chat_user(&mut self) {
        self.state.target_chat_user = None;
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(ViewRegistry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_default_view() {
        let nav = NavigationController::default();
        assert_eq!(nav.current_view(), ViewId::DashboardProduct);
        assert!(nav.target_chat_user().is_none());
    }

    #[test]
    fn test_unknown_route_goes_to_default() {
        let mut nav = NavigationController::default();
        nav.navigate(ViewId::Blog, NavParams::default());
        let view = nav.navigate_route("no-such-view", NavParams::default());
        assert_eq!(view, ViewId::DashboardProduct);
        assert_eq!(nav.current_view(), ViewId::DashboardProduct);
    }

    #[test]
    fn test_messenger_navigation_sets_target() {
        let mut nav = NavigationController::default();
        nav.navigate(ViewId::Messenger, NavParams::user("igor"));
        assert_eq!(nav.current_view(), ViewId::Messenger);
        assert_eq!(nav.target_chat_user(), Some("igor"));
    }

    #[test]
    fn test_non_messenger_navigation_leaves_target_unchanged() {
        let mut nav = NavigationController::default();
        nav.navigate(ViewId::Messenger, NavParams::user("igor"));
        nav.navigate(ViewId::Blog, NavParams::user("oleg"));
        assert_eq!(nav.target_chat_user(), Some("igor"));

        nav.clear_target_chat_user();
        nav.navigate(ViewId::ProfileFollowers, NavParams::user("oleg"));
        assert!(nav.target_chat_user().is_none());
    }

    #[test]
    fn test_messenger_without_user_keeps_pending_target() {
        let mut nav = NavigationController::default();
        nav.navigate(ViewId::Messenger, NavParams::user("andrey"));
        nav.navigate(ViewId::Messenger, NavParams::default());
        assert_eq!(nav.target_chat_user(), Some("andrey"));
    }

    #[test]
    fn test_repeated_navigation_is_idempotent() {
        let mut nav = NavigationController::default();
        nav.navigate(ViewId::Projects, NavParams::default());
        let before = nav.state().clone();
        nav.navigate(ViewId::Projects, NavParams::default());
        assert_eq!(nav.state(), &before);
    }
}
