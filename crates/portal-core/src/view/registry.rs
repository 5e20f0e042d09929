use std::str::FromStr;

use serde::Serialize;
use strum::IntoEnumIterator;

use super::model::ViewId;

/// Two-level breadcrumb shown in the shell header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub section: String,
    pub page: String,
}

impl Breadcrumb {
    fn new(section: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            page: page.into(),
        }
    }
}

/// Closed registry of mountable views.
///
/// Resolution never fails: anything that is not a known route resolves to the
/// default view.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewRegistry {
    default_view: ViewId,
}

impl ViewRegistry {
    pub fn new(default_view: ViewId) -> Self {
        Self { default_view }
    }

    pub fn default_view(&self) -> ViewId {
        self.default_view
    }

    /// Returns the view for a route string, falling back to the default view.
    pub fn resolve(&self, route: &str) -> ViewId {
        match ViewId::from_str(route.trim()) {
            Ok(view) => view,
            Err(_) => {
                tracing::warn!(
                    "[Shell] Unknown view '{}', falling back to '{}'",
                    route,
                    self.default_view
                );
                self.default_view
            }
        }
    }

    /// Returns true when the route names a registered view.
    pub fn contains(&self, route: &str) -> bool {
        ViewId::from_str(route.trim()).is_ok()
    }

    /// All registered views in declaration order.
    pub fn views(&self) -> impl Iterator<Item = ViewId> {
        ViewId::iter()
    }

    /// Breadcrumb labels for the header.
    pub fn breadcrumb(&self, view: ViewId) -> Breadcrumb {
        let route = view.route();
        match view {
            ViewId::Messenger => Breadcrumb::new("Social", "Chats"),
            ViewId::Overview => Breadcrumb::new("Favorites", "Overview"),
            ViewId::Projects => Breadcrumb::new("Favorites", "Projects"),
            ViewId::Courses => Breadcrumb::new("Dashboards", "Online Courses"),
            ViewId::Account => Breadcrumb::new("Pages", "Account"),
            ViewId::Corporate => Breadcrumb::new("Pages", "Corporate"),
            ViewId::Blog => Breadcrumb::new("Pages", "Blog"),
            _ => {
                if let Some(suffix) = route.strip_prefix("dashboard-") {
                    Breadcrumb::new("Dashboards", capitalize_first(suffix))
                } else if let Some(suffix) = route.strip_prefix("profile-") {
                    Breadcrumb::new("User Profile", capitalize_first(suffix))
                } else {
                    Breadcrumb::new("App", "Home")
                }
            }
        }
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_route() {
        let registry = ViewRegistry::default();
        assert_eq!(registry.resolve("messenger"), ViewId::Messenger);
        assert_eq!(
            registry.resolve("profile-followers"),
            ViewId::ProfileFollowers
        );
    }

    #[test]
    fn test_resolve_unknown_route_fails_closed() {
        let registry = ViewRegistry::default();
        for bogus in ["", "settings", "DASHBOARD-PRODUCT", "messenger/igor"] {
            assert_eq!(registry.resolve(bogus), ViewId::DashboardProduct);
            assert!(!registry.contains(bogus));
        }
    }

    #[test]
    fn test_breadcrumbs() {
        let registry = ViewRegistry::default();
        assert_eq!(
            registry.breadcrumb(ViewId::Messenger),
            Breadcrumb::new("Social", "Chats")
        );
        assert_eq!(
            registry.breadcrumb(ViewId::DashboardTeam),
            Breadcrumb::new("Dashboards", "Team")
        );
        assert_eq!(
            registry.breadcrumb(ViewId::ProfileCampaigns),
            Breadcrumb::new("User Profile", "Campaigns")
        );
        assert_eq!(
            registry.breadcrumb(ViewId::Courses),
            Breadcrumb::new("Dashboards", "Online Courses")
        );
        assert_eq!(
            registry.breadcrumb(ViewId::PrCoach),
            Breadcrumb::new("App", "Home")
        );
    }

    #[test]
    fn test_registry_lists_every_view() {
        let registry = ViewRegistry::default();
        assert_eq!(registry.views().count(), 19);
    }
}
