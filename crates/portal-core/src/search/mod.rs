//! Quick-jump search over the view list.

use serde::Serialize;

use crate::view::ViewId;

/// One searchable (view, label, section) entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub view: ViewId,
    pub label: String,
    pub section: String,
}

impl SearchEntry {
    pub fn new(view: ViewId, label: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            view,
            label: label.into(),
            section: section.into(),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle) || self.section.to_lowercase().contains(needle)
    }
}

/// Unsorted list of entries filtered by case-insensitive substring match.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn new(entries: Vec<SearchEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Entries whose label or section contains `query`, in index order.
    ///
    /// An empty query yields nothing; the results panel is hidden rather than
    /// listing every view.
    pub fn filter(&self, query: &str) -> Vec<&SearchEntry> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.entries.iter().filter(|e| e.matches(&needle)).collect()
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new(vec![
            SearchEntry::new(ViewId::Overview, "Overview", "Favorites"),
            SearchEntry::new(ViewId::Projects, "Projects", "Favorites"),
            SearchEntry::new(ViewId::DashboardProduct, "Product Dashboard", "Dashboards"),
            SearchEntry::new(ViewId::DashboardTeam, "Team Dashboard", "Dashboards"),
            SearchEntry::new(
                ViewId::DashboardEmployee,
                "Employee Dashboard",
                "Dashboards",
            ),
            SearchEntry::new(ViewId::Courses, "Online Courses", "Dashboards"),
            SearchEntry::new(ViewId::ProfileOverview, "User Profile", "Pages"),
            SearchEntry::new(ViewId::Corporate, "Corporate News", "Pages"),
            SearchEntry::new(ViewId::Blog, "Engineering Blog", "Pages"),
            SearchEntry::new(ViewId::Messenger, "Social / Messenger", "Pages"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_nothing() {
        assert!(SearchIndex::default().filter("").is_empty());
    }

    #[test]
    fn test_partial_label_match() {
        let index = SearchIndex::default();
        let results = index.filter("mess");
        assert!(results.iter().any(|e| e.view == ViewId::Messenger));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let index = SearchIndex::default();
        assert_eq!(index.filter("MESS"), index.filter("mess"));
    }

    #[test]
    fn test_section_match_preserves_order() {
        let index = SearchIndex::default();
        let views: Vec<ViewId> = index.filter("favorites").iter().map(|e| e.view).collect();
        assert_eq!(views, vec![ViewId::Overview, ViewId::Projects]);
    }

    #[test]
    fn test_no_match() {
        assert!(SearchIndex::default().filter("zzz").is_empty());
    }
}
