//! Responsive layout flags and the light/dark theme.
//!
//! - `theme`: [`Theme`] and the [`PreferenceStore`] it is persisted through
//! - `shell`: [`LayoutShell`], owner of [`LayoutState`]

mod shell;
mod theme;

pub use shell::{LayoutShell, LayoutState};
pub use theme::{PreferenceStore, THEME_KEY, Theme};
