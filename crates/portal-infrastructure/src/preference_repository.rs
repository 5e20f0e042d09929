//! Durable theme preference backed by `preferences.toml`.

use std::sync::RwLock;

use portal_core::PortalError;
use portal_core::layout::{PreferenceStore, THEME_KEY};
use serde::{Deserialize, Serialize};

use crate::paths::PortalPaths;
use crate::storage::AtomicTomlFile;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

/// [`PreferenceStore`] over a TOML file. Only the theme key is accepted.
///
/// The file is read once and cached; every write goes straight to disk.
pub struct TomlPreferenceRepository {
    file: AtomicTomlFile<Preferences>,
    cache: RwLock<Option<Preferences>>,
}

impl TomlPreferenceRepository {
    pub fn new(paths: &PortalPaths) -> Self {
        Self {
            file: AtomicTomlFile::new(paths.preferences_file()),
            cache: RwLock::new(None),
        }
    }

    fn check_key(key: &str) -> portal_core::Result<()> {
        if key != THEME_KEY {
            return Err(PortalError::validation(format!(
                "unknown preference key '{key}'"
            )));
        }
        Ok(())
    }

    fn load(&self) -> portal_core::Result<Preferences> {
        if let Ok(cache) = self.cache.read() {
            if let Some(cached) = cache.as_ref() {
                return Ok(cached.clone());
            }
        }
        let loaded = self.file.load()?.unwrap_or_default();
        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(loaded.clone());
        }
        Ok(loaded)
    }
}

impl PreferenceStore for TomlPreferenceRepository {
    fn get(&self, key: &str) -> portal_core::Result<Option<String>> {
        Self::check_key(key)?;
        Ok(self.load()?.theme)
    }

    fn set(&self, key: &str, value: &str) -> portal_core::Result<()> {
        Self::check_key(key)?;
        let saved = self.file.update(Preferences::default(), |prefs| {
            prefs.theme = Some(value.to_string());
        })?;
        tracing::debug!("[Preferences] Saved {} = {}", key, value);
        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(saved);
        }
        Ok(())
    }
}
