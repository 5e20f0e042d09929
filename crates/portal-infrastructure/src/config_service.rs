//! Loads `config.toml` and `secret.json`.

use std::fs;

use portal_core::PortalError;
use portal_core::config::{GeminiConfig, PortalConfig, SecretConfig};

use crate::paths::PortalPaths;
use crate::storage::AtomicTomlFile;

/// Environment variable that overrides the Gemini key from `secret.json`.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Reads configuration files, creating defaults for missing ones.
///
/// Existing files are never rewritten.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: PortalPaths,
}

impl ConfigService {
    pub fn new(paths: PortalPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &PortalPaths {
        &self.paths
    }

    /// Loads `config.toml`, writing the defaults if the file does not exist.
    pub fn load_config(&self) -> portal_core::Result<PortalConfig> {
        let file = AtomicTomlFile::<PortalConfig>::new(self.paths.config_file());
        if let Some(config) = file.load()? {
            return Ok(config);
        }

        let config = PortalConfig::default();
        file.save(&config)?;
        tracing::info!(
            "[Config] Created default configuration at {}",
            file.path().display()
        );
        Ok(config)
    }

    /// Loads `secret.json` and applies the `GEMINI_API_KEY` override.
    ///
    /// A missing file is created as a template with an empty key.
    pub fn load_secrets(&self) -> portal_core::Result<SecretConfig> {
        let secrets = self.read_or_create_secrets()?;
        Ok(apply_env_override(
            secrets,
            std::env::var(GEMINI_API_KEY_ENV).ok(),
        ))
    }

    fn read_or_create_secrets(&self) -> portal_core::Result<SecretConfig> {
        let path = self.paths.secret_file();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                return Ok(SecretConfig::default());
            }
            return Ok(serde_json::from_str(&content)?);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: Some(PortalConfig::default().completion.model),
            }),
        };
        let json = serde_json::to_string_pretty(&template)?;
        fs::write(&path, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        tracing::info!("[Config] Created secret template at {}", path.display());
        Ok(template)
    }
}

/// Replaces the Gemini key with `env_value` when it is set and non-blank.
pub fn apply_env_override(mut secrets: SecretConfig, env_value: Option<String>) -> SecretConfig {
    let Some(key) = env_value.filter(|v| !v.trim().is_empty()) else {
        return secrets;
    };
    match secrets.gemini.as_mut() {
        Some(gemini) => gemini.api_key = key,
        None => {
            secrets.gemini = Some(GeminiConfig {
                api_key: key,
                model_name: None,
            })
        }
    }
    secrets
}

impl From<crate::paths::PathError> for PortalError {
    fn from(err: crate::paths::PathError) -> Self {
        PortalError::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> ConfigService {
        ConfigService::new(PortalPaths::new(Some(dir.path())).unwrap())
    }

    #[test]
    fn test_missing_config_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let config = service(&dir).load_config().unwrap();

        assert_eq!(config, PortalConfig::default());
        assert!(dir.path().join("config.toml").exists());
    }

    #[test]
    fn test_existing_config_is_read() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[call]\nring_delay_ms = 500\n",
        )
        .unwrap();

        let config = service(&dir).load_config().unwrap();
        assert_eq!(config.call.ring_delay_ms, 500);
        assert_eq!(config.call.tick_interval_ms, 1000);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[call\n").unwrap();
        assert!(service(&dir).load_config().is_err());
    }

    #[test]
    fn test_secret_template_has_no_key() {
        let dir = TempDir::new().unwrap();
        let secrets = service(&dir).read_or_create_secrets().unwrap();

        assert!(secrets.gemini_api_key().is_none());
        assert!(dir.path().join("secret.json").exists());
    }

    #[test]
    fn test_secret_file_is_read() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("secret.json"),
            r#"{ "gemini": { "api_key": "abc" } }"#,
        )
        .unwrap();

        let secrets = service(&dir).read_or_create_secrets().unwrap();
        assert_eq!(secrets.gemini_api_key(), Some("abc"));
    }

    #[test]
    fn test_env_override() {
        let secrets = apply_env_override(SecretConfig::default(), Some("from-env".to_string()));
        assert_eq!(secrets.gemini_api_key(), Some("from-env"));

        let kept = apply_env_override(secrets, Some("  ".to_string()));
        assert_eq!(kept.gemini_api_key(), Some("from-env"));

        let kept = apply_env_override(kept, None);
        assert_eq!(kept.gemini_api_key(), Some("from-env"));
    }
}
