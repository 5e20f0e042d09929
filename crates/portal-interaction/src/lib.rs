//! Completion backends for the portal shell.

pub mod gemini_api_agent;
pub mod offline_agent;

use std::sync::Arc;
use std::time::Duration;

use portal_core::completion::CompletionAgent;
use portal_core::config::{CompletionConfig, SecretConfig};

pub use gemini_api_agent::GeminiApiAgent;
pub use offline_agent::OfflineAgent;

/// Picks the completion backend for this run.
///
/// `force_offline` or a missing Gemini key selects [`OfflineAgent`]. The model
/// from `secret.json` wins over the one in `config.toml`.
pub fn build_agent(
    config: &CompletionConfig,
    secrets: &SecretConfig,
    force_offline: bool,
) -> Arc<dyn CompletionAgent> {
    if force_offline {
        tracing::info!("[Gemini] Offline mode requested");
        return Arc::new(OfflineAgent::new("offline mode"));
    }
    let Some(api_key) = secrets.gemini_api_key() else {
        tracing::info!("[Gemini] No API key configured, running offline");
        return Arc::new(OfflineAgent::new("no Gemini API key configured"));
    };

    let model = secrets
        .gemini
        .as_ref()
        .and_then(|g| g.model_name.clone())
        .unwrap_or_else(|| config.model.clone());
    tracing::info!("[Gemini] Using model {}", model);

    Arc::new(
        GeminiApiAgent::new(api_key, model)
            .with_timeout(Duration::from_secs(config.timeout_secs)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::config::GeminiConfig;

    fn secrets(key: &str, model: Option<&str>) -> SecretConfig {
        SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: key.to_string(),
                model_name: model.map(str::to_string),
            }),
        }
    }

    #[test]
    fn test_missing_key_is_offline() {
        let secrets = SecretConfig::default();
        let agent = build_agent(&CompletionConfig::default(), &secrets, false);
        assert_eq!(agent.name(), "offline");
    }

    #[test]
    fn test_force_offline_wins_over_key() {
        let agent = build_agent(&CompletionConfig::default(), &secrets("k", None), true);
        assert_eq!(agent.name(), "offline");
    }

    #[test]
    fn test_model_selection() {
        let config = CompletionConfig::default();
        let agent = build_agent(&config, &secrets("k", None), false);
        assert_eq!(agent.name(), config.model);
        assert_eq!(
            build_agent(&config, &secrets("k", Some("gemini-2.5-pro")), false).name(),
            "gemini-2.5-pro"
        );
    }
}
