//! Configuration models.
//!
//! `PortalConfig` is read from `config.toml`; every field has a default so a
//! partial or empty file is valid. Secrets live in a separate `secret.json`.

use serde::{Deserialize, Serialize};

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PortalConfig {
    pub layout: LayoutConfig,
    pub call: CallConfig,
    pub messenger: MessengerConfig,
    pub completion: CompletionConfig,
    pub advisory: AdvisoryConfig,
}

/// Viewport thresholds in pixels.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    /// At or above this width the sidebar is open by default.
    pub sidebar_min_width: u32,
    /// At or above this width the right panel is open by default.
    pub right_panel_min_width: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sidebar_min_width: 1024,
            right_panel_min_width: 1280,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct CallConfig {
    /// Delay before a ringing call auto-connects.
    pub ring_delay_ms: u64,
    /// Interval of the connected-call duration tick.
    pub tick_interval_ms: u64,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            ring_delay_ms: 2000,
            tick_interval_ms: 1000,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MessengerConfig {
    /// Project prefix of ticket keys, e.g. `MWS` for `MWS-1024`.
    pub ticket_prefix: String,
    /// Company name used in the reply persona.
    pub company: String,
    /// Display name of the local user.
    pub user_display_name: String,
    /// Role of the local user.
    pub user_role: String,
}

impl Default for MessengerConfig {
    fn default() -> Self {
        Self {
            ticket_prefix: "MWS".to_string(),
            company: "MTS Web Services".to_string(),
            user_display_name: "Ekaterina Tyukavkina".to_string(),
            user_role: "CEO".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CompletionConfig {
    /// Model name passed to the completion API.
    pub model: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// PR Coach analyses below this confidence go to human review.
    pub review_confidence_threshold: f64,
    /// Probability of a random PR Coach spot check.
    pub spot_check_rate: f64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            review_confidence_threshold: 0.6,
            spot_check_rate: 0.15,
        }
    }
}

/// Contents of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// Returns the Gemini API key when one is configured and non-empty.
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini
            .as_ref()
            .map(|g| g.api_key.trim())
            .filter(|key| !key.is_empty())
    }
}
