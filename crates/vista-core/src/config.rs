//! Application configuration
//!
//! Branding strings and feature flags. Loaded once at startup and passed
//! into the compositor as a plain value; nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub company_name: String,
    pub page_title: String,
    pub page_description: String,

    pub supports_chat_input: bool,
    pub supports_video_input: bool,
    pub supports_screen_share: bool,
    pub is_pre_connect_buffer_enabled: bool,

    pub logo: String,
    /// Accent colour, `#rrggbb`
    pub accent: String,
    pub logo_dark: String,
    pub accent_dark: String,
    pub start_button_text: String,

    /// Name of the agent participant to treat as the assistant.
    /// `None` picks the first agent that joins.
    pub agent_name: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            company_name: "kawantechno".to_string(),
            page_title: "Jarvis By Erenha._".to_string(),
            page_description: "Jarvis By Erenha._".to_string(),
            supports_chat_input: true,
            supports_video_input: true,
            supports_screen_share: true,
            is_pre_connect_buffer_enabled: true,
            logo: "/lk-logo.svg".to_string(),
            accent: "#002cf2".to_string(),
            logo_dark: "/lk-logo-dark.svg".to_string(),
            accent_dark: "#1fd5f9".to_string(),
            start_button_text: "Start".to_string(),
            agent_name: None,
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON config. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a renderer cannot work around
    pub fn validate(&self) -> ConfigResult<()> {
        if self.start_button_text.trim().is_empty() {
            return Err(ConfigError::EmptyField("startButtonText"));
        }
        check_colour("accent", &self.accent)?;
        check_colour("accentDark", &self.accent_dark)?;
        if let Some(name) = &self.agent_name {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyField("agentName"));
            }
        }
        Ok(())
    }
}

fn check_colour(field: &'static str, value: &str) -> ConfigResult<()> {
    let valid = value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidColour {
            field,
            value: value.to_string(),
        })
    }
}
