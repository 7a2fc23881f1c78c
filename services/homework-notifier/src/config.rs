//! Configuration types for the homework notifier

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::response::SchemaMode;

/// Environment variable holding the review API token
pub const API_TOKEN_VAR: &str = "API_TOKEN";
/// Environment variable holding the Telegram bot token
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
/// Environment variable holding the destination chat id
pub const CHAT_ID_VAR: &str = "CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Secrets, usually supplied through the environment
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("bot_token", &self.bot_token.as_ref().map(|_| "***"))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Review API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Telegram Bot API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
        }
    }
}

/// Polling loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_retry_interval")]
    pub retry_interval_seconds: u64,
    #[serde(default)]
    pub schema_mode: SchemaMode,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            retry_interval_seconds: default_retry_interval(),
            schema_mode: SchemaMode::default(),
        }
    }
}

/// Credentials that passed the startup check
#[derive(Clone)]
pub struct Credentials {
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_interval() -> u64 {
    600
}

impl Config {
    /// Override credentials with values from the process environment
    pub fn resolve_secrets(&mut self) {
        self.apply_env(|name| std::env::var(name).ok());
    }

    /// Override credentials with values returned by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots = [
            (API_TOKEN_VAR, &mut self.credentials.api_token),
            (BOT_TOKEN_VAR, &mut self.credentials.bot_token),
            (CHAT_ID_VAR, &mut self.credentials.chat_id),
        ];
        for (name, slot) in slots {
            if let Some(value) = lookup(name) {
                tracing::debug!("Using {} from environment", name);
                *slot = Some(value);
            }
        }
    }

    /// Reject settings the poll loop cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.polling.retry_interval_seconds == 0 {
            return Err(crate::NotifierError::Config(
                "polling.retry_interval_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Verify that every required credential is present and non-empty
    pub fn check_tokens(&self) -> crate::Result<Credentials> {
        let creds = &self.credentials;
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let api_token = present(&creds.api_token);
        let bot_token = present(&creds.bot_token);
        let chat_id = present(&creds.chat_id);

        match (api_token, bot_token, chat_id) {
            (Some(api_token), Some(bot_token), Some(chat_id)) => Ok(Credentials {
                api_token,
                bot_token,
                chat_id,
            }),
            (api_token, bot_token, chat_id) => {
                let missing: Vec<&str> = [
                    (API_TOKEN_VAR, api_token.is_none()),
                    (BOT_TOKEN_VAR, bot_token.is_none()),
                    (CHAT_ID_VAR, chat_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(crate::NotifierError::Config(format!(
                    "missing required environment variables: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::NotifierError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
