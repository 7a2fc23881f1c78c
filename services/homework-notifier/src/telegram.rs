//! Telegram Bot API client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TelegramConfig;
use crate::io::HttpClient;
use crate::notifier::BotClient;

/// Envelope returned by every Bot API method
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Bot that delivers messages through `sendMessage`
pub struct TelegramBot {
    send_message_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBot")
            .field(
                "send_message_url",
                &crate::io::redact_bot_token(&self.send_message_url),
            )
            .finish()
    }
}

impl TelegramBot {
    pub fn new(config: &TelegramConfig, bot_token: &str, http: Arc<dyn HttpClient>) -> Self {
        let send_message_url = format!(
            "{}/bot{}/sendMessage",
            config.api_url.trim_end_matches('/'),
            bot_token
        );

        tracing::debug!("Created TelegramBot using {}", config.api_url);

        Self {
            send_message_url,
            http,
        }
    }
}

#[async_trait]
impl BotClient for TelegramBot {
    async fn send_message(&self, chat_id: &str, text: &str) -> crate::Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        tracing::debug!("Sending Telegram message to chat {}", chat_id);

        let response = self.http.post_json(&self.send_message_url, &body).await?;

        if response.status != 200 {
            return Err(crate::NotifierError::Notifier(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        match serde_json::from_str::<BotApiResponse>(&response.body) {
            Ok(parsed) if parsed.ok => {
                tracing::debug!("Telegram message sent successfully");
                Ok(())
            }
            Ok(parsed) => Err(crate::NotifierError::Notifier(format!(
                "Telegram API rejected message: {}",
                parsed.description.unwrap_or_default()
            ))),
            Err(e) => Err(crate::NotifierError::Notifier(format!(
                "Unreadable Telegram API response: {}",
                e
            ))),
        }
    }
}
