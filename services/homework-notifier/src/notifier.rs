//! Best-effort chat notifications

use std::sync::Arc;

use async_trait::async_trait;

/// Messaging bot that can deliver text to a chat
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait BotClient: Send + Sync {
    /// Send `text` to the chat identified by `chat_id`
    async fn send_message(&self, chat_id: &str, text: &str) -> crate::Result<()>;
}

/// Sends notifications to the single configured chat
#[derive(Clone)]
pub struct Notifier {
    bot: Arc<dyn BotClient>,
    chat_id: String,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl Notifier {
    pub fn new(bot: Arc<dyn BotClient>, chat_id: impl Into<String>) -> Self {
        Self {
            bot,
            chat_id: chat_id.into(),
        }
    }

    /// Deliver `message`; failures are logged and never returned
    pub async fn notify(&self, message: &str) {
        match self.bot.send_message(&self.chat_id, message).await {
            Ok(()) => tracing::info!("Message delivered to chat {}", self.chat_id),
            Err(e) => {
                tracing::error!("Failed to deliver message to chat {}: {}", self.chat_id, e)
            }
        }
    }
}
