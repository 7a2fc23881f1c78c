//! Homework Notifier - homework review status notifications for Telegram
//!
//! Polls the homework review API, detects status changes, and forwards them to a chat.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod notifier;
pub mod practicum;
pub mod response;
pub mod status;
pub mod telegram;

pub use config::{load_config, Config, Credentials};
pub use engine::{CycleOutcome, Engine, PollState};
pub use error::{NotifierError, Result};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramBot;

/// Check settings and credentials and wire the engine to `http`.
///
/// Fails with [`NotifierError::Config`] before any request is made when a
/// credential is missing or the poll interval is zero.
pub fn build_engine(
    config: &Config,
    http: Arc<dyn HttpClient>,
    cancel: CancellationToken,
) -> Result<Engine> {
    config.validate()?;
    let credentials = config.check_tokens()?;

    let client = PracticumClient::new(&config.api, &credentials.api_token, Arc::clone(&http));
    let bot = TelegramBot::new(&config.telegram, &credentials.bot_token, http);
    let notifier = Notifier::new(Arc::new(bot), credentials.chat_id);

    Ok(Engine::new(client, notifier, &config.polling, cancel))
}

/// Run the notifier with the given configuration until Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    // Checked before the HTTP client exists so a bad setup never touches the network
    config.validate()?;
    config.check_tokens()?;

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::with_timeout(
        Duration::from_secs(config.api.request_timeout_seconds),
    )?);
    let cancel = CancellationToken::new();
    let mut engine = build_engine(&config, http, cancel.clone())?;

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                cancel_for_signal.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
    });

    tracing::info!("Homework notifier started");
    engine.run().await;
    tracing::info!("Homework notifier stopped");

    Ok(())
}
