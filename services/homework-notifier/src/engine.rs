//! Engine: polls the review API and turns status changes into notifications

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::config::PollingConfig;
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::response::{self, SchemaMode};
use crate::status;

/// Prefix of the chat message sent when a cycle fails
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Mutable checkpoint owned by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound (`from_date`) for the next poll
    pub current_timestamp: u64,
    /// Last failure text sent to the chat, used to suppress repeats
    pub last_error_message: Option<String>,
}

/// What a single poll cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was found and a notification was attempted
    Notified(String),
    /// The API reported no new statuses
    NoUpdates,
    /// The cycle failed; `notified` is false when the failure repeated the previous one
    Failed { message: String, notified: bool },
}

/// Successful poll result, before anything is sent
struct Update {
    message: Option<String>,
    current_date: Option<u64>,
}

/// The engine owns the poll state and drives fetch, validate, format and notify
#[derive(Debug)]
pub struct Engine {
    client: PracticumClient,
    notifier: Notifier,
    schema_mode: SchemaMode,
    retry_interval: Duration,
    state: PollState,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        client: PracticumClient,
        notifier: Notifier,
        polling: &PollingConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            notifier,
            schema_mode: polling.schema_mode,
            retry_interval: Duration::from_secs(polling.retry_interval_seconds),
            state: PollState {
                current_timestamp: unix_now(),
                last_error_message: None,
            },
            cancel,
        }
    }

    /// Start polling from `timestamp` instead of the current time
    pub fn starting_from(mut self, timestamp: u64) -> Self {
        self.state.current_timestamp = timestamp;
        self
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Poll until the cancellation token is triggered.
    ///
    /// Cancellation is only observed while sleeping between cycles.
    pub async fn run(&mut self) {
        tracing::info!(
            "Polling every {:?} starting from {}",
            self.retry_interval,
            self.state.current_timestamp
        );

        loop {
            let outcome = self.run_cycle().await;
            tracing::debug!(
                "Cycle finished: {:?}, next from_date={}",
                outcome,
                self.state.current_timestamp
            );

            tokio::select! {
                _ = tokio::time::sleep(self.retry_interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one poll cycle and update the checkpoint
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(update) => {
                self.state.last_error_message = None;

                let outcome = match update.message {
                    Some(message) => {
                        self.notifier.notify(&message).await;
                        CycleOutcome::Notified(message)
                    }
                    None => {
                        tracing::info!("No status changes since {}", self.state.current_timestamp);
                        CycleOutcome::NoUpdates
                    }
                };

                self.state.current_timestamp = update.current_date.unwrap_or_else(|| {
                    tracing::warn!("No usable current_date in response, using wall clock");
                    unix_now()
                });
                outcome
            }
            Err(e) => self.handle_failure(e).await,
        }
    }

    async fn poll_once(&self) -> crate::Result<Update> {
        let raw = self
            .client
            .fetch_updates(self.state.current_timestamp)
            .await?;
        let response = response::validate(&raw, self.schema_mode)?;

        if response.homeworks.len() > 1 {
            tracing::debug!(
                "{} homeworks changed, reporting the most recent",
                response.homeworks.len()
            );
        }

        let message = response
            .homeworks
            .first()
            .map(status::parse_status)
            .transpose()?;

        Ok(Update {
            message,
            current_date: response.current_date,
        })
    }

    async fn handle_failure(&mut self, error: crate::NotifierError) -> CycleOutcome {
        let message = format!("{}: {}", FAILURE_PREFIX, error);
        tracing::error!("{}", message);

        let notified = if self.state.last_error_message.as_deref() == Some(message.as_str()) {
            tracing::debug!("Same failure as the previous cycle, not notifying again");
            false
        } else {
            self.notifier.notify(&message).await;
            self.state.last_error_message = Some(message.clone());
            true
        };

        CycleOutcome::Failed { message, notified }
    }
}

/// Current wall-clock time in Unix seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
