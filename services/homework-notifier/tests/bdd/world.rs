//! BDD test world for the homework notifier

use std::sync::Arc;

use cucumber::World;
use homework_notifier::{Config, CycleOutcome, Engine};

use crate::common::ScriptedHttpClient;

#[derive(Debug, Default, World)]
pub struct NotifierWorld {
    pub config: Option<Config>,
    pub http: Option<Arc<ScriptedHttpClient>>,
    pub engine: Option<Engine>,
    pub outcomes: Vec<CycleOutcome>,
    pub startup_error: Option<homework_notifier::NotifierError>,
}

impl NotifierWorld {
    pub fn http(&mut self) -> Arc<ScriptedHttpClient> {
        Arc::clone(
            self.http
                .get_or_insert_with(|| Arc::new(ScriptedHttpClient::new())),
        )
    }
}
