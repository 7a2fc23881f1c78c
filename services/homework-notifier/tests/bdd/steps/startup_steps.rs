//! BDD step definitions for startup credential checks

use cucumber::{given, then, when};
use homework_notifier::{build_engine, NotifierError};
use tokio_util::sync::CancellationToken;

use crate::common::complete_config;
use crate::world::NotifierWorld;

#[given("all credentials are configured")]
fn all_credentials(world: &mut NotifierWorld) {
    world.config = Some(complete_config());
}

#[given(expr = "the {string} credential is missing")]
fn credential_missing(world: &mut NotifierWorld, name: String) {
    let config = world.config.get_or_insert_with(complete_config);
    match name.as_str() {
        "API_TOKEN" => config.credentials.api_token = None,
        "BOT_TOKEN" => config.credentials.bot_token = None,
        "CHAT_ID" => config.credentials.chat_id = None,
        other => panic!("Unknown credential: {}", other),
    }
}

#[when("the notifier starts")]
fn notifier_starts(world: &mut NotifierWorld) {
    let config = world.config.clone().unwrap_or_else(complete_config);
    let http = world.http();
    match build_engine(&config, http, CancellationToken::new()) {
        Ok(engine) => world.engine = Some(engine),
        Err(e) => world.startup_error = Some(e),
    }
}

#[then("startup should fail with a configuration error")]
fn startup_fails(world: &mut NotifierWorld) {
    let err = world.startup_error.as_ref().expect("startup did not fail");
    assert!(
        matches!(err, NotifierError::Config(_)),
        "expected a configuration error, got {err:?}"
    );
}

#[then(expr = "the error should mention {string}")]
fn error_mentions(world: &mut NotifierWorld, text: String) {
    let err = world.startup_error.as_ref().expect("startup did not fail");
    assert!(err.to_string().contains(&text), "{err}");
}

#[then("no HTTP request should have been made")]
async fn no_requests(world: &mut NotifierWorld) {
    let http = world.http();
    assert!(http.requests.read().await.is_empty());
}

#[then("the engine should be ready")]
fn engine_ready(world: &mut NotifierWorld) {
    assert!(world.startup_error.is_none());
    assert!(world.engine.is_some());
}
