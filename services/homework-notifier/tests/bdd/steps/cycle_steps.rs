//! BDD step definitions for poll cycles

use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use homework_notifier::{build_engine, CycleOutcome};
use tokio_util::sync::CancellationToken;

use crate::common::complete_config;
use crate::world::NotifierWorld;

fn docstring(step: &Step) -> &str {
    step.docstring
        .as_deref()
        .map(str::trim)
        .expect("step needs a doc string")
}

#[given("the review API answers:")]
async fn api_answers(world: &mut NotifierWorld, step: &Step) {
    world.http().push_json(200, docstring(step)).await;
}

#[given(expr = "the review API fails with status {int}")]
async fn api_fails(world: &mut NotifierWorld, status: u16) {
    world.http().push_json(status, "").await;
}

#[given(expr = "the review API is unreachable with {string}")]
async fn api_unreachable(world: &mut NotifierWorld, reason: String) {
    world.http().push_network_error(&reason).await;
}

#[given(expr = "the notifier is polling from {int}")]
fn notifier_polling_from(world: &mut NotifierWorld, timestamp: u64) {
    let config = world.config.clone().unwrap_or_else(complete_config);
    let http = world.http();
    let engine = build_engine(&config, http, CancellationToken::new())
        .expect("engine should build")
        .starting_from(timestamp);
    world.engine = Some(engine);
}

#[when(expr = "{int} poll cycle(s) run(s)")]
async fn cycles_run(world: &mut NotifierWorld, count: usize) {
    let engine = world.engine.as_mut().expect("engine not built");
    for _ in 0..count {
        let outcome = engine.run_cycle().await;
        world.outcomes.push(outcome);
    }
}

#[then("the chat should receive the message:")]
async fn chat_receives(world: &mut NotifierWorld, step: &Step) {
    let expected = docstring(step);
    let texts = world.http().sent_texts().await;
    assert!(
        texts.iter().any(|t| t == expected),
        "sent messages: {texts:?}"
    );
}

#[then(expr = "the chat should receive {int} message(s)")]
async fn chat_receives_count(world: &mut NotifierWorld, count: usize) {
    let texts = world.http().sent_texts().await;
    assert_eq!(texts.len(), count, "sent messages: {texts:?}");
}

#[then(expr = "the chat should receive a failure message containing {string}")]
async fn chat_receives_failure(world: &mut NotifierWorld, fragment: String) {
    let texts = world.http().sent_texts().await;
    assert!(
        texts
            .iter()
            .any(|t| t.starts_with("Сбой в работе программы") && t.contains(&fragment)),
        "sent messages: {texts:?}"
    );
}

#[then(expr = "the last poll should have used from_date {int}")]
async fn last_poll_from(world: &mut NotifierWorld, timestamp: u64) {
    let gets = world.http().gets().await;
    let last = gets.last().expect("no poll was made");
    assert_eq!(last.query_value("from_date"), Some(timestamp.to_string().as_str()));
}

#[then(expr = "the next poll should start from {int}")]
fn next_poll_from(world: &mut NotifierWorld, timestamp: u64) {
    let engine = world.engine.as_ref().expect("engine not built");
    assert_eq!(engine.state().current_timestamp, timestamp);
}

#[then("the last cycle should report no updates")]
fn last_cycle_no_updates(world: &mut NotifierWorld) {
    assert_eq!(world.outcomes.last(), Some(&CycleOutcome::NoUpdates));
}
