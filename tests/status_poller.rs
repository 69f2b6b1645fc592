// SPDX-License-Identifier: MIT

mod support;

use mnq_control_panel::domain::error::RequestFailure;
use mnq_control_panel::services::poller::{PollPhase, StatusPoller};
use std::sync::Arc;
use std::time::Duration;
use support::{FakeBackend, server_error, snapshot};
use tokio::runtime::Handle;
use tokio::time::sleep;

const PERIOD: Duration = Duration::from_secs(5);

fn mount(backend: &Arc<FakeBackend>) -> StatusPoller<FakeBackend> {
    StatusPoller::mount(Arc::clone(backend), PERIOD, &Handle::current())
}

/// Let spawned work run without crossing a poll boundary.
async fn settle() {
    sleep(Duration::from_millis(10)).await;
}

#[tokio::test(start_paused = true)]
async fn mount_fetches_immediately_then_on_interval() {
    let backend = Arc::new(FakeBackend::new());
    let poller = mount(&backend);
    assert_eq!(poller.state().phase, PollPhase::Loading);

    settle().await;
    assert_eq!(backend.status_calls(), 1);
    let state = poller.state();
    assert_eq!(state.phase, PollPhase::Ready);
    assert_eq!(state.status(), Some("stopped"));
    assert!(state.error.is_none());

    sleep(PERIOD).await;
    assert_eq!(backend.status_calls(), 2);
    sleep(PERIOD).await;
    assert_eq!(backend.status_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn teardown_stops_polling() {
    let backend = Arc::new(FakeBackend::new());
    let poller = mount(&backend);
    settle().await;
    assert_eq!(backend.status_calls(), 1);

    poller.teardown();
    poller.teardown();
    assert!(poller.is_torn_down());

    sleep(PERIOD * 4).await;
    assert_eq!(backend.status_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_poller_stops_polling() {
    let backend = Arc::new(FakeBackend::new());
    let poller = mount(&backend);
    settle().await;
    drop(poller);

    sleep(PERIOD * 3).await;
    assert_eq!(backend.status_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn response_arriving_after_teardown_is_ignored() {
    let backend = Arc::new(FakeBackend::new());
    backend.script_status(Duration::from_secs(2), Err(server_error(503)));
    let poller = mount(&backend);
    settle().await;
    assert_eq!(backend.status_calls(), 1);

    poller.teardown();
    sleep(Duration::from_secs(3)).await;

    let state = poller.state();
    assert_eq!(state.phase, PollPhase::Loading);
    assert!(state.snapshot.is_none());
    assert!(state.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn stale_response_does_not_overwrite_newer_one() {
    let backend = Arc::new(FakeBackend::new());
    // First fetch is slow and resolves after the second one.
    backend.script_status(Duration::from_secs(7), Ok(snapshot("stopped")));
    backend.script_status(Duration::ZERO, Ok(snapshot("running")));
    backend.set_status(Ok(snapshot("running")));
    let poller = mount(&backend);

    sleep(Duration::from_millis(5_010)).await;
    assert_eq!(backend.status_calls(), 2);
    assert_eq!(poller.state().status(), Some("running"));

    sleep(Duration::from_secs(3)).await;
    let state = poller.state();
    assert_eq!(state.status(), Some("running"));
    assert!(state.snapshot.as_ref().is_some_and(|s| s.is_running()));
}

#[tokio::test(start_paused = true)]
async fn failed_poll_keeps_previous_snapshot() {
    let backend = Arc::new(FakeBackend::new());
    backend.script_status(Duration::ZERO, Ok(snapshot("running")));
    backend.set_status(Err(server_error(500)));
    let poller = mount(&backend);
    settle().await;
    assert!(poller.state().error.is_none());

    sleep(PERIOD).await;
    let state = poller.state();
    assert_eq!(state.error.as_deref(), Some("HTTP error! status: 500"));
    assert_eq!(state.status(), Some("running"));

    // Recovery clears the error.
    backend.set_status(Ok(snapshot("stopped")));
    sleep(PERIOD).await;
    let state = poller.state();
    assert!(state.error.is_none());
    assert_eq!(state.status(), Some("stopped"));
}

#[tokio::test(start_paused = true)]
async fn start_success_refreshes_and_clears_busy() {
    let backend = Arc::new(FakeBackend::new());
    let poller = mount(&backend);
    settle().await;
    assert_eq!(poller.state().status(), Some("stopped"));

    backend.set_status(Ok(snapshot("running")));
    poller.start_trading().await.expect("start task");

    assert_eq!(backend.start_calls(), 1);
    assert_eq!(backend.status_calls(), 2);
    let state = poller.state();
    assert!(!state.busy);
    assert_eq!(state.status(), Some("running"));
}

#[tokio::test(start_paused = true)]
async fn commands_are_ignored_while_busy() {
    let backend = Arc::new(FakeBackend::new());
    backend.script_stop(Duration::from_secs(1), Ok(Default::default()));
    let poller = mount(&backend);
    settle().await;

    let first = poller.stop_trading();
    settle().await;
    assert!(poller.state().busy);

    poller.stop_trading().await.expect("second stop task");
    poller.start_trading().await.expect("start task");
    first.await.expect("first stop task");

    assert_eq!(backend.stop_calls(), 1);
    assert_eq!(backend.start_calls(), 0);
    assert!(!poller.state().busy);
}

#[tokio::test(start_paused = true)]
async fn start_failure_sets_error_and_keeps_snapshot() {
    let backend = Arc::new(FakeBackend::new());
    backend.script_start(
        Duration::ZERO,
        Err(RequestFailure::Transport("connection refused".into())),
    );
    let poller = mount(&backend);
    settle().await;

    poller.start_trading().await.expect("start task");

    let state = poller.state();
    assert!(!state.busy);
    assert_eq!(state.error.as_deref(), Some("connection refused"));
    assert_eq!(state.status(), Some("stopped"));
    assert_eq!(backend.status_calls(), 1);
}
