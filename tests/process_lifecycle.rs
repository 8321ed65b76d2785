// tests/process_lifecycle.rs
#![cfg(unix)]

mod common;
use crate::common::builders::ServerConfigBuilder;
use crate::common::{init_tracing, with_deadline, write_trigger, PROCESS_TIMEOUT};

use std::error::Error;
use std::time::Duration;

use tokio::sync::mpsc;

use observe::engine::{RuntimeEvent, Supervisor, SupervisorState};
use observe::errors::ObserveError;
use observe::exec::{
    LaunchOutcome, PairState, ProcessBackend, RealProcessBackend, TeardownOutcome,
};
use observe::types::{BuildFailurePolicy, Role};

type TestResult = Result<(), Box<dyn Error>>;

/// Whether a pid still refers to a process (zombies included).
fn pid_exists(pid: u32) -> bool {
    std::process::Command::new("sh")
        .arg("-c")
        .arg(format!("kill -0 {pid} 2>/dev/null"))
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[tokio::test]
async fn build_then_run_then_kill_and_reap() -> TestResult {
    init_tracing();

    let mut stager = ServerConfigBuilder::new().stager();
    let mut backend = RealProcessBackend::new(BuildFailurePolicy::SkipRun);

    let outcome = with_deadline(PROCESS_TIMEOUT, backend.launch(stager.stage())).await?;
    let pid = match outcome {
        LaunchOutcome::Running { pair: 1, pid: Some(pid) } => pid,
        other => panic!("unexpected launch outcome: {other:?}"),
    };
    assert_eq!(backend.live_pid(), Some(pid));
    assert!(pid_exists(pid));

    let outcome = with_deadline(PROCESS_TIMEOUT, backend.teardown()).await?;
    assert_eq!(
        outcome,
        TeardownOutcome::Reaped {
            pair: 1,
            killed: true,
            code: None
        }
    );
    assert_eq!(backend.live_pid(), None);
    assert!(!pid_exists(pid), "killed process {pid} was not reaped");

    Ok(())
}

#[tokio::test]
async fn run_process_that_already_exited_is_reaped_without_kill() -> TestResult {
    init_tracing();

    let mut stager = ServerConfigBuilder::new().executable("true", &[]).stager();
    let mut backend = RealProcessBackend::new(BuildFailurePolicy::SkipRun);

    backend.launch(stager.stage()).await?;
    tokio::time::sleep(Duration::from_millis(300)).await;

    let outcome = with_deadline(PROCESS_TIMEOUT, backend.teardown()).await?;
    assert_eq!(
        outcome,
        TeardownOutcome::Reaped {
            pair: 1,
            killed: false,
            code: Some(0)
        }
    );

    Ok(())
}

#[tokio::test]
async fn failed_build_does_not_start_run_step() -> TestResult {
    init_tracing();

    let mut stager = ServerConfigBuilder::new().build_system("false", &[]).stager();
    let mut backend = RealProcessBackend::new(BuildFailurePolicy::SkipRun);

    let outcome = with_deadline(PROCESS_TIMEOUT, backend.launch(stager.stage())).await?;
    assert_eq!(
        outcome,
        LaunchOutcome::BuildFailed {
            pair: 1,
            code: Some(1)
        }
    );
    assert_eq!(backend.live_pid(), None);
    assert_eq!(backend.teardown().await?, TeardownOutcome::NothingRunning);

    Ok(())
}

#[tokio::test]
async fn failed_build_runs_anyway_when_configured() -> TestResult {
    init_tracing();

    let mut stager = ServerConfigBuilder::new().build_system("false", &[]).stager();
    let mut backend = RealProcessBackend::new(BuildFailurePolicy::RunAnyway);

    let outcome = with_deadline(PROCESS_TIMEOUT, backend.launch(stager.stage())).await?;
    assert!(matches!(outcome, LaunchOutcome::Running { pair: 1, .. }));
    backend.teardown().await?;

    Ok(())
}

#[tokio::test]
async fn missing_build_program_is_fatal() -> TestResult {
    init_tracing();

    let mut stager = ServerConfigBuilder::new()
        .build_system("/definitely/not/a/build-tool", &[])
        .stager();
    let mut backend = RealProcessBackend::new(BuildFailurePolicy::SkipRun);

    match backend.launch(stager.stage()).await {
        Err(ObserveError::SpawnFailed { role, program, .. }) => {
            assert_eq!(role, Role::Build);
            assert_eq!(program, "/definitely/not/a/build-tool");
        }
        other => panic!("Expected SpawnFailed, got: {other:?}"),
    }

    // The pair never got past staging, and there is nothing to kill.
    assert_eq!(backend.active_pair(), Some((1, PairState::Staged)));
    assert_eq!(backend.teardown().await?, TeardownOutcome::NothingRunning);
    assert_eq!(backend.active_pair(), None);
    Ok(())
}

#[tokio::test]
async fn missing_run_program_is_fatal() {
    init_tracing();

    let mut stager = ServerConfigBuilder::new()
        .executable("/definitely/not/a/server", &[])
        .stager();
    let mut backend = RealProcessBackend::new(BuildFailurePolicy::SkipRun);

    match backend.launch(stager.stage()).await {
        Err(ObserveError::SpawnFailed { role, .. }) => assert_eq!(role, Role::Run),
        other => panic!("Expected SpawnFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn supervisor_restarts_real_process_on_trigger() -> TestResult {
    init_tracing();

    let (_tx, rx) = mpsc::channel(4);
    let stager = ServerConfigBuilder::new().stager();
    let mut sup = Supervisor::new(
        stager,
        RealProcessBackend::new(BuildFailurePolicy::SkipRun),
        rx,
    );

    with_deadline(PROCESS_TIMEOUT, sup.start()).await?;
    let first = sup.backend().live_pid().expect("first run process");

    with_deadline(PROCESS_TIMEOUT, sup.handle(write_trigger("src/main.rs"))).await?;
    let second = sup.backend().live_pid().expect("second run process");

    assert_ne!(first, second);
    assert!(!pid_exists(first), "old run process {first} still around");
    assert!(pid_exists(second));
    assert_eq!(sup.state(), SupervisorState::Running);

    let keep_running =
        with_deadline(PROCESS_TIMEOUT, sup.handle(RuntimeEvent::ShutdownRequested)).await?;
    assert!(!keep_running);
    assert_eq!(sup.backend().live_pid(), None);
    assert!(!pid_exists(second));

    Ok(())
}
