// tests/error_handling.rs

use std::io;
use std::path::PathBuf;

use observe::errors::{fatal_line, ObserveError};
use observe::exec::backend::is_already_gone;
use observe::types::Role;

fn assert_single_line(line: &str) {
    assert!(!line.contains('\n'), "fatal message spans lines: {line:?}");
}

#[test]
fn spawn_failure_renders_as_one_line_with_the_cause_once() {
    let err = ObserveError::SpawnFailed {
        role: Role::Run,
        program: "/nope".to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
    };

    // `main` sees errors from `run` as-is and from logging setup as anyhow.
    for line in [fatal_line(&err), fatal_line(&anyhow::Error::from(err))] {
        assert_single_line(&line);
        assert!(line.starts_with("observe error: failed to start run command '/nope'"));
        assert_eq!(line.matches("no such file or directory").count(), 1, "{line}");
        assert!(!line.contains("Caused by"));
    }
}

#[test]
fn setup_and_kill_failures_render_as_one_line() {
    let watch = ObserveError::WatchSetup {
        path: PathBuf::from("./missing"),
        source: notify::Error::path_not_found(),
    };
    let kill = ObserveError::KillFailed {
        pid: Some(4242),
        source: io::Error::from(io::ErrorKind::PermissionDenied),
    };
    let config = ObserveError::ConfigError("`executable` must be set in the config file".into());

    for err in [watch, kill, config] {
        let line = fatal_line(&err);
        assert_single_line(&line);
        assert!(line.starts_with("observe error: "));
    }
}

#[test]
fn malformed_json_renders_as_one_line() {
    let source =
        serde_json::from_str::<serde_json::Value>("{\n  \"executable\": \n").unwrap_err();
    let line = fatal_line(&ObserveError::from(source));

    assert_single_line(&line);
    assert!(line.contains("JSON parsing error"));
}

#[test]
fn already_reaped_child_is_not_a_kill_failure() {
    let err = io::Error::new(
        io::ErrorKind::InvalidInput,
        "invalid argument: can't kill an exited process",
    );
    assert!(is_already_gone(&err));
}

#[cfg(unix)]
#[test]
fn no_such_process_is_not_a_kill_failure() {
    let err = io::Error::from_raw_os_error(3);
    assert!(is_already_gone(&err));
}

#[test]
fn other_kill_errors_are_real_failures() {
    assert!(!is_already_gone(&io::Error::from(io::ErrorKind::PermissionDenied)));
    assert!(!is_already_gone(&io::Error::other("kill interrupted")));
    #[cfg(unix)]
    {
        // EPERM
        assert!(!is_already_gone(&io::Error::from_raw_os_error(1)));
    }
}
