//! Shared helpers for `observe` integration tests.

pub mod builders;
pub mod fake_backend;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for a test step that only touches channels or the fake
/// backend.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound for a step that spawns, kills or reaps real processes.
pub const PROCESS_TIMEOUT: Duration = Duration::from_secs(15);

static TRACING: Once = Once::new();

/// Route `observe` logs into the test harness's captured output.
///
/// Defaults to `observe=debug,warn`, so supervisor decisions show up next to
/// a failing assertion while notify and tokio stay quiet. `OBSERVE_LOG` or
/// `RUST_LOG` override it with any `EnvFilter` directives.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env("OBSERVE_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("observe=debug,warn"));

        // A test binary may already have a subscriber; keep that one.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Await `fut`, panicking if it takes longer than [`STEP_TIMEOUT`].
pub async fn with_timeout<F: Future>(fut: F) -> F::Output {
    with_deadline(STEP_TIMEOUT, fut).await
}

/// Await `fut`, panicking if it takes longer than `limit`.
pub async fn with_deadline<F: Future>(limit: Duration, fut: F) -> F::Output {
    match tokio::time::timeout(limit, fut).await {
        Ok(out) => out,
        Err(_) => panic!("test step did not finish within {limit:?}"),
    }
}
