#![allow(dead_code)]

pub use observe_test_utils::builders;
pub use observe_test_utils::fake_backend;
pub use observe_test_utils::{init_tracing, with_deadline, with_timeout, PROCESS_TIMEOUT};

use observe::engine::RuntimeEvent;
use observe::watch::{ChangeEvent, ChangeKind, Trigger};

/// A trigger as the debouncer would emit it for a write to `path`.
pub fn write_trigger(path: &str) -> RuntimeEvent {
    RuntimeEvent::Triggered(Trigger {
        cause: ChangeEvent::new(path, ChangeKind::Write),
    })
}
