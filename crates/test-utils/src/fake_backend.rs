use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use observe::exec::{
    BackendFuture, CommandPair, LaunchOutcome, PairState, ProcessBackend, TeardownOutcome,
};
use observe::types::BuildFailurePolicy;

/// One call made against the fake backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Launch { pair: u64, build: String, run: String },
    Teardown { pair: Option<u64> },
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub calls: Vec<BackendCall>,
    pub live: Option<u64>,
    pub failing_builds: HashSet<u64>,
}

/// A fake backend that:
/// - records every launch and teardown in order
/// - tracks a single pretend run process and panics if a second one would
///   be started while the first is alive
/// - fails the build step for pair ids registered with `fail_build`.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    policy: BuildFailurePolicy,
    state: Arc<Mutex<FakeState>>,
    last: Option<(u64, PairState)>,
}

impl FakeBackend {
    pub fn new(policy: BuildFailurePolicy) -> Self {
        Self {
            policy,
            state: Arc::new(Mutex::new(FakeState::default())),
            last: None,
        }
    }

    /// Shared view of the recorded state, usable after the supervisor has
    /// consumed the backend.
    pub fn state(&self) -> Arc<Mutex<FakeState>> {
        Arc::clone(&self.state)
    }

    pub fn fail_build(&self, pair: u64) {
        self.state.lock().unwrap().failing_builds.insert(pair);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn live(&self) -> Option<u64> {
        self.state.lock().unwrap().live
    }
}

impl ProcessBackend for FakeBackend {
    fn launch(&mut self, pair: CommandPair) -> BackendFuture<'_, LaunchOutcome> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            assert!(
                state.live.is_none(),
                "pair {} launched while pair {:?} is still live",
                pair.id,
                state.live
            );

            state.calls.push(BackendCall::Launch {
                pair: pair.id,
                build: pair.build.display(),
                run: pair.run.display(),
            });

            if state.failing_builds.contains(&pair.id) && self.policy == BuildFailurePolicy::SkipRun
            {
                self.last = Some((pair.id, PairState::Retired));
                return Ok(LaunchOutcome::BuildFailed {
                    pair: pair.id,
                    code: Some(1),
                });
            }

            state.live = Some(pair.id);
            self.last = Some((pair.id, PairState::Running));
            Ok(LaunchOutcome::Running {
                pair: pair.id,
                pid: None,
            })
        })
    }

    fn teardown(&mut self) -> BackendFuture<'_, TeardownOutcome> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            let live = state.live.take();
            state.calls.push(BackendCall::Teardown { pair: live });
            self.last = None;

            Ok(match live {
                Some(pair) => TeardownOutcome::Reaped {
                    pair,
                    killed: true,
                    code: None,
                },
                None => TeardownOutcome::NothingRunning,
            })
        })
    }

    fn active_pair(&self) -> Option<(u64, PairState)> {
        self.last
    }
}
