// src/exec/stager.rs

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::config::ServerConfig;
use crate::exec::pair::{CommandPair, StagedCommand};
use crate::types::Role;

/// Builds command pairs from the (immutable) session config.
#[derive(Debug)]
pub struct CommandStager {
    config: Arc<ServerConfig>,
    next_id: u64,
}

impl CommandStager {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self { config, next_id: 1 }
    }

    /// Construct a fresh pair. Never fails; a bad program path only shows up
    /// when the pair is launched.
    pub fn stage(&mut self) -> CommandPair {
        let id = self.next_id;
        self.next_id += 1;

        let pair = CommandPair {
            id,
            build: StagedCommand::new(
                Role::Build,
                self.config.build_system.as_str(),
                &self.config.build_args,
            ),
            run: StagedCommand::new(Role::Run, self.config.executable.as_str(), &self.config.args),
        };
        debug!(pair = id, "staged command pair");
        pair
    }
}

/// Lookahead queue of staged pairs.
///
/// The supervisor pops one pair per launch and immediately pushes a
/// replacement, so between triggers the queue is never empty.
#[derive(Debug, Default)]
pub struct StagingQueue {
    pairs: VecDeque<CommandPair>,
}

impl StagingQueue {
    pub fn new() -> Self {
        Self {
            pairs: VecDeque::with_capacity(2),
        }
    }

    /// A queue pre-populated with two pairs, as used at session start.
    pub fn primed(stager: &mut CommandStager) -> Self {
        let mut queue = Self::new();
        queue.push_back(stager.stage());
        queue.push_back(stager.stage());
        queue
    }

    pub fn push_back(&mut self, pair: CommandPair) {
        self.pairs.push_back(pair);
    }

    pub fn pop_front(&mut self) -> Option<CommandPair> {
        self.pairs.pop_front()
    }

    /// Id of the pair the next launch will use.
    pub fn front_id(&self) -> Option<u64> {
        self.pairs.front().map(|p| p.id)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
