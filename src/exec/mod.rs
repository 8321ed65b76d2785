// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`pair`] defines the staged build/run command pair.
//! - [`stager`] builds pairs from the config and keeps a lookahead queue of
//!   them so a trigger never waits on command construction.
//! - [`backend`] provides the `ProcessBackend` trait and the concrete
//!   `RealProcessBackend` that spawns, kills and reaps OS processes. Tests
//!   replace it with a fake implementation.

pub mod backend;
pub mod pair;
pub mod stager;

pub use backend::{
    BackendFuture, LaunchOutcome, ProcessBackend, RealProcessBackend, TeardownOutcome,
};
pub use pair::{CommandPair, PairState, StagedCommand};
pub use stager::{CommandStager, StagingQueue};
