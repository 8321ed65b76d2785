// src/config/mod.rs

//! Configuration loading and validation for observe.
//!
//! Responsibilities:
//! - Define the JSON-backed data model (`model.rs`).
//! - Load a config file from disk, or write a fresh default (`loader.rs`).
//! - Validate the fields the supervisor cannot run without (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{init_config, load_and_validate, load_from_path, InitOutcome};
pub use model::ServerConfig;
pub use validate::validate_config;

/// Config file looked up in the working directory when `--config` is omitted.
pub const DEFAULT_CONFIG_PATH: &str = "obsconfig.json";
