#![allow(dead_code)]

use std::sync::Arc;

use observe::config::ServerConfig;
use observe::exec::CommandStager;

/// Builder for `ServerConfig` to simplify test setup.
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Starts from the config used throughout the tests:
    /// `echo build` followed by `sleep 5`.
    pub fn new() -> Self {
        Self {
            config: ServerConfig {
                build_system: "echo".to_string(),
                build_args: vec!["build".to_string()],
                executable: "sleep".to_string(),
                args: vec!["5".to_string()],
                folders: vec![],
            },
        }
    }

    pub fn build_system(mut self, program: &str, args: &[&str]) -> Self {
        self.config.build_system = program.to_string();
        self.config.build_args = args.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn executable(mut self, program: &str, args: &[&str]) -> Self {
        self.config.executable = program.to_string();
        self.config.args = args.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn folder(mut self, dir: &str) -> Self {
        self.config.folders.push(dir.to_string());
        self
    }

    pub fn build(self) -> ServerConfig {
        self.config
    }

    pub fn stager(self) -> CommandStager {
        CommandStager::new(Arc::new(self.config))
    }
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
