use std::fmt;

/// Which half of a command pair a staged command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Build,
    Run,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Build => f.write_str("build"),
            Role::Run => f.write_str("run"),
        }
    }
}

/// What to do with the run step when the build step exits unsuccessfully.
///
/// - `SkipRun`: leave nothing running and wait for the next trigger
///   (default behaviour).
/// - `RunAnyway`: start the run command regardless of the build result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildFailurePolicy {
    #[default]
    SkipRun,
    RunAnyway,
}
