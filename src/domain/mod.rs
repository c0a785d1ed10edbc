//! Domain layer: settings language vocabulary and evaluation context
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod command;
pub mod context;
pub mod error;
pub mod matcher;
pub mod path;
pub mod rule;

pub use command::Command;
pub use context::{ContextStack, Level, LevelGuard};
pub use error::{DomainError, DomainResult};
pub use matcher::{Matcher, MatcherRegistry};
pub use path::NamePath;
pub use rule::{Rule, RuleAccumulator, RuleSet};

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Falls back to the input unchanged if expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
