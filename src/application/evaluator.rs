//! Builder surface of the settings language.
//!
//! ```ignore
//! let mut eval = Evaluator::new(CommandLog::new());
//! eval.domain_group("G", |e| {
//!     e.rule("Colors", "includes", "Red")?;
//!     e.domain("D", |e| e.conf("Default", |e| e.set("/p", 6)))
//! })?;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::emitter::CommandEmitter;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    Command, ContextStack, DomainError, Level, LevelGuard, Matcher, MatcherRegistry, Rule,
};

/// When the accumulated rules of a configuration are committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCommit {
    /// Before every parameter assignment (repeats for each `set`).
    #[default]
    EverySet,
    /// Before the first parameter assignment of a configuration only.
    ///
    /// A rule declared in a configuration after its first `set` could never
    /// be committed and is rejected as `ContextMisuse`.
    Once,
}

impl fmt::Display for RuleCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCommit::EverySet => f.write_str("every-set"),
            RuleCommit::Once => f.write_str("once"),
        }
    }
}

impl FromStr for RuleCommit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "every-set" => Ok(RuleCommit::EverySet),
            "once" => Ok(RuleCommit::Once),
            other => Err(format!(
                "unknown rule commit mode '{}': expected \"every-set\" or \"once\"",
                other
            )),
        }
    }
}

/// Walks nested declarations and emits the resulting commands.
///
/// One evaluator per pass; its context starts empty and is empty again once
/// every block has returned, whether successfully or not.
pub struct Evaluator<E: CommandEmitter> {
    context: ContextStack,
    emitter: E,
    rule_commit: RuleCommit,
}

impl<E: CommandEmitter> AsMut<ContextStack> for Evaluator<E> {
    fn as_mut(&mut self) -> &mut ContextStack {
        &mut self.context
    }
}

impl<E: CommandEmitter> Evaluator<E> {
    pub fn new(emitter: E) -> Self {
        Self {
            context: ContextStack::new(),
            emitter,
            rule_commit: RuleCommit::default(),
        }
    }

    pub fn with_rule_commit(mut self, rule_commit: RuleCommit) -> Self {
        self.rule_commit = rule_commit;
        self
    }

    pub fn context(&self) -> &ContextStack {
        &self.context
    }

    /// End the pass and hand back the emitter.
    pub fn finish(self) -> E {
        self.emitter
    }

    /// Domain namespace without a domain of its own.
    pub fn domain_group<F>(&mut self, name: &str, body: F) -> ApplicationResult<()>
    where
        F: FnOnce(&mut Self) -> ApplicationResult<()>,
    {
        self.scoped(Level::DomainGroup, name, body)
    }

    /// Create a domain and evaluate its configurations.
    pub fn domain<F>(&mut self, name: &str, body: F) -> ApplicationResult<()>
    where
        F: FnOnce(&mut Self) -> ApplicationResult<()>,
    {
        self.scoped(Level::Domain, name, body)
    }

    /// Configuration namespace without a configuration of its own.
    pub fn conf_group<F>(&mut self, name: &str, body: F) -> ApplicationResult<()>
    where
        F: FnOnce(&mut Self) -> ApplicationResult<()>,
    {
        self.scoped(Level::ConfGroup, name, body)
    }

    /// Create a configuration and evaluate its rules and assignments.
    pub fn conf<F>(&mut self, name: &str, body: F) -> ApplicationResult<()>
    where
        F: FnOnce(&mut Self) -> ApplicationResult<()>,
    {
        self.scoped(Level::Conf, name, body)
    }

    /// Add a rule to the innermost level, naming the matcher by symbol.
    pub fn rule(&mut self, criterion: &str, matcher: &str, value: &str) -> ApplicationResult<()> {
        let matcher = MatcherRegistry::resolve(matcher)?;
        self.rule_with(criterion, matcher, value)
    }

    /// Add a rule to the innermost level.
    pub fn rule_with(
        &mut self,
        criterion: &str,
        matcher: Matcher,
        value: &str,
    ) -> ApplicationResult<()> {
        if self.rule_commit == RuleCommit::Once {
            self.context.ensure_uncommitted("rule")?;
        }
        self.context.add_rule(Rule::new(criterion, matcher, value))?;
        Ok(())
    }

    /// Assign a parameter in the current configuration.
    ///
    /// Commits the rules accumulated on every open level first.
    pub fn set(&mut self, parameter: &str, value: impl fmt::Display) -> ApplicationResult<()> {
        self.context.require("set", Level::Conf)?;
        let domain = self.context.domain_path().clone();
        let conf = self.context.conf_path().clone();

        let committed = self.context.mark_committed();
        if !(committed && self.rule_commit == RuleCommit::Once) {
            self.emit(Command::SetRule {
                domain: domain.clone(),
                conf: conf.clone(),
                rules: self.context.flattened_rules(),
            })?;
        }

        self.emit(Command::SetConfigurationParameter {
            domain,
            conf,
            parameter: parameter.to_string(),
            value: value.to_string(),
        })
    }

    /// Component references are not available.
    pub fn component(&mut self, name: &str) -> ApplicationResult<()> {
        debug!("component '{}' requested", name);
        Err(not_supported("component"))
    }

    /// Configuration templates are not available.
    pub fn conf_type(&mut self, name: &str) -> ApplicationResult<()> {
        debug!("confType '{}' requested", name);
        Err(not_supported("confType"))
    }

    fn scoped<F>(&mut self, level: Level, name: &str, body: F) -> ApplicationResult<()>
    where
        F: FnOnce(&mut Self) -> ApplicationResult<()>,
    {
        let mut scope = LevelGuard::enter(self, level, name)?;
        match level {
            Level::Domain => {
                let domain = scope.context.domain_path().clone();
                scope.emit(Command::CreateDomain { domain })?;
            }
            Level::Conf => {
                let domain = scope.context.domain_path().clone();
                let conf = scope.context.conf_path().clone();
                scope.emit(Command::CreateConfiguration { domain, conf })?;
            }
            Level::DomainGroup | Level::ConfGroup => {}
        }
        body(&mut *scope)
    }

    fn emit(&mut self, command: Command) -> ApplicationResult<()> {
        debug!("emit: {}", command);
        self.emitter
            .emit(command)
            .map_err(|source| ApplicationError::Emit { source })
    }
}

fn not_supported(feature: &str) -> ApplicationError {
    DomainError::NotSupported {
        feature: feature.to_string(),
    }
    .into()
}
