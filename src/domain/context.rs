//! Naming and rule context of an evaluation pass.
//!
//! Every namespace block (domainGroup, domain, confGroup, conf) pushes one
//! frame holding its rules and one segment onto the domain or configuration
//! path. Frames are popped in strict LIFO order; [`LevelGuard`] ties the pop
//! to scope exit so a failing body cannot leave stale context behind.

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::{validate_segment, NamePath};
use crate::domain::rule::{Rule, RuleAccumulator, RuleSet};

/// Kind of namespace block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    DomainGroup,
    Domain,
    ConfGroup,
    Conf,
}

impl Level {
    /// Keyword of the block in the settings language.
    pub fn keyword(self) -> &'static str {
        match self {
            Level::DomainGroup => "domainGroup",
            Level::Domain => "domain",
            Level::ConfGroup => "confGroup",
            Level::Conf => "conf",
        }
    }

    /// Whether the block names a segment of the domain path (as opposed to
    /// the configuration path).
    pub fn is_domain_level(self) -> bool {
        matches!(self, Level::DomainGroup | Level::Domain)
    }

    /// Levels under which this block may be opened; `None` is the root.
    fn allowed_parent(self, parent: Option<Level>) -> bool {
        match self {
            Level::DomainGroup | Level::Domain => {
                matches!(parent, None | Some(Level::DomainGroup))
            }
            Level::ConfGroup | Level::Conf => {
                matches!(parent, Some(Level::Domain | Level::ConfGroup))
            }
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug)]
struct Frame {
    level: Level,
    rules: RuleAccumulator,
    committed: bool,
}

/// Domain path, configuration path and per-level rule accumulators.
///
/// Owned by one evaluation; never shared between passes.
#[derive(Debug, Default)]
pub struct ContextStack {
    domain: NamePath,
    conf: NamePath,
    frames: Vec<Frame>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain_path(&self) -> &NamePath {
        &self.domain
    }

    pub fn conf_path(&self) -> &NamePath {
        &self.conf
    }

    /// Number of open namespace levels.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True when no level is open and both paths are empty.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.domain.is_empty() && self.conf.is_empty()
    }

    /// Kind of the innermost open level, `None` at the root.
    pub fn innermost(&self) -> Option<Level> {
        self.frames.last().map(|f| f.level)
    }

    /// Rules declared directly at the given depth (0 = outermost).
    pub fn rules_at(&self, depth: usize) -> Option<&[Rule]> {
        self.frames.get(depth).map(|f| f.rules.as_slice())
    }

    /// Open a namespace level.
    ///
    /// Fails without touching the context if the name is malformed or the
    /// block is not allowed under the innermost level.
    pub fn enter(&mut self, level: Level, name: &str) -> DomainResult<()> {
        validate_segment(name)?;
        if !level.allowed_parent(self.innermost()) {
            return Err(self.misuse(level.keyword()));
        }

        if level.is_domain_level() {
            self.domain.push(name);
        } else {
            self.conf.push(name);
        }
        self.frames.push(Frame {
            level,
            rules: RuleAccumulator::new(),
            committed: false,
        });
        trace!(
            "enter {} '{}' depth={} domain='{}' conf='{}'",
            level,
            name,
            self.depth(),
            self.domain,
            self.conf
        );
        Ok(())
    }

    /// Close the innermost level, returning its kind.
    pub fn exit(&mut self) -> Option<Level> {
        let frame = self.frames.pop()?;
        let name = if frame.level.is_domain_level() {
            self.domain.pop()
        } else {
            self.conf.pop()
        };
        trace!(
            "exit {} '{}' depth={}",
            frame.level,
            name.unwrap_or_default(),
            self.depth()
        );
        Some(frame.level)
    }

    /// Append a rule to the innermost level.
    pub fn add_rule(&mut self, rule: Rule) -> DomainResult<()> {
        let Some(frame) = self.frames.last_mut() else {
            return Err(self.misuse("rule"));
        };
        trace!("rule '{}' at {}", rule, frame.level);
        frame.rules.push(rule);
        Ok(())
    }

    /// Fail with `ContextMisuse` unless the innermost level is `level`.
    pub fn require(&self, operation: &str, level: Level) -> DomainResult<()> {
        if self.innermost() == Some(level) {
            Ok(())
        } else {
            Err(self.misuse(operation))
        }
    }

    /// All accumulated rules, outermost level first, in declaration order.
    pub fn flattened_rules(&self) -> RuleSet {
        RuleSet::new(
            self.frames
                .iter()
                .flat_map(|f| f.rules.iter().cloned())
                .collect(),
        )
    }

    /// Mark the innermost level's rules as committed, returning whether they
    /// already were.
    pub fn mark_committed(&mut self) -> bool {
        match self.frames.last_mut() {
            Some(frame) => std::mem::replace(&mut frame.committed, true),
            None => false,
        }
    }

    /// Fail with `ContextMisuse` if the innermost level's rules were already
    /// committed.
    pub fn ensure_uncommitted(&self, operation: &str) -> DomainResult<()> {
        match self.frames.last() {
            Some(frame) if frame.committed => Err(DomainError::ContextMisuse {
                operation: operation.to_string(),
                context: format!("after the first set {}", self.describe()),
            }),
            _ => Ok(()),
        }
    }

    fn misuse(&self, operation: &str) -> DomainError {
        DomainError::ContextMisuse {
            operation: operation.to_string(),
            context: self.describe(),
        }
    }

    fn describe(&self) -> String {
        match self.innermost() {
            None => "at the root".to_string(),
            Some(level) if level.is_domain_level() => {
                format!("inside {} '{}'", level, self.domain)
            }
            Some(level) => format!("inside {} '{}' of domain '{}'", level, self.conf, self.domain),
        }
    }
}

impl AsMut<ContextStack> for ContextStack {
    fn as_mut(&mut self) -> &mut ContextStack {
        self
    }
}

/// Open level bound to a scope: the level is closed when the guard drops,
/// whether the body returned normally, returned early with an error or
/// panicked.
pub struct LevelGuard<'a, T: AsMut<ContextStack>> {
    owner: &'a mut T,
}

impl<'a, T: AsMut<ContextStack>> LevelGuard<'a, T> {
    /// Enter `level` on the owner's context and guard its exit.
    pub fn enter(owner: &'a mut T, level: Level, name: &str) -> DomainResult<Self> {
        owner.as_mut().enter(level, name)?;
        Ok(Self { owner })
    }
}

impl<T: AsMut<ContextStack>> Deref for LevelGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.owner
    }
}

impl<T: AsMut<ContextStack>> DerefMut for LevelGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.owner
    }
}

impl<T: AsMut<ContextStack>> Drop for LevelGuard<'_, T> {
    fn drop(&mut self) {
        self.owner.as_mut().exit();
    }
}
