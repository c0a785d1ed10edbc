//! Rule predicates and their vocabulary.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::domain::error::{DomainError, DomainResult};

/// Predicate applied by a rule to a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Matcher {
    Is,
    IsNot,
    Includes,
    Excludes,
}

impl Matcher {
    /// Every matcher, in vocabulary order.
    pub const ALL: [Matcher; 4] = [
        Matcher::Is,
        Matcher::IsNot,
        Matcher::Includes,
        Matcher::Excludes,
    ];

    /// Symbol used to name the matcher in a description.
    pub fn symbol(self) -> &'static str {
        match self {
            Matcher::Is => "is",
            Matcher::IsNot => "is_not",
            Matcher::Includes => "includes",
            Matcher::Excludes => "excludes",
        }
    }

    /// Label written to the command stream.
    pub fn label(self) -> &'static str {
        match self {
            Matcher::Is => "Is",
            Matcher::IsNot => "IsNot",
            Matcher::Includes => "Includes",
            Matcher::Excludes => "Excludes",
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Matcher {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatcherRegistry::resolve(s)
    }
}

/// Closed vocabulary of matcher symbols.
pub struct MatcherRegistry;

impl MatcherRegistry {
    /// Resolve a symbol to its matcher.
    ///
    /// The error lists every valid symbol so the author can fix the
    /// declaration without looking anything up.
    pub fn resolve(symbol: &str) -> DomainResult<Matcher> {
        Matcher::ALL
            .into_iter()
            .find(|m| m.symbol() == symbol)
            .ok_or_else(|| DomainError::UnknownMatcher {
                symbol: symbol.to_string(),
                valid: Self::valid_symbols(),
            })
    }

    /// All accepted symbols.
    pub fn symbols() -> impl Iterator<Item = &'static str> {
        Matcher::ALL.into_iter().map(Matcher::symbol)
    }

    fn valid_symbols() -> String {
        Self::symbols().map(|s| format!("\"{}\"", s)).join(", ")
    }
}
