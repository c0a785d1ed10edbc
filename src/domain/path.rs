//! Dot-separated namespace paths for domains and configurations.

use std::fmt;

use itertools::Itertools;

use crate::domain::error::{DomainError, DomainResult};

/// Ordered name segments of a nested namespace.
///
/// Rendered as the segments joined by `.`; an empty path renders as "".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NamePath {
    segments: Vec<String>,
}

impl NamePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }
}

impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.iter().join("."))
    }
}

impl<S: Into<String>> FromIterator<S> for NamePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Check that a name can be used as a single path segment.
///
/// Dots would split the segment on rendering and whitespace would split the
/// command line, so both are rejected.
pub fn validate_segment(name: &str) -> DomainResult<()> {
    let reason = if name.is_empty() {
        "name must not be empty"
    } else if name.contains('.') {
        "name must not contain '.'"
    } else if name.chars().any(char::is_whitespace) {
        "name must not contain whitespace"
    } else {
        return Ok(());
    };
    Err(DomainError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
