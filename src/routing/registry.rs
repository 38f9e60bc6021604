//! Pattern-to-handler bindings and route lookup.
//!
//! # Responsibilities
//! - Store bindings built at startup
//! - Reject empty and duplicate patterns
//! - Resolve a path to exactly one binding, or none
//!
//! # Design Decisions
//! - Exact bindings live in a HashMap: O(1) lookup, checked first
//! - Subtree bindings are kept sorted longest-first, so the first prefix
//!   hit is the most specific one
//! - Read-only once serving starts; `route` takes `&self` and needs no locks
//! - An empty path is routed as `/`

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::http::handler::Handler;
use crate::routing::pattern::{Pattern, PatternKind};

/// Errors raised while building the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The pattern string was empty.
    #[error("pattern must not be empty")]
    EmptyPattern,

    /// An exact pattern was registered twice.
    #[error("exact pattern {0:?} is already registered")]
    DuplicateExactPattern(String),

    /// A subtree pattern was registered twice.
    #[error("subtree pattern {0:?} is already registered")]
    DuplicateSubtreePattern(String),
}

/// A pattern and the handler serving it.
#[derive(Clone)]
pub struct Binding {
    pattern: Pattern,
    handler: Arc<dyn Handler>,
}

impl Binding {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Collection of bindings with exact-first, longest-subtree-second lookup.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    exact: HashMap<String, Binding>,
    /// Sorted by pattern length, longest first.
    subtree: Vec<Binding>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `pattern`.
    ///
    /// On error the registry is left exactly as it was.
    pub fn register(
        &mut self,
        pattern: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<(), RegistrationError> {
        let pattern = Pattern::parse(pattern)?;

        match pattern.kind() {
            PatternKind::Exact => {
                if self.exact.contains_key(pattern.as_str()) {
                    return Err(RegistrationError::DuplicateExactPattern(
                        pattern.as_str().to_string(),
                    ));
                }
                let key = pattern.as_str().to_string();
                self.exact.insert(key, Binding { pattern, handler });
            }
            PatternKind::Subtree => {
                if self.subtree.iter().any(|b| b.pattern == pattern) {
                    return Err(RegistrationError::DuplicateSubtreePattern(
                        pattern.as_str().to_string(),
                    ));
                }
                let len = pattern.as_str().len();
                let at = self
                    .subtree
                    .partition_point(|b| b.pattern.as_str().len() >= len);
                self.subtree.insert(at, Binding { pattern, handler });
            }
        }

        Ok(())
    }

    /// Find the binding serving `path`.
    ///
    /// `None` is the not-found outcome.
    pub fn route(&self, path: &str) -> Option<&Binding> {
        let path = if path.is_empty() { "/" } else { path };

        if let Some(binding) = self.exact.get(path) {
            return Some(binding);
        }

        self.subtree.iter().find(|b| b.pattern.matches(path))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.exact.len() + self.subtree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered patterns: exact ones first, then subtrees longest-first.
    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.exact
            .values()
            .chain(self.subtree.iter())
            .map(|b| &b.pattern)
    }
}
