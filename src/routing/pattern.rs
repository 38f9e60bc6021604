//! Registration patterns.
//!
//! # Responsibilities
//! - Classify a pattern string as exact or subtree
//! - Decide whether a request path is served by a pattern
//!
//! # Design Decisions
//! - A trailing `/` is the only marker: `/api/` is a subtree, `/api` is exact
//! - No normalization: no case folding, no slash collapsing, no decoding
//! - Exact matching is literal, so `/foo` never matches `/foo/`

use std::fmt;

use crate::routing::registry::RegistrationError;

/// How a pattern matches paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Matches one path, verbatim.
    Exact,
    /// Matches itself and every path it is a prefix of.
    Subtree,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Exact => write!(f, "exact"),
            PatternKind::Subtree => write!(f, "subtree"),
        }
    }
}

/// An immutable registration key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    raw: String,
    kind: PatternKind,
}

impl Pattern {
    /// Parse a pattern, detecting its kind from the trailing separator.
    pub fn parse(raw: impl Into<String>) -> Result<Self, RegistrationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(RegistrationError::EmptyPattern);
        }
        let kind = if raw.ends_with('/') {
            PatternKind::Subtree
        } else {
            PatternKind::Exact
        };
        Ok(Self { raw, kind })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn is_subtree(&self) -> bool {
        self.kind == PatternKind::Subtree
    }

    /// Returns true if `path` is served by this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match self.kind {
            PatternKind::Exact => path == self.raw,
            PatternKind::Subtree => path.starts_with(&self.raw),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_detection() {
        assert_eq!(Pattern::parse("/").unwrap().kind(), PatternKind::Subtree);
        assert_eq!(Pattern::parse("/api/").unwrap().kind(), PatternKind::Subtree);
        assert_eq!(Pattern::parse("/foo").unwrap().kind(), PatternKind::Exact);
        assert_eq!(Pattern::parse("foo").unwrap().kind(), PatternKind::Exact);
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(Pattern::parse(""), Err(RegistrationError::EmptyPattern));
    }

    #[test]
    fn exact_is_literal() {
        let p = Pattern::parse("/foo").unwrap();
        assert!(p.matches("/foo"));
        assert!(!p.matches("/foo/"));
        assert!(!p.matches("/foobar"));
        assert!(!p.matches("/FOO"));
    }

    #[test]
    fn subtree_matches_itself_and_below() {
        let p = Pattern::parse("/api/").unwrap();
        assert!(p.matches("/api/"));
        assert!(p.matches("/api/widgets/7"));
        assert!(!p.matches("/api"));
        assert!(!p.matches("/apix/"));
    }
}
