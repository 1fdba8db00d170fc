//! Shell-style wildcard patterns for page identifiers.
//!
//! `*` matches any run of characters (including `/`), `?` matches one
//! character, `[seq]` / `[!seq]` match one character in / not in `seq`.

use globset::{Glob, GlobMatcher};

/// Characters that may turn an input entry into a pattern.
const WILDCARDS: &[char] = &['*', '?', '['];

/// Whether an input entry contains wildcard characters.
#[inline]
pub fn is_pattern(s: &str) -> bool {
    s.contains(WILDCARDS)
}

/// Whether an entry is a pattern only through `?` or `[`.
///
/// Such entries are also plausible literal ids (`api/[id].html`).
#[inline]
pub fn is_ambiguous(s: &str) -> bool {
    is_pattern(s) && !s.contains('*')
}

/// A compiled shell-style pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    matcher: GlobMatcher,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, globset::Error> {
        let matcher = Glob::new(pattern)?.compile_matcher();
        Ok(Self { matcher })
    }

    #[inline]
    pub fn matches(&self, candidate: &str) -> bool {
        self.matcher.is_match(candidate)
    }

    pub fn as_str(&self) -> &str {
        self.matcher.glob().glob()
    }
}
