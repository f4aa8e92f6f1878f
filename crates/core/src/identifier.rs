// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener identifiers: exact names, name patterns, and lists of either
//!
//! An [`Identifier`] selects which events a listener is registered for (or
//! removed from). Lists are expanded recursively into [`Selector`]s, one per
//! exact name or pattern, before they reach a registry.

use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern '{source_text}': {error}")]
    Invalid {
        source_text: String,
        #[source]
        error: regex::Error,
    },
    #[error("unsupported pattern flag '{0}'")]
    UnsupportedFlag(char),
}

/// Event-name pattern backed by a regular expression
///
/// Matching is a plain regex test against the whole name: no anchors are
/// added, so `load` matches `preload` unless the pattern says `^load$`.
/// Two patterns are the same identifier when their source text is equal,
/// flags included.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, PatternError> {
        Regex::new(source)
            .map(Self)
            .map_err(|error| PatternError::Invalid {
                source_text: source.to_string(),
                error,
            })
    }

    /// Build a pattern with flags folded into the source as an inline group
    ///
    /// Accepts the regex inline flags `i`, `m`, `s`, `x`, `U` and `R`, so
    /// `with_flags("^tick", "i")` has the source text `(?i)^tick`.
    pub fn with_flags(source: &str, flags: &str) -> Result<Self, PatternError> {
        if flags.is_empty() {
            return Self::new(source);
        }
        if let Some(bad) = flags.chars().find(|c| !"imsxUR".contains(*c)) {
            return Err(PatternError::UnsupportedFlag(bad));
        }
        Self::new(&format!("(?{flags}){source}"))
    }

    /// Check if this pattern matches an event name
    pub fn matches(&self, event_name: &str) -> bool {
        self.0.is_match(event_name)
    }

    /// Serialized source text, used for identity
    pub fn source(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self(regex)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source() == other.source()
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source().hash(state);
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source())
    }
}

/// What a subscribe/unsubscribe call applies to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identifier {
    /// A single event name, compared exactly
    Name(String),
    /// Every event name the pattern matches
    Pattern(Pattern),
    /// Each element in turn, with the same remaining arguments
    List(Vec<Identifier>),
}

impl Identifier {
    /// Visit every exact name and pattern, expanding lists depth-first
    pub(crate) fn for_each<'a>(&'a self, f: &mut impl FnMut(Selector<'a>)) {
        match self {
            Identifier::Name(name) => f(Selector::Name(name)),
            Identifier::Pattern(pattern) => f(Selector::Pattern(pattern)),
            Identifier::List(items) => {
                for item in items {
                    item.for_each(f);
                }
            }
        }
    }

    /// Flattened selectors, in list order
    pub fn selectors(&self) -> Vec<Selector<'_>> {
        let mut out = Vec::new();
        self.for_each(&mut |selector| out.push(selector));
        out
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Name(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Name(name)
    }
}

impl From<&String> for Identifier {
    fn from(name: &String) -> Self {
        Identifier::Name(name.clone())
    }
}

impl From<Pattern> for Identifier {
    fn from(pattern: Pattern) -> Self {
        Identifier::Pattern(pattern)
    }
}

impl From<&Pattern> for Identifier {
    fn from(pattern: &Pattern) -> Self {
        Identifier::Pattern(pattern.clone())
    }
}

impl From<Regex> for Identifier {
    fn from(regex: Regex) -> Self {
        Identifier::Pattern(Pattern::from(regex))
    }
}

impl<T: Into<Identifier>> From<Vec<T>> for Identifier {
    fn from(items: Vec<T>) -> Self {
        Identifier::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Identifier>, const N: usize> From<[T; N]> for Identifier {
    fn from(items: [T; N]) -> Self {
        Identifier::List(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Name(name) => write!(f, "{name}"),
            Identifier::Pattern(pattern) => write!(f, "{pattern}"),
            Identifier::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// One exact name or one pattern, borrowed from an [`Identifier`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector<'a> {
    Name(&'a str),
    Pattern(&'a Pattern),
}

impl Selector<'_> {
    pub(crate) fn to_target(self) -> Target {
        match self {
            Selector::Name(name) => Target::Name(name.to_string()),
            Selector::Pattern(pattern) => Target::Pattern(pattern.clone()),
        }
    }
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Name(name) => write!(f, "{name}"),
            Selector::Pattern(pattern) => write!(f, "{pattern}"),
        }
    }
}

/// Owned selector stored on each listener record
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Target {
    Name(String),
    Pattern(Pattern),
}

impl Target {
    pub(crate) fn as_selector(&self) -> Selector<'_> {
        match self {
            Target::Name(name) => Selector::Name(name),
            Target::Pattern(pattern) => Selector::Pattern(pattern),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_selector(), f)
    }
}

#[cfg(test)]
#[path = "identifier_tests.rs"]
mod tests;
