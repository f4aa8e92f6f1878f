// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-owner listener storage
//!
//! A [`Registry`] is plain data: locking and dispatch belong to the emitter
//! that owns it. Listeners are kept unsorted; every lookup hands back clones
//! that the caller orders by [`Listener::order`].

use crate::callback::Callback;
use crate::identifier::{Selector, Target};
use std::collections::HashMap;

/// Issues unique ordering keys
///
/// Appended listeners take keys counting up from zero. A prepended listener
/// takes a key strictly less than any key issued so far, so it sorts before
/// everything already registered, every later append, and earlier prepends.
#[derive(Debug, Default)]
pub(crate) struct Sequence {
    head: i64,
    tail: i64,
}

impl Sequence {
    pub(crate) fn append(&mut self) -> i64 {
        let order = self.tail;
        self.tail += 1;
        order
    }

    pub(crate) fn prepend(&mut self) -> i64 {
        self.head -= 1;
        self.head
    }
}

/// One registered callback
#[derive(Clone, Debug)]
pub(crate) struct Listener {
    pub target: Target,
    pub callback: Callback,
    pub order: i64,
    /// Invocations left before removal; `None` is unbounded
    pub remaining: Option<u32>,
}

/// Result of counting down a limited listener
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Countdown {
    /// Unbounded, or no longer registered
    Untracked,
    Remaining(u32),
    /// Hit zero; the listener was unsubscribed
    Exhausted,
}

#[derive(Debug, Default)]
pub(crate) struct Registry {
    sequence: Sequence,
    by_name: HashMap<String, Vec<Listener>>,
    patterns: Vec<Listener>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a listener and return its ordering key
    pub(crate) fn subscribe(
        &mut self,
        selector: Selector<'_>,
        callback: Callback,
        prepend: bool,
        limit: Option<u32>,
    ) -> i64 {
        let order = if prepend {
            self.sequence.prepend()
        } else {
            self.sequence.append()
        };
        let listener = Listener {
            target: selector.to_target(),
            callback,
            order,
            remaining: limit,
        };
        match selector {
            Selector::Name(name) => self
                .by_name
                .entry(name.to_string())
                .or_default()
                .push(listener),
            Selector::Pattern(_) => self.patterns.push(listener),
        }
        order
    }

    /// Remove listeners for a selector, optionally only those with `callback`
    ///
    /// Names never remove pattern listeners and patterns never remove name
    /// listeners. Patterns compare by source text. Returns how many were
    /// removed.
    pub(crate) fn unsubscribe(
        &mut self,
        selector: Selector<'_>,
        callback: Option<&Callback>,
    ) -> usize {
        match selector {
            Selector::Name(name) => {
                let Some(list) = self.by_name.get_mut(name) else {
                    return 0;
                };
                let before = list.len();
                match callback {
                    Some(cb) => list.retain(|l| !l.callback.same(cb)),
                    None => list.clear(),
                }
                let removed = before - list.len();
                if list.is_empty() {
                    self.by_name.remove(name);
                }
                removed
            }
            Selector::Pattern(pattern) => {
                let before = self.patterns.len();
                self.patterns.retain(|l| {
                    let same_pattern = matches!(&l.target, Target::Pattern(p) if p == pattern);
                    let same_callback = callback.map_or(true, |cb| l.callback.same(cb));
                    !(same_pattern && same_callback)
                });
                before - self.patterns.len()
            }
        }
    }

    /// Exact-name listeners for `name`
    pub(crate) fn exact(&self, name: &str) -> impl Iterator<Item = &Listener> + '_ {
        self.by_name.get(name).into_iter().flatten()
    }

    /// Pattern listeners whose pattern matches `name`
    pub(crate) fn matching<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Listener> + 'a {
        self.patterns.iter().filter(move |l| match &l.target {
            Target::Pattern(pattern) => pattern.matches(name),
            Target::Name(_) => false,
        })
    }

    /// Count down the listener with ordering key `order`
    ///
    /// On reaching zero every listener with the same target and callback is
    /// unsubscribed.
    pub(crate) fn countdown(&mut self, target: &Target, order: i64) -> Countdown {
        let list = match target {
            Target::Name(name) => match self.by_name.get_mut(name.as_str()) {
                Some(list) => list,
                None => return Countdown::Untracked,
            },
            Target::Pattern(_) => &mut self.patterns,
        };
        let Some(listener) = list.iter_mut().find(|l| l.order == order) else {
            return Countdown::Untracked;
        };
        let Some(remaining) = listener.remaining.as_mut() else {
            return Countdown::Untracked;
        };
        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return Countdown::Remaining(*remaining);
        }
        let callback = listener.callback.clone();
        self.unsubscribe(target.as_selector(), Some(&callback));
        Countdown::Exhausted
    }

    /// Drop every listener; the sequence keeps counting
    pub(crate) fn clear(&mut self) {
        self.by_name.clear();
        self.patterns.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.by_name.values().map(Vec::len).sum::<usize>() + self.patterns.len()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
