// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-dispatch event context

use crate::emitter::Emitter;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Context handed to every listener of a single emit
///
/// One context is created per emit and shared by all of its listeners, so a
/// listener calling [`Event::cancel`] stops the listeners after it.
#[derive(Clone)]
pub struct Event(Arc<Context>);

struct Context {
    name: String,
    source: Emitter,
    canceled: AtomicBool,
}

impl Event {
    pub(crate) fn new(name: &str, source: Emitter) -> Self {
        Self(Arc::new(Context {
            name: name.to_string(),
            source,
            canceled: AtomicBool::new(false),
        }))
    }

    /// The emitted event name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The emitter whose `emit` started this dispatch
    pub fn source(&self) -> &Emitter {
        &self.0.source
    }

    /// Stop the dispatch once the current listener settles
    pub fn cancel(&self) {
        self.0.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.canceled.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name())
            .field("source", &self.source().id())
            .field("canceled", &self.is_canceled())
            .finish()
    }
}
