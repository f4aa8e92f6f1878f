// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener callbacks and emit arguments

use crate::event::Event;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;
use std::sync::Arc;

/// Error type a listener may fail with
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What a listener returns; an `Err` aborts the rest of the dispatch
pub type ListenerResult = Result<(), BoxError>;

/// Boxed future returned by asynchronous listeners
pub type ListenerFuture = Pin<Box<dyn Future<Output = ListenerResult> + Send>>;

type SyncFn = dyn Fn(&Event, &Args) -> ListenerResult + Send + Sync;
type AsyncFn = dyn Fn(Event, Args) -> ListenerFuture + Send + Sync;

enum Handler {
    Sync(Box<SyncFn>),
    Async(Box<AsyncFn>),
}

/// The outcome of calling a listener: settled, or still running
pub(crate) enum Invocation {
    Settled(ListenerResult),
    Pending(ListenerFuture),
}

/// A registered listener function
///
/// Clones share identity: removing with one clone removes registrations made
/// with any other. Two callbacks built from the same closure body are still
/// different callbacks.
#[derive(Clone)]
pub struct Callback(Arc<Handler>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Event, &Args) -> ListenerResult + Send + Sync + 'static,
    {
        Self(Arc::new(Handler::Sync(Box::new(f))))
    }

    /// Wrap an async listener; the dispatcher awaits it before moving on
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(Event, Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ListenerResult> + Send + 'static,
    {
        let handler =
            move |event: Event, args: Args| -> ListenerFuture { Box::pin(f(event, args)) };
        Self(Arc::new(Handler::Async(Box::new(handler))))
    }

    pub fn is_async(&self) -> bool {
        matches!(*self.0, Handler::Async(_))
    }

    /// True when both handles refer to the same registered function
    pub fn same(&self, other: &Callback) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Call a synchronous listener; `None` (without calling) for async ones
    pub(crate) fn call_sync(&self, event: &Event, args: &Args) -> Option<ListenerResult> {
        match &*self.0 {
            Handler::Sync(f) => Some(f(event, args)),
            Handler::Async(_) => None,
        }
    }

    pub(crate) fn invoke(&self, event: &Event, args: &Args) -> Invocation {
        match &*self.0 {
            Handler::Sync(f) => Invocation::Settled(f(event, args)),
            Handler::Async(f) => Invocation::Pending(f(event.clone(), args.clone())),
        }
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_async() { "async" } else { "sync" };
        write!(f, "Callback({kind}@{:p})", Arc::as_ptr(&self.0))
    }
}

/// Extra arguments passed to every listener of one emit
#[derive(Clone, Debug, PartialEq)]
pub struct Args(Arc<[Value]>);

impl Args {
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        Self(values.into_iter().collect())
    }

    pub fn empty() -> Self {
        Self(Arc::from(Vec::<Value>::new()))
    }
}

impl Default for Args {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for Args {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl From<()> for Args {
    fn from(_: ()) -> Self {
        Self::empty()
    }
}

impl From<Value> for Args {
    fn from(value: Value) -> Self {
        Self::new([value])
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self(values.into())
    }
}

impl<const N: usize> From<[Value; N]> for Args {
    fn from(values: [Value; N]) -> Self {
        Self::new(values)
    }
}
