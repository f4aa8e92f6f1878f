// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Emitters: the subscription API and emit entry points
//!
//! An [`Emitter`] exclusively owns one registry and, unless configured as
//! standalone, holds a reference to a broadcast emitter whose listeners fire
//! for every event it emits. The process-wide broadcast emitter is
//! [`Emitter::broadcast`]; tests and embedders can inject their own with
//! [`Emitter::channel`] + [`Emitter::attached_to`].

use crate::callback::{Args, Callback};
use crate::config::EmitterConfig;
use crate::dispatch::{Candidate, Dispatch, DispatchError, Flow};
use crate::event::Event;
use crate::identifier::{Identifier, Target};
use crate::registry::{Countdown, Listener, Registry};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static BROADCAST: OnceLock<Emitter> = OnceLock::new();

/// Process-unique emitter identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmitterId(pub u64);

impl EmitterId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "emitter-{}", self.0)
    }
}

/// Options for a single subscribe call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenOptions {
    /// Sort before every listener registered so far
    pub prepend: bool,
    /// Invocations before automatic removal; `None` is unbounded
    pub limit: Option<u32>,
}

impl ListenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn once() -> Self {
        Self::new().limit(1)
    }

    pub fn prepend(mut self) -> Self {
        self.prepend = true;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

struct Shared {
    id: EmitterId,
    label: Option<String>,
    registry: Mutex<Registry>,
    broadcast: Option<Emitter>,
}

/// Handle to an event emitter
///
/// Clones share the same registry. All methods take `&self`, and the
/// registry lock is never held while a listener runs, so listeners may
/// subscribe, unsubscribe or emit from inside a dispatch.
#[derive(Clone)]
pub struct Emitter {
    shared: Arc<Shared>,
}

impl Emitter {
    /// New emitter attached to the process-wide broadcast emitter
    pub fn new() -> Self {
        Self::build(None, Some(Self::broadcast().clone()))
    }

    pub fn with_config(config: &EmitterConfig) -> Self {
        let broadcast = config.broadcast.then(|| Self::broadcast().clone());
        Self::build(config.label.clone(), broadcast)
    }

    /// New emitter whose broadcast registry is `broadcast`'s registry
    pub fn attached_to(broadcast: &Emitter) -> Self {
        Self::build(None, Some(broadcast.clone()))
    }

    /// New root emitter with no broadcast parent
    ///
    /// Emitting on a root only consults its own registry. Pass it to
    /// [`Emitter::attached_to`] to use it as a broadcast channel.
    pub fn channel() -> Self {
        Self::build(None, None)
    }

    /// The process-wide broadcast emitter, created on first use
    pub fn broadcast() -> &'static Emitter {
        BROADCAST.get_or_init(|| Self::build(Some("broadcast".to_string()), None))
    }

    fn build(label: Option<String>, broadcast: Option<Emitter>) -> Self {
        Self {
            shared: Arc::new(Shared {
                id: EmitterId::next(),
                label,
                registry: Mutex::new(Registry::new()),
                broadcast,
            }),
        }
    }

    pub fn id(&self) -> EmitterId {
        self.shared.id
    }

    pub fn label(&self) -> Option<&str> {
        self.shared.label.as_deref()
    }

    /// True when both handles refer to the same emitter
    pub fn same(&self, other: &Emitter) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// The broadcast emitter this one merges into dispatch, if any
    pub fn broadcast_channel(&self) -> Option<&Emitter> {
        self.shared.broadcast.as_ref()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.shared
            .registry
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Subscribe `callback` to every name and pattern in `id`
    pub fn on(&self, id: impl Into<Identifier>, callback: Callback) -> &Self {
        self.on_with(id, callback, ListenOptions::new())
    }

    /// Subscribe so that `callback` runs before everything registered so far
    pub fn prepend(&self, id: impl Into<Identifier>, callback: Callback) -> &Self {
        self.on_with(id, callback, ListenOptions::new().prepend())
    }

    /// Subscribe for a single invocation
    pub fn once(&self, id: impl Into<Identifier>, callback: Callback) -> &Self {
        self.on_with(id, callback, ListenOptions::once())
    }

    /// Subscribe for at most `limit` invocations
    ///
    /// A zero limit subscribes nothing.
    pub fn limit(&self, id: impl Into<Identifier>, limit: u32, callback: Callback) -> &Self {
        self.on_with(id, callback, ListenOptions::new().limit(limit))
    }

    pub fn on_with(
        &self,
        id: impl Into<Identifier>,
        callback: Callback,
        options: ListenOptions,
    ) -> &Self {
        let id = id.into();
        if options.limit == Some(0) {
            tracing::debug!(
                emitter = %self.id(),
                identifier = %id,
                "zero limit, subscribe ignored"
            );
            return self;
        }
        let mut registry = self.registry();
        id.for_each(&mut |selector| {
            let order =
                registry.subscribe(selector, callback.clone(), options.prepend, options.limit);
            tracing::debug!(
                emitter = %self.id(),
                label = ?self.label(),
                target = %selector,
                order,
                prepend = options.prepend,
                limit = ?options.limit,
                "listener subscribed"
            );
        });
        self
    }

    /// Remove every listener registered for `id`
    pub fn off(&self, id: impl Into<Identifier>) -> &Self {
        self.unsubscribe(id.into(), None)
    }

    /// Remove only `callback`'s registrations for `id`
    pub fn off_callback(&self, id: impl Into<Identifier>, callback: &Callback) -> &Self {
        self.unsubscribe(id.into(), Some(callback))
    }

    fn unsubscribe(&self, id: Identifier, callback: Option<&Callback>) -> &Self {
        let mut registry = self.registry();
        id.for_each(&mut |selector| {
            let removed = registry.unsubscribe(selector, callback);
            tracing::debug!(
                emitter = %self.id(),
                label = ?self.label(),
                target = %selector,
                removed,
                "listeners unsubscribed"
            );
        });
        self
    }

    /// Drop every listener in this emitter's own registry
    pub fn clear(&self) -> &Self {
        self.registry().clear();
        self
    }

    /// Emit `name`, running listeners on the calling thread
    ///
    /// Synchronous listeners run before this returns. If the pass reaches
    /// an async listener, the rest of the pass is spawned onto the current
    /// tokio runtime and still runs strictly in order. A failing listener
    /// aborts the pass and its error is returned. Once the pass has been
    /// spawned, a failure is only logged at `warn`; use
    /// [`Emitter::emit_async`] to wait for the whole pass and get its error.
    ///
    /// If any matching listener is async and no runtime is running, this
    /// returns [`DispatchError::NoRuntime`] before invoking any listener.
    ///
    /// ```
    /// use herald_core::{BoxError, Callback, Emitter};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let emitter = Emitter::channel();
    /// emitter.on(
    ///     "job:done",
    ///     Callback::from_async(|_, _| async { Err::<(), BoxError>("late".into()) }),
    /// );
    ///
    /// // the failing tail is spawned; `emit` itself succeeds
    /// assert!(emitter.emit("job:done", ()).is_ok());
    /// // awaiting the pass surfaces the failure
    /// assert!(emitter.emit_async("job:done", ()).await.is_err());
    /// # }
    /// ```
    pub fn emit(&self, name: &str, args: impl Into<Args>) -> Result<&Self, DispatchError> {
        let dispatch = self.dispatch(name, args.into());
        let no_runtime = || DispatchError::NoRuntime {
            event: name.to_string(),
        };
        let runtime = if dispatch.has_async() {
            Some(tokio::runtime::Handle::try_current().map_err(|_| no_runtime())?)
        } else {
            None
        };
        match dispatch.run_sync()? {
            Flow::Complete => {}
            Flow::Suspended(rest) => {
                let Some(handle) = runtime else {
                    return Err(no_runtime());
                };
                handle.spawn(async move {
                    if let Err(e) = rest.run().await {
                        tracing::warn!(error = %e, "detached dispatch failed");
                    }
                });
            }
        }
        Ok(self)
    }

    /// Emit `name` and wait until every listener has settled
    pub async fn emit_async(
        &self,
        name: &str,
        args: impl Into<Args>,
    ) -> Result<&Self, DispatchError> {
        self.dispatch(name, args.into()).run().await?;
        Ok(self)
    }

    fn dispatch(&self, name: &str, args: Args) -> Dispatch {
        let candidates = self.candidates(name);
        Dispatch::new(Event::new(name, self.clone()), args, candidates)
    }

    /// Callbacks that an emit of `name` would invoke, in dispatch order
    pub fn listeners(&self, name: &str) -> Vec<Callback> {
        let mut candidates = self.candidates(name);
        candidates.sort_by_key(|c| c.listener.order);
        candidates
            .into_iter()
            .map(|c| c.listener.callback)
            .collect()
    }

    /// Number of listeners an emit of `name` would invoke
    pub fn listener_count(&self, name: &str) -> usize {
        self.candidates(name).len()
    }

    /// Gather own exact, broadcast, then own pattern listeners for `name`
    fn candidates(&self, name: &str) -> Vec<Candidate> {
        let (exact, patterns) = {
            let registry = self.registry();
            let exact: Vec<_> = registry.exact(name).cloned().collect();
            let patterns: Vec<_> = registry.matching(name).cloned().collect();
            (exact, patterns)
        };
        let mut out: Vec<Candidate> = exact
            .into_iter()
            .map(|listener| self.candidate(listener))
            .collect();
        if let Some(broadcast) = &self.shared.broadcast {
            if !broadcast.same(self) {
                out.extend(broadcast.candidates(name));
            }
        }
        out.extend(patterns.into_iter().map(|listener| self.candidate(listener)));
        out
    }

    fn candidate(&self, listener: Listener) -> Candidate {
        Candidate {
            listener,
            origin: self.clone(),
        }
    }

    pub(crate) fn countdown(&self, target: &Target, order: i64) -> Countdown {
        self.registry().countdown(target, order)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("id", &self.id())
            .field("label", &self.label())
            .field(
                "listeners",
                &self.shared.registry.try_lock().map(|r| r.len()).ok(),
            )
            .field("broadcast", &self.broadcast_channel().map(Emitter::id))
            .finish()
    }
}

#[cfg(test)]
#[path = "emitter_tests.rs"]
mod tests;
