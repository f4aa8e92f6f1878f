// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential listener invocation for one emit
//!
//! A [`Dispatch`] owns a sorted snapshot of the matching listeners plus the
//! shared [`Event`] context. It runs listeners one at a time, applies limit
//! countdowns, and stops on cancellation or on the first listener failure.

use crate::callback::{Args, BoxError, Invocation, ListenerResult};
use crate::emitter::Emitter;
use crate::event::Event;
use crate::registry::{Countdown, Listener};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::Instrument;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("listener for '{event}' failed: {source}")]
    Listener {
        event: String,
        #[source]
        source: BoxError,
    },
    #[error("listener for '{event}' is async and no tokio runtime is running")]
    NoRuntime { event: String },
}

/// A snapshotted listener and the emitter whose registry holds it
#[derive(Clone, Debug)]
pub(crate) struct Candidate {
    pub listener: Listener,
    pub origin: Emitter,
}

/// How far a synchronous pass got
pub(crate) enum Flow {
    Complete,
    /// Reached an async listener; the rest, starting with it, is returned
    Suspended(Dispatch),
}

pub(crate) struct Dispatch {
    event: Event,
    args: Args,
    queue: VecDeque<Candidate>,
    span: tracing::Span,
}

impl Dispatch {
    /// Sort the snapshot by ordering key
    ///
    /// The sort is stable: equal keys from different registries keep the
    /// order they were gathered in.
    pub(crate) fn new(event: Event, args: Args, mut candidates: Vec<Candidate>) -> Self {
        candidates.sort_by_key(|c| c.listener.order);
        let span = tracing::debug_span!(
            "dispatch",
            event = event.name(),
            emitter = %event.source().id(),
            label = ?event.source().label(),
        );
        Self {
            event,
            args,
            queue: candidates.into(),
            span,
        }
    }

    /// Whether any queued listener is async
    pub(crate) fn has_async(&self) -> bool {
        self.queue.iter().any(|c| c.listener.callback.is_async())
    }

    /// Run synchronous listeners until the queue drains or an async one is next
    pub(crate) fn run_sync(mut self) -> Result<Flow, DispatchError> {
        let span = self.span.clone();
        let _entered = span.enter();
        while let Some(candidate) = self.queue.pop_front() {
            let Some(outcome) = candidate.listener.callback.call_sync(&self.event, &self.args)
            else {
                self.queue.push_front(candidate);
                return Ok(Flow::Suspended(self));
            };
            if !self.settle(&candidate, outcome)? {
                break;
            }
        }
        Ok(Flow::Complete)
    }

    /// Run every remaining listener, awaiting async ones in turn
    pub(crate) async fn run(mut self) -> Result<(), DispatchError> {
        let span = self.span.clone();
        async move {
            while let Some(candidate) = self.queue.pop_front() {
                let outcome = match candidate.listener.callback.invoke(&self.event, &self.args) {
                    Invocation::Settled(outcome) => outcome,
                    Invocation::Pending(future) => future.await,
                };
                if !self.settle(&candidate, outcome)? {
                    break;
                }
            }
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Apply the outcome of one listener; returns whether to keep going
    fn settle(
        &self,
        candidate: &Candidate,
        outcome: ListenerResult,
    ) -> Result<bool, DispatchError> {
        let listener = &candidate.listener;
        tracing::trace!(order = listener.order, target = %listener.target, "listener invoked");

        if let Err(source) = outcome {
            return Err(DispatchError::Listener {
                event: self.event.name().to_string(),
                source,
            });
        }

        if listener.remaining.is_some() {
            let countdown = candidate.origin.countdown(&listener.target, listener.order);
            if countdown == Countdown::Exhausted {
                tracing::debug!(
                    order = listener.order,
                    target = %listener.target,
                    "listener limit reached, unsubscribed"
                );
            }
        }

        if self.event.is_canceled() {
            tracing::debug!(pending = self.queue.len(), "dispatch canceled");
            return Ok(false);
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
