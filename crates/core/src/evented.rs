// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delegated eventing for types that embed an [`Emitter`]

use crate::callback::{Args, Callback};
use crate::dispatch::DispatchError;
use crate::emitter::{Emitter, ListenOptions};
use crate::identifier::Identifier;
use async_trait::async_trait;

/// Gives a type the emitter surface by delegating to an embedded [`Emitter`]
///
/// Every method returns the owner, not the emitter, so calls chain on the
/// owning type. Events emitted through the owner carry the embedded emitter
/// as their source.
#[async_trait]
pub trait Evented: Send + Sync {
    fn emitter(&self) -> &Emitter;

    fn on(&self, id: impl Into<Identifier> + Send, callback: Callback) -> &Self
    where
        Self: Sized,
    {
        self.emitter().on(id, callback);
        self
    }

    fn on_with(
        &self,
        id: impl Into<Identifier> + Send,
        callback: Callback,
        options: ListenOptions,
    ) -> &Self
    where
        Self: Sized,
    {
        self.emitter().on_with(id, callback, options);
        self
    }

    fn once(&self, id: impl Into<Identifier> + Send, callback: Callback) -> &Self
    where
        Self: Sized,
    {
        self.emitter().once(id, callback);
        self
    }

    fn limit(&self, id: impl Into<Identifier> + Send, limit: u32, callback: Callback) -> &Self
    where
        Self: Sized,
    {
        self.emitter().limit(id, limit, callback);
        self
    }

    fn off(&self, id: impl Into<Identifier> + Send) -> &Self
    where
        Self: Sized,
    {
        self.emitter().off(id);
        self
    }

    fn off_callback(&self, id: impl Into<Identifier> + Send, callback: &Callback) -> &Self
    where
        Self: Sized,
    {
        self.emitter().off_callback(id, callback);
        self
    }

    fn emit(&self, name: &str, args: impl Into<Args> + Send) -> Result<&Self, DispatchError>
    where
        Self: Sized,
    {
        self.emitter().emit(name, args)?;
        Ok(self)
    }

    async fn emit_async(&self, name: &str, args: Args) -> Result<&Self, DispatchError>
    where
        Self: Sized,
    {
        self.emitter().emit_async(name, args).await?;
        Ok(self)
    }

    fn listeners(&self, name: &str) -> Vec<Callback> {
        self.emitter().listeners(name)
    }
}

#[cfg(test)]
#[path = "evented_tests.rs"]
mod tests;
