//! herald-core: in-process publish/subscribe dispatch
//!
//! This crate provides:
//! - `Emitter` - register listeners by exact name, regex pattern, or lists of both
//! - Deterministic dispatch order, with prepend and per-listener invocation limits
//! - Cooperative cancellation from inside a listener
//! - A process-wide broadcast emitter whose listeners see every emit
//! - `Evented` - delegate the emitter surface from any type that embeds one
//!
//! ```
//! use herald_core::{Callback, Emitter};
//!
//! let log = Callback::new(|event, args| {
//!     println!("{} {:?}", event.name(), args.first());
//!     Ok(())
//! });
//! let emitter = Emitter::channel();
//! emitter.on("job:done", log).emit("job:done", serde_json::json!(7))?;
//! # Ok::<(), herald_core::DispatchError>(())
//! ```

pub mod config;

mod callback;
mod dispatch;
mod emitter;
mod event;
mod evented;
mod identifier;
mod registry;

// Re-exports
pub use callback::{Args, BoxError, Callback, ListenerFuture, ListenerResult};
pub use config::{ConfigError, EmitterConfig};
pub use dispatch::DispatchError;
pub use emitter::{Emitter, EmitterId, ListenOptions};
pub use event::Event;
pub use evented::Evented;
pub use identifier::{Identifier, Pattern, PatternError, Selector};
