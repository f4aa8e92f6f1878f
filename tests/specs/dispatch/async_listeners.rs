//! Async listener specs
//!
//! Verify that async listeners are awaited one at a time, in order.

use crate::prelude::*;
use herald_core::DispatchError;

#[tokio::test]
async fn emit_async_awaits_listeners_sequentially() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner
        .on("x", rec.async_listener("slow-1"))
        .on("x", rec.listener("sync"))
        .on("x", rec.async_listener("slow-2"));

    owner.emit_async("x", ()).await.unwrap();

    assert_eq!(rec.calls(), vec!["slow-1", "sync", "slow-2"]);
}

#[tokio::test]
async fn async_rejection_aborts_dispatch() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner
        .on(
            "x",
            Callback::from_async(|_, _| async { Err::<(), BoxError>("rejected".into()) }),
        )
        .on("x", rec.listener("after"));

    let err = owner.emit_async("x", ()).await.unwrap_err();

    assert!(matches!(err, DispatchError::Listener { .. }));
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn sync_emit_returns_before_async_tail_finishes() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let tx = std::sync::Mutex::new(Some(tx));
    let signal = Callback::new(move |_, _| {
        if let Some(tx) = tx.lock().unwrap().take() {
            let _ = tx.send(());
        }
        Ok(())
    });
    owner
        .on("x", rec.listener("first"))
        .on("x", rec.async_listener("async"))
        .on("x", rec.listener("last"))
        .on("x", signal);

    owner.emit("x", ()).unwrap();
    assert_eq!(rec.calls(), vec!["first"]);

    rx.await.unwrap();
    assert_eq!(rec.calls(), vec!["first", "async", "last"]);
}

#[test]
fn sync_emit_outside_runtime_reports_async_listener() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner.on("x", rec.async_listener("async"));

    let err = owner.emit("x", ()).unwrap_err();

    assert!(matches!(err, DispatchError::NoRuntime { .. }));
    assert!(rec.calls().is_empty());
}

#[test]
fn sync_emit_outside_runtime_runs_nothing() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner
        .once("x", rec.listener("sync-once"))
        .on("x", rec.async_listener("async"))
        .on("x", rec.listener("after"));

    assert!(owner.emit("x", ()).is_err());

    assert!(rec.calls().is_empty());
    assert_eq!(owner.listeners("x").len(), 3);
}
