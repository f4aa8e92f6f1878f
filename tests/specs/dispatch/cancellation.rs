//! Cancellation and failure specs
//!
//! Verify that `cancel` and listener errors stop the current dispatch.

use crate::prelude::*;
use herald_core::DispatchError;

#[test]
fn cancel_stops_listeners_after_the_canceler() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner
        .on("x", rec.listener("A"))
        .on("x", rec.canceler("cancel"))
        .on("x", rec.listener("B"));

    owner.emit("x", ()).unwrap();

    assert_eq!(rec.calls(), vec!["A", "cancel"]);
}

#[test]
fn cancel_only_affects_the_current_emit() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner
        .once("x", rec.canceler("cancel"))
        .on("x", rec.listener("B"));

    owner.emit("x", ()).unwrap();
    owner.emit("x", ()).unwrap();

    assert_eq!(rec.calls(), vec!["cancel", "B"]);
}

#[test]
fn broadcast_listener_can_cancel_owner_listeners() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    world.broadcast.prepend("x", rec.canceler("global"));
    owner.on("x", rec.listener("own"));

    owner.emit("x", ()).unwrap();

    assert_eq!(rec.calls(), vec!["global"]);
}

#[test]
fn failing_listener_aborts_and_returns_error() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner
        .on("x", rec.listener("A"))
        .on("x", Callback::new(|_, _| Err("disk full".into())))
        .on("x", rec.listener("B"));

    let err = owner.emit("x", ()).unwrap_err();

    assert!(matches!(err, DispatchError::Listener { ref event, .. } if event == "x"));
    assert_eq!(err.to_string(), "listener for 'x' failed: disk full");
    assert_eq!(rec.calls(), vec!["A"]);
}

#[test]
fn failure_does_not_mark_event_canceled() {
    let world = World::new();
    let owner = world.owner();
    let seen = Recorder::new();
    let failing = {
        let seen = seen.clone();
        Callback::new(move |event, _| {
            seen.push(format!("canceled={}", event.is_canceled()));
            Err("boom".into())
        })
    };
    owner.on("x", failing);

    assert!(owner.emit("x", ()).is_err());
    assert!(owner.emit("x", ()).is_err());
    assert_eq!(seen.calls(), vec!["canceled=false", "canceled=false"]);
}
