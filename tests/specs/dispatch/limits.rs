//! Invocation limit specs
//!
//! Verify `once` and `limit` auto-removal.

use crate::prelude::*;

#[test]
fn once_runs_on_first_emit_and_never_again() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner.once("x", rec.listener("once"));

    owner.emit("x", ()).unwrap().emit("x", ()).unwrap();

    assert_eq!(rec.calls(), vec!["once"]);
}

#[test]
fn once_matches_limit_of_one() {
    let world = World::new();
    let owner = world.owner();
    let once = Recorder::new();
    let limited = Recorder::new();
    owner
        .once("x", once.listener("hit"))
        .limit("x", 1, limited.listener("hit"));

    for _ in 0..3 {
        owner.emit("x", ()).unwrap();
    }

    assert_eq!(once.calls(), limited.calls());
}

#[test]
fn limit_runs_exactly_k_times() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    let cb = rec.listener("hit");
    owner.limit("x", 3, cb.clone());

    for _ in 0..2 {
        owner.emit("x", ()).unwrap();
    }
    assert_eq!(owner.listeners("x"), vec![cb]);

    for _ in 0..3 {
        owner.emit("x", ()).unwrap();
    }
    assert_eq!(rec.calls().len(), 3);
    assert!(owner.listeners("x").is_empty());
}

#[test]
fn limit_on_pattern_listener() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner.limit(pattern("^job:"), 2, rec.listener("job"));

    owner.emit("job:a", ()).unwrap();
    owner.emit("other", ()).unwrap();
    owner.emit("job:b", ()).unwrap();
    owner.emit("job:c", ()).unwrap();

    assert_eq!(rec.calls(), vec!["job", "job"]);
}

#[test]
fn limited_list_subscription_counts_each_entry_separately() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner.once(["a", "b"], rec.listener("hit"));

    owner.emit("a", ()).unwrap();
    owner.emit("a", ()).unwrap();
    owner.emit("b", ()).unwrap();

    assert_eq!(rec.calls(), vec!["hit", "hit"]);
}

#[test]
fn prepended_limit_keeps_its_place() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner
        .on("x", rec.listener("a"))
        .on_with("x", rec.listener("p"), ListenOptions::new().prepend().limit(2));

    for _ in 0..3 {
        owner.emit("x", ()).unwrap();
    }

    assert_eq!(rec.calls(), vec!["p", "a", "p", "a", "a"]);
}

#[test]
fn zero_limit_is_ignored() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();
    owner.limit("x", 0, rec.listener("never")).emit("x", ()).unwrap();

    assert!(rec.calls().is_empty());
    assert!(owner.listeners("x").is_empty());
}
