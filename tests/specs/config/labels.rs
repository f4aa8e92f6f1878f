//! Emitter label specs
//!
//! Verify that a configured label is recorded in subscription and dispatch logs.

use crate::prelude::*;
use herald_core::EmitterConfig;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn logged(f: impl FnOnce()) -> Vec<String> {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    capture.lines()
}

#[test]
fn label_is_recorded_in_subscribe_and_dispatch_logs() {
    let rec = Recorder::new();
    let owner = Emitter::with_config(&EmitterConfig::new().label("jobs").standalone());

    let lines = logged(|| {
        owner.on("x", rec.canceler("cancel"));
        owner.emit("x", ()).unwrap();
    });

    let subscribed = lines
        .iter()
        .find(|l| l.contains("listener subscribed"))
        .unwrap();
    assert!(subscribed.contains(r#"label=Some("jobs")"#), "{subscribed}");

    let canceled = lines
        .iter()
        .find(|l| l.contains("dispatch canceled"))
        .unwrap();
    assert!(canceled.contains("dispatch{"), "{canceled}");
    assert!(canceled.contains(r#"label=Some("jobs")"#), "{canceled}");
}

#[test]
fn unlabeled_emitter_logs_no_label() {
    let world = World::new();
    let owner = world.owner();
    let rec = Recorder::new();

    let lines = logged(|| {
        owner.on("x", rec.listener("hit"));
    });

    let subscribed = lines
        .iter()
        .find(|l| l.contains("listener subscribed"))
        .unwrap();
    assert!(subscribed.contains("label=None"), "{subscribed}");
}
