//! In-process sink for tests and embedding.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::detector::event::OutageEvent;
use crate::detector::window::WindowSummary;
use crate::sink::{EventSink, SinkError};

#[derive(Default)]
struct Store {
    events: Vec<OutageEvent>,
    windows: Vec<WindowSummary>,
}

/// Vec-backed sink. Clones share storage, so a test can hand one clone to
/// the runner and inspect the other afterwards. Writes can be made to fail
/// on demand to exercise the runner's retry path.
#[derive(Clone, Default)]
pub struct MemorySink {
    store: Arc<Mutex<Store>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<OutageEvent> {
        self.store.lock().unwrap().events.clone()
    }

    pub fn windows(&self) -> Vec<WindowSummary> {
        self.store.lock().unwrap().windows.clone()
    }

    /// Make subsequent writes fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), SinkError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SinkError::Io(std::io::Error::other(
                "simulated write failure",
            )));
        }
        Ok(())
    }
}

impl EventSink for MemorySink {
    fn record_event(&mut self, event: &OutageEvent) -> Result<(), SinkError> {
        self.check_writable()?;
        self.store.lock().unwrap().events.push(event.clone());
        Ok(())
    }

    fn record_window(&mut self, window: &WindowSummary) -> Result<(), SinkError> {
        self.check_writable()?;
        self.store.lock().unwrap().windows.push(window.clone());
        Ok(())
    }
}
