//! Cancellable one-shot timers and the debouncer built on them.

use std::time::Duration;

use parking_lot::Mutex;

use super::gate::{Gate, RequestStatus};

/// Armed timer. Dropping it disarms the timer.
pub struct TimerHandle {
    label: &'static str,
    gate: Gate,
}

impl TimerHandle {
    pub fn cancel(&self) {
        if self.gate.close() {
            tracing::trace!(timer = self.label, "timer disarmed");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.gate.status() == RequestStatus::Pending
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run `fire` once after `delay` unless the handle is cancelled first.
///
/// Must be called from within a tokio runtime.
pub fn after(
    label: &'static str,
    delay: Duration,
    fire: impl FnOnce() + Send + 'static,
) -> TimerHandle {
    let gate = Gate::new();
    let task_gate = gate.clone();
    tokio::spawn(async move {
        tokio::select! {
            biased;
            _ = task_gate.token().cancelled() => {}
            _ = tokio::time::sleep(delay) => {
                task_gate.deliver(RequestStatus::Succeeded, fire);
            }
        }
    });
    TimerHandle { label, gate }
}

/// Holds at most one armed timer; arming a new one disarms the previous.
pub struct Debouncer {
    label: &'static str,
    delay: Duration,
    pending: Mutex<Option<TimerHandle>>,
}

impl Debouncer {
    pub fn new(label: &'static str, delay: Duration) -> Self {
        Self {
            label,
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)arm the timer.
    pub fn schedule(&self, fire: impl FnOnce() + Send + 'static) {
        let next = after(self.label, self.delay, fire);
        let previous = self.pending.lock().replace(next);
        drop(previous);
    }

    pub fn cancel(&self) {
        let previous = self.pending.lock().take();
        drop(previous);
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(TimerHandle::is_pending)
    }
}
