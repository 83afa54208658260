use std::cell::Cell;
use std::rc::Rc;

/// Cancellation token shared between a running loop and whoever started it.
///
/// The loop checks [`is_stopped`](Self::is_stopped) before scheduling its next
/// frame; once stopped it never reschedules. Single-threaded by design of the
/// host (one display-refresh callback at a time), hence `Rc<Cell<_>>`.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    stopped: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the loop to stop. Idempotent.
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}
