//! Elapsed-time measurement for steps and hooks, injectable so tests can fix
//! durations deterministically.

use std::time::Instant;

/// Measures one unit of work: `start` hands out a handle, `stop` consumes it
/// and reports elapsed nanoseconds.
pub trait Timer {
    type Handle;

    fn start(&self) -> Self::Handle;
    fn stop(&self, handle: Self::Handle) -> u64;
}

/// Wall-clock timer backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicTimer;

impl Timer for MonotonicTimer {
    type Handle = Instant;

    fn start(&self) -> Instant {
        Instant::now()
    }

    fn stop(&self, handle: Instant) -> u64 {
        // u64 nanoseconds cover ~584 years of elapsed time.
        handle.elapsed().as_nanos() as u64
    }
}

/// Stub timer reporting a fixed duration for every measurement.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimer(pub u64);

impl Timer for FixedTimer {
    type Handle = ();

    fn start(&self) {}

    fn stop(&self, _handle: ()) -> u64 {
        self.0
    }
}
