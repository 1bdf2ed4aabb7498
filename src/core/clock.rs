//! Host time sources.
//!
//! The engine only needs a monotonically non-decreasing tick counter. Ticks
//! are assumed to be milliseconds; wraparound is tolerated because every
//! delta is computed with wrapping subtraction.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Source of host ticks consumed by the engine.
///
/// Any `Fn() -> u32` closure is a tick source, so a firmware HAL call can be
/// wired in directly.
///
/// # Example
///
/// ```rust
/// use cycle_fsm::core::TickSource;
///
/// let fixed = || 1234u32;
/// assert_eq!(fixed.now(), 1234);
/// ```
pub trait TickSource: Send + Sync {
    /// Current tick count.
    fn now(&self) -> u32;
}

impl<F> TickSource for F
where
    F: Fn() -> u32 + Send + Sync,
{
    fn now(&self) -> u32 {
        self()
    }
}

/// Milliseconds elapsed since the clock was created.
///
/// The count wraps after roughly 49 days, which the engine tolerates.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SystemClock {
    fn now(&self) -> u32 {
        // Truncation is the wraparound.
        self.origin.elapsed().as_millis() as u32
    }
}

/// Tick counter driven explicitly by the host.
///
/// Clones share the same counter, so one handle can be given to a machine
/// while another advances time.
///
/// # Example
///
/// ```rust
/// use cycle_fsm::core::{ManualClock, TickSource};
///
/// let clock = ManualClock::new(0);
/// let shared = clock.clone();
///
/// clock.advance(10);
/// assert_eq!(shared.now(), 10);
///
/// shared.set(u32::MAX);
/// clock.advance(1);
/// assert_eq!(clock.now(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    ticks: Arc<AtomicU32>,
}

impl ManualClock {
    pub fn new(start: u32) -> Self {
        Self {
            ticks: Arc::new(AtomicU32::new(start)),
        }
    }

    /// Jump to an absolute tick value.
    pub fn set(&self, ticks: u32) {
        self.ticks.store(ticks, Ordering::Relaxed);
    }

    /// Move time forward, wrapping on overflow.
    pub fn advance(&self, delta: u32) {
        // fetch_add wraps on overflow
        self.ticks.fetch_add(delta, Ordering::Relaxed);
    }
}

impl TickSource for ManualClock {
    fn now(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }
}
