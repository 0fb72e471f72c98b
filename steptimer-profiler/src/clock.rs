use std::{cell::Cell, rc::Rc, sync::OnceLock, time::Instant};

/// Source of the current time, in fractional seconds.
///
/// Values returned by a clock must never decrease. A clock is cloned into
/// every [`Step`](crate::Step) a [`Timer`](crate::Timer) opens, so clones
/// must observe the same time.
pub trait Clock: Clone {
    fn now(&self) -> f64;
}

/// Monotonic wall clock, measured from the first time any `SystemClock` is read.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        static ANCHOR: OnceLock<Instant> = OnceLock::new();

        ANCHOR.get_or_init(Instant::now).elapsed().as_secs_f64()
    }
}

/// Hand-driven clock, shared between its clones.
///
/// Mostly useful in tests, where exact durations are needed.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Moves the clock forward, negative amounts are ignored
    pub fn advance(&self, seconds: f64) {
        if seconds > 0.0 {
            self.now.set(self.now.get() + seconds);
        }
    }

    /// Jumps to `seconds`, unless that would move the clock backwards
    pub fn set(&self, seconds: f64) {
        if seconds > self.now.get() {
            self.now.set(seconds);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
