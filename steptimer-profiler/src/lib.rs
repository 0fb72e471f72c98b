//! Hierarchical execution timer.
//!
//! A [`Timer`] is a sequence of [`Step`]s, and every step may own a nested
//! timer of its own. Once ended, the whole tree renders to aligned text lines
//! with [`Timer::dump`].

pub mod clock;
pub mod error;
pub mod format;
pub mod registry;
pub mod step;
pub mod timer;

pub use crate::{
    clock::{Clock, ManualClock, SystemClock},
    error::NoCurrentStepError,
    format::strip_markup,
    registry::Registry,
    step::Step,
    timer::{StepId, Timer},
};
