use thiserror::Error;

/// Returned when a timer is annotated before any step was opened on it.
///
/// This is a usage error on the caller's side: open a step with
/// [`Timer::add_step`](crate::Timer::add_step) first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no current step on timer `{timer}`")]
pub struct NoCurrentStepError {
    /// Name of the timer that was annotated
    pub timer: String,
}
