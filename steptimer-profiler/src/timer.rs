use std::fmt;

use crate::{
    clock::{Clock, SystemClock},
    error::NoCurrentStepError,
    format::{self, COLUMN_WIDTH, MARGIN_WIDTH},
    Step,
};

/// Identifier of a step inside its timer, never reused by that timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(u64);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step-{}", self.0)
    }
}

/// An ordered sequence of [`Step`]s with its own start and end.
///
/// Opening a step closes the previous one, so at most the last step is
/// running at any time. A timer can be the root of a profiling session or be
/// nested inside a step of another timer.
#[derive(Debug)]
pub struct Timer<C: Clock = SystemClock> {
    name: String,
    start: f64,
    end: Option<f64>,
    steps: Vec<(StepId, Step<C>)>,
    next_id: u64,
    marker_since: f64,
    clock: C,
}

impl Timer<SystemClock> {
    /// Starts a timer on the system clock
    pub fn create(name: impl Into<String>) -> Self {
        Self::with_clock(name, SystemClock)
    }
}

impl Default for Timer<SystemClock> {
    fn default() -> Self {
        Self::create("ROOT")
    }
}

impl<C: Clock> Timer<C> {
    pub fn with_clock(name: impl Into<String>, clock: C) -> Self {
        let start = clock.now();

        Self {
            name: name.into(),
            start,
            end: None,
            steps: Vec::new(),
            next_id: 0,
            marker_since: start,
            clock,
        }
    }

    /// Starts a new timer sharing this timer's clock, without attaching it
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self::with_clock(name, self.clock.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end_time(&self) -> Option<f64> {
        self.end
    }

    pub fn is_ended(&self) -> bool {
        self.end.is_some()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in the order they were opened
    pub fn steps(&self) -> impl Iterator<Item = (StepId, &Step<C>)> + '_ {
        self.steps.iter().map(|(id, step)| (*id, step))
    }

    pub fn step(&self, id: StepId) -> Option<&Step<C>> {
        self.steps
            .iter()
            .find(|(step_id, _)| *step_id == id)
            .map(|(_, step)| step)
    }

    pub fn current_step(&self) -> Option<&Step<C>> {
        self.steps.last().map(|(_, step)| step)
    }

    pub fn current_step_mut(&mut self) -> Option<&mut Step<C>> {
        self.steps.last_mut().map(|(_, step)| step)
    }

    fn require_current_step(&mut self) -> Result<&mut Step<C>, NoCurrentStepError> {
        match self.steps.last_mut() {
            Some((_, step)) => Ok(step),
            None => Err(NoCurrentStepError {
                timer: self.name.clone(),
            }),
        }
    }

    /// Closes the current step, if any, and opens a new one
    pub fn add_step(&mut self, label: impl Into<String>) -> &mut Self {
        if let Some(step) = self.current_step_mut() {
            step.end();
        }

        let id = StepId(self.next_id);
        self.next_id += 1;

        let step = Step::with_clock(label, self.clock.clone());

        tracing::trace!(timer = %self.name, step = %step.label(), id = %id, "step opened");

        self.steps.push((id, step));

        self
    }

    /// Nests `timer` under the current step, replacing any timer already there
    pub fn add_timer(&mut self, timer: Timer<C>) -> Result<&mut Self, NoCurrentStepError> {
        self.require_current_step()?.set_timer(timer);

        Ok(self)
    }

    /// Starts a timer on this timer's clock and nests it under the current step.
    ///
    /// Returns the nested timer so steps can be added to it.
    pub fn open_timer(&mut self, name: impl Into<String>) -> Result<&mut Timer<C>, NoCurrentStepError> {
        let timer = self.child(name);

        Ok(self.require_current_step()?.insert_timer(timer))
    }

    pub fn add_message(&mut self, message: impl Into<String>) -> Result<&mut Self, NoCurrentStepError> {
        self.require_current_step()?.add_message(message);

        Ok(self)
    }

    pub fn set_info(&mut self, info: impl Into<String>) -> Result<&mut Self, NoCurrentStepError> {
        self.require_current_step()?.set_info(info);

        Ok(self)
    }

    /// Closes the current step without opening another one
    pub fn end_step(&mut self) -> Result<&mut Self, NoCurrentStepError> {
        self.require_current_step()?.end();

        Ok(self)
    }

    /// Closes the current step, then the timer itself.
    ///
    /// Calling this on an ended timer does nothing.
    pub fn end(&mut self) -> &mut Self {
        if self.end.is_some() {
            return self;
        }

        if let Some(step) = self.current_step_mut() {
            step.end();
        }

        let end = self.clock.now();
        self.end = Some(end);

        tracing::trace!(timer = %self.name, steps = self.steps.len(), duration = end - self.start, "timer ended");

        self
    }

    /// Drops every step and starts the timer again from now
    pub fn reset(&mut self) -> &mut Self {
        tracing::debug!(timer = %self.name, steps = self.steps.len(), "resetting timer");

        let now = self.clock.now();

        self.start = now;
        self.end = None;
        self.marker_since = now;
        self.steps.clear();

        self
    }

    /// Seconds between start and end, or now while the timer is running
    pub fn duration(&self) -> f64 {
        self.end.unwrap_or_else(|| self.clock.now()) - self.start
    }

    /// Seconds between the timer's start and its first step's start
    pub fn time_to_launch(&self) -> f64 {
        self.steps
            .first()
            .map(|(_, step)| step.start() - self.start)
            .unwrap_or(0.0)
    }

    /// Mean duration of the steps, ending the timer first.
    ///
    /// With fewer than two steps this is the timer's own duration.
    pub fn step_average(&mut self) -> f64 {
        self.end();

        if self.steps.len() < 2 {
            return self.duration();
        }

        let total: f64 = self.steps.iter().map(|(_, step)| step.duration()).sum();

        total / self.steps.len() as f64
    }

    /// Seconds since the previous marker (or the timer's start), padded to 9 columns
    pub fn set_marker(&mut self) -> String {
        let now = self.clock.now();
        let elapsed = format::number_format(now - self.marker_since, 4, None);

        self.marker_since = now;

        format!("{:>9}", elapsed)
    }

    /// One line per step, info first, ending the timer first
    pub fn steps_to_messages(&mut self) -> Vec<String> {
        self.end();

        self.steps
            .iter()
            .map(|(_, step)| format!("{} {}", step.info().unwrap_or(""), step.label()).trim().to_string())
            .collect()
    }

    /// Renders the whole tree, this timer being its root.
    ///
    /// Ends the timer first. An empty timer renders nothing, otherwise a
    /// header with the total duration and column titles comes before the
    /// steps.
    pub fn dump(&mut self) -> Vec<String> {
        self.end();

        if self.is_empty() {
            return Vec::new();
        }

        let dump = vec![
            String::new(),
            format!("<info>Total: {}s</>", format::total_seconds(self.duration())),
            String::new(),
            format!("<comment>{:^width$} {:^width$}</>", "S", "D", width = COLUMN_WIDTH),
            format!("{} {} {}", "-".repeat(COLUMN_WIDTH), "-".repeat(COLUMN_WIDTH), "-".repeat(30)),
        ];

        let root_start = self.start;

        self.dump_steps(dump, root_start, 1)
    }

    /// Renders this timer as the nested timer of a step at `level - 1`.
    ///
    /// Ends the timer first. Elapsed times are measured from `root_start`.
    pub fn dump_nested(&mut self, root_start: f64, level: usize) -> Vec<String> {
        self.end();

        if self.is_empty() {
            return Vec::new();
        }

        let dump = vec![format!(
            "<info>{}| {} ({}s)</>",
            " ".repeat(MARGIN_WIDTH),
            self.name.to_uppercase(),
            format::total_seconds(self.duration()),
        )];

        self.dump_steps(dump, root_start, level)
    }

    fn dump_steps(&mut self, mut dump: Vec<String>, root_start: f64, level: usize) -> Vec<String> {
        for (_, step) in &mut self.steps {
            dump.extend(step.dump(root_start, level));
        }

        dump
    }
}
