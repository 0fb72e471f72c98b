use crate::{
    clock::{Clock, SystemClock},
    format::{self, LABEL_WIDTH, MARGIN_WIDTH, TIME_WIDTH},
    Timer,
};

/// A labeled interval of a [`Timer`].
///
/// A step may own one nested timer, used to time sub-operations, and any
/// number of free-text messages.
#[derive(Debug)]
pub struct Step<C: Clock = SystemClock> {
    label: String,
    info: Option<String>,
    start: f64,
    end: Option<f64>,
    timer: Option<Box<Timer<C>>>,
    messages: Vec<String>,
    clock: C,
}

impl Step<SystemClock> {
    pub fn create(label: impl Into<String>) -> Self {
        Self::with_clock(label, SystemClock)
    }
}

impl<C: Clock> Step<C> {
    /// Starts a step now, as given by `clock`
    pub fn with_clock(label: impl Into<String>, clock: C) -> Self {
        Self {
            label: label.into(),
            info: None,
            start: clock.now(),
            end: None,
            timer: None,
            messages: Vec::new(),
            clock,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end_time(&self) -> Option<f64> {
        self.end
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn timer(&self) -> Option<&Timer<C>> {
        self.timer.as_deref()
    }

    pub fn timer_mut(&mut self) -> Option<&mut Timer<C>> {
        self.timer.as_deref_mut()
    }

    /// Attaches a nested timer, replacing any previous one
    pub fn set_timer(&mut self, timer: Timer<C>) -> &mut Self {
        self.insert_timer(timer);
        self
    }

    pub(crate) fn insert_timer(&mut self, timer: Timer<C>) -> &mut Timer<C> {
        self.timer.insert(Box::new(timer))
    }

    pub fn set_info(&mut self, info: impl Into<String>) -> &mut Self {
        self.info = Some(info.into());
        self
    }

    pub fn add_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.messages.push(message.into());
        self
    }

    pub fn is_ended(&self) -> bool {
        self.end.is_some()
    }

    /// Closes the step.
    ///
    /// The nested timer, if any, is ended first and dropped when it never
    /// received a step. Calling this on an ended step does nothing.
    pub fn end(&mut self) -> &mut Self {
        if self.end.is_some() {
            return self;
        }

        if let Some(timer) = self.timer.as_deref_mut() {
            timer.end();

            if timer.is_empty() {
                tracing::debug!(step = %self.label, timer = %timer.name(), "discarding empty nested timer");

                self.timer = None;
            }
        }

        let end = self.clock.now();
        self.end = Some(end);

        tracing::trace!(step = %self.label, duration = end - self.start, "step closed");

        self
    }

    /// Seconds between start and end, or now while the step is running
    pub fn duration(&self) -> f64 {
        self.end.unwrap_or_else(|| self.clock.now()) - self.start
    }

    /// Renders this step's line, its messages and its nested timer, if any.
    ///
    /// An empty nested timer renders nothing and leaves the duration shown.
    ///
    /// `root_start` is the start of the outermost timer and `level` the
    /// nesting depth, starting at 1.
    pub fn dump(&mut self, root_start: f64, level: usize) -> Vec<String> {
        let indent = if level < 2 {
            String::new()
        } else {
            format!("|{}", "-".repeat(level - 1))
        };

        let elapsed = format::seconds(self.start - root_start);

        let label = match &self.info {
            Some(info) => format!("{:<width$} - {}", self.label, info, width = LABEL_WIDTH),
            None => self.label.clone(),
        };

        let nested = self.timer.as_deref().map_or(false, |timer| !timer.is_empty());

        let duration = if nested {
            " ".repeat(format::TIME_DECIMALS + 7)
        } else {
            format!("[{:>width$}]", format::seconds(self.duration()), width = TIME_WIDTH)
        };

        let mut dump = Vec::with_capacity(1 + self.messages.len());

        dump.push(format!(
            "[{:>width$}] {} {}{}",
            elapsed,
            duration,
            if indent.is_empty() { String::new() } else { format!("{} ", indent) },
            label,
            width = TIME_WIDTH,
        ));

        for message in &self.messages {
            dump.push(format!("{}{}+ {}", " ".repeat(MARGIN_WIDTH), indent, message));
        }

        if let Some(timer) = self.timer.as_deref_mut() {
            dump.extend(timer.dump_nested(root_start, level + 1));
        }

        dump
    }
}
