use std::collections::HashMap;

use crate::{
    clock::{Clock, SystemClock},
    Timer,
};

/// Named root timers, owned by whoever creates the registry.
///
/// Asking for a name the first time starts a timer, later requests return
/// that same timer.
#[derive(Debug)]
pub struct Registry<C: Clock = SystemClock> {
    timers: HashMap<String, Timer<C>>,
    order: Vec<String>,
    clock: C,
}

impl Registry<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Registry<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Registry<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            timers: HashMap::new(),
            order: Vec::new(),
            clock,
        }
    }

    /// Returns the timer called `name`, starting it if it does not exist yet
    pub fn timer(&mut self, name: &str) -> &mut Timer<C> {
        if !self.timers.contains_key(name) {
            tracing::debug!(timer = %name, "registering timer");

            self.order.push(name.to_string());
        }

        let clock = &self.clock;

        self.timers
            .entry(name.to_string())
            .or_insert_with(|| Timer::with_clock(name, clock.clone()))
    }

    pub fn get(&self, name: &str) -> Option<&Timer<C>> {
        self.timers.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Timer<C>> {
        self.timers.get_mut(name)
    }

    /// Takes the timer out of the registry, a later request starts a new one
    pub fn remove(&mut self, name: &str) -> Option<Timer<C>> {
        let timer = self.timers.remove(name)?;

        self.order.retain(|registered| registered != name);

        Some(timer)
    }

    /// Names of the registered timers, oldest first
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
