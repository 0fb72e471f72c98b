//! Property-based tests for the timer tree lifecycle.

use proptest::prelude::*;
use steptimer_profiler::{ManualClock, Timer};

/// Strategy for step labels, empty labels included.
fn label() -> impl Strategy<Value = String> {
    "[a-z ]{0,12}"
}

/// Strategy for the time elapsed between two calls.
fn gap() -> impl Strategy<Value = f64> {
    0.001f64..10.0
}

fn timer(clock: &ManualClock) -> Timer<ManualClock> {
    Timer::with_clock("ROOT", clock.clone())
}

proptest! {
    /// Property: steps keep the count and order of `add_step` calls.
    #[test]
    fn prop_steps_follow_call_order(labels in prop::collection::vec(label(), 0..20)) {
        let clock = ManualClock::new(0.0);
        let mut timer = timer(&clock);

        for label in &labels {
            timer.add_step(label.as_str());
            clock.advance(0.5);
        }

        prop_assert_eq!(timer.len(), labels.len());
        prop_assert_eq!(timer.is_empty(), labels.is_empty());

        let rendered: Vec<String> = timer.steps().map(|(_, step)| step.label().to_string()).collect();
        prop_assert_eq!(rendered, labels);
    }

    /// Property: only the last step is still running after any sequence of `add_step`.
    #[test]
    fn prop_add_step_closes_the_previous_step(gaps in prop::collection::vec(gap(), 1..20)) {
        let clock = ManualClock::new(0.0);
        let mut timer = timer(&clock);

        for (index, gap) in gaps.iter().enumerate() {
            timer.add_step(format!("step {}", index));
            clock.advance(*gap);
        }

        let steps: Vec<_> = timer.steps().map(|(_, step)| step).collect();
        let (last, closed) = steps.split_last().unwrap();

        prop_assert!(!last.is_ended());
        for (step, next) in closed.iter().zip(steps.iter().skip(1)) {
            prop_assert!(step.is_ended());
            prop_assert_eq!(step.end_time(), Some(next.start()));
        }
    }

    /// Property: ids are unique within a timer, even across resets.
    #[test]
    fn prop_ids_are_never_reused(counts in prop::collection::vec(1usize..6, 1..5)) {
        let clock = ManualClock::new(0.0);
        let mut timer = timer(&clock);
        let mut seen = Vec::new();

        for count in counts {
            for _ in 0..count {
                timer.add_step("step");
            }

            seen.extend(timer.steps().map(|(id, _)| id));

            timer.reset();
        }

        let mut sorted = seen.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), seen.len());
    }

    /// Property: a second `end` never moves the end time.
    #[test]
    fn prop_end_is_idempotent(steps in 0usize..5, first in gap(), second in gap()) {
        let clock = ManualClock::new(0.0);
        let mut timer = timer(&clock);

        for _ in 0..steps {
            timer.add_step("step");
        }

        clock.advance(first);
        timer.end();
        let end = timer.end_time();

        clock.advance(second);
        timer.end();

        prop_assert!(end.is_some());
        prop_assert_eq!(timer.end_time(), end);
        prop_assert_eq!(timer.duration(), end.unwrap() - timer.start());
    }

    /// Property: duration grows while running and freezes once ended.
    #[test]
    fn prop_duration_grows_until_end(gaps in prop::collection::vec(gap(), 1..10)) {
        let clock = ManualClock::new(0.0);
        let mut timer = timer(&clock);
        timer.add_step("step");

        let mut previous = timer.duration();
        for gap in &gaps {
            clock.advance(*gap);

            let current = timer.duration();
            prop_assert!(current > previous);
            previous = current;
        }

        timer.end();
        clock.advance(1.0);

        prop_assert_eq!(timer.duration(), previous);
        prop_assert_eq!(timer.current_step().unwrap().duration(), previous);
    }

    /// Property: a nested timer survives the end of its step only if it received a step.
    #[test]
    fn prop_empty_nested_timers_are_suppressed(inner_steps in 0usize..4) {
        let clock = ManualClock::new(0.0);
        let mut timer = timer(&clock);

        timer.add_step("x");
        let inner = timer.open_timer("inner").unwrap();
        for index in 0..inner_steps {
            clock.advance(0.5);
            inner.add_step(format!("y{}", index));
        }
        clock.advance(0.5);
        timer.end();

        let step = timer.current_step().unwrap();
        prop_assert_eq!(step.timer().is_some(), inner_steps > 0);

        let dump = timer.dump();
        let title = dump.iter().any(|line| line.contains("| INNER ("));
        prop_assert_eq!(title, inner_steps > 0);

        // header, the step line, then the title and one line per nested step
        let expected = if inner_steps > 0 { 5 + 1 + 1 + inner_steps } else { 5 + 1 };
        prop_assert_eq!(dump.len(), expected);
    }

    /// Property: the step average is the mean of the step durations.
    #[test]
    fn prop_step_average_is_the_mean(gaps in prop::collection::vec(gap(), 2..10)) {
        let clock = ManualClock::new(0.0);
        let mut timer = timer(&clock);

        for gap in &gaps {
            timer.add_step("step");
            clock.advance(*gap);
        }

        let average = timer.step_average();
        let expected = gaps.iter().sum::<f64>() / gaps.len() as f64;

        prop_assert!(timer.is_ended());
        prop_assert!((average - expected).abs() < 1e-6, "average {} expected {}", average, expected);
    }
}

#[test]
fn load_then_render_scenario() {
    let clock = ManualClock::new(0.0);
    let mut timer = Timer::with_clock("ROOT", clock.clone());

    timer.add_step("load");
    timer.add_message("cache miss").unwrap();
    clock.advance(0.5);
    timer.add_step("render");
    clock.advance(0.5);
    timer.end();

    let dump = timer.dump();

    assert_eq!(dump.len(), 5 + 3);
    assert_eq!(dump[1], "<info>Total: 1.000s</>");
    assert!(dump[5].ends_with("] load"));
    assert!(dump[6].trim_start().starts_with("+ cache miss"));
    assert!(dump[7].ends_with("] render"));
}

#[test]
fn add_message_before_any_step_fails() {
    let mut timer = Timer::create("ROOT");

    let error = timer.add_message("too early").unwrap_err();

    assert_eq!(error.timer, "ROOT");
    assert!(timer.is_empty());
}
