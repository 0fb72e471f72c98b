mod chain;
mod exec;

use std::io::Write as _;

use steptimer_common::{bail, Conf, OutputStyle, Report};
use steptimer_profiler::{strip_markup, Clock, Timer};
use tracing::{Instrument as _, Span};

pub use exec::Outcome;

/// Times each command as a step of a root timer, then prints the report.
///
/// Fails after printing when any command did not exit successfully.
#[tracing::instrument(skip(conf, commands), fields(commands = commands.len()), err)]
pub async fn run(conf: &Conf, commands: &[String]) -> Result<(), Report> {
    let style = conf.style()?;

    let mut timer = Timer::create(conf.name());

    let failures = time_commands(&mut timer, conf.shell(), commands).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for line in timer.dump() {
        writeln!(out, "{}", render_line(style, &line))?;
    }

    out.flush()?;

    if failures > 0 {
        bail!("{} of {} commands failed", failures, commands.len());
    }

    Ok(())
}

/// Runs `commands` one after the other, opening a step on `timer` for each.
///
/// A command made of `&&`-chained parts gets a nested timer with one step per
/// part, and the chain stops at the first failing part. Ends `timer` and
/// returns how many commands failed.
pub async fn time_commands<C: Clock>(
    timer: &mut Timer<C>,
    shell: &str,
    commands: &[String],
) -> Result<usize, Report> {
    let mut failures = 0;

    for (command_index, command) in commands.iter().enumerate() {
        let span = tracing::debug_span!("command", command_index = command_index).or_current();

        timer.add_step(command.as_str());

        let outcome = match chain::split(command).as_slice() {
            [first, rest @ ..] if !rest.is_empty() => {
                let nested = timer.open_timer(chain::CHAIN_TIMER)?;

                let mut outcome = time_part(nested, shell, first, &span).await?;

                for part in rest {
                    if !outcome.success() {
                        break;
                    }

                    outcome = time_part(nested, shell, part, &span).await?;
                }

                timer.set_info(outcome.info())?;

                outcome
            }
            _ => {
                let outcome = exec::execute(shell, command).instrument(span.clone()).await?;
                record(timer, &outcome)?;

                outcome
            }
        };

        if !outcome.success() {
            failures += 1;

            span.in_scope(|| tracing::warn!(command = %command, status = %outcome.info(), "command failed"));
        }
    }

    timer.end();

    Ok(failures)
}

/// Runs one part of a chain as a new step of the chain's timer
async fn time_part<C: Clock>(
    timer: &mut Timer<C>,
    shell: &str,
    part: &str,
    span: &Span,
) -> Result<Outcome, Report> {
    timer.add_step(part);

    let outcome = exec::execute(shell, part).instrument(span.clone()).await?;
    record(timer, &outcome)?;

    Ok(outcome)
}

fn record<C: Clock>(timer: &mut Timer<C>, outcome: &Outcome) -> Result<(), Report> {
    timer.set_info(outcome.info())?;

    if !outcome.success() {
        if let Some(line) = outcome.last_error_line() {
            timer.add_message(line)?;
        }
    }

    Ok(())
}

/// Applies the configured style to one report line
pub fn render_line(style: OutputStyle, line: &str) -> String {
    match style {
        OutputStyle::Console => line.to_string(),
        OutputStyle::Plain => strip_markup(line),
    }
}
