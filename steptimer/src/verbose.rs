//! `-v`/`-q` counting flags mapped onto a tracing level filter, in the spirit of clap-verbosity-flag

use tracing::{level_filters::LevelFilter, Level};

/// Level used when neither flag is given
const DEFAULT_LEVEL: Level = Level::WARN;

#[derive(clap::Args, Debug, Clone)]
pub struct Verbosity {
    #[clap(
        long,
        short = 'v',
        parse(from_occurrences),
        global = true,
        help = "Log more per occurrence"
    )]
    verbose: i8,

    #[clap(
        long,
        short = 'q',
        parse(from_occurrences),
        global = true,
        help = "Log less per occurrence",
        conflicts_with = "verbose"
    )]
    quiet: i8,
}

impl Verbosity {
    pub fn log_level_filter(&self) -> LevelFilter {
        let verbosity = level_value(DEFAULT_LEVEL)
            .saturating_sub(self.quiet)
            .saturating_add(self.verbose);

        level_for(verbosity)
            .map(LevelFilter::from_level)
            .unwrap_or(LevelFilter::OFF)
    }
}

fn level_value(level: Level) -> i8 {
    match level {
        Level::ERROR => 0,
        Level::WARN => 1,
        Level::INFO => 2,
        Level::DEBUG => 3,
        Level::TRACE => 4,
    }
}

fn level_for(verbosity: i8) -> Option<Level> {
    match verbosity {
        i8::MIN..=-1 => None,
        0 => Some(Level::ERROR),
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        4..=i8::MAX => Some(Level::TRACE),
    }
}
