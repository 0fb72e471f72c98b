use std::str::FromStr;

use crate::{err, Report};

/// How the timing report is written out
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputStyle {
    /// Lines as rendered, console markup tags included
    #[default]
    Console,
    /// Lines with the markup tags removed
    Plain,
}

impl FromStr for OutputStyle {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "plain" => Ok(Self::Plain),
            other => Err(err!("unknown output style `{}`, expected `console` or `plain`", other)),
        }
    }
}

/// How log events are formatted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Fmt,
    Tree,
}

impl FromStr for LogFormat {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fmt" => Ok(Self::Fmt),
            "tree" => Ok(Self::Tree),
            other => Err(err!("unknown log format `{}`, expected `fmt` or `tree`", other)),
        }
    }
}
