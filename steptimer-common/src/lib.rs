pub mod output;

use std::{fmt, str::FromStr};

pub use color_eyre::{
    eyre::{bail, eyre as err, Context, Report},
    install,
};

pub use output::{LogFormat, OutputStyle};

/// Name of the root timer when none is configured
pub const DEFAULT_NAME: &str = "ROOT";

/// Shell used to run commands when none is configured
pub const DEFAULT_SHELL: &str = "sh";

#[twelf::config]
pub struct Conf {
    /// Name of the root timer
    pub name: Option<String>,

    /// Shell used to run each command, invoked as `<shell> -c <command>`
    pub shell: Option<String>,

    /// Report style, `console` keeps markup tags and `plain` strips them
    pub style: Option<String>,

    /// Log output, `fmt` for flat lines and `tree` for nested spans
    pub log_format: Option<String>,
}

impl Conf {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    pub fn shell(&self) -> &str {
        self.shell.as_deref().unwrap_or(DEFAULT_SHELL)
    }

    pub fn style(&self) -> Result<OutputStyle, Report> {
        setting("style", self.style.as_deref())
    }

    pub fn log_format(&self) -> Result<LogFormat, Report> {
        setting("log_format", self.log_format.as_deref())
    }
}

fn setting<T>(key: &str, value: Option<&str>) -> Result<T, Report>
where
    T: FromStr<Err = Report> + Default + fmt::Debug,
{
    match value {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid `{}` setting", key)),
        None => {
            let default = T::default();

            tracing::debug!(setting = %key, default = ?default, "setting not configured, using default");

            Ok(default)
        }
    }
}
