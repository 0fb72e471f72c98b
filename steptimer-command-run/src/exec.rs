use std::process::Stdio;

use steptimer_common::{Context as _, Report};
use tokio::process::Command;

/// Result of running one command
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stderr: String,
}

impl Outcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Short status shown next to the step label
    pub fn info(&self) -> String {
        match self.code {
            Some(code) => format!("exit {}", code),
            None => "exit signal".to_string(),
        }
    }

    pub fn last_error_line(&self) -> Option<&str> {
        self.stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
    }
}

/// Runs `command` through `shell -c`, letting its stdout through and capturing stderr
#[tracing::instrument(err)]
pub async fn execute(shell: &str, command: &str) -> Result<Outcome, Report> {
    tracing::info!("running command");

    let output = Command::new(shell)
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("unable to start `{}` with shell `{}`", command, shell))?;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    for line in stderr.lines() {
        tracing::debug!(line = %line, "stderr");
    }

    Ok(Outcome {
        code: output.status.code(),
        stderr,
    })
}
