use super::{ProbeError, ProbeReading, StatusProbe, interpret_output};
use core::time::Duration;
use std::process::Stdio;
use tokio::process::Command;

const LOG_TARGET: &str = "     probe";

/// Default upper bound on a single status command invocation.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_mins(5);

#[cfg(not(windows))]
const SHELL: (&str, &str) = ("sh", "-c");

#[cfg(windows)]
const SHELL: (&str, &str) = ("cmd", "/C");

/// Runs status commands through the system shell.
#[derive(Debug, Clone, Copy)]
pub struct CommandProbe {
    timeout: Duration,
}

impl CommandProbe {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn run(&self, command: &str) -> Result<ProbeReading, ProbeError> {
        let (shell, flag) = SHELL;
        let child = Command::new(shell)
            .arg(flag)
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProbeError::invocation(format!("could not spawn '{shell}': {e}"), ""))?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(ProbeError::invocation(format!("could not collect output: {e}"), "")),
            Err(_) => {
                return Err(ProbeError::invocation(
                    format!("timed out after {}", humantime::format_duration(self.timeout)),
                    "",
                ));
            }
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        log::trace!(target: LOG_TARGET, "'{command}' exited with {}: {}", output.status, combined.trim());

        interpret_output(output.status.success(), &output.status.to_string(), &combined)
    }
}

impl Default for CommandProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl StatusProbe for CommandProbe {
    async fn probe(&self, command: &str) -> Result<ProbeReading, ProbeError> {
        self.run(command).await
    }
}
