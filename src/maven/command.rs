//! Builder for running the `mvn` executable.

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::core::PomError;

/// Name of the Maven launcher on this platform.
#[must_use]
pub const fn maven_executable() -> &'static str {
    if cfg!(windows) { "mvn.cmd" } else { "mvn" }
}

/// A single `mvn` invocation.
///
/// By default Maven's output reaches the terminal on stderr, leaving stdout to
/// the command's own results; [`MavenCommand::capture_output`] switches to
/// piped output.
#[derive(Debug, Clone)]
pub struct MavenCommand {
    program: Option<PathBuf>,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    capture_output: bool,
    timeout_duration: Option<Duration>,
}

impl Default for MavenCommand {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            current_dir: None,
            capture_output: false,
            timeout_duration: Some(crate::constants::EFFECTIVE_POM_TIMEOUT),
        }
    }
}

/// Exit status and captured output of a finished command.
#[derive(Debug, Clone)]
pub struct MavenOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl MavenOutput {
    /// Last `max_lines` non-blank lines of stdout followed by those of stderr.
    ///
    /// Maven prints its `[ERROR]` lines on stdout, so both streams matter.
    #[must_use]
    pub fn tail(&self, max_lines: usize) -> String {
        let last = |text: &str| {
            let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
            lines[lines.len().saturating_sub(max_lines)..].join("\n")
        };
        [last(&self.stdout), last(&self.stderr)]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl MavenCommand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific executable instead of looking `mvn` up on the PATH.
    #[must_use]
    pub fn program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = Some(program.into());
        self
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub const fn capture_output(mut self) -> Self {
        self.capture_output = true;
        self
    }

    /// Set a custom timeout (None for no timeout).
    #[must_use]
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    fn resolve_program(&self) -> Result<PathBuf, PomError> {
        match &self.program {
            Some(program) => Ok(program.clone()),
            None => which::which(maven_executable()).map_err(|_| PomError::MavenNotFound),
        }
    }

    /// Run the command. A non-zero exit is reported in [`MavenOutput::success`].
    pub async fn execute(self) -> Result<MavenOutput, PomError> {
        let program = self.resolve_program()?;
        let directory = self
            .current_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let failed = |reason: String| PomError::EffectiveDescriptorFailed {
            directory: directory.display().to_string(),
            reason,
        };

        let mut cmd = Command::new(&program);
        cmd.args(&self.args).current_dir(&directory).kill_on_drop(true);
        if self.capture_output {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            // Maven's progress goes to stderr; stdout carries command results
            cmd.stdout(Stdio::from(std::io::stderr())).stderr(Stdio::inherit());
        }
        tracing::debug!(
            target: "maven",
            "Executing command: {} {} (in {})",
            program.display(),
            self.args.join(" "),
            directory.display()
        );

        let mut child = cmd
            .spawn()
            .map_err(|e| failed(format!("failed to start {}: {e}", program.display())))?;
        let capture = self.capture_output;
        let run = async move {
            if capture {
                child.wait_with_output().await
            } else {
                child.wait().await.map(|status| Output {
                    status,
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                })
            }
        };
        let output = match self.timeout_duration {
            Some(duration) => timeout(duration, run)
                .await
                .map_err(|_| failed(format!("timed out after {}s", duration.as_secs())))?,
            None => run.await,
        }
        .map_err(|e| failed(format!("failed while waiting for {}: {e}", program.display())))?;

        let result = MavenOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if result.success {
            tracing::trace!(target: "maven", "Command completed successfully");
        } else {
            tracing::debug!(target: "maven", "Command exited with {}", output.status);
        }
        Ok(result)
    }
}
