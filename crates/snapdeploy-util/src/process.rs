use std::fmt;
use std::process::{Command, ExitStatus};

use crate::errors::DeployError;

/// Program and argument list for one external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Execute the command with inherited stdout/stderr and wait for it to exit.
    pub fn status(&self) -> Result<ExitStatus, DeployError> {
        Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|e| DeployError::Process {
                program: self.program.clone(),
                message: e.to_string(),
            })
    }
}

impl fmt::Display for CommandBuilder {
    /// Renders the command line as it would be typed in a shell (no quoting).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Outcome of running an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// The tool exited with status 0.
    Success,
    /// The tool ran (or could not be applied) and reported failure.
    Failed { code: Option<i32>, reason: String },
    /// The tool was intentionally not run (dry run).
    Skipped,
}

impl ToolStatus {
    /// Translate a process exit status.
    pub fn from_exit(status: ExitStatus) -> Self {
        if status.success() {
            Self::Success
        } else {
            let reason = match status.code() {
                Some(code) => format!("exited with code {code}"),
                None => "terminated by signal".to_string(),
            };
            Self::Failed {
                code: status.code(),
                reason,
            }
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            code: None,
            reason: reason.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("ok"),
            Self::Failed { reason, .. } => f.write_str(reason),
            Self::Skipped => f.write_str("skipped"),
        }
    }
}

/// Seam for running external tools.
///
/// Returns `Err` only when the program could not be started; a tool that
/// ran and exited non-zero is reported as [`ToolStatus::Failed`].
pub trait CommandRunner {
    fn run(&self, cmd: &CommandBuilder) -> Result<ToolStatus, DeployError>;
}

/// Runs commands as real child processes, inheriting stdout/stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &CommandBuilder) -> Result<ToolStatus, DeployError> {
        tracing::debug!("exec: {cmd}");
        let status = cmd.status()?;
        Ok(ToolStatus::from_exit(status))
    }
}
