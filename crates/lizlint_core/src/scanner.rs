//! Runs the external scanner.
//!
//! The scanner is run to completion and its output buffered; callers on an
//! async runtime should run [`Scanner::run`] on a blocking thread.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use crate::LizlintError;

/// Buffered output of one scanner run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if the process was killed.
    pub exit_code: Option<i32>,
}

impl ScanOutput {
    /// Last non-empty line of standard error.
    ///
    /// Python tracebacks end with the exception message, which is the only
    /// part worth showing to the operator.
    pub fn exception_message(&self) -> Option<&str> {
        self.stderr
            .lines()
            .map(str::trim)
            .rev()
            .find(|line| !line.is_empty())
    }
}

/// Invokes the scanner executable.
#[derive(Debug, Clone)]
pub struct Scanner {
    executable: String,
    working_dir: Option<PathBuf>,
}

impl Scanner {
    /// Creates a scanner for the given executable.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            working_dir: None,
        }
    }

    /// Sets the directory the scanner runs in.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Runs the scanner and waits for it to exit.
    ///
    /// A non-zero exit code is not an error: Lizard exits with 1 whenever it
    /// reports warnings.
    pub fn run(&self, args: &[String]) -> Result<ScanOutput, LizlintError> {
        info!("> {} {}", self.executable, args.join(" "));

        let mut command = Command::new(&self.executable);
        command.args(args);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| LizlintError::Spawn {
            executable: self.executable.clone(),
            source,
        })?;

        let exit_code = output.status.code();
        if exit_code.is_none() {
            return Err(LizlintError::Terminated {
                executable: self.executable.clone(),
            });
        }

        let output = ScanOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
        };
        debug!("{} exited with {:?}", self.executable, output.exit_code);
        debug!("{}", output.stdout);

        Ok(output)
    }
}
