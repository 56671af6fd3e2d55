//! External process invocation.
//!
//! Everything this tool learns from (or tells) AWS goes through the `aws`
//! command-line client. [`Invoker`] is the single seam for that: production
//! code runs real processes via [`SystemInvoker`], tests substitute a
//! scripted implementation.

use std::process::Command;

use log::debug;

use crate::error::Error;

/// Captured result of one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Output {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Both streams joined, used for failure diagnostics.
    pub fn combined(&self) -> String {
        match (self.stdout.trim(), self.stderr.trim()) {
            ("", err) => err.to_string(),
            (out, "") => out.to_string(),
            (out, err) => format!("{out}\n{err}"),
        }
    }

    fn status(&self) -> String {
        match self.code {
            Some(code) => format!("exit status: {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs an external program to completion.
///
/// Implementations must not retry; whatever the process reports is handed
/// back verbatim.
pub trait Invoker {
    fn invoke(&self, program: &str, args: &[String]) -> std::io::Result<Output>;
}

impl<T: Invoker + ?Sized> Invoker for &T {
    fn invoke(&self, program: &str, args: &[String]) -> std::io::Result<Output> {
        (**self).invoke(program, args)
    }
}

/// Spawns real processes and blocks until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInvoker;

impl Invoker for SystemInvoker {
    fn invoke(&self, program: &str, args: &[String]) -> std::io::Result<Output> {
        let output = Command::new(program).args(args).output()?;
        Ok(Output {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// The AWS CLI bound to a program path and an invoker.
#[derive(Debug, Clone)]
pub struct AwsCli<I> {
    program: String,
    invoker: I,
}

impl<I: Invoker> AwsCli<I> {
    pub fn new(program: impl Into<String>, invoker: I) -> Self {
        Self {
            program: program.into(),
            invoker,
        }
    }

    /// Runs the CLI and returns its stdout on success.
    ///
    /// `operation` names the call in error messages and debug traces; the
    /// arguments themselves are never logged since some carry secrets.
    pub fn run(&self, operation: &'static str, args: &[String]) -> Result<String, Error> {
        debug!("Running {} to {operation}", self.program);

        let output = self
            .invoker
            .invoke(&self.program, args)
            .map_err(|cause| Error::Spawn {
                program: self.program.clone(),
                cause,
            })?;

        if !output.success() {
            return Err(Error::CommandFailed {
                operation,
                status: output.status(),
                output: output.combined(),
            });
        }
        Ok(output.stdout)
    }
}

/// Prefixes `args` with `--profile <name>` when a profile is selected.
pub(crate) fn with_profile(profile: Option<&str>, args: &[&str]) -> Vec<String> {
    profile
        .map(|p| vec!["--profile", p])
        .unwrap_or_default()
        .into_iter()
        .chain(args.iter().copied())
        .map(String::from)
        .collect()
}
