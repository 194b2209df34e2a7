//! Running external programs.

use std::{fmt, io, process::Command};
use tracing::{debug, instrument};

use crate::system::Privilege;

/// A program invocation. Displays as the line a user would type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    pub program: String,
    pub args: Vec<String>,
}

impl Cmd {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Wraps the command in `sudo` unless we already run elevated.
    pub fn elevated(self, privilege: Privilege) -> Self {
        match privilege {
            Privilege::Root => self,
            Privilege::Sudo => {
                let mut args = Vec::with_capacity(self.args.len() + 1);
                args.push(self.program);
                args.extend(self.args);
                Self {
                    program: "sudo".to_owned(),
                    args,
                }
            }
        }
    }

    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ShellErr {
    #[error("failed to run `{cmd}`: {source}")]
    Spawn {
        cmd: Cmd,
        #[source]
        source: io::Error,
    },
    #[error("`{cmd}` exited with {status}: {stderr}")]
    Status {
        cmd: Cmd,
        status: String,
        stderr: String,
    },
}

impl ShellErr {
    pub fn cmd(&self) -> &Cmd {
        match self {
            Self::Spawn { cmd, .. } | Self::Status { cmd, .. } => cmd,
        }
    }
}

/// Runs a command to completion and hands back its stdout.
#[cfg_attr(test, mockall::automock)]
pub trait Shell {
    fn run(&self, cmd: &Cmd) -> Result<String, ShellErr>;
}

/// The real thing, backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Host;

impl Shell for Host {
    #[instrument(skip_all, fields(cmd = %cmd))]
    fn run(&self, cmd: &Cmd) -> Result<String, ShellErr> {
        let output = Command::new(&cmd.program)
            .args(&cmd.args)
            .output()
            .map_err(|source| ShellErr::Spawn {
                cmd: cmd.clone(),
                source,
            })?;

        debug!(status = %output.status, "command finished");
        if !output.status.success() {
            return Err(ShellErr::Status {
                cmd: cmd.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
