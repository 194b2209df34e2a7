//! Reboots a dual-boot machine into the other operating system.
//!
//! The running OS decides the target: Linux switches to Windows and Windows
//! switches to Linux. The boot manager listing is parsed ([`parser`]), the
//! target's entry is picked ([`select`]), a one-time or persistent
//! [`plan::BootDirective`] is computed ([`plan`]) and written through the
//! platform's tool ([`driver`]). Then the machine reboots. [`switch`] ties
//! the steps together.

#![allow(clippy::missing_errors_doc)]

use crate::{
    entry::TargetOs,
    shell::{Cmd, ShellErr},
};

pub mod console;
pub mod driver;
pub mod entry;
pub mod parser;
pub mod plan;
pub mod program;
pub mod select;
pub mod shell;
pub mod switch;
pub mod system;
pub mod telemetry;
pub mod test_utils;

/// Everything that can stop a switch. See [`Error::manual_hint`] for what
/// the user is told to do about it.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unsupported OS: {0}")]
    UnsupportedPlatform(String),
    #[error("error listing boot entries: {source}")]
    EnumerationFailed {
        source: ShellErr,
        hint: &'static str,
    },
    #[error("could not find {target} boot entry automatically")]
    EntryNotFound { target: TargetOs, list_cmd: Cmd },
    #[error("error setting the boot entry: {source}")]
    MutationFailed { source: ShellErr, manual: Cmd },
    #[error("error rebooting: {source}")]
    RebootFailed { source: ShellErr },
}

impl Error {
    /// Actionable next steps, one per line.
    pub fn manual_hint(&self) -> Vec<String> {
        match self {
            Error::UnsupportedPlatform(_) => {
                vec!["Only Linux and Windows dual-boot setups are supported.".to_owned()]
            }
            Error::EnumerationFailed { source, hint } => vec![
                (*hint).to_owned(),
                format!(
                    "You may need to configure the boot entry manually, start with: {}",
                    source.cmd()
                ),
            ],
            Error::EntryNotFound { list_cmd, .. } => vec![format!(
                "Please run '{list_cmd}' to see available boot options."
            )],
            Error::MutationFailed { manual, .. } => {
                vec![format!("You may need to run: {manual}")]
            }
            Error::RebootFailed { source } => vec![
                "The boot entry was set successfully, only the reboot failed.".to_owned(),
                format!("You can manually reboot with: {}", source.cmd()),
            ],
        }
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::UnsupportedPlatform(_) => 1,
            _ => 0,
        }
    }
}
