//! Logging setup.
//!
//! Interactive runs log compactly to stderr so diagnostics never interleave
//! with the prompts on stdout. Without a terminal (systemd units, scripts)
//! logs go to journald on Linux.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{prelude::*, EnvFilter};

#[cfg(target_os = "linux")]
const SYSLOG_IDENTIFIER: &str = "boot-switch";

fn filter(verbose: bool) -> EnvFilter {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

#[cfg(target_os = "linux")]
fn try_init_journal(verbose: bool) -> color_eyre::Result<()> {
    use color_eyre::eyre::WrapErr as _;

    let journal = tracing_journald::layer()
        .wrap_err("failed to initialize journald logger")?
        .with_syslog_identifier(SYSLOG_IDENTIFIER.to_owned())
        .with_filter(filter(verbose));
    tracing_subscriber::registry().with(journal).try_init()?;

    Ok(())
}

fn try_init_stderr_logger(verbose: bool) -> color_eyre::Result<()> {
    let stderr_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(filter(verbose));
    tracing_subscriber::registry().with(stderr_log).try_init()?;

    Ok(())
}

/// Initializes the global subscriber. Failures are reported, never fatal.
pub fn init(verbose: bool) {
    use std::io::IsTerminal as _;

    let istty = std::io::stdin().is_terminal();

    #[cfg(target_os = "linux")]
    if !istty {
        match try_init_journal(verbose) {
            Ok(()) => return,
            Err(err) => eprintln!("failed to set up journald logging: {err}"),
        }
    }
    #[cfg(not(target_os = "linux"))]
    let _ = istty;

    if let Err(err) = try_init_stderr_logger(verbose) {
        eprintln!("failed to set up logging: {err}");
    }
}
