use clap::Parser;

use crate::{
    console::Console,
    shell::Shell,
    switch::{Options, Outcome, Switcher},
    system::System,
};

#[derive(Parser, Debug)]
#[command(
    name = "boot-switch",
    author,
    version,
    about = "Reboot into the other OS of a dual-boot setup.",
    long_about = "This tool reboots the system into the other OS in a dual-boot setup. \
        By default only the next boot is changed, use --persist to change the \
        default boot order.\n\n\
        Note: This program requires administrative privileges \
        (sudo on Linux, Administrator on Windows)."
)]
pub struct Cli {
    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", env = "BOOT_SWITCH_YES")]
    yes: bool,
    /// Make the boot selection persistent (changes the default boot order).
    #[arg(short = 'p', long = "persist", env = "BOOT_SWITCH_PERSIST")]
    persist: bool,
    /// Show the raw boot manager output and boot order details.
    #[arg(short = 'v', long = "verbose", env = "BOOT_SWITCH_VERBOSE")]
    verbose: bool,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn options(&self) -> Options {
        Options {
            persist: self.persist,
            skip_confirm: self.yes,
            verbose: self.verbose,
        }
    }
}

pub fn run<S, C>(system: System, cli: Cli, shell: &S, console: &mut C) -> Outcome
where
    S: Shell + ?Sized,
    C: Console + ?Sized,
{
    Switcher::builder()
        .system(system)
        .options(cli.options())
        .build()
        .run(shell, console)
}
