use boot_switch::{
    console::Terminal,
    program::{self, Cli},
    shell::Host,
    system::System,
    telemetry,
};

use clap::Parser;
use color_eyre::eyre::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    telemetry::init(cli.verbose());

    let outcome = program::run(System::detect(), cli, &Host, &mut Terminal);

    Ok(ExitCode::from(outcome.exit_code()))
}
