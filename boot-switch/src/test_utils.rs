use std::{cell::RefCell, fs, io};

use crate::{
    console::Console,
    program::{self, Cli},
    shell::{Cmd, Shell, ShellErr},
    switch::Outcome,
    system::{FirmwareProbe, Privilege, System},
};
use bon::bon;
use clap::Parser;
use tempfile::TempDir;

/// Shell that records every command. Listing commands return the configured
/// listing, commands containing one of the `failing` patterns exit with 1,
/// everything else succeeds silently.
#[derive(Debug, Default)]
pub struct FakeShell {
    listing: String,
    failing: Vec<String>,
    calls: RefCell<Vec<Cmd>>,
}

impl FakeShell {
    fn is_listing(cmd: &Cmd) -> bool {
        let line = cmd.to_string();
        line == "efibootmgr" || line == "bcdedit /enum firmware"
    }

    pub fn take_calls(&self) -> Vec<String> {
        self.calls.take().iter().map(ToString::to_string).collect()
    }
}

impl Shell for FakeShell {
    fn run(&self, cmd: &Cmd) -> Result<String, ShellErr> {
        self.calls.borrow_mut().push(cmd.clone());

        let line = cmd.to_string();
        if self.failing.iter().any(|pattern| line.contains(pattern)) {
            return Err(ShellErr::Status {
                cmd: cmd.clone(),
                status: "exit status: 1".to_owned(),
                stderr: "simulated failure".to_owned(),
            });
        }

        if Self::is_listing(cmd) {
            Ok(self.listing.clone())
        } else {
            Ok(String::new())
        }
    }
}

/// Console with a fixed answer that keeps everything it printed.
#[derive(Debug, Default)]
pub struct FakeConsole {
    pub answer: bool,
    pub prompts: Vec<String>,
    pub lines: Vec<String>,
}

impl Console for FakeConsole {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.prompts.push(question.to_owned());
        Ok(self.answer)
    }

    fn say(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }
}

/// Result of [`Fixture::run`].
#[derive(Debug)]
pub struct Run {
    pub outcome: Outcome,
    /// Every command handed to the shell, in order.
    pub calls: Vec<String>,
    pub console: FakeConsole,
}

impl Run {
    /// Whether any printed line contains `needle`.
    pub fn printed(&self, needle: &str) -> bool {
        self.console.lines.iter().any(|line| line.contains(needle))
    }

    /// Calls that change boot configuration: no listing, probing or reboot.
    pub fn mutations(&self) -> Vec<&str> {
        self.calls
            .iter()
            .map(String::as_str)
            .filter(|call| {
                call.contains("efibootmgr -")
                    || call.contains("bcdedit /set")
                    || call.contains("grub-reboot")
            })
            .collect()
    }
}

/// A fake machine. Legacy BIOS unless `uefi` is set.
pub struct Fixture {
    _rootfs: TempDir,
    pub system: System,
    pub shell: FakeShell,
    answer: bool,
}

#[bon]
impl Fixture {
    #[builder]
    pub fn new(
        #[builder(finish_fn)] os: &'static str,
        #[builder(default)] uefi: bool,
        #[builder(default = Privilege::Sudo)] privilege: Privilege,
        #[builder(default, into)] listing: String,
        #[builder(default)] failing: Vec<&'static str>,
        #[builder(default = true)] answer: bool,
    ) -> Fixture {
        let rootfs = TempDir::new_in("/tmp").unwrap();
        if uefi {
            fs::create_dir_all(rootfs.path().join("sys/firmware/efi")).unwrap();
        }

        let system = System {
            os: os.to_owned(),
            privilege,
            firmware: FirmwareProbe::from_rootfs(&rootfs),
        };
        let shell = FakeShell {
            listing,
            failing: failing.into_iter().map(str::to_owned).collect(),
            calls: RefCell::default(),
        };

        Self {
            _rootfs: rootfs,
            system,
            shell,
            answer,
        }
    }

    /// Runs the tool with `args` as if typed after `boot-switch`.
    pub fn run(&self, args: &str) -> color_eyre::Result<Run> {
        let mut argv = vec!["boot-switch"];
        argv.extend(args.split_whitespace());
        let cli = Cli::try_parse_from(&argv)?;

        let mut console = FakeConsole {
            answer: self.answer,
            ..FakeConsole::default()
        };
        let outcome = program::run(self.system.clone(), cli, &self.shell, &mut console);

        Ok(Run {
            outcome,
            calls: self.shell.take_calls(),
            console,
        })
    }
}
