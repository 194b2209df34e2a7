//! The switch from start to reboot.
//!
//! ```text
//! DetectPlatform -> DetectFirmware (Linux) -> ListEntries -> SelectTarget
//!     -> Plan -> Apply -> Reboot -> Done
//! ```
//!
//! The user confirms right after `DetectPlatform`. Legacy BIOS machines skip
//! from firmware detection straight to `Apply` with the `grub-reboot`
//! fallback. Nothing is written before the user confirmed, and nothing
//! reboots unless `Apply` succeeded.
//!
//! Firmware detection and planning cannot fail: the probe falls back to
//! legacy BIOS and a missing boot order falls back to one-time mode. Only the
//! remaining steps show up in [`Step`].

use derive_more::Display;
use tracing::{debug, info, warn};

use crate::{
    console::Console,
    driver::{self, Driver, Platform},
    entry::{HostOs, TargetOs},
    parser::{self, Snapshot},
    plan::{self, BootDirective, Mode, OrderUnavailable},
    select::{self, NotFound},
    shell::{Cmd, Shell},
    system::{FirmwareMode, System},
    Error,
};

/// Where a run can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Step {
    DetectPlatform,
    ListEntries,
    SelectTarget,
    Apply,
    Reboot,
}

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Boot target set and reboot issued.
    Done,
    /// The user declined. Nothing was changed.
    AbortedByUser,
    FailedAt { step: Step, error: Error },
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::FailedAt { error, .. } => error.exit_code(),
            Outcome::Done | Outcome::AbortedByUser => 0,
        }
    }

    pub fn failed_step(&self) -> Option<Step> {
        match self {
            Outcome::FailedAt { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Internal short-circuit for a failed step.
struct Failure {
    step: Step,
    error: Error,
}

impl Failure {
    fn at(step: Step, error: Error) -> Self {
        Self { step, error }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub persist: bool,
    pub skip_confirm: bool,
    pub verbose: bool,
}

impl Options {
    pub fn mode(&self) -> Mode {
        if self.persist {
            Mode::Persistent
        } else {
            Mode::OneTime
        }
    }
}

/// One switch of the boot target. Performs at most one mutation sequence.
#[derive(Debug, bon::Builder)]
pub struct Switcher {
    system: System,
    #[builder(default)]
    options: Options,
}

impl Switcher {
    pub fn run<S, C>(&self, shell: &S, console: &mut C) -> Outcome
    where
        S: Shell + ?Sized,
        C: Console + ?Sized,
    {
        match self.try_run(shell, console) {
            Ok(outcome) => outcome,
            Err(Failure { step, error }) => {
                debug!(%step, %error, "switch failed");
                console.say(&format!("Error: {error}"));
                for line in error.manual_hint() {
                    console.say(&line);
                }
                Outcome::FailedAt { step, error }
            }
        }
    }

    fn try_run<S, C>(&self, shell: &S, console: &mut C) -> Result<Outcome, Failure>
    where
        S: Shell + ?Sized,
        C: Console + ?Sized,
    {
        console.say(&format!("Current OS: {}", self.system.os));
        let host = HostOs::from_name(&self.system.os).ok_or_else(|| {
            Failure::at(
                Step::DetectPlatform,
                Error::UnsupportedPlatform(self.system.os.clone()),
            )
        })?;
        let target = host.other();
        let mode = self.options.mode();
        info!(%host, %target, %mode, privilege = %self.system.privilege, "switching boot target");

        if !self.confirmed(target, mode, console) {
            console.say("Aborted.");
            return Ok(Outcome::AbortedByUser);
        }

        let platform = match host {
            HostOs::Windows => Platform::Bcd,
            HostOs::Linux => {
                self.probe_grub(shell, console);
                let firmware = self.system.firmware.firmware_mode();
                debug!(%firmware, "detected firmware");
                match Platform::for_host(host, firmware) {
                    Some(platform) => {
                        console.say(&format!(
                            "Detected {firmware} system, using {}...",
                            platform.list_cmd()
                        ));
                        platform
                    }
                    None => {
                        self.set_next_grub_entry(shell, console)?;
                        return self.reboot(host, shell, console);
                    }
                }
            }
        };

        self.set_boot_target(platform, target, shell, console)?;
        self.reboot(host, shell, console)
    }

    fn confirmed<C: Console + ?Sized>(
        &self,
        target: TargetOs,
        mode: Mode,
        console: &mut C,
    ) -> bool {
        console.say(&format!("Preparing to reboot to {target}..."));
        console.say("");
        console.say("This will:");
        match mode {
            Mode::Persistent => console.say(&format!(
                "1. Set {target} as the DEFAULT boot entry (permanent change)"
            )),
            Mode::OneTime => console.say(&format!(
                "1. Set the next boot entry to {target} (one-time)"
            )),
        }
        console.say("2. Reboot the system");
        console.say("");

        if self.options.skip_confirm {
            return true;
        }

        console.confirm("Do you want to continue?").unwrap_or_else(|error| {
            warn!(%error, "failed to read confirmation, treating as no");
            false
        })
    }

    /// Informational only, GRUB may not even be installed.
    fn probe_grub<S, C>(&self, shell: &S, console: &mut C)
    where
        S: Shell + ?Sized,
        C: Console + ?Sized,
    {
        console.say("Searching for Windows boot entry...");
        match shell.run(&driver::grub_probe_cmd(self.system.privilege)) {
            Ok(_) => console.say("Windows entry found in GRUB configuration."),
            Err(error) => {
                debug!(%error, "grub probe failed");
                console.say("Note: Could not automatically detect Windows entry.");
                console.say("You may need to manually configure the boot entry.");
            }
        }
    }

    /// Legacy BIOS fallback. There is no listing to parse, so this is a
    /// single best-effort `grub-reboot Windows`.
    fn set_next_grub_entry<S, C>(&self, shell: &S, console: &mut C) -> Result<(), Failure>
    where
        S: Shell + ?Sized,
        C: Console + ?Sized,
    {
        console.say(&format!(
            "Detected {} system, using grub-reboot...",
            FirmwareMode::LegacyBios
        ));
        if self.options.persist {
            console.say("Persistent mode is not available here, setting the next boot only.");
        }
        console.say("Note: You may need to manually specify the Windows menu entry number.");
        console.say("Run 'sudo grep menuentry /boot/grub/grub.cfg' to see available entries.");

        shell
            .run(&driver::grub_reboot_cmd(self.system.privilege))
            .map_err(|source| {
                let manual = Cmd::new("grub-reboot", ["<entry_name_or_number>"])
                    .elevated(self.system.privilege);
                Failure::at(Step::Apply, Error::MutationFailed { source, manual })
            })?;

        console.say(&format!(
            "Successfully set next boot to {}!",
            driver::GRUB_WINDOWS_ENTRY
        ));
        Ok(())
    }

    fn set_boot_target<S, C>(
        &self,
        platform: Platform,
        target: TargetOs,
        shell: &S,
        console: &mut C,
    ) -> Result<(), Failure>
    where
        S: Shell + ?Sized,
        C: Console + ?Sized,
    {
        let verbose = self.options.verbose;
        let driver = Driver::new(platform, self.system.privilege, shell);

        console.say(&format!("Attempting to set {target} as next boot entry..."));
        let raw = driver.list_entries().map_err(|source| {
            Failure::at(
                Step::ListEntries,
                Error::EnumerationFailed {
                    source,
                    hint: platform.list_hint(),
                },
            )
        })?;
        if verbose {
            console.say("Current boot configuration:");
            console.say(raw.trim_end());
        }

        let Snapshot {
            entries,
            order,
            current,
            next,
        } = parser::parse(platform.dialect(), &raw);
        debug!(entries = entries.len(), ?order, "parsed boot manager listing");
        if verbose {
            if let Some(current) = &current {
                console.say(&format!("Current boot entry: {current}"));
            }
            if let Some(next) = &next {
                console.say(&format!("Pending next boot entry: {next}"));
            }
            if let Some(order) = &order {
                console.say(&format!("Current boot order: {}", order.joined()));
            }
        }

        let selection = select::select(entries, target).map_err(|NotFound(target)| {
            Failure::at(
                Step::SelectTarget,
                Error::EntryNotFound {
                    target,
                    list_cmd: platform.list_cmd(),
                },
            )
        })?;
        let entry = selection.entry;
        console.say(&format!("Found {target} boot entry: {entry}"));
        for skipped in &selection.also_matched {
            console.say(&format!(
                "Warning: {skipped} also looks like {target}, using the first match."
            ));
        }

        let directive = match plan::plan(
            self.options.mode(),
            platform.persistent_strategy(),
            &entry,
            order.as_ref(),
        ) {
            Ok(directive) => directive,
            Err(OrderUnavailable) => {
                warn!("no boot order, falling back to one-time boot");
                console.say("Warning: Could not parse current boot order.");
                console.say("Falling back to one-time boot mode...");
                BootDirective::OneTime(entry.identifier.clone())
            }
        };

        if let BootDirective::Persistent(new_order) = &directive {
            if verbose && platform == Platform::Uefi {
                console.say(&format!("New boot order: {}", new_order.joined()));
            }
            console.say("WARNING: This will permanently change your default boot order!");
            console.say(&format!("{target} will become the default boot option."));
        }

        info!(?directive, "applying boot directive");
        driver.apply(&directive).map_err(|source| {
            Failure::at(
                Step::Apply,
                Error::MutationFailed {
                    source,
                    manual: platform.apply_cmd(&directive, self.system.privilege),
                },
            )
        })?;

        match directive {
            BootDirective::OneTime(_) => {
                console.say(&format!("Successfully set next boot to {target}!"))
            }
            BootDirective::Persistent(_) => console.say(&format!(
                "Successfully set {target} as default boot entry!"
            )),
        }

        Ok(())
    }

    fn reboot<S, C>(
        &self,
        host: HostOs,
        shell: &S,
        console: &mut C,
    ) -> Result<Outcome, Failure>
    where
        S: Shell + ?Sized,
        C: Console + ?Sized,
    {
        console.say("Rebooting now...");
        shell
            .run(&driver::reboot_cmd(host, self.system.privilege))
            .map_err(|source| Failure::at(Step::Reboot, Error::RebootFailed { source }))?;

        Ok(Outcome::Done)
    }
}
