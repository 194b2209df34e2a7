//! Maps boot directives onto the commands of each platform's boot manager.
//!
//! * UEFI (Linux) - `efibootmgr`
//! * BCD (Windows) - `bcdedit`, operating on the `{fwbootmgr}` pseudo entry
//! * legacy BIOS (Linux) - `grub-reboot`, no structured listing at all

use derive_more::Display;

use crate::{
    entry::HostOs,
    parser::Dialect,
    plan::{BootDirective, PersistentStrategy},
    shell::{Cmd, Shell, ShellErr},
    system::{FirmwareMode, Privilege},
};

const EFIBOOTMGR: &str = "efibootmgr";
const BCDEDIT: &str = "bcdedit";
const FWBOOTMGR: &str = "{fwbootmgr}";
const GRUB_CFG: &str = "/boot/grub/grub.cfg";
/// Menu entry name handed to `grub-reboot` on legacy BIOS systems.
pub const GRUB_WINDOWS_ENTRY: &str = "Windows";

/// A boot manager we can list and reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Platform {
    #[display("UEFI")]
    Uefi,
    #[display("BCD")]
    Bcd,
}

impl Platform {
    /// `None` on legacy BIOS, where only the unstructured GRUB fallback exists.
    pub fn for_host(os: HostOs, firmware: FirmwareMode) -> Option<Self> {
        match (os, firmware) {
            (HostOs::Windows, _) => Some(Self::Bcd),
            (HostOs::Linux, FirmwareMode::Uefi) => Some(Self::Uefi),
            (HostOs::Linux, FirmwareMode::LegacyBios) => None,
        }
    }

    pub fn dialect(self) -> Dialect {
        match self {
            Self::Uefi => Dialect::Uefi,
            Self::Bcd => Dialect::Bcd,
        }
    }

    pub fn persistent_strategy(self) -> PersistentStrategy {
        match self {
            Self::Uefi => PersistentStrategy::Rewrite,
            Self::Bcd => PersistentStrategy::InsertFirst,
        }
    }

    /// Listing needs no elevation on Linux, and on Windows we already are.
    pub fn list_cmd(self) -> Cmd {
        match self {
            Self::Uefi => Cmd::new(EFIBOOTMGR, Vec::<String>::new()),
            Self::Bcd => Cmd::new(BCDEDIT, ["/enum", "firmware"]),
        }
    }

    pub fn apply_cmd(self, directive: &BootDirective, privilege: Privilege) -> Cmd {
        let cmd = match (self, directive) {
            (Self::Uefi, BootDirective::OneTime(id)) => {
                Cmd::new(EFIBOOTMGR, ["-n", id.as_str()])
            }
            (Self::Uefi, BootDirective::Persistent(order)) => {
                Cmd::new(EFIBOOTMGR, ["-o".to_owned(), order.joined()])
            }
            (Self::Bcd, BootDirective::OneTime(id)) => {
                Cmd::new(BCDEDIT, ["/set", FWBOOTMGR, "bootsequence", id.as_str()])
            }
            (Self::Bcd, BootDirective::Persistent(order)) => {
                let mut args = vec!["/set", FWBOOTMGR, "displayorder"];
                args.extend(order.sequence().iter().map(String::as_str));
                args.push("/addfirst");
                Cmd::new(BCDEDIT, args)
            }
        };

        cmd.elevated(privilege)
    }

    /// Extra advice when listing fails.
    pub fn list_hint(self) -> &'static str {
        match self {
            Self::Uefi => "You may need to install efibootmgr: sudo apt install efibootmgr",
            Self::Bcd => "Make sure you're running as Administrator.",
        }
    }
}

/// Restarts the machine right away.
pub fn reboot_cmd(os: HostOs, privilege: Privilege) -> Cmd {
    match os {
        HostOs::Linux => Cmd::new("reboot", Vec::<String>::new()).elevated(privilege),
        HostOs::Windows => Cmd::new("shutdown", ["/r", "/t", "0"]),
    }
}

/// Legacy BIOS fallback: select the next GRUB entry by its name.
pub fn grub_reboot_cmd(privilege: Privilege) -> Cmd {
    Cmd::new("grub-reboot", [GRUB_WINDOWS_ENTRY]).elevated(privilege)
}

/// Looks for a Windows menu entry in the GRUB configuration.
pub fn grub_probe_cmd(privilege: Privilege) -> Cmd {
    Cmd::new("grep", ["-i", "windows", GRUB_CFG]).elevated(privilege)
}

/// Issues boot manager commands for one [`Platform`] through a [`Shell`].
pub struct Driver<'a, S: ?Sized> {
    platform: Platform,
    privilege: Privilege,
    shell: &'a S,
}

impl<'a, S: Shell + ?Sized> Driver<'a, S> {
    pub fn new(platform: Platform, privilege: Privilege, shell: &'a S) -> Self {
        Self {
            platform,
            privilege,
            shell,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Raw listing output, to be handed to [`crate::parser::parse`].
    pub fn list_entries(&self) -> Result<String, ShellErr> {
        self.shell.run(&self.platform.list_cmd())
    }

    pub fn apply(&self, directive: &BootDirective) -> Result<(), ShellErr> {
        self.shell
            .run(&self.platform.apply_cmd(directive, self.privilege))
            .map(drop)
    }
}
