//! Facts about the machine we run on.

use derive_more::Display;
use std::path::{Path, PathBuf};

/// Present only when the kernel was booted through UEFI.
const EFI_SYSFS_PATH: &str = "sys/firmware/efi";

/// The parts of the running machine a switch depends on.
#[derive(Debug, Clone)]
pub struct System {
    /// `std::env::consts::OS` style name.
    pub os: String,
    pub privilege: Privilege,
    pub firmware: FirmwareProbe,
}

impl System {
    pub fn detect() -> Self {
        Self {
            os: std::env::consts::OS.to_owned(),
            privilege: Privilege::detect(),
            firmware: FirmwareProbe::from_rootfs("/"),
        }
    }
}

/// How privileged boot manager commands must be launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Privilege {
    /// Already elevated, run commands as they are.
    #[display("root")]
    Root,
    /// Prefix privileged commands with `sudo`.
    #[display("sudo")]
    Sudo,
}

impl Privilege {
    /// Root when both the real and effective user are root.
    #[cfg(unix)]
    pub fn detect() -> Self {
        let uid = rustix::process::getuid();
        let euid = rustix::process::geteuid();
        if uid.is_root() && euid.is_root() {
            Self::Root
        } else {
            Self::Sudo
        }
    }

    /// Windows has no sudo. bcdedit itself refuses to run unelevated.
    #[cfg(not(unix))]
    pub fn detect() -> Self {
        Self::Root
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FirmwareMode {
    #[display("UEFI")]
    Uefi,
    #[display("legacy BIOS")]
    LegacyBios,
}

/// Tells UEFI and legacy BIOS systems apart by looking at sysfs.
#[derive(Debug, Clone)]
pub struct FirmwareProbe {
    rootfs: PathBuf,
}

impl FirmwareProbe {
    /// Probes below `rootfs`, `/` for the running system.
    pub fn from_rootfs(rootfs: impl AsRef<Path>) -> Self {
        Self {
            rootfs: rootfs.as_ref().to_path_buf(),
        }
    }

    pub fn firmware_mode(&self) -> FirmwareMode {
        if self.rootfs.join(EFI_SYSFS_PATH).exists() {
            FirmwareMode::Uefi
        } else {
            FirmwareMode::LegacyBios
        }
    }
}
