//! Boot entries, boot orders and the operating systems they belong to.

use derive_more::Display;

/// Substrings (lowercase) that mark a boot entry as belonging to Linux.
pub const LINUX_ALIASES: [&str; 4] = ["ubuntu", "linux", "pop", "grub"];

/// Substrings (lowercase) that mark a boot entry as belonging to Windows.
pub const WINDOWS_ALIASES: [&str; 1] = ["windows"];

/// A boot target as reported by the firmware boot manager.
///
/// `identifier` is a UEFI boot number (`0001`) or a BCD identifier
/// (`{current}`, `{9dea862c-5cdd-4e70-acc1-f32b344d4795}`), unique within one
/// snapshot. `display_name` is free text and may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{identifier} {display_name}")]
pub struct BootEntry {
    pub identifier: String,
    pub display_name: String,
}

impl BootEntry {
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
        }
    }
}

/// Firmware boot priority, highest first. Never contains duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootOrder {
    sequence: Vec<String>,
}

impl BootOrder {
    /// Builds an order from identifiers, dropping blanks and repeated entries.
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sequence: Vec<String> = Vec::new();
        for id in identifiers {
            let id = id.as_ref().trim();
            if id.is_empty() || sequence.iter().any(|known| known == id) {
                continue;
            }
            sequence.push(id.to_owned());
        }

        Self { sequence }
    }

    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }

    pub fn first(&self) -> Option<&str> {
        self.sequence.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.sequence.iter().any(|id| id == identifier)
    }

    /// Comma separated form, as accepted by `efibootmgr -o`.
    pub fn joined(&self) -> String {
        self.sequence.join(",")
    }
}

/// The operating system currently running this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HostOs {
    #[display("linux")]
    Linux,
    #[display("windows")]
    Windows,
}

impl HostOs {
    /// Maps a `std::env::consts::OS` style name. `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linux" => Some(Self::Linux),
            "windows" => Some(Self::Windows),
            _ => None,
        }
    }

    /// The OS we switch to: the other half of the dual boot.
    pub fn other(self) -> TargetOs {
        match self {
            Self::Linux => TargetOs::Windows,
            Self::Windows => TargetOs::Linux,
        }
    }
}

/// The operating system we want the machine to boot into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TargetOs {
    #[display("Linux")]
    Linux,
    #[display("Windows")]
    Windows,
}

impl TargetOs {
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Linux => &LINUX_ALIASES,
            Self::Windows => &WINDOWS_ALIASES,
        }
    }

    /// Case-insensitive substring match of `display_name` against the aliases.
    pub fn matches(self, display_name: &str) -> bool {
        let name = display_name.to_lowercase();
        self.aliases().iter().any(|alias| name.contains(alias))
    }
}
