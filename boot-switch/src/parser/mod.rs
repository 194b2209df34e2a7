//! Turns the text printed by a boot manager listing command into entries.
//!
//! * [`Dialect::Uefi`] - output of `efibootmgr`
//! * [`Dialect::Bcd`] - output of `bcdedit /enum firmware`
//!
//! Parsing never fails. Unknown lines are skipped, and input without any
//! recognizable entry yields an empty snapshot.

use derive_more::Display;

use crate::entry::{BootEntry, BootOrder};

pub mod bcd;
pub mod uefi;

/// Which boot manager produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Dialect {
    #[display("uefi")]
    Uefi,
    #[display("bcd")]
    Bcd,
}

/// Everything we learned from one listing of the boot manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Entries in the order the boot manager listed them.
    pub entries: Vec<BootEntry>,
    /// Persistent order. Only the UEFI dialect reports one.
    pub order: Option<BootOrder>,
    /// Entry used for the running boot (`BootCurrent`).
    pub current: Option<String>,
    /// Pending one-time override (`BootNext`).
    pub next: Option<String>,
}

/// Parses `raw` according to `dialect`.
pub fn parse(dialect: Dialect, raw: &str) -> Snapshot {
    match dialect {
        Dialect::Uefi => uefi::parse(raw),
        Dialect::Bcd => Snapshot {
            entries: bcd::parse(raw),
            ..Snapshot::default()
        },
    }
}

/// Adds `entry` unless its identifier is already known. First one wins.
fn push_unique(entries: &mut Vec<BootEntry>, entry: BootEntry) {
    if entries.iter().all(|e| e.identifier != entry.identifier) {
        entries.push(entry);
    }
}
