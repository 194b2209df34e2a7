//! Computes what has to be written to the boot manager.

use derive_more::Display;
use std::iter;

use crate::entry::{BootEntry, BootOrder};

/// Whether the switch lasts for one boot or changes the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Mode {
    #[display("one-time")]
    OneTime,
    #[display("persistent")]
    Persistent,
}

/// How a boot manager changes its persistent order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistentStrategy {
    /// The whole order is written back (`efibootmgr -o`).
    Rewrite,
    /// The manager moves a single identifier to the front itself
    /// (`bcdedit ... displayorder <id> /addfirst`).
    InsertFirst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootDirective {
    /// Boot `identifier` on the next boot only.
    OneTime(String),
    /// New persistent order. With [`PersistentStrategy::InsertFirst`] this
    /// holds just the identifier to move to the front.
    Persistent(BootOrder),
}

/// Persistent mode was requested but there is no order to rewrite.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("the current boot order could not be read")]
pub struct OrderUnavailable;

pub fn plan(
    mode: Mode,
    strategy: PersistentStrategy,
    entry: &BootEntry,
    current: Option<&BootOrder>,
) -> Result<BootDirective, OrderUnavailable> {
    let id = entry.identifier.as_str();

    match (mode, strategy) {
        (Mode::OneTime, _) => Ok(BootDirective::OneTime(id.to_owned())),
        (Mode::Persistent, PersistentStrategy::InsertFirst) => {
            Ok(BootDirective::Persistent(BootOrder::new([id])))
        }
        (Mode::Persistent, PersistentStrategy::Rewrite) => {
            let current = current
                .filter(|order| !order.is_empty())
                .ok_or(OrderUnavailable)?;
            Ok(BootDirective::Persistent(move_to_front(current, id)))
        }
    }
}

/// `id` first, everything else in its original relative order.
fn move_to_front(current: &BootOrder, id: &str) -> BootOrder {
    let rest = current
        .sequence()
        .iter()
        .map(String::as_str)
        .filter(|other| *other != id);

    BootOrder::new(iter::once(id).chain(rest))
}
