//! `efibootmgr` output.
//!
//! ```text
//! BootCurrent: 0001
//! Timeout: 1 seconds
//! BootOrder: 0001,0003,0002
//! Boot0001* ubuntu	HD(1,GPT,...)/File(\EFI\ubuntu\shimx64.efi)
//! Boot0003* Windows Boot Manager	HD(1,GPT,...)/File(\EFI\Microsoft\Boot\bootmgfw.efi)
//! Boot0002  UEFI: Built-in EFI Shell
//! ```

use super::{push_unique, Snapshot};
use crate::entry::{BootEntry, BootOrder};

const ENTRY_PREFIX: &str = "Boot";
const ORDER_PREFIX: &str = "BootOrder:";
const CURRENT_PREFIX: &str = "BootCurrent:";
const NEXT_PREFIX: &str = "BootNext:";

/// Boot numbers sit at byte offsets 4..8 of an entry line.
const NUMBER_RANGE: std::ops::Range<usize> = 4..8;
const ACTIVE_MARKER: char = '*';

pub fn parse(raw: &str) -> Snapshot {
    let mut snapshot = Snapshot::default();

    for line in raw.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix(ORDER_PREFIX) {
            snapshot.order = Some(parse_order(rest));
        } else if let Some(rest) = line.strip_prefix(CURRENT_PREFIX) {
            snapshot.current = Some(rest.trim().to_owned());
        } else if let Some(rest) = line.strip_prefix(NEXT_PREFIX) {
            snapshot.next = Some(rest.trim().to_owned());
        } else if let Some(entry) = parse_entry(line) {
            push_unique(&mut snapshot.entries, entry);
        }
    }

    snapshot
}

/// Parses a `Boot####` line. `None` if the line is not an entry.
fn parse_entry(line: &str) -> Option<BootEntry> {
    if !line.starts_with(ENTRY_PREFIX) {
        return None;
    }
    let number = line.get(NUMBER_RANGE)?;
    if !number.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let label = line
        .get(NUMBER_RANGE.end..)?
        .trim_start_matches(ACTIVE_MARKER)
        // newer efibootmgr appends the device path after a tab
        .split('\t')
        .next()
        .unwrap_or_default()
        .trim();

    Some(BootEntry::new(number, label))
}

fn parse_order(rest: &str) -> BootOrder {
    BootOrder::new(rest.trim().split(','))
}
