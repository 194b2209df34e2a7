//! `bcdedit /enum firmware` output.
//!
//! Blocks are not delimited explicitly. A block starts at an `identifier`
//! line and runs until the next one. Its `description` line carries the
//! display name.
//!
//! ```text
//! Firmware Application (101fffff)
//! -------------------------------
//! identifier              {9dea862c-5cdd-4e70-acc1-f32b344d4795}
//! device                  partition=\Device\HarddiskVolume1
//! path                    \EFI\ubuntu\shimx64.efi
//! description             ubuntu
//! ```

use super::push_unique;
use crate::entry::BootEntry;

const IDENTIFIER_KEY: &str = "identifier";
const DESCRIPTION_KEY: &str = "description";

/// Entries that have both an identifier and a description, in listing order.
pub fn parse(raw: &str) -> Vec<BootEntry> {
    let mut entries = Vec::new();
    // identifier of the block we are in, if any
    let mut current: Option<&str> = None;

    for line in raw.lines().map(str::trim) {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some(IDENTIFIER_KEY) => {
                if let Some(id) = tokens.next() {
                    current = Some(id);
                }
            }
            Some(DESCRIPTION_KEY) => {
                let Some(id) = current.take() else {
                    continue;
                };
                let name = line[DESCRIPTION_KEY.len()..].trim();
                push_unique(&mut entries, BootEntry::new(id, name));
            }
            _ => {}
        }
    }

    entries
}
