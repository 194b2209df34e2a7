//! Picks the boot entry that belongs to the target operating system.

use crate::entry::{BootEntry, TargetOs};

/// No entry matched the aliases of the target.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no boot entry matches {0}")]
pub struct NotFound(pub TargetOs);

/// The chosen entry, plus any later entries that also matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub entry: BootEntry,
    pub also_matched: Vec<BootEntry>,
}

impl Selection {
    pub fn is_ambiguous(&self) -> bool {
        !self.also_matched.is_empty()
    }
}

/// First match in listing order wins. Later matches are only reported.
pub fn select<I>(entries: I, target: TargetOs) -> Result<Selection, NotFound>
where
    I: IntoIterator<Item = BootEntry>,
{
    let mut matching = entries
        .into_iter()
        .filter(|entry| target.matches(&entry.display_name));

    let entry = matching.next().ok_or(NotFound(target))?;

    Ok(Selection {
        entry,
        also_matched: matching.collect(),
    })
}
