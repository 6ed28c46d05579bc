use std::collections::HashSet;

use crate::journal_entry::JournalEntry;

/// Remote entries in their order, then local entries whose id the remote
/// side does not have. Remote wins every id collision.
pub fn merge_entries(remote: Vec<JournalEntry>, local: Vec<JournalEntry>) -> Vec<JournalEntry> {
    let remote_ids: HashSet<String> = remote.iter().map(|e| e.id.clone()).collect();

    let mut merged = remote;
    merged.extend(local.into_iter().filter(|e| !remote_ids.contains(&e.id)));
    merged
}
