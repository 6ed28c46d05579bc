use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::RemoteError;
use crate::journal_entry::{EntryUpdate, JournalEntry};
use crate::local_store::LocalStore;
use crate::merge::merge_entries;
use crate::remote::RemoteEntries;
use crate::search::{client_side_search, SearchFilter};

/// Result of a dual write. Either side succeeding counts as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub local: bool,
    pub remote: bool,
    /// The service was reached but refused the write with a client error.
    pub rejected: bool,
}

impl WriteOutcome {
    fn new(local: bool, remote: RemoteWrite) -> Self {
        WriteOutcome {
            local,
            remote: remote == RemoteWrite::Written,
            rejected: remote == RemoteWrite::Rejected,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.local || self.remote
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemoteWrite {
    Skipped,
    Written,
    Failed,
    Rejected,
}

impl RemoteWrite {
    fn settle<T>(op: &str, id: &str, result: Result<T, RemoteError>) -> Self {
        match result {
            Ok(_) => RemoteWrite::Written,
            Err(e) => {
                warn!(id, error = %e, "remote {} failed", op);
                if e.is_rejection() {
                    RemoteWrite::Rejected
                } else {
                    RemoteWrite::Failed
                }
            }
        }
    }
}

/// Single view over the local store and the remote service.
///
/// Remote failures never propagate: reads degrade to an empty sequence and
/// writes to `remote: false`. With remote mode off the transport is never
/// touched.
pub struct EntrySynchronizer<R> {
    store: LocalStore,
    remote: R,
    remote_enabled: bool,
}

impl<R: RemoteEntries> EntrySynchronizer<R> {
    pub fn new(store: LocalStore, remote: R, remote_enabled: bool) -> Self {
        EntrySynchronizer {
            store,
            remote,
            remote_enabled,
        }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote_enabled
    }

    pub fn local_entries(&self) -> Vec<JournalEntry> {
        self.store.load_entries()
    }

    pub async fn fetch_all(&self) -> Vec<JournalEntry> {
        if !self.remote_enabled {
            return Vec::new();
        }
        match self.remote.fetch_all().await {
            Ok(entries) => {
                debug!(count = entries.len(), "fetched remote entries");
                entries
            }
            Err(e) => {
                warn!(error = %e, "remote fetch failed");
                Vec::new()
            }
        }
    }

    pub async fn create(&self, entry: JournalEntry) -> WriteOutcome {
        let local = match self.store.prepend_entry(entry.clone()) {
            Ok(()) => true,
            Err(e) => {
                warn!(id = %entry.id, error = %e, "local create failed");
                false
            }
        };

        let remote = if self.remote_enabled {
            let result = self.remote.create(&entry).await.map(|confirmation| {
                debug!(id = %entry.id, message = ?confirmation.message, "remote create");
            });
            RemoteWrite::settle("create", &entry.id, result)
        } else {
            RemoteWrite::Skipped
        };

        WriteOutcome::new(local, remote)
    }

    pub async fn update(&self, id: &str, update: &EntryUpdate) -> WriteOutcome {
        let local = match self.store.update_entry(id, update) {
            Ok(()) => true,
            Err(e) => {
                warn!(id, error = %e, "local update failed");
                false
            }
        };

        let remote = if self.remote_enabled {
            RemoteWrite::settle("update", id, self.remote.update(id, update).await)
        } else {
            RemoteWrite::Skipped
        };

        WriteOutcome::new(local, remote)
    }

    pub async fn delete(&self, id: &str) -> WriteOutcome {
        let local = match self.store.delete_entry(id) {
            Ok(()) => true,
            Err(e) => {
                warn!(id, error = %e, "local delete failed");
                false
            }
        };

        let remote = if self.remote_enabled {
            RemoteWrite::settle("delete", id, self.remote.delete(id).await)
        } else {
            RemoteWrite::Skipped
        };

        WriteOutcome::new(local, remote)
    }

    /// Empties the local store, then deletes every remote entry one by one.
    ///
    /// All remote deletions run concurrently; individual failures are counted
    /// and logged but do not make `remote` false. Only a failed enumeration
    /// does.
    pub async fn clear_all(&self) -> WriteOutcome {
        let local = match self.store.clear_entries() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "local clear failed");
                false
            }
        };

        let remote = if self.remote_enabled {
            self.clear_remote().await
        } else {
            RemoteWrite::Skipped
        };

        WriteOutcome::new(local, remote)
    }

    async fn clear_remote(&self) -> RemoteWrite {
        let entries = match self.remote.fetch_all().await {
            Ok(entries) => entries,
            Err(e) => return RemoteWrite::settle::<()>("clear", "all", Err(e)),
        };

        let results = join_all(entries.iter().map(|e| self.remote.delete(&e.id))).await;
        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!(failed, total = entries.len(), "some remote deletions failed");
        }
        RemoteWrite::Written
    }

    /// Merges `remote` over the local collection and persists the result.
    ///
    /// An unreadable local slot is left as it is; the merged view is still
    /// returned.
    pub fn merge(&self, remote: Vec<JournalEntry>) -> Vec<JournalEntry> {
        match self.store.try_load_entries() {
            Ok(local) => {
                let merged = merge_entries(remote, local);
                if let Err(e) = self.store.save_entries(&merged) {
                    warn!(error = %e, "failed to persist merged entries");
                }
                merged
            }
            Err(e) => {
                warn!(error = %e, "local entries unreadable, merged view not persisted");
                merge_entries(remote, Vec::new())
            }
        }
    }

    pub async fn load_entries(&self) -> Vec<JournalEntry> {
        let remote = self.fetch_all().await;
        if remote.is_empty() {
            self.store.load_entries()
        } else {
            self.merge(remote)
        }
    }

    pub async fn search(&self, filter: &SearchFilter) -> Vec<JournalEntry> {
        if self.remote_enabled {
            match self.remote.search(filter).await {
                Ok(found) => return found,
                Err(e) => warn!(error = %e, "remote search failed, filtering locally"),
            }
        }

        let mut entries = self.fetch_all().await;
        if entries.is_empty() {
            entries = self.store.load_entries();
        }
        client_side_search(&entries, filter)
    }

    pub async fn check_health(&self) -> bool {
        if !self.remote_enabled {
            return false;
        }
        match self.remote.health().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "remote health check failed");
                false
            }
        }
    }
}
