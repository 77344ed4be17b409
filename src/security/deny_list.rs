//! Deny-list store with batch-replace semantics.
//!
//! Each ingestion batch is authoritative: its results overwrite the previous
//! snapshot entirely. Offense counts are not carried across batches.
//!
//! # Concurrency
//!
//! The current snapshot lives behind a `parking_lot::RwLock<Arc<_>>`. Writers
//! swap in a fully built snapshot under the write lock; readers clone the `Arc`
//! and never observe a half-replaced list.

use super::allow_list::AllowList;
use super::policy::BanPolicy;
use super::tally::tally;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// A computed ban record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeniedAddress {
    pub address: String,
    /// Occurrences in the batch that produced this record (>= 1).
    pub failed_logins: u32,
    /// Always > 0 for stored records.
    pub ban_minutes: u32,
}

/// Build a deny list from one batch of candidates.
///
/// Pipeline: tally -> decide per address -> keep `ban_minutes > 0`.
/// The result is sorted by address so output is stable between identical batches.
pub fn compute<I, S>(
    candidates: I,
    allow_list: &AllowList,
    policy: &BanPolicy,
) -> Vec<DeniedAddress>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut denied: Vec<DeniedAddress> = tally(candidates, allow_list)
        .into_iter()
        .filter_map(|(address, failed_logins)| {
            let ban_minutes = policy.decide(failed_logins);
            debug!(address = %address, count = failed_logins, ban_minutes, "Ban decision");
            (ban_minutes > 0).then_some(DeniedAddress {
                address,
                failed_logins,
                ban_minutes,
            })
        })
        .collect();

    denied.sort_by(|a, b| a.address.cmp(&b.address));
    denied
}

/// An immutable view of the deny list as of one batch.
#[derive(Debug, Clone)]
pub struct DenyListSnapshot {
    /// Ban records, sorted by address.
    pub entries: Vec<DeniedAddress>,
    /// Number of batches applied since startup; 0 for the initial empty list.
    pub generation: u64,
    /// When this snapshot was installed.
    pub updated_at: DateTime<Utc>,
}

impl DenyListSnapshot {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            generation: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the record for an address.
    pub fn get(&self, address: &str) -> Option<&DeniedAddress> {
        self.entries
            .binary_search_by(|entry| entry.address.as_str().cmp(address))
            .ok()
            .map(|i| &self.entries[i])
    }
}

/// Process-wide holder of the current deny list.
#[derive(Debug)]
pub struct DenyListStore {
    current: RwLock<Arc<DenyListSnapshot>>,
}

impl Default for DenyListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DenyListStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(DenyListSnapshot::empty())),
        }
    }

    /// Consistent view of the current deny list.
    pub fn snapshot(&self) -> Arc<DenyListSnapshot> {
        Arc::clone(&*self.current.read())
    }

    /// Discard the current contents and install `entries`.
    ///
    /// Zero-minute records are filtered out here as well as in [`compute`].
    pub fn replace(&self, entries: Vec<DeniedAddress>) -> Arc<DenyListSnapshot> {
        self.replace_observed(entries, |_| {})
    }

    /// Like [`replace`](Self::replace), but runs `observe` on the new snapshot
    /// before the write lock is released.
    ///
    /// Observers therefore see installs in generation order. `observe` must
    /// not block or touch the store.
    pub fn replace_observed<F>(
        &self,
        mut entries: Vec<DeniedAddress>,
        observe: F,
    ) -> Arc<DenyListSnapshot>
    where
        F: FnOnce(&DenyListSnapshot),
    {
        entries.retain(|entry| entry.ban_minutes > 0);
        entries.sort_by(|a, b| a.address.cmp(&b.address));
        entries.dedup_by(|a, b| a.address == b.address);

        let mut current = self.current.write();
        let snapshot = Arc::new(DenyListSnapshot {
            entries,
            generation: current.generation + 1,
            updated_at: Utc::now(),
        });
        *current = Arc::clone(&snapshot);
        observe(&snapshot);
        snapshot
    }
}
