//! Shared application state.
//!
//! Everything derived from configuration is immutable after construction.
//! The only mutable piece is the [`DenyListStore`], which serializes its own
//! writers.

use crate::config::Config;
use crate::ingest::extract_addresses;
use crate::notify::NotificationQueue;
use crate::render;
use crate::security::{
    AllowList, BanPolicy, DenyListSnapshot, DenyListStore, UserRegistry, compute,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct AppState {
    pub allow_list: AllowList,
    pub policy: BanPolicy,
    pub users: UserRegistry,
    pub store: DenyListStore,
    pub notifications: NotificationQueue,
    /// Chat that receives a report after each batch.
    pub report_chat_id: Option<i64>,
    /// Whether `/metrics` is served.
    pub metrics_enabled: bool,
}

impl AppState {
    pub fn new(config: &Config, notifications: NotificationQueue) -> Self {
        Self {
            allow_list: AllowList::from(&config.allow_list),
            policy: BanPolicy::from(&config.policy),
            users: UserRegistry::new(config.users.clone()),
            store: DenyListStore::new(),
            notifications,
            report_chat_id: config.telegram.as_ref().and_then(|t| t.report_chat_id),
            metrics_enabled: config.server.metrics,
        }
    }

    /// Apply one router message as a batch and return the new deny list.
    ///
    /// The deny-list gauge and the chat report are updated while the store
    /// still holds this batch, so concurrent batches can't publish them out of
    /// order. Queueing never waits on the chat transport.
    pub fn ingest(&self, message: &str) -> Arc<DenyListSnapshot> {
        let batch = Uuid::new_v4();
        let candidates: Vec<&str> = extract_addresses(message).collect();

        let denied = compute(&candidates, &self.allow_list, &self.policy);
        let snapshot = self.store.replace_observed(denied, |snapshot| {
            crate::metrics::record_batch(
                candidates.len(),
                snapshot.entries.iter().map(|e| e.ban_minutes),
                snapshot.len(),
            );
            if let Some(chat_id) = self.report_chat_id {
                self.notifications
                    .enqueue(chat_id, render::report(&snapshot.entries));
            }
        });

        info!(
            batch = %batch,
            generation = snapshot.generation,
            candidates = candidates.len(),
            banned = snapshot.len(),
            "Ingestion batch applied"
        );

        snapshot
    }

    /// Current deny list.
    pub fn snapshot(&self) -> Arc<DenyListSnapshot> {
        self.store.snapshot()
    }
}
