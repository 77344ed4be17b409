//! No-op notifier used when no chat transport is configured.
//!
//! Every send succeeds and delivers nothing.

use super::Notifier;
use crate::error::NotifyError;
use async_trait::async_trait;
use tracing::debug;

pub struct NoOpNotifier;

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn send(&self, chat_id: i64, _text: &str) -> Result<(), NotifyError> {
        debug!(chat_id, "Notifications disabled, discarding message");
        Ok(())
    }
}
