//! Chat notification transport.
//!
//! Outbound messages go through a bounded queue drained by a single worker
//! task. Callers never wait on delivery: a full queue or a failed send is
//! logged and counted, and the request that triggered it proceeds unaffected.

use crate::error::NotifyError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub mod noop;
pub mod telegram;

pub use noop::NoOpNotifier;
pub use telegram::TelegramNotifier;

/// Delivers a text message to a chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError>;
}

/// One queued outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub chat_id: i64,
    pub text: String,
}

/// Sending half of the notification worker.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    tx: mpsc::Sender<Notification>,
}

impl NotificationQueue {
    /// Start the worker task. It exits once every queue handle is dropped.
    pub fn spawn(notifier: Arc<dyn Notifier>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<Notification>(capacity.max(1));

        let handle = tokio::spawn(async move {
            while let Some(notification) = rx.recv().await {
                match notifier
                    .send(notification.chat_id, &notification.text)
                    .await
                {
                    Ok(()) => debug!(chat_id = notification.chat_id, "Notification delivered"),
                    Err(e) => {
                        warn!(
                            chat_id = notification.chat_id,
                            error = %e,
                            "Notification delivery failed"
                        );
                        crate::metrics::record_notify_failure();
                    }
                }
            }
            debug!("Notification worker stopped");
        });

        (Self { tx }, handle)
    }

    /// Queue a message without waiting. Returns `false` if it was dropped.
    pub fn enqueue(&self, chat_id: i64, text: impl Into<String>) -> bool {
        let notification = Notification {
            chat_id,
            text: text.into(),
        };
        match self.tx.try_send(notification) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(n)) => {
                warn!(chat_id = n.chat_id, "Notification queue full, dropping message");
                crate::metrics::record_notify_failure();
                false
            }
            Err(mpsc::error::TrySendError::Closed(n)) => {
                warn!(chat_id = n.chat_id, "Notification worker gone, dropping message");
                crate::metrics::record_notify_failure();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    struct Recording(mpsc::UnboundedSender<Notification>);

    #[async_trait]
    impl Notifier for Recording {
        async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
            let _ = self.0.send(Notification {
                chat_id,
                text: text.to_string(),
            });
            Ok(())
        }
    }

    /// Reports each delivery attempt, then waits for `release`.
    struct Stalled {
        started: mpsc::UnboundedSender<()>,
        release: Arc<tokio::sync::Notify>,
    }

    #[async_trait]
    impl Notifier for Stalled {
        async fn send(&self, _chat_id: i64, _text: &str) -> Result<(), NotifyError> {
            let _ = self.started.send(());
            self.release.notified().await;
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Notifier for Failing {
        async fn send(&self, _chat_id: i64, _text: &str) -> Result<(), NotifyError> {
            Err(NotifyError::Status(reqwest::StatusCode::BAD_GATEWAY))
        }
    }

    #[tokio::test]
    async fn test_worker_delivers_in_order() {
        let (sent_tx, mut sent_rx) = mpsc::unbounded_channel();
        let (queue, _handle) = NotificationQueue::spawn(Arc::new(Recording(sent_tx)), 8);

        assert!(queue.enqueue(1, "first"));
        assert!(queue.enqueue(2, "second"));

        let first = timeout(Duration::from_secs(1), sent_rx.recv()).await.unwrap().unwrap();
        let second = timeout(Duration::from_secs(1), sent_rx.recv()).await.unwrap().unwrap();
        assert_eq!(first, Notification { chat_id: 1, text: "first".into() });
        assert_eq!(second.text, "second");
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_worker() {
        let (queue, handle) = NotificationQueue::spawn(Arc::new(Failing), 8);
        assert!(queue.enqueue(1, "a"));
        assert!(queue.enqueue(1, "b"));

        drop(queue);
        timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_closed_queue_drops() {
        let (queue, handle) = NotificationQueue::spawn(Arc::new(NoOpNotifier), 1);
        handle.abort();
        let _ = handle.await;
        assert!(!queue.enqueue(1, "late"));
    }

    #[tokio::test]
    async fn test_full_queue_drops() {
        let (started_tx, mut started_rx) = mpsc::unbounded_channel();
        let release = Arc::new(tokio::sync::Notify::new());
        let notifier = Stalled {
            started: started_tx,
            release: Arc::clone(&release),
        };
        let (queue, _handle) = NotificationQueue::spawn(Arc::new(notifier), 1);

        // Worker takes the first message and stalls on it
        assert!(queue.enqueue(1, "first"));
        timeout(Duration::from_secs(1), started_rx.recv()).await.unwrap().unwrap();

        assert!(queue.enqueue(1, "second"));
        assert!(!queue.enqueue(1, "third"));

        // Draining frees the slot again
        release.notify_one();
        timeout(Duration::from_secs(1), started_rx.recv()).await.unwrap().unwrap();
        assert!(queue.enqueue(1, "fourth"));
    }
}
