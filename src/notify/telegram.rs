//! Telegram Bot API transport (`sendMessage`).

use super::Notifier;
use crate::config::TelegramConfig;
use crate::error::NotifyError;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

/// Sends messages through `<base_url>/sendMessage`.
pub struct TelegramNotifier {
    http_client: reqwest::Client,
    send_url: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("mikrodeny/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        info!(
            timeout_secs = config.timeout_secs,
            report_chat = config.report_chat_id.is_some(),
            "Telegram notifier initialized"
        );

        Self {
            http_client,
            send_url: send_message_url(&config.base_url),
        }
    }
}

/// The bot token is part of `base_url`, so this URL must never be logged.
fn send_message_url(base_url: &str) -> String {
    format!("{}/sendMessage", base_url.trim_end_matches('/'))
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), NotifyError> {
        let response = self
            .http_client
            .post(&self.send_url)
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status));
        }
        Ok(())
    }
}
