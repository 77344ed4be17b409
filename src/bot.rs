//! Chat bot command dispatch for the Telegram webhook.

use crate::render;
use crate::security::DenyListSnapshot;
use serde::Deserialize;

/// Incoming webhook update. Only the fields the bot reads are modeled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookUpdate {
    #[serde(default)]
    pub message: WebhookMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookMessage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub chat: Chat,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chat {
    #[serde(default)]
    pub id: i64,
}

/// Commands the bot answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// Send the rendered deny list.
    List,
    /// Send the API version string.
    Version,
}

impl BotCommand {
    /// Find a command anywhere in the message text, case-insensitively.
    /// `/list` wins when both appear.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if text.contains("/list") {
            Some(Self::List)
        } else if text.contains("/version") {
            Some(Self::Version)
        } else {
            None
        }
    }

    /// Reply text for this command.
    pub fn reply(self, snapshot: &DenyListSnapshot) -> String {
        match self {
            Self::List => render::render(&snapshot.entries),
            Self::Version => render::version(),
        }
    }
}
