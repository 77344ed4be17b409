//! Human-readable rendering of the deny list for the chat bot.

use crate::security::DeniedAddress;

/// Shown when nothing is banned.
pub const EMPTY_MESSAGE: &str = "no IPs currently blocked";

/// One line per record, joined by `\n`, in store order.
pub fn render(entries: &[DeniedAddress]) -> String {
    if entries.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    entries
        .iter()
        .map(|entry| {
            format!(
                "IP: {} had {} failed attempts and is blocked for {} minutes.",
                entry.address, entry.failed_logins, entry.ban_minutes
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Message pushed to the report chat after an ingestion batch.
pub fn report(entries: &[DeniedAddress]) -> String {
    format!("Report\n---\n{}", render(entries))
}

/// Reply to the bot's `/version` command and body of `GET /`.
pub fn version() -> String {
    format!("API version {}", env!("CARGO_PKG_VERSION"))
}
