//! mikrodeny - failed-login deny list service for MikroTik routers.
//!
//! The router posts its login-failure log lines; repeated source addresses are
//! tallied and mapped to temporary bans, and the resulting deny list is served
//! over HTTP and on demand through a Telegram bot.

pub mod bot;
pub mod config;
pub mod error;
pub mod http;
pub mod ingest;
pub mod metrics;
pub mod notify;
pub mod render;
pub mod security;
pub mod state;
