//! Default value functions for configuration.

use super::types::BanTierConfig;
use std::net::SocketAddr;

pub fn default_true() -> bool {
    true
}

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

// =============================================================================
// Allow-list Defaults
// =============================================================================

/// Loopback plus the router's management address.
pub fn default_allowed_addresses() -> Vec<String> {
    vec!["127.0.0.1".to_string(), "192.168.7.100".to_string()]
}

// =============================================================================
// Ban Policy Defaults
// =============================================================================

pub fn default_ban_tiers() -> Vec<BanTierConfig> {
    vec![
        BanTierConfig {
            min_count: 8,
            ban_minutes: 1440,
        },
        BanTierConfig {
            min_count: 6,
            ban_minutes: 30,
        },
        BanTierConfig {
            min_count: 3,
            ban_minutes: 5,
        },
    ]
}

// =============================================================================
// Telegram Defaults
// =============================================================================

pub fn default_queue_size() -> usize {
    64
}

pub fn default_timeout_secs() -> u64 {
    10
}
