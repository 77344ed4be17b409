//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use std::collections::HashSet;
use std::net::IpAddr;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("at least one [[users]] entry is required")]
    NoUsers,
    #[error("users[{0}].name is empty")]
    EmptyUserName(usize),
    #[error("users[{0}].key is empty")]
    EmptyUserKey(usize),
    #[error("users[{0}].key duplicates an earlier entry")]
    DuplicateUserKey(usize),
    #[error("allow_list entry is not an IP address: '{0}'")]
    InvalidAllowedAddress(String),
    #[error("policy.tiers must not be empty")]
    NoBanTiers,
    #[error("policy tier min_count must be at least 1")]
    ZeroTierThreshold,
    #[error("policy tier for min_count {0} has ban_minutes = 0")]
    ZeroTierDuration(u32),
    #[error("policy tiers share min_count {0}")]
    DuplicateTierThreshold(u32),
    #[error(
        "policy tier for min_count {higher} bans for less time than the tier for min_count {lower}"
    )]
    NonMonotonicTiers { lower: u32, higher: u32 },
    #[error("telegram.base_url is required")]
    MissingTelegramBaseUrl,
    #[error("telegram.queue_size must be at least 1")]
    ZeroQueueSize,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Users
    if config.users.is_empty() {
        errors.push(ValidationError::NoUsers);
    }
    let mut keys = HashSet::new();
    for (i, user) in config.users.iter().enumerate() {
        if user.name.trim().is_empty() {
            errors.push(ValidationError::EmptyUserName(i));
        }
        if user.key.is_empty() {
            errors.push(ValidationError::EmptyUserKey(i));
        } else if !keys.insert(user.key.as_str()) {
            errors.push(ValidationError::DuplicateUserKey(i));
        }
    }

    // Allow-list entries are exact matches, so they must be plain addresses
    for address in &config.allow_list.addresses {
        if address.parse::<IpAddr>().is_err() {
            errors.push(ValidationError::InvalidAllowedAddress(address.clone()));
        }
    }

    // Ban tiers
    if config.policy.tiers.is_empty() {
        errors.push(ValidationError::NoBanTiers);
    }
    let mut thresholds = HashSet::new();
    for tier in &config.policy.tiers {
        if tier.min_count == 0 {
            errors.push(ValidationError::ZeroTierThreshold);
        }
        if tier.ban_minutes == 0 {
            errors.push(ValidationError::ZeroTierDuration(tier.min_count));
        }
        if !thresholds.insert(tier.min_count) {
            errors.push(ValidationError::DuplicateTierThreshold(tier.min_count));
        }
    }
    // A higher threshold must never earn a shorter ban
    let mut tiers = config.policy.tiers.clone();
    tiers.sort_by_key(|tier| tier.min_count);
    for pair in tiers.windows(2) {
        if pair[1].min_count > pair[0].min_count && pair[1].ban_minutes < pair[0].ban_minutes {
            errors.push(ValidationError::NonMonotonicTiers {
                lower: pair[0].min_count,
                higher: pair[1].min_count,
            });
        }
    }

    // Telegram
    if let Some(ref telegram) = config.telegram {
        if telegram.base_url.trim().is_empty() {
            errors.push(ValidationError::MissingTelegramBaseUrl);
        }
        if telegram.queue_size == 0 {
            errors.push(ValidationError::ZeroQueueSize);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
