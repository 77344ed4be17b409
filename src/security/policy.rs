//! Ban policy: maps an offense count to a ban duration in minutes.
//!
//! Default tiers (inclusive):
//!
//! | count  | minutes |
//! |--------|---------|
//! | >= 8   | 1440    |
//! | 6..=7  | 30      |
//! | 3..=5  | 5       |
//! | < 3    | 0       |
//!
//! Zero means "no ban"; such results must never reach the deny list.

use crate::config::{BanTierConfig, PolicyConfig};

/// A single escalation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BanTier {
    /// Lowest offense count that earns this tier.
    pub min_count: u32,
    /// Ban length for this tier.
    pub ban_minutes: u32,
}

impl From<BanTierConfig> for BanTier {
    fn from(tier: BanTierConfig) -> Self {
        Self {
            min_count: tier.min_count,
            ban_minutes: tier.ban_minutes,
        }
    }
}

/// Tiered ban policy. Pure: the same count always yields the same duration.
#[derive(Debug, Clone)]
pub struct BanPolicy {
    /// Sorted by `min_count`, highest first.
    tiers: Vec<BanTier>,
}

impl BanPolicy {
    pub fn new<I>(tiers: I) -> Self
    where
        I: IntoIterator<Item = BanTier>,
    {
        let mut tiers: Vec<BanTier> = tiers.into_iter().collect();
        tiers.sort_by(|a, b| b.min_count.cmp(&a.min_count));
        Self { tiers }
    }

    /// Ban length in minutes for `count` offenses, or 0 for no ban.
    #[inline]
    pub fn decide(&self, count: u32) -> u32 {
        self.tiers
            .iter()
            .find(|tier| count >= tier.min_count)
            .map_or(0, |tier| tier.ban_minutes)
    }

    pub fn tiers(&self) -> &[BanTier] {
        &self.tiers
    }
}

impl Default for BanPolicy {
    fn default() -> Self {
        Self::from(&PolicyConfig::default())
    }
}

impl From<&PolicyConfig> for BanPolicy {
    fn from(config: &PolicyConfig) -> Self {
        Self::new(config.tiers.iter().copied().map(BanTier::from))
    }
}
