//! Static allow-list of addresses exempt from ban accounting.

use std::collections::HashSet;

/// An address that is never counted as an offender.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllowedAddress {
    pub address: String,
}

/// Immutable set of exempt addresses, built once at startup.
///
/// Matching is exact string comparison against the token the router sent;
/// no canonicalization or range matching is performed.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    addresses: HashSet<String>,
}

impl AllowList {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether `address` is exempt.
    #[inline]
    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(address)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AllowedAddress> + '_ {
        self.addresses.iter().map(|address| AllowedAddress {
            address: address.clone(),
        })
    }
}

impl From<&crate::config::AllowListConfig> for AllowList {
    fn from(config: &crate::config::AllowListConfig) -> Self {
        Self::new(config.addresses.iter().cloned())
    }
}
