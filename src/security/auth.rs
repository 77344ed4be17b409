//! Credential check for the ingestion and query endpoint.

use crate::config::AuthorizedUser;
use subtle::ConstantTimeEq;

/// The configured principals, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    users: Vec<AuthorizedUser>,
}

impl UserRegistry {
    pub fn new(users: Vec<AuthorizedUser>) -> Self {
        Self { users }
    }

    /// Find the user whose key matches `credential`.
    ///
    /// Every configured key is compared in constant time, with no early exit,
    /// so response timing does not reveal how much of a key matched.
    pub fn authorize(&self, credential: &str) -> Option<&AuthorizedUser> {
        if credential.is_empty() {
            return None;
        }

        let mut found = None;
        for user in &self.users {
            if bool::from(user.key.as_bytes().ct_eq(credential.as_bytes())) {
                found = Some(user);
            }
        }
        found
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
