//! Offense accounting and ban decisions.
//!
//! ```text
//! candidates ──► tally (AllowList) ──► BanPolicy::decide ──► DenyListStore::replace
//! ```
//!
//! - **AllowList**: exempt addresses, exact match
//! - **Tally**: per-address occurrence counts within one batch
//! - **BanPolicy**: tiered count-to-minutes mapping
//! - **DenyListStore**: current snapshot, replaced on every batch
//! - **UserRegistry**: credential check in front of all of the above

pub mod allow_list;
pub mod auth;
pub mod deny_list;
pub mod policy;
pub mod tally;

pub use allow_list::{AllowList, AllowedAddress};
pub use auth::UserRegistry;
pub use deny_list::{DeniedAddress, DenyListSnapshot, DenyListStore, compute};
pub use policy::{BanPolicy, BanTier};
pub use tally::{OffenseTally, tally};
