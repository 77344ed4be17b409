//! Offense tallying.
//!
//! Every occurrence of an address in one batch is one failed login. Allow-listed
//! addresses are dropped before counting and never appear in the result.

use super::allow_list::AllowList;
use std::collections::HashMap;

/// Per-address offense counts for a single batch. Iteration order is arbitrary.
pub type OffenseTally = HashMap<String, u32>;

/// Count occurrences of each non-exempt candidate.
///
/// Candidates are trusted to be address-shaped but anything is accepted;
/// a malformed string is simply counted under its own key.
pub fn tally<I, S>(candidates: I, allow_list: &AllowList) -> OffenseTally
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = OffenseTally::new();
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if allow_list.contains(candidate) {
            continue;
        }
        let count = counts.entry(candidate.to_owned()).or_insert(0);
        *count = count.saturating_add(1);
    }
    counts
}
