//! Within-run email de-duplication for the CSV import.
//!
//! The set of claimed emails is owned by the caller, so a resolver holds no
//! state between runs. Uniqueness against already-stored users is enforced by
//! the database when the batch is flushed.

use std::collections::HashSet;

use chrono::Utc;
use rand::Rng;

use crate::config::EMAIL_SUFFIX_ATTEMPTS;

/// Return `candidate` (lowercased) if nobody in this run claimed it yet;
/// otherwise splice a random digit before the `@`, and as a last resort the
/// current epoch milliseconds.
pub fn resolve_email<R: Rng>(
    candidate: &str,
    claimed: &HashSet<String>,
    rng: &mut R,
) -> String {
    let candidate = candidate.trim().to_lowercase();
    if !claimed.contains(&candidate) {
        return candidate;
    }

    let Some((local, domain)) = candidate.rsplit_once('@') else {
        return candidate;
    };

    for _ in 0..EMAIL_SUFFIX_ATTEMPTS {
        let digit: u8 = rng.gen_range(0..10);
        let attempt = format!("{}{}@{}", local, digit, domain);
        if !claimed.contains(&attempt) {
            return attempt;
        }
    }

    format!("{}{}@{}", local, Utc::now().timestamp_millis(), domain)
}
