//! Identifier formats.
//!
//! `QT-<millis>-<suffix>`: the millisecond timestamp orders quotations, the
//! random base36 suffix separates two checkouts inside the same millisecond.
//! Not unique under concurrent writers; single-user interactive use only.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::{ID_SUFFIX_LEN, QUOTATION_ID_PREFIX};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random lowercase base36 string of `len` characters.
pub fn base36_suffix<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Builds a quotation id for a checkout happening at `now`.
pub fn quotation_id<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    prefixed_id(QUOTATION_ID_PREFIX, now, rng)
}

/// `<prefix>-<millis>-<suffix>`; shared with other generated references such
/// as mock email message ids.
pub fn prefixed_id<R: Rng + ?Sized>(prefix: &str, now: DateTime<Utc>, rng: &mut R) -> String {
    format!(
        "{}-{}-{}",
        prefix,
        now.timestamp_millis(),
        base36_suffix(rng, ID_SUFFIX_LEN)
    )
}
