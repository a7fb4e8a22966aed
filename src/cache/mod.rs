//! Cache keys for compiled metric results.
//!
//! A schema's cache key is the SHA256 fingerprint of its serialized form, so
//! any change to members, joins, filters or ordering produces a new key. The
//! key carries the TTL from the schema's cache policy.

mod hash;
pub use hash::compute_hash;

use std::fmt;

/// Key under which a metric's results may be cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub fingerprint: String,
    pub ttl_seconds: u64,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "metric:{}", self.fingerprint)
    }
}
