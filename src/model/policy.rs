//! Refresh and cache policies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RefreshPolicy {
    #[default]
    Manual,
    Interval { seconds: u64 },
    Cron { expression: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachePolicy {
    pub enabled: bool,
    pub ttl_seconds: u64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 3600,
        }
    }
}

impl CachePolicy {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ttl_seconds: 0,
        }
    }
}
