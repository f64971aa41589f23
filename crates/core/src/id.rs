//! Strongly-typed identifiers.
//!
//! Both assets and analyses are identified by a creation-time millisecond
//! timestamp. [`AssetId::next`] and [`AnalysisId::next`] draw from a
//! process-wide monotonic clock so two records minted in the same
//! millisecond (or across a backwards clock step) still get distinct,
//! increasing identifiers.

use core::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a tracked asset.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(i64);

/// Identifier of a persisted analysis.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(i64);

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Next value of the shared clock: `max(now_ms, last + 1)`.
fn next_timestamp() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ISSUED.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_ISSUED.compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return candidate,
            Err(actual) => last = actual,
        }
    }
}

macro_rules! impl_timestamp_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Mint a fresh identifier from the monotonic clock.
            pub fn next() -> Self {
                Self(next_timestamp())
            }

            pub const fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_timestamp_id!(AssetId, "AssetId");
impl_timestamp_id!(AnalysisId, "AnalysisId");
