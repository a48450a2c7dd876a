//! Hash maps with in-table collision resolution, plus the hash functions the
//! `hashing` bench compares.
//!
//! - [`OpenHashMap`]: linear probing with tombstones.
//! - [`RobinHoodHashMap`]: linear probing that keeps probe distances balanced
//!   and deletes by backward shift.
//! - [`functions`]: FNV-1a and three universal hash families.
//!
//! Both maps keep a power-of-two bucket count so the home bucket is
//! `hash & mask`.

use std::fmt as StdFmt;

pub mod functions;
mod open;
mod robin_hood;

pub use functions::{FnvBuildHasher, FnvHasher};
pub use open::OpenHashMap;
pub use robin_hood::RobinHoodHashMap;

/// Bucket count of a freshly created map.
pub const INITIAL_CAPACITY: usize = 16;

// ============================================================================
//  HashMapError
// ============================================================================

/// Errors raised when configuring a hash map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HashMapError {
    /// Maximum load factor must lie strictly between 0 and 1.
    InvalidLoadFactor(f64),
}

impl StdFmt::Display for HashMapError {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::InvalidLoadFactor(lf) => {
                write!(f, "load factor must be in (0, 1), got {lf}")
            }
        }
    }
}

impl std::error::Error for HashMapError {}

/// Reject load factors that would let the table fill up or never grow.
pub(crate) fn check_load_factor(load_factor: f64) -> Result<f64, HashMapError> {
    if load_factor > 0.0 && load_factor < 1.0 {
        Ok(load_factor)
    } else {
        Err(HashMapError::InvalidLoadFactor(load_factor))
    }
}

/// True if holding `used` buckets in a table of `capacity` would exceed
/// `load_factor`.
#[inline]
#[expect(clippy::cast_precision_loss)]
pub(crate) fn exceeds_load(used: usize, capacity: usize, load_factor: f64) -> bool {
    used as f64 > capacity as f64 * load_factor
}
