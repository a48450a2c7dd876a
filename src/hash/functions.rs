//! Hash functions compared by the `hashing` bench.
//!
//! - [`fnv1a_32`] / [`FnvHasher`]: Fowler-Noll-Vo, xor-then-multiply.
//! - [`UniversalHash`]: Carter-Wegman `((a*x + b) mod p) mod m`.
//! - [`MaskedUniversalHash`]: same family, power-of-two `m` reduced by mask.
//! - [`MultiplyShiftHash`]: Dietzfelbinger multiply-shift, no modulo at all.

use std::hash::{BuildHasherDefault, Hasher};

use rand::Rng;

/// 32-bit FNV offset basis.
pub const FNV32_OFFSET: u32 = 2_166_136_261;
/// 32-bit FNV prime.
pub const FNV32_PRIME: u32 = 16_777_619;
/// 64-bit FNV offset basis.
pub const FNV64_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
/// 64-bit FNV prime.
pub const FNV64_PRIME: u64 = 0x0100_0000_01b3;

/// A large prime usable as the modulus of [`UniversalHash`].
pub const DEFAULT_PRIME: u64 = 10_000_687;

/// 32-bit FNV-1a over raw bytes.
///
/// ```rust
/// use algolab::hash::functions::fnv1a_32;
///
/// assert_eq!(fnv1a_32(b""), 0x811c_9dc5);
/// assert_eq!(fnv1a_32(b"a"), 0xe40c_292c);
/// ```
#[inline]
#[must_use]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV32_OFFSET, |h, &b| {
        (h ^ u32::from(b)).wrapping_mul(FNV32_PRIME)
    })
}

/// 64-bit FNV-1a as a [`Hasher`], so it can back [`OpenHashMap`] or
/// [`RobinHoodHashMap`].
///
/// [`OpenHashMap`]: super::OpenHashMap
/// [`RobinHoodHashMap`]: super::RobinHoodHashMap
#[derive(Debug, Clone, Copy)]
pub struct FnvHasher(u64);

impl Default for FnvHasher {
    fn default() -> Self {
        Self(FNV64_OFFSET)
    }
}

impl Hasher for FnvHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 ^ u64::from(b)).wrapping_mul(FNV64_PRIME);
        }
    }
}

/// `BuildHasher` producing [`FnvHasher`]s.
pub type FnvBuildHasher = BuildHasherDefault<FnvHasher>;

// ============================================================================
//  Universal hashing
// ============================================================================

/// Carter-Wegman universal hash: `((a * x + b) mod prime) mod m`.
///
/// Computed in `u64`, so `a`, `b` and `prime` below 2^31 never overflow for
/// 32-bit inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniversalHash {
    a: u64,
    b: u64,
    prime: u64,
    m: u64,
}

impl UniversalHash {
    /// # Panics
    ///
    /// Panics if `prime` or `m` is zero, or `prime >= 2^31`.
    #[must_use]
    pub fn new(a: u64, b: u64, prime: u64, m: u64) -> Self {
        assert!(prime > 0 && prime < (1 << 31), "prime must be in 1..2^31");
        assert!(m > 0, "bucket count must be positive");
        Self {
            a: a % prime,
            b: b % prime,
            prime,
            m,
        }
    }

    /// Draw `a` from `1..prime` and `b` from `0..prime`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`UniversalHash::new`], plus `prime < 2`.
    #[must_use]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, prime: u64, m: u64) -> Self {
        assert!(prime >= 2, "prime must be at least 2");
        Self::new(rng.gen_range(1..prime), rng.gen_range(0..prime), prime, m)
    }

    /// Hash `value` into `0..m`.
    #[inline]
    #[must_use]
    pub const fn hash(&self, value: u32) -> u64 {
        ((self.a * value as u64 + self.b) % self.prime) % self.m
    }
}

/// [`UniversalHash`] with a power-of-two bucket count, reduced by masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskedUniversalHash {
    a: u64,
    b: u64,
    prime: u64,
    mask: u64,
}

impl MaskedUniversalHash {
    /// # Panics
    ///
    /// Panics if `m` is not a power of two, or `prime` is zero or `>= 2^31`.
    #[must_use]
    pub fn new(a: u64, b: u64, prime: u64, m: u64) -> Self {
        assert!(prime > 0 && prime < (1 << 31), "prime must be in 1..2^31");
        assert!(m.is_power_of_two(), "bucket count must be a power of two, got {m}");
        Self {
            a: a % prime,
            b: b % prime,
            prime,
            mask: m - 1,
        }
    }

    /// Draw `a` from `1..prime` and `b` from `0..prime`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`MaskedUniversalHash::new`], plus `prime < 2`.
    #[must_use]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, prime: u64, m: u64) -> Self {
        assert!(prime >= 2, "prime must be at least 2");
        Self::new(rng.gen_range(1..prime), rng.gen_range(0..prime), prime, m)
    }

    /// Hash `value` into `0..m`.
    #[inline]
    #[must_use]
    pub const fn hash(&self, value: u32) -> u64 {
        ((self.a * value as u64 + self.b) % self.prime) & self.mask
    }
}

/// Multiply-shift hashing: `(a * x) >> (32 - log2 m)` with odd `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplyShiftHash {
    a: u32,
    shift: u32,
}

impl MultiplyShiftHash {
    /// `a` is forced odd.
    ///
    /// # Panics
    ///
    /// Panics unless `m` is a power of two in `2..=2^31`.
    #[must_use]
    pub fn new(a: u32, m: u32) -> Self {
        assert!(
            m.is_power_of_two() && m >= 2,
            "bucket count must be a power of two >= 2, got {m}"
        );
        Self {
            a: a | 1,
            shift: u32::BITS - m.trailing_zeros(),
        }
    }

    /// Draw a random odd multiplier.
    ///
    /// # Panics
    ///
    /// Same conditions as [`MultiplyShiftHash::new`].
    #[must_use]
    pub fn random<R: Rng + ?Sized>(rng: &mut R, m: u32) -> Self {
        Self::new(rng.next_u32(), m)
    }

    /// Hash `value` into `0..m`.
    #[inline]
    #[must_use]
    pub const fn hash(&self, value: u32) -> u32 {
        self.a.wrapping_mul(value) >> self.shift
    }
}
