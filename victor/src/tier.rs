//! # Instruction-Set Tiers
//!
//! Compile-time description of which SIMD tiers this build of Victor uses.
//!
//! ## Tier Chain
//!
//! ```text
//! sse < sse2 < sse3 < ssse3 < sse4.1 < sse4.2 < avx < avx2
//! ```
//!
//! Enabling a tier enables every tier to its left. Each tier is enabled by
//! (in order of preference) a `force-*` feature, the `emulation` feature, a
//! native target feature, or a higher enabled tier. `build.rs` resolves the
//! chain once; this module exposes the result as [`CONFIG`].
//!
//! ## Usage
//!
//! ```rust
//! use victor::tier::{Tier, CONFIG};
//!
//! if CONFIG.is_enabled(Tier::Sse2) {
//!     // integer lane vectors are available
//! }
//! CONFIG.log_summary();
//! ```

use core::fmt;
use core::str::FromStr;

// =============================================================================
// TIERS
// =============================================================================

/// One instruction-set extension level, ordered narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Tier {
    /// SSE: 128-bit float vectors
    Sse = 0,
    /// SSE2: 128-bit integer vectors, float/integer conversion
    Sse2 = 1,
    /// SSE3
    Sse3 = 2,
    /// Supplemental SSE3
    Ssse3 = 3,
    /// SSE4.1
    Sse41 = 4,
    /// SSE4.2
    Sse42 = 5,
    /// AVX
    Avx = 6,
    /// AVX2
    Avx2 = 7,
}

impl Tier {
    /// Every tier, narrowest first.
    pub const ALL: [Tier; 8] = [
        Tier::Sse,
        Tier::Sse2,
        Tier::Sse3,
        Tier::Ssse3,
        Tier::Sse41,
        Tier::Sse42,
        Tier::Avx,
        Tier::Avx2,
    ];

    /// Canonical lowercase name, matching the rustc target feature.
    pub const fn name(self) -> &'static str {
        match self {
            Tier::Sse => "sse",
            Tier::Sse2 => "sse2",
            Tier::Sse3 => "sse3",
            Tier::Ssse3 => "ssse3",
            Tier::Sse41 => "sse4.1",
            Tier::Sse42 => "sse4.2",
            Tier::Avx => "avx",
            Tier::Avx2 => "avx2",
        }
    }

    /// Single-bit set for this tier.
    #[inline]
    pub const fn flag(self) -> TierSet {
        TierSet::from_bits_truncate(1 << self as u8)
    }

    /// This tier together with every tier it implies.
    #[inline]
    pub const fn implied(self) -> TierSet {
        TierSet::from_bits_truncate(((1u16 << (self as u8 + 1)) - 1) as u8)
    }

    const fn from_index(index: u32) -> Option<Tier> {
        match index {
            0 => Some(Tier::Sse),
            1 => Some(Tier::Sse2),
            2 => Some(Tier::Sse3),
            3 => Some(Tier::Ssse3),
            4 => Some(Tier::Sse41),
            5 => Some(Tier::Sse42),
            6 => Some(Tier::Avx),
            7 => Some(Tier::Avx2),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = TierError;

    /// Accepts `sse4.1`, `sse4_1` and `sse41` spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Tier::ALL
            .into_iter()
            .find(|tier| tier.spellings().iter().any(|name| name.eq_ignore_ascii_case(s)))
            .ok_or(TierError::UnknownTier)
    }
}

impl Tier {
    const fn spellings(self) -> &'static [&'static str] {
        match self {
            Tier::Sse41 => &["sse4.1", "sse4_1", "sse41"],
            Tier::Sse42 => &["sse4.2", "sse4_2", "sse42"],
            Tier::Sse => &["sse"],
            Tier::Sse2 => &["sse2"],
            Tier::Sse3 => &["sse3"],
            Tier::Ssse3 => &["ssse3"],
            Tier::Avx => &["avx"],
            Tier::Avx2 => &["avx2"],
        }
    }
}

// =============================================================================
// TIER SETS
// =============================================================================

bitflags::bitflags! {
    /// Set of tiers, one bit per [`Tier`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TierSet: u8 {
        /// SSE
        const SSE = 1 << 0;
        /// SSE2
        const SSE2 = 1 << 1;
        /// SSE3
        const SSE3 = 1 << 2;
        /// SSSE3
        const SSSE3 = 1 << 3;
        /// SSE4.1
        const SSE4_1 = 1 << 4;
        /// SSE4.2
        const SSE4_2 = 1 << 5;
        /// AVX
        const AVX = 1 << 6;
        /// AVX2
        const AVX2 = 1 << 7;
    }
}

impl TierSet {
    /// Widest tier in the set.
    pub const fn highest(self) -> Option<Tier> {
        if self.is_empty() {
            return None;
        }
        Tier::from_index(7 - self.bits().leading_zeros())
    }

    /// Whether every tier below a member is also a member.
    pub const fn is_downward_closed(self) -> bool {
        match self.highest() {
            Some(tier) => tier.implied().bits() == self.bits(),
            None => true,
        }
    }

    /// Close the set downwards under tier implication.
    pub const fn closure(self) -> TierSet {
        match self.highest() {
            Some(tier) => tier.implied(),
            None => TierSet::empty(),
        }
    }

    /// Tiers in the set, narrowest first.
    pub fn tiers(self) -> impl Iterator<Item = Tier> {
        Tier::ALL
            .into_iter()
            .filter(move |tier| self.contains(tier.flag()))
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Why a tier is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierSource {
    /// Explicit `force-*` feature
    Forced,
    /// Satisfied by the portable emulation layer
    Emulated,
    /// Native target feature reported by the compiler
    Native,
    /// Enabled only because a higher tier is
    Implied,
}

/// Which implementation the vector operations compile down to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Platform intrinsics (`core::arch`)
    Native,
    /// Portable emulation layer
    Emulated,
    /// No vector types are available
    None,
}

/// Resolved build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    /// Every enabled tier (downward closed)
    pub enabled: TierSet,
    /// Tiers named by a `force-*` feature
    pub forced: TierSet,
    /// Tiers provided by the emulation layer
    pub emulated: TierSet,
    /// Tiers the compiler targets natively
    pub native: TierSet,
    /// Selected backend
    pub backend: Backend,
    /// Free-function storage uses compiler vector builtins
    pub vector_extensions: bool,
    /// Free-function surface is compiled
    pub free_api: bool,
    /// Method/operator surface is compiled
    pub method_api: bool,
}

/// Configuration this crate was compiled with.
pub const CONFIG: Configuration = Configuration::compiled();

const fn parse_mask(s: &str) -> TierSet {
    let bytes = s.as_bytes();
    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        if digit.is_ascii_digit() {
            value = value * 10 + (digit - b'0') as u32;
        }
        i += 1;
    }
    TierSet::from_bits_truncate(value as u8)
}

impl Configuration {
    /// Descriptor produced by `build.rs` for this compilation.
    pub const fn compiled() -> Self {
        let backend = if cfg!(victor_native) {
            Backend::Native
        } else if cfg!(victor_emulated) {
            Backend::Emulated
        } else {
            Backend::None
        };

        Self {
            enabled: parse_mask(env!("VICTOR_TIERS_ENABLED")),
            forced: parse_mask(env!("VICTOR_TIERS_FORCED")),
            emulated: parse_mask(env!("VICTOR_TIERS_EMULATED")),
            native: parse_mask(env!("VICTOR_TIERS_NATIVE")),
            backend,
            vector_extensions: cfg!(victor_vector_extensions),
            free_api: cfg!(feature = "free-api"),
            method_api: cfg!(feature = "method-api"),
        }
    }

    /// Widest enabled tier.
    #[inline]
    pub const fn highest(&self) -> Option<Tier> {
        self.enabled.highest()
    }

    /// Whether `tier` is enabled.
    #[inline]
    pub const fn is_enabled(&self, tier: Tier) -> bool {
        self.enabled.contains(tier.flag())
    }

    /// Why `tier` is enabled, or `None` when it isn't.
    pub const fn source(&self, tier: Tier) -> Option<TierSource> {
        let flag = tier.flag();
        if !self.enabled.contains(flag) {
            None
        } else if self.forced.contains(flag) {
            Some(TierSource::Forced)
        } else if self.emulated.contains(flag) {
            Some(TierSource::Emulated)
        } else if self.native.contains(flag) {
            Some(TierSource::Native)
        } else {
            Some(TierSource::Implied)
        }
    }

    /// Tiers the native backend executes instructions from.
    ///
    /// Empty unless the backend is [`Backend::Native`].
    pub const fn hardware(&self) -> TierSet {
        match self.backend {
            Backend::Native => self.forced.union(self.native).closure(),
            _ => TierSet::empty(),
        }
    }

    /// Log the configuration through the `log` facade.
    pub fn log_summary(&self) {
        match self.highest() {
            Some(tier) => log::info!(
                "victor: {:?} backend, highest tier {} (vector extensions: {})",
                self.backend,
                tier,
                self.vector_extensions
            ),
            None => log::info!("victor: no SIMD tier enabled, vector types unavailable"),
        }
        for tier in Tier::ALL {
            match self.source(tier) {
                Some(source) => log::debug!("victor: tier {} enabled ({:?})", tier, source),
                None => log::debug!("victor: tier {} disabled", tier),
            }
        }
    }

    /// Check that the running CPU supports every tier the native backend uses.
    ///
    /// Only forced tiers can fail this: a build targeting a feature natively
    /// cannot start on a CPU without it.
    #[cfg(feature = "std")]
    pub fn verify_host(&self) -> Result<(), TierError> {
        let mut missing = None;
        for tier in self.hardware().tiers() {
            if !host_supports(tier) {
                log::warn!("victor: tier {} compiled in but missing on host CPU", tier);
                if missing.is_none() {
                    missing = Some(tier);
                }
            }
        }
        match missing {
            Some(tier) => Err(TierError::MissingOnHost(tier)),
            None => Ok(()),
        }
    }
}

#[cfg(all(feature = "std", any(target_arch = "x86", target_arch = "x86_64")))]
fn host_supports(tier: Tier) -> bool {
    match tier {
        Tier::Sse => std::is_x86_feature_detected!("sse"),
        Tier::Sse2 => std::is_x86_feature_detected!("sse2"),
        Tier::Sse3 => std::is_x86_feature_detected!("sse3"),
        Tier::Ssse3 => std::is_x86_feature_detected!("ssse3"),
        Tier::Sse41 => std::is_x86_feature_detected!("sse4.1"),
        Tier::Sse42 => std::is_x86_feature_detected!("sse4.2"),
        Tier::Avx => std::is_x86_feature_detected!("avx"),
        Tier::Avx2 => std::is_x86_feature_detected!("avx2"),
    }
}

#[cfg(all(feature = "std", not(any(target_arch = "x86", target_arch = "x86_64"))))]
fn host_supports(_tier: Tier) -> bool {
    false
}

// =============================================================================
// ERRORS
// =============================================================================

/// Tier configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierError {
    /// Name does not match any tier
    UnknownTier,
    /// Tier is compiled in but the running CPU lacks it
    MissingOnHost(Tier),
}

impl fmt::Display for TierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierError::UnknownTier => write!(f, "Unknown instruction-set tier"),
            TierError::MissingOnHost(tier) => {
                write!(f, "Tier {} is compiled in but not supported by this CPU", tier)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TierError {}

// =============================================================================
// TESTS
// =============================================================================
