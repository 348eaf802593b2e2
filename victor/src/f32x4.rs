//! # Four-Lane `f32` Vector
//!
//! Requires the `sse` tier. Conversion to integer lanes additionally
//! requires `sse2`.
//!
//! | Operation | Method surface | Free function |
//! |---|---|---|
//! | broadcast | [`F32x4::splat`] | [`f32x4_set1`] |
//! | add | `a + b` | [`f32x4_add`] |
//! | and | `a & b` | [`f32x4_and`] |
//! | and-not (`a & !b`) | [`F32x4::and_not`] | [`f32x4_and_not`] |
//! | store | [`F32x4::store`] | [`f32x4_store`] |
//! | convert to `i32x4` | [`F32x4::to_i32x4`] | [`f32x4_to_i32x4`] |
//! | reinterpret as `i8x16` | [`F32x4::as_i8x16`] | [`f32x4_as_i8x16`] |
//!
//! Addition follows IEEE-754, including infinity and NaN propagation.

use crate::arch::{backend, M128};

#[cfg(feature = "method-api")]
pub use self::methods::F32x4;

#[cfg(feature = "free-api")]
pub use self::free::*;

// =============================================================================
// METHOD SURFACE
// =============================================================================

#[cfg(feature = "method-api")]
mod methods {
    use super::{backend, M128};
    #[cfg(victor_sse2)]
    use crate::{I32x4, I8x16};

    /// Four `f32` lanes in one native register.
    #[derive(Clone, Copy)]
    #[repr(transparent)]
    pub struct F32x4(pub(crate) M128);

    impl F32x4 {
        /// Number of lanes.
        pub const LANES: usize = 4;

        /// Wrap a native register.
        #[inline(always)]
        pub const fn from_native(v: M128) -> Self {
            Self(v)
        }

        /// Unwrap to the native register.
        #[inline(always)]
        pub const fn to_native(self) -> M128 {
            self.0
        }

        /// Broadcast `value` into every lane.
        #[inline(always)]
        pub fn splat(value: f32) -> Self {
            Self(backend::set1_ps(value))
        }

        /// Build from four lanes, lane 0 first.
        #[inline(always)]
        pub fn from_array(lanes: [f32; 4]) -> Self {
            Self::load(&lanes)
        }

        /// Read four lanes from unaligned memory.
        #[inline(always)]
        pub fn load(src: &[f32; 4]) -> Self {
            // SAFETY: `src` holds exactly four lanes.
            Self(unsafe { backend::loadu_ps(src.as_ptr()) })
        }

        /// `self & !rhs`: bits of `self` not set in `rhs`.
        #[inline(always)]
        pub fn and_not(self, rhs: Self) -> Self {
            Self(backend::andnot_ps(rhs.0, self.0))
        }

        /// Write all four lanes to `dest`, which need not be aligned.
        #[inline(always)]
        pub fn store(self, dest: &mut [f32; 4]) {
            // SAFETY: `dest` holds exactly four lanes.
            unsafe { backend::storeu_ps(dest.as_mut_ptr(), self.0) }
        }

        /// Lanes as an array.
        #[inline(always)]
        pub fn to_array(self) -> [f32; 4] {
            let mut lanes = [0.0; 4];
            self.store(&mut lanes);
            lanes
        }

        /// Convert each lane to `i32`, rounding to nearest (ties to even).
        ///
        /// NaN and lanes outside the `i32` range become `i32::MIN`.
        #[cfg(victor_sse2)]
        #[inline(always)]
        pub fn to_i32x4(self) -> I32x4 {
            I32x4::from_native(backend::cvtps_epi32(self.0))
        }

        /// Reinterpret the 128 bits as sixteen `i8` lanes.
        #[cfg(victor_sse2)]
        #[inline(always)]
        pub fn as_i8x16(self) -> I8x16 {
            I8x16::from_native(backend::castps_si128(self.0))
        }
    }

    crate::macros::vector_impls! {
        F32x4(M128), [f32; 4];
        add: backend::add_ps,
        and: backend::and_ps,
    }
}

// =============================================================================
// FREE-FUNCTION SURFACE
// =============================================================================

#[cfg(feature = "free-api")]
mod free {
    use super::{backend, M128};
    use crate::storage::RawF32x4;
    #[cfg(victor_sse2)]
    use crate::storage::{RawI32x4, RawI8x16};

    crate::macros::free_functions! {
        f32x4: RawF32x4 => M128, [f32; 4];
        set1: backend::set1_ps,
        add: backend::add_ps,
        and: backend::and_ps,
        andnot: backend::andnot_ps,
        load: backend::loadu_ps,
        store: backend::storeu_ps,
    }

    /// Convert each lane to `i32`, rounding to nearest (ties to even).
    ///
    /// NaN and lanes outside the `i32` range become `i32::MIN`.
    #[cfg(victor_sse2)]
    #[inline(always)]
    pub fn f32x4_to_i32x4(src: RawF32x4) -> RawI32x4 {
        crate::i32x4_from_native(backend::cvtps_epi32(f32x4_to_native(src)))
    }

    /// Reinterpret the 128 bits as sixteen `i8` lanes.
    #[cfg(victor_sse2)]
    #[inline(always)]
    pub fn f32x4_as_i8x16(src: RawF32x4) -> RawI8x16 {
        crate::i8x16_from_native(backend::castps_si128(f32x4_to_native(src)))
    }
}

// =============================================================================
// TESTS
// =============================================================================
