//! # Four-Lane `i32` Vector
//!
//! Requires the `sse2` tier. Addition wraps on overflow.
//!
//! | Operation | Method surface | Free function |
//! |---|---|---|
//! | broadcast | [`I32x4::splat`] | [`i32x4_set1`] |
//! | add | `a + b` | [`i32x4_add`] |
//! | and | `a & b` | [`i32x4_and`] |
//! | and-not (`a & !b`) | [`I32x4::and_not`] | [`i32x4_and_not`] |
//! | store | [`I32x4::store`] | [`i32x4_store`] |
//! | convert to `f32x4` | [`I32x4::to_f32x4`] | [`i32x4_to_f32x4`] |

use crate::arch::{backend, M128i};

#[cfg(feature = "method-api")]
pub use self::methods::I32x4;

#[cfg(feature = "free-api")]
pub use self::free::*;

#[cfg(feature = "method-api")]
mod methods {
    use super::{backend, M128i};
    use crate::F32x4;

    /// Four `i32` lanes in one native register.
    #[derive(Clone, Copy)]
    #[repr(transparent)]
    pub struct I32x4(pub(crate) M128i);

    impl I32x4 {
        /// Number of lanes.
        pub const LANES: usize = 4;

        /// Wrap a native register.
        #[inline(always)]
        pub const fn from_native(v: M128i) -> Self {
            Self(v)
        }

        /// Unwrap to the native register.
        #[inline(always)]
        pub const fn to_native(self) -> M128i {
            self.0
        }

        /// Broadcast `value` into every lane.
        #[inline(always)]
        pub fn splat(value: i32) -> Self {
            Self(backend::set1_epi32(value))
        }

        /// Build from four lanes, lane 0 first.
        #[inline(always)]
        pub fn from_array(lanes: [i32; 4]) -> Self {
            Self::load(&lanes)
        }

        /// Read four lanes from unaligned memory.
        #[inline(always)]
        pub fn load(src: &[i32; 4]) -> Self {
            // SAFETY: `src` is 16 bytes.
            Self(unsafe { backend::loadu_si128(src.as_ptr().cast()) })
        }

        /// `self & !rhs`: bits of `self` not set in `rhs`.
        #[inline(always)]
        pub fn and_not(self, rhs: Self) -> Self {
            Self(backend::andnot_si128(rhs.0, self.0))
        }

        /// Write all four lanes to `dest`, which need not be aligned.
        #[inline(always)]
        pub fn store(self, dest: &mut [i32; 4]) {
            // SAFETY: `dest` is 16 bytes.
            unsafe { backend::storeu_si128(dest.as_mut_ptr().cast(), self.0) }
        }

        /// Lanes as an array.
        #[inline(always)]
        pub fn to_array(self) -> [i32; 4] {
            let mut lanes = [0; 4];
            self.store(&mut lanes);
            lanes
        }

        /// Convert each lane to the nearest representable `f32`.
        #[inline(always)]
        pub fn to_f32x4(self) -> F32x4 {
            F32x4::from_native(backend::cvtepi32_ps(self.0))
        }
    }

    impl Eq for I32x4 {}

    crate::macros::vector_impls! {
        I32x4(M128i), [i32; 4];
        add: backend::add_epi32,
        and: backend::and_si128,
    }
}

#[cfg(feature = "free-api")]
mod free {
    use super::{backend, M128i};
    use crate::storage::{RawF32x4, RawI32x4};

    crate::macros::free_functions! {
        i32x4: RawI32x4 => M128i, [i32; 4];
        set1: backend::set1_epi32,
        add: backend::add_epi32,
        and: backend::and_si128,
        andnot: backend::andnot_si128,
        load: backend::loadu_si128,
        store: backend::storeu_si128,
    }

    /// Convert each lane to the nearest representable `f32`.
    #[inline(always)]
    pub fn i32x4_to_f32x4(src: RawI32x4) -> RawF32x4 {
        crate::f32x4_from_native(backend::cvtepi32_ps(i32x4_to_native(src)))
    }
}
