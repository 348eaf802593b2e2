//! # Victor
//!
//! Fixed-width 128-bit SIMD vectors as thin typed wrappers around one native
//! register.
//!
//! ## Types
//!
//! | Shape | Lanes | Tier | Method surface | Free-function storage |
//! |---|---|---|---|---|
//! | `i8x16` | 16 × `i8` | `sse2` | `I8x16` | `RawI8x16` |
//! | `i32x4` | 4 × `i32` | `sse2` | `I32x4` | `RawI32x4` |
//! | `f32x4` | 4 × `f32` | `sse` | `F32x4` | `RawF32x4` |
//!
//! Every operation forwards to a single SSE/SSE2 instruction (or to the
//! portable emulation layer). A shape whose tier is not enabled does not
//! exist in the build, so using it is a compile error rather than a silent
//! slowdown. See [`tier`] for how tiers are chosen.
//!
//! ## Two Surfaces, One Contract
//!
//! The method surface (`method-api`) offers structs with operators; the
//! free-function surface (`free-api`) offers `<shape>_<op>` functions over
//! storage types. Both call the same backend function for every operation
//! and produce identical bits.
//!
//! Conventions shared by both:
//!
//! - `and_not(a, b)` is `a & !b`: the second operand is inverted.
//! - `to_*` converts values (`i32` ↔ `f32`, rounding to nearest even);
//!   `as_*` reinterprets bits.
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(all(feature = "method-api", feature = "free-api"))]
//! # {
//! use victor::{F32x4, I32x4, I8x16};
//!
//! let sum = F32x4::splat(1.5) + F32x4::splat(2.5);
//! assert_eq!(sum.to_array(), [4.0; 4]);
//!
//! let mut lanes = [0.0f32; 4];
//! I32x4::splat(-1).to_f32x4().store(&mut lanes);
//! assert_eq!(lanes, [-1.0; 4]);
//!
//! let v = victor::i8x16_set(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15);
//! let mut bytes = [0i8; 16];
//! victor::i8x16_store(&mut bytes, v);
//! assert_eq!(I8x16::from_array(bytes).to_array()[15], 15);
//! # }
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(victor_vector_extensions, feature(portable_simd))]

pub mod tier;

mod arch;
mod macros;

#[cfg(all(feature = "free-api", victor_sse))]
mod storage;

#[cfg(victor_sse)]
mod f32x4;
#[cfg(victor_sse2)]
mod i32x4;
#[cfg(victor_sse2)]
mod i8x16;

#[cfg(victor_sse)]
pub use arch::M128;
#[cfg(victor_sse2)]
pub use arch::M128i;

#[cfg(victor_sse)]
pub use f32x4::*;
#[cfg(victor_sse2)]
pub use i32x4::*;
#[cfg(victor_sse2)]
pub use i8x16::*;

#[cfg(all(feature = "free-api", victor_sse))]
pub use storage::RawF32x4;
#[cfg(all(feature = "free-api", victor_sse2))]
pub use storage::{RawI32x4, RawI8x16};

pub use tier::{Backend, Configuration, Tier, TierError, TierSet, TierSource, CONFIG};

// =============================================================================
// TESTS
// =============================================================================

/// Both surfaces must agree bit for bit on every operation.
#[cfg(all(test, feature = "method-api", feature = "free-api", victor_sse2))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn f32_bits(lanes: [f32; 4]) -> [u32; 4] {
        lanes.map(f32::to_bits)
    }

    #[test]
    fn test_store_scenarios() {
        let mut bytes = [0i8; 16];
        i8x16_store(
            &mut bytes,
            i8x16_set(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15),
        );
        assert_eq!(bytes, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);

        let mut floats = [0.0f32; 4];
        f32x4_store(&mut floats, f32x4_add(f32x4_set1(1.5), f32x4_set1(2.5)));
        assert_eq!(floats, [4.0; 4]);

        f32x4_store(&mut floats, i32x4_to_f32x4(i32x4_set1(-1)));
        assert_eq!(floats, [-1.0; 4]);
    }

    #[test]
    fn test_native_wrappers_are_bit_exact() {
        let v = I8x16::new(-8, 7, -6, 5, -4, 3, -2, 1, 0, -1, 2, -3, 4, -5, 6, -7);
        let raw = i8x16_from_native(v.to_native());
        assert_eq!(I8x16::from_native(i8x16_to_native(raw)), v);
    }

    proptest! {
        #[test]
        fn prop_i8x16_surfaces_agree(a in any::<[i8; 16]>(), b in any::<[i8; 16]>()) {
            let (ma, mb) = (I8x16::from_array(a), I8x16::from_array(b));
            let (fa, fb) = (i8x16_load(&a), i8x16_load(&b));
            let mut out = [0i8; 16];

            i8x16_store(&mut out, i8x16_add(fa, fb));
            prop_assert_eq!(out, (ma + mb).to_array());
            i8x16_store(&mut out, i8x16_and(fa, fb));
            prop_assert_eq!(out, (ma & mb).to_array());
            i8x16_store(&mut out, i8x16_and_not(fa, fb));
            prop_assert_eq!(out, ma.and_not(mb).to_array());

            let mut floats = [0.0f32; 4];
            f32x4_store(&mut floats, i8x16_as_f32x4(fa));
            prop_assert_eq!(f32_bits(floats), f32_bits(ma.as_f32x4().to_array()));
        }

        #[test]
        fn prop_i32x4_surfaces_agree(a in any::<[i32; 4]>(), b in any::<[i32; 4]>(), s in any::<i32>()) {
            let (ma, mb) = (I32x4::from_array(a), I32x4::from_array(b));
            let (fa, fb) = (i32x4_load(&a), i32x4_load(&b));
            let mut out = [0i32; 4];

            i32x4_store(&mut out, i32x4_set1(s));
            prop_assert_eq!(out, I32x4::splat(s).to_array());
            i32x4_store(&mut out, i32x4_add(fa, fb));
            prop_assert_eq!(out, (ma + mb).to_array());
            i32x4_store(&mut out, i32x4_and(fa, fb));
            prop_assert_eq!(out, (ma & mb).to_array());
            i32x4_store(&mut out, i32x4_and_not(fa, fb));
            prop_assert_eq!(out, ma.and_not(mb).to_array());

            let mut floats = [0.0f32; 4];
            f32x4_store(&mut floats, i32x4_to_f32x4(fa));
            prop_assert_eq!(f32_bits(floats), f32_bits(ma.to_f32x4().to_array()));
        }

        #[test]
        fn prop_f32x4_surfaces_agree(a in any::<[u32; 4]>(), b in any::<[u32; 4]>()) {
            let (a, b) = (a.map(f32::from_bits), b.map(f32::from_bits));
            let (ma, mb) = (F32x4::from_array(a), F32x4::from_array(b));
            let (fa, fb) = (f32x4_load(&a), f32x4_load(&b));
            let mut out = [0.0f32; 4];

            f32x4_store(&mut out, f32x4_add(fa, fb));
            prop_assert_eq!(f32_bits(out), f32_bits((ma + mb).to_array()));
            f32x4_store(&mut out, f32x4_and(fa, fb));
            prop_assert_eq!(f32_bits(out), f32_bits((ma & mb).to_array()));
            f32x4_store(&mut out, f32x4_and_not(fa, fb));
            prop_assert_eq!(f32_bits(out), f32_bits(ma.and_not(mb).to_array()));

            let mut ints = [0i32; 4];
            i32x4_store(&mut ints, f32x4_to_i32x4(fa));
            prop_assert_eq!(ints, ma.to_i32x4().to_array());

            let mut bytes = [0i8; 16];
            i8x16_store(&mut bytes, f32x4_as_i8x16(fa));
            prop_assert_eq!(bytes, ma.as_i8x16().to_array());
        }
    }
}
