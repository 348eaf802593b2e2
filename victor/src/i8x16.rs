//! # Sixteen-Lane `i8` Vector
//!
//! Requires the `sse2` tier. Addition wraps on overflow. Lane `n` is the
//! byte at offset `n` when stored.
//!
//! | Operation | Method surface | Free function |
//! |---|---|---|
//! | broadcast | [`I8x16::splat`] | [`i8x16_set1`] |
//! | per-lane | [`I8x16::new`] | [`i8x16_set`] |
//! | add | `a + b` | [`i8x16_add`] |
//! | and | `a & b` | [`i8x16_and`] |
//! | and-not (`a & !b`) | [`I8x16::and_not`] | [`i8x16_and_not`] |
//! | store | [`I8x16::store`] | [`i8x16_store`] |
//! | reinterpret as `f32x4` | [`I8x16::as_f32x4`] | [`i8x16_as_f32x4`] |

use crate::arch::{backend, M128i};

#[cfg(feature = "method-api")]
pub use self::methods::I8x16;

#[cfg(feature = "free-api")]
pub use self::free::*;

#[cfg(feature = "method-api")]
mod methods {
    use super::{backend, M128i};
    use crate::F32x4;

    /// Sixteen `i8` lanes in one native register.
    #[derive(Clone, Copy)]
    #[repr(transparent)]
    pub struct I8x16(pub(crate) M128i);

    impl I8x16 {
        /// Number of lanes.
        pub const LANES: usize = 16;

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
        pub fn splat(value: i8) -> Self {
            Self(backend::set1_epi8(value))
        }

        /// Build from sixteen lanes; `e0` is stored at the lowest address.
        #[inline(always)]
        pub fn new(
            e0: i8,
            e1: i8,
            e2: i8,
            e3: i8,
            e4: i8,
            e5: i8,
            e6: i8,
            e7: i8,
            e8: i8,
            e9: i8,
            e10: i8,
            e11: i8,
            e12: i8,
            e13: i8,
            e14: i8,
            e15: i8,
        ) -> Self {
            Self(backend::setr_epi8([
                e0, e1, e2, e3, e4, e5, e6, e7, e8, e9, e10, e11, e12, e13, e14, e15,
            ]))
        }

        /// Build from sixteen lanes, lane 0 first.
        #[inline(always)]
        pub fn from_array(lanes: [i8; 16]) -> Self {
            Self(backend::setr_epi8(lanes))
        }

        /// Read sixteen lanes from unaligned memory.
        #[inline(always)]
        pub fn load(src: &[i8; 16]) -> Self {
            // SAFETY: `src` is 16 bytes.
            Self(unsafe { backend::loadu_si128(src.as_ptr().cast()) })
        }

        /// `self & !rhs`: bits of `self` not set in `rhs`.
        #[inline(always)]
        pub fn and_not(self, rhs: Self) -> Self {
            Self(backend::andnot_si128(rhs.0, self.0))
        }

        /// Write all sixteen lanes to `dest`, which need not be aligned.
        #[inline(always)]
        pub fn store(self, dest: &mut [i8; 16]) {
            // SAFETY: `dest` is 16 bytes.
            unsafe { backend::storeu_si128(dest.as_mut_ptr().cast(), self.0) }
        }

        /// Lanes as an array.
        #[inline(always)]
        pub fn to_array(self) -> [i8; 16] {
            let mut lanes = [0; 16];
            self.store(&mut lanes);
            lanes
        }

        /// Reinterpret the 128 bits as four `f32` lanes. No value conversion.
        #[inline(always)]
        pub fn as_f32x4(self) -> F32x4 {
            F32x4::from_native(backend::castsi128_ps(self.0))
        }
    }

    impl Eq for I8x16 {}

    crate::macros::vector_impls! {
        I8x16(M128i), [i8; 16];
        add: backend::add_epi8,
        and: backend::and_si128,
    }
}

#[cfg(feature = "free-api")]
mod free {
    use super::{backend, M128i};
    use crate::storage::{RawF32x4, RawI8x16};

    crate::macros::free_functions! {
        i8x16: RawI8x16 => M128i, [i8; 16];
        set1: backend::set1_epi8,
        add: backend::add_epi8,
        and: backend::and_si128,
        andnot: backend::andnot_si128,
        load: backend::loadu_si128,
        store: backend::storeu_si128,
    }

    /// Build from sixteen lanes; `e0` is stored at the lowest address.
    #[inline(always)]
    pub fn i8x16_set(
        e0: i8,
        e1: i8,
        e2: i8,
        e3: i8,
        e4: i8,
        e5: i8,
        e6: i8,
        e7: i8,
        e8: i8,
        e9: i8,
        e10: i8,
        e11: i8,
        e12: i8,
        e13: i8,
        e14: i8,
        e15: i8,
    ) -> RawI8x16 {
        i8x16_from_native(backend::setr_epi8([
            e0, e1, e2, e3, e4, e5, e6, e7, e8, e9, e10, e11, e12, e13, e14, e15,
        ]))
    }

    /// Reinterpret the 128 bits as four `f32` lanes. No value conversion.
    #[inline(always)]
    pub fn i8x16_as_f32x4(src: RawI8x16) -> RawF32x4 {
        crate::f32x4_from_native(backend::castsi128_ps(i8x16_to_native(src)))
    }
}

#[cfg(all(test, feature = "method-api"))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SEQUENCE: [i8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

    #[test]
    fn test_per_lane_order() {
        let v = I8x16::new(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15);
        let mut out = [0i8; 16];
        v.store(&mut out);
        assert_eq!(out, SEQUENCE);
        assert_eq!(I8x16::from_array(SEQUENCE), v);
        assert_eq!(I8x16::load(&SEQUENCE), v);
    }

    #[test]
    fn test_add_wraps() {
        let sum = I8x16::splat(i8::MAX) + I8x16::splat(1);
        assert_eq!(sum.to_array(), [i8::MIN; 16]);
        let sum = I8x16::splat(-100) + I8x16::splat(-100);
        assert_eq!(sum.to_array(), [56; 16]);
    }

    #[test]
    fn test_as_f32x4_is_bitcast_not_conversion() {
        let bytes = 1.0f32.to_ne_bytes().map(|b| b as i8);
        let mut lanes = [0i8; 16];
        for chunk in lanes.chunks_exact_mut(4) {
            chunk.copy_from_slice(&bytes);
        }
        assert_eq!(I8x16::from_array(lanes).as_f32x4().to_array(), [1.0; 4]);

        // A value conversion of 1 would give 1.0; a bitcast gives a denormal.
        let ones = I8x16::splat(1).as_f32x4().to_array();
        assert_eq!(ones[0].to_bits(), 0x0101_0101);
    }

    #[test]
    fn test_debug() {
        let text = format!("{:?}", I8x16::splat(-1));
        assert!(text.starts_with("I8x16([-1, -1,"));
    }

    proptest! {
        #[test]
        fn prop_splat_fills_every_lane(s in any::<i8>()) {
            prop_assert_eq!(I8x16::splat(s).to_array(), [s; 16]);
        }

        #[test]
        fn prop_add_matches_wrapping_scalar(a in any::<[i8; 16]>(), b in any::<[i8; 16]>()) {
            let sum = (I8x16::from_array(a) + I8x16::from_array(b)).to_array();
            for i in 0..16 {
                prop_assert_eq!(sum[i], a[i].wrapping_add(b[i]));
            }
        }

        #[test]
        fn prop_bitwise_ops(a in any::<[i8; 16]>(), b in any::<[i8; 16]>()) {
            let (va, vb) = (I8x16::from_array(a), I8x16::from_array(b));
            let and = (va & vb).to_array();
            let and_not = va.and_not(vb).to_array();
            for i in 0..16 {
                prop_assert_eq!(and[i], a[i] & b[i]);
                prop_assert_eq!(and_not[i], a[i] & !b[i]);
            }
            prop_assert_eq!(va & va.and_not(va), I8x16::splat(0));
        }

        #[test]
        fn prop_bitcast_roundtrip(a in any::<[i8; 16]>()) {
            let v = I8x16::from_array(a);
            prop_assert_eq!(v.as_f32x4().as_i8x16(), v);
        }
    }
}
