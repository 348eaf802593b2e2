//! # Register Backends
//!
//! Native 128-bit register types and the operation set every vector shape
//! forwards to. Exactly one backend is selected by `build.rs`:
//!
//! - `x86`: `core::arch` SSE/SSE2 intrinsics (`victor_native`)
//! - `emulated`: portable byte-array registers (`victor_emulated`)
//!
//! Both backends expose the same functions, named after the intrinsic they
//! stand for (`add_epi8`, `andnot_ps`, ...). Intrinsic argument order is kept:
//! `andnot_*(a, b)` computes `!a & b`.

cfg_if::cfg_if! {
    if #[cfg(victor_native)] {
        pub(crate) mod x86;
        pub(crate) use self::x86 as backend;
    } else if #[cfg(victor_emulated)] {
        pub(crate) use self::emulated as backend;
    }
}

#[cfg(any(victor_emulated, all(test, victor_native)))]
#[cfg_attr(not(victor_emulated), allow(dead_code))]
pub(crate) mod emulated;

#[cfg(any(victor_native, victor_emulated))]
pub use self::backend::M128;
#[cfg(all(victor_sse2, any(victor_native, victor_emulated)))]
pub use self::backend::M128i;

#[cfg(any(victor_native, victor_emulated))]
mod layout {
    use super::backend;
    use static_assertions::{assert_eq_align, const_assert_eq};

    const_assert_eq!(core::mem::size_of::<backend::M128>(), 16);
    const_assert_eq!(core::mem::align_of::<backend::M128>(), 16);

    #[cfg(victor_sse2)]
    assert_eq_align!(backend::M128i, backend::M128);
    #[cfg(victor_sse2)]
    const_assert_eq!(core::mem::size_of::<backend::M128i>(), 16);
}

// =============================================================================
// TESTS
// =============================================================================

/// The portable backend must produce the same bytes as the hardware one.
#[cfg(all(test, victor_native, victor_sse2))]
mod tests {
    use super::{backend as hw, emulated as sw};
    use proptest::prelude::*;

    fn hw_i32(v: hw::M128i) -> [i32; 4] {
        let mut out = [0i32; 4];
        unsafe { hw::storeu_si128(out.as_mut_ptr().cast(), v) };
        out
    }

    fn sw_i32(v: sw::M128i) -> [i32; 4] {
        let mut out = [0i32; 4];
        unsafe { sw::storeu_si128(out.as_mut_ptr().cast(), v) };
        out
    }

    fn hw_f32(v: hw::M128) -> [u32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { hw::storeu_ps(out.as_mut_ptr(), v) };
        out.map(f32::to_bits)
    }

    fn sw_f32(v: sw::M128) -> [u32; 4] {
        let mut out = [0.0f32; 4];
        unsafe { sw::storeu_ps(out.as_mut_ptr(), v) };
        out.map(f32::to_bits)
    }

    proptest! {
        #[test]
        fn prop_integer_ops_agree(a in any::<[i8; 16]>(), b in any::<[i8; 16]>()) {
            let (ha, hb) = (hw::setr_epi8(a), hw::setr_epi8(b));
            let (sa, sb) = (sw::setr_epi8(a), sw::setr_epi8(b));

            prop_assert_eq!(hw_i32(hw::add_epi8(ha, hb)), sw_i32(sw::add_epi8(sa, sb)));
            prop_assert_eq!(hw_i32(hw::add_epi32(ha, hb)), sw_i32(sw::add_epi32(sa, sb)));
            prop_assert_eq!(hw_i32(hw::and_si128(ha, hb)), sw_i32(sw::and_si128(sa, sb)));
            prop_assert_eq!(hw_i32(hw::andnot_si128(ha, hb)), sw_i32(sw::andnot_si128(sa, sb)));
            prop_assert_eq!(hw_f32(hw::cvtepi32_ps(ha)), sw_f32(sw::cvtepi32_ps(sa)));
        }

        #[test]
        fn prop_float_ops_agree(a in any::<[u32; 4]>(), b in any::<[u32; 4]>()) {
            let (a, b) = (a.map(f32::from_bits), b.map(f32::from_bits));
            let (ha, hb) = unsafe { (hw::loadu_ps(a.as_ptr()), hw::loadu_ps(b.as_ptr())) };
            let (sa, sb) = unsafe { (sw::loadu_ps(a.as_ptr()), sw::loadu_ps(b.as_ptr())) };

            prop_assert_eq!(hw_f32(hw::and_ps(ha, hb)), sw_f32(sw::and_ps(sa, sb)));
            prop_assert_eq!(hw_f32(hw::andnot_ps(ha, hb)), sw_f32(sw::andnot_ps(sa, sb)));
            prop_assert_eq!(hw_i32(hw::cvtps_epi32(ha)), sw_i32(sw::cvtps_epi32(sa)));
            prop_assert_eq!(hw_i32(hw::castps_si128(ha)), sw_i32(sw::castps_si128(sa)));

            let (hsum, ssum) = (hw_f32(hw::add_ps(ha, hb)), sw_f32(sw::add_ps(sa, sb)));
            for i in 0..4 {
                if f32::from_bits(hsum[i]).is_nan() {
                    prop_assert!(f32::from_bits(ssum[i]).is_nan());
                } else {
                    prop_assert_eq!(hsum[i], ssum[i]);
                }
            }
        }

        #[test]
        fn prop_splats_agree(x in any::<i32>(), y in any::<i8>()) {
            prop_assert_eq!(hw_i32(hw::set1_epi32(x)), sw_i32(sw::set1_epi32(x)));
            prop_assert_eq!(hw_i32(hw::set1_epi8(y)), sw_i32(sw::set1_epi8(y)));
            let f = x as f32;
            prop_assert_eq!(hw_f32(hw::set1_ps(f)), sw_f32(sw::set1_ps(f)));
        }
    }
}
