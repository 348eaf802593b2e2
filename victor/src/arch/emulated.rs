//! Portable emulation of the SSE/SSE2 register operations.
//!
//! Registers are 16 bytes in native byte order, so lane `n` sits at the same
//! memory offset a native store would put it. Results match the intrinsics
//! bit for bit, including `cvtps_epi32` rounding and its `i32::MIN`
//! out-of-range value.

use core::fmt;
use core::ptr;

/// Emulated four-lane float register.
#[derive(Clone, Copy)]
#[repr(C, align(16))]
pub struct M128 {
    bytes: [u8; 16],
}

/// Emulated integer register.
#[derive(Clone, Copy)]
#[repr(C, align(16))]
pub struct M128i {
    bytes: [u8; 16],
}

impl fmt::Debug for M128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("M128")
            .field(&format_args!("{:#034x}", u128::from_ne_bytes(self.bytes)))
            .finish()
    }
}

impl fmt::Debug for M128i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("M128i")
            .field(&format_args!("{:#034x}", u128::from_ne_bytes(self.bytes)))
            .finish()
    }
}

// =============================================================================
// LANE VIEWS
// =============================================================================

#[inline(always)]
fn i8_lanes(v: M128i) -> [i8; 16] {
    v.bytes.map(|b| b as i8)
}

#[inline(always)]
fn from_i8_lanes(lanes: [i8; 16]) -> M128i {
    M128i { bytes: lanes.map(|l| l as u8) }
}

#[inline(always)]
fn words(bytes: [u8; 16]) -> [u32; 4] {
    let mut out = [0u32; 4];
    for (word, chunk) in out.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    out
}

#[inline(always)]
fn from_words(words: [u32; 4]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_ne_bytes());
    }
    out
}

#[inline(always)]
fn i32_lanes(v: M128i) -> [i32; 4] {
    words(v.bytes).map(|w| w as i32)
}

#[inline(always)]
fn from_i32_lanes(lanes: [i32; 4]) -> M128i {
    M128i { bytes: from_words(lanes.map(|l| l as u32)) }
}

#[inline(always)]
fn f32_lanes(v: M128) -> [f32; 4] {
    words(v.bytes).map(f32::from_bits)
}

#[inline(always)]
fn from_f32_lanes(lanes: [f32; 4]) -> M128 {
    M128 { bytes: from_words(lanes.map(f32::to_bits)) }
}

#[inline(always)]
fn zip_bytes(a: [u8; 16], b: [u8; 16], f: impl Fn(u8, u8) -> u8) -> [u8; 16] {
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = f(a[i], b[i]);
    }
    out
}

// =============================================================================
// SSE
// =============================================================================

#[inline(always)]
pub(crate) fn set1_ps(value: f32) -> M128 {
    from_f32_lanes([value; 4])
}

#[inline(always)]
pub(crate) fn add_ps(a: M128, b: M128) -> M128 {
    let (a, b) = (f32_lanes(a), f32_lanes(b));
    from_f32_lanes([a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]])
}

#[inline(always)]
pub(crate) fn and_ps(a: M128, b: M128) -> M128 {
    M128 { bytes: zip_bytes(a.bytes, b.bytes, |x, y| x & y) }
}

#[inline(always)]
pub(crate) fn andnot_ps(a: M128, b: M128) -> M128 {
    M128 { bytes: zip_bytes(a.bytes, b.bytes, |x, y| !x & y) }
}

/// # Safety
/// `src` must be valid for reading four `f32`s; no alignment is required.
#[inline(always)]
pub(crate) unsafe fn loadu_ps(src: *const f32) -> M128 {
    M128 { bytes: unsafe { ptr::read_unaligned(src.cast::<[u8; 16]>()) } }
}

/// # Safety
/// `dst` must be valid for writing four `f32`s; no alignment is required.
#[inline(always)]
pub(crate) unsafe fn storeu_ps(dst: *mut f32, v: M128) {
    unsafe { ptr::write_unaligned(dst.cast::<[u8; 16]>(), v.bytes) }
}

// =============================================================================
// SSE2
// =============================================================================

#[inline(always)]
pub(crate) fn set1_epi8(value: i8) -> M128i {
    from_i8_lanes([value; 16])
}

#[inline(always)]
pub(crate) fn setr_epi8(e: [i8; 16]) -> M128i {
    from_i8_lanes(e)
}

#[inline(always)]
pub(crate) fn set1_epi32(value: i32) -> M128i {
    from_i32_lanes([value; 4])
}

#[inline(always)]
pub(crate) fn add_epi8(a: M128i, b: M128i) -> M128i {
    let (a, b) = (i8_lanes(a), i8_lanes(b));
    from_i8_lanes(core::array::from_fn(|i| a[i].wrapping_add(b[i])))
}

#[inline(always)]
pub(crate) fn add_epi32(a: M128i, b: M128i) -> M128i {
    let (a, b) = (i32_lanes(a), i32_lanes(b));
    from_i32_lanes([
        a[0].wrapping_add(b[0]),
        a[1].wrapping_add(b[1]),
        a[2].wrapping_add(b[2]),
        a[3].wrapping_add(b[3]),
    ])
}

#[inline(always)]
pub(crate) fn and_si128(a: M128i, b: M128i) -> M128i {
    M128i { bytes: zip_bytes(a.bytes, b.bytes, |x, y| x & y) }
}

#[inline(always)]
pub(crate) fn andnot_si128(a: M128i, b: M128i) -> M128i {
    M128i { bytes: zip_bytes(a.bytes, b.bytes, |x, y| !x & y) }
}

/// # Safety
/// `src` must be valid for reading 16 bytes; no alignment is required.
#[inline(always)]
pub(crate) unsafe fn loadu_si128(src: *const M128i) -> M128i {
    unsafe { ptr::read_unaligned(src) }
}

/// # Safety
/// `dst` must be valid for writing 16 bytes; no alignment is required.
#[inline(always)]
pub(crate) unsafe fn storeu_si128(dst: *mut M128i, v: M128i) {
    unsafe { ptr::write_unaligned(dst, v) }
}

#[inline(always)]
pub(crate) fn castsi128_ps(v: M128i) -> M128 {
    M128 { bytes: v.bytes }
}

#[inline(always)]
pub(crate) fn castps_si128(v: M128) -> M128i {
    M128i { bytes: v.bytes }
}

#[inline(always)]
pub(crate) fn cvtepi32_ps(v: M128i) -> M128 {
    from_f32_lanes(i32_lanes(v).map(|l| l as f32))
}

#[inline(always)]
pub(crate) fn cvtps_epi32(v: M128) -> M128i {
    from_i32_lanes(f32_lanes(v).map(round_ties_even_to_i32))
}

/// Round to nearest, ties to even. NaN and lanes outside `i32` range give
/// `i32::MIN`.
fn round_ties_even_to_i32(x: f32) -> i32 {
    // Adding and removing 2^23 drops the fraction using the FPU's
    // nearest-even rounding.
    const TWO_POW_23: f32 = 8_388_608.0;
    const LIMIT: f32 = 2_147_483_648.0;

    if !(x >= -LIMIT && x < LIMIT) {
        return i32::MIN;
    }
    let rounded = if x >= TWO_POW_23 || x <= -TWO_POW_23 {
        x
    } else if x >= 0.0 {
        (x + TWO_POW_23) - TWO_POW_23
    } else {
        (x - TWO_POW_23) + TWO_POW_23
    };
    rounded as i32
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_ties_even() {
        assert_eq!(round_ties_even_to_i32(0.5), 0);
        assert_eq!(round_ties_even_to_i32(1.5), 2);
        assert_eq!(round_ties_even_to_i32(2.5), 2);
        assert_eq!(round_ties_even_to_i32(-0.5), 0);
        assert_eq!(round_ties_even_to_i32(-1.5), -2);
        assert_eq!(round_ties_even_to_i32(-2.5), -2);
        assert_eq!(round_ties_even_to_i32(1.25), 1);
        assert_eq!(round_ties_even_to_i32(-7.75), -8);
        assert_eq!(round_ties_even_to_i32(8_388_608.0), 8_388_608);
    }

    #[test]
    fn test_round_out_of_range() {
        assert_eq!(round_ties_even_to_i32(f32::NAN), i32::MIN);
        assert_eq!(round_ties_even_to_i32(f32::INFINITY), i32::MIN);
        assert_eq!(round_ties_even_to_i32(f32::NEG_INFINITY), i32::MIN);
        assert_eq!(round_ties_even_to_i32(2_147_483_648.0), i32::MIN);
        assert_eq!(round_ties_even_to_i32(-2_147_483_648.0), i32::MIN);
        assert_eq!(round_ties_even_to_i32(2_147_483_520.0), 2_147_483_520);
    }

    #[test]
    fn test_lane_order_matches_memory() {
        let v = setr_epi8([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        let mut out = [0i8; 16];
        unsafe { storeu_si128(out.as_mut_ptr().cast(), v) };
        assert_eq!(out, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_andnot_inverts_first_operand() {
        let a = set1_epi32(0b1100);
        let b = set1_epi32(0b1010);
        assert_eq!(i32_lanes(andnot_si128(a, b)), [0b0010; 4]);
    }

    #[test]
    fn test_float_bit_ops() {
        let sign = set1_ps(-0.0);
        let v = set1_ps(-3.5);
        assert_eq!(f32_lanes(andnot_ps(sign, v)), [3.5; 4]);
        assert_eq!(f32_lanes(and_ps(sign, v)), [-0.0; 4]);
    }
}
