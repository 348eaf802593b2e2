//! x86/x86_64 backend over `core::arch` intrinsics.
//!
//! Each function is a single intrinsic. The `unsafe` blocks are sound because
//! the gating tier is enabled, either by the compile target or by a `force-*`
//! feature asserting hardware support.

// Newer toolchains make most of these intrinsics safe to call.
#![allow(unused_unsafe)]

#[cfg(target_arch = "x86")]
use core::arch::x86 as arch;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64 as arch;

/// Native four-lane float register.
pub type M128 = arch::__m128;

/// Native integer register (lane width chosen per operation).
#[cfg(victor_sse2)]
pub type M128i = arch::__m128i;

// =============================================================================
// SSE
// =============================================================================

#[inline(always)]
pub(crate) fn set1_ps(value: f32) -> M128 {
    unsafe { arch::_mm_set1_ps(value) }
}

#[inline(always)]
pub(crate) fn add_ps(a: M128, b: M128) -> M128 {
    unsafe { arch::_mm_add_ps(a, b) }
}

#[inline(always)]
pub(crate) fn and_ps(a: M128, b: M128) -> M128 {
    unsafe { arch::_mm_and_ps(a, b) }
}

#[inline(always)]
pub(crate) fn andnot_ps(a: M128, b: M128) -> M128 {
    unsafe { arch::_mm_andnot_ps(a, b) }
}

/// # Safety
/// `src` must be valid for reading four `f32`s; no alignment is required.
#[inline(always)]
pub(crate) unsafe fn loadu_ps(src: *const f32) -> M128 {
    unsafe { arch::_mm_loadu_ps(src) }
}

/// # Safety
/// `dst` must be valid for writing four `f32`s; no alignment is required.
#[inline(always)]
pub(crate) unsafe fn storeu_ps(dst: *mut f32, v: M128) {
    unsafe { arch::_mm_storeu_ps(dst, v) }
}

// =============================================================================
// SSE2
// =============================================================================

#[cfg(victor_sse2)]
mod sse2 {
    use super::{arch, M128, M128i};

    #[inline(always)]
    pub(crate) fn set1_epi8(value: i8) -> M128i {
        unsafe { arch::_mm_set1_epi8(value) }
    }

    #[inline(always)]
    pub(crate) fn setr_epi8(e: [i8; 16]) -> M128i {
        unsafe {
            arch::_mm_setr_epi8(
                e[0], e[1], e[2], e[3], e[4], e[5], e[6], e[7], e[8], e[9], e[10], e[11], e[12],
                e[13], e[14], e[15],
            )
        }
    }

    #[inline(always)]
    pub(crate) fn set1_epi32(value: i32) -> M128i {
        unsafe { arch::_mm_set1_epi32(value) }
    }

    #[inline(always)]
    pub(crate) fn add_epi8(a: M128i, b: M128i) -> M128i {
        unsafe { arch::_mm_add_epi8(a, b) }
    }

    #[inline(always)]
    pub(crate) fn add_epi32(a: M128i, b: M128i) -> M128i {
        unsafe { arch::_mm_add_epi32(a, b) }
    }

    #[inline(always)]
    pub(crate) fn and_si128(a: M128i, b: M128i) -> M128i {
        unsafe { arch::_mm_and_si128(a, b) }
    }

    #[inline(always)]
    pub(crate) fn andnot_si128(a: M128i, b: M128i) -> M128i {
        unsafe { arch::_mm_andnot_si128(a, b) }
    }

    /// # Safety
    /// `src` must be valid for reading 16 bytes; no alignment is required.
    #[inline(always)]
    pub(crate) unsafe fn loadu_si128(src: *const M128i) -> M128i {
        unsafe { arch::_mm_loadu_si128(src) }
    }

    /// # Safety
    /// `dst` must be valid for writing 16 bytes; no alignment is required.
    #[inline(always)]
    pub(crate) unsafe fn storeu_si128(dst: *mut M128i, v: M128i) {
        unsafe { arch::_mm_storeu_si128(dst, v) }
    }

    #[inline(always)]
    pub(crate) fn castsi128_ps(v: M128i) -> M128 {
        unsafe { arch::_mm_castsi128_ps(v) }
    }

    #[inline(always)]
    pub(crate) fn castps_si128(v: M128) -> M128i {
        unsafe { arch::_mm_castps_si128(v) }
    }

    #[inline(always)]
    pub(crate) fn cvtepi32_ps(v: M128i) -> M128 {
        unsafe { arch::_mm_cvtepi32_ps(v) }
    }

    /// Rounds with the current MXCSR mode (nearest-even unless changed);
    /// out-of-range and NaN lanes become `i32::MIN`.
    #[inline(always)]
    pub(crate) fn cvtps_epi32(v: M128) -> M128i {
        unsafe { arch::_mm_cvtps_epi32(v) }
    }
}

#[cfg(victor_sse2)]
pub(crate) use self::sse2::*;
