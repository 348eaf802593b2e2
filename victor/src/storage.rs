//! Storage types for the free-function surface.
//!
//! With compiler vector builtins (`victor_vector_extensions`) each shape is
//! its own `core::simd` type, so mixing an `i8x16` value into an `i32x4`
//! function is a type error. Otherwise every shape is a plain alias of the
//! native register and the conversions are identities.

cfg_if::cfg_if! {
    if #[cfg(victor_vector_extensions)] {
        /// Four `f32` lanes.
        pub type RawF32x4 = core::simd::f32x4;
        /// Sixteen `i8` lanes.
        #[cfg(victor_sse2)]
        pub type RawI8x16 = core::simd::i8x16;
        /// Four `i32` lanes.
        #[cfg(victor_sse2)]
        pub type RawI32x4 = core::simd::i32x4;
    } else {
        /// Four `f32` lanes.
        pub type RawF32x4 = crate::arch::M128;
        /// Sixteen `i8` lanes.
        #[cfg(victor_sse2)]
        pub type RawI8x16 = crate::arch::M128i;
        /// Four `i32` lanes.
        #[cfg(victor_sse2)]
        pub type RawI32x4 = crate::arch::M128i;
    }
}

static_assertions::assert_eq_size!(RawF32x4, crate::arch::M128);
static_assertions::assert_eq_align!(RawF32x4, crate::arch::M128);

#[cfg(victor_sse2)]
mod integer_layout {
    use super::{RawI32x4, RawI8x16};
    use crate::arch::M128i;

    static_assertions::assert_eq_size!(RawI8x16, M128i);
    static_assertions::assert_eq_align!(RawI8x16, M128i);
    static_assertions::assert_eq_size!(RawI32x4, M128i);
    static_assertions::assert_eq_align!(RawI32x4, M128i);
}
