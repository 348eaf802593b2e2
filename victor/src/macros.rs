//! Generators for the operation set every vector shape shares.
//!
//! `free_functions!` stamps out the `<shape>_*` free functions over a
//! storage type; `vector_impls!` gives a method-surface struct its operator
//! traits, conversions and ABI assertions. Shape-specific operations
//! (per-lane constructors, casts, conversions) are written by hand next to
//! each invocation.

/// Emit `<shape>_{from_native,to_native,set1,add,and,and_not,load,store}`.
#[cfg(feature = "free-api")]
#[allow(unused_macros)]
macro_rules! free_functions {
    (
        $shape:ident: $raw:ty => $native:ty, [$lane:ty; $lanes:literal];
        set1: $set1:path,
        add: $add:path,
        and: $and:path,
        andnot: $andnot:path,
        load: $load:path,
        store: $store:path $(,)?
    ) => {
        paste::paste! {
            #[doc = "Wrap a native register as `" $shape "` storage (bit-exact)."]
            #[inline(always)]
            #[allow(clippy::useless_conversion)]
            pub fn [<$shape _from_native>](v: $native) -> $raw {
                v.into()
            }

            #[doc = "Unwrap `" $shape "` storage to the native register (bit-exact)."]
            #[inline(always)]
            #[allow(clippy::useless_conversion)]
            pub fn [<$shape _to_native>](v: $raw) -> $native {
                v.into()
            }

            #[doc = "Broadcast `value` into every lane of a `" $shape "`."]
            #[inline(always)]
            pub fn [<$shape _set1>](value: $lane) -> $raw {
                [<$shape _from_native>]($set1(value))
            }

            #[doc = "Lane-wise addition of two `" $shape "` vectors."]
            #[inline(always)]
            pub fn [<$shape _add>](a: $raw, b: $raw) -> $raw {
                [<$shape _from_native>]($add([<$shape _to_native>](a), [<$shape _to_native>](b)))
            }

            #[doc = "Bitwise AND of two `" $shape "` vectors."]
            #[inline(always)]
            pub fn [<$shape _and>](a: $raw, b: $raw) -> $raw {
                [<$shape _from_native>]($and([<$shape _to_native>](a), [<$shape _to_native>](b)))
            }

            #[doc = "`a & !b` over two `" $shape "` vectors; `b` is the inverted operand."]
            #[inline(always)]
            pub fn [<$shape _and_not>](a: $raw, b: $raw) -> $raw {
                [<$shape _from_native>]($andnot([<$shape _to_native>](b), [<$shape _to_native>](a)))
            }

            #[doc = "Read a `" $shape "` from an unaligned lane array."]
            #[inline(always)]
            pub fn [<$shape _load>](src: &[$lane; $lanes]) -> $raw {
                // SAFETY: the array is exactly one register wide.
                [<$shape _from_native>](unsafe { $load(src.as_ptr().cast()) })
            }

            #[doc = "Write a `" $shape "` to an unaligned lane array."]
            #[inline(always)]
            pub fn [<$shape _store>](dest: &mut [$lane; $lanes], src: $raw) {
                // SAFETY: the array is exactly one register wide.
                unsafe { $store(dest.as_mut_ptr().cast(), [<$shape _to_native>](src)) }
            }
        }
    };
}

#[cfg(feature = "free-api")]
#[allow(unused_imports)]
pub(crate) use free_functions;

/// Operator traits, conversions, formatting and layout checks for a
/// method-surface vector struct wrapping `$native`.
///
/// The struct must provide `splat`, `from_array` and `to_array`.
#[cfg(feature = "method-api")]
#[allow(unused_macros)]
macro_rules! vector_impls {
    (
        $name:ident($native:ty), [$lane:ty; $lanes:literal];
        add: $add:path,
        and: $and:path $(,)?
    ) => {
        impl core::ops::Add for $name {
            type Output = Self;

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                Self($add(self.0, rhs.0))
            }
        }

        impl core::ops::AddAssign for $name {
            #[inline(always)]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl core::ops::BitAnd for $name {
            type Output = Self;

            #[inline(always)]
            fn bitand(self, rhs: Self) -> Self {
                Self($and(self.0, rhs.0))
            }
        }

        impl core::ops::BitAndAssign for $name {
            #[inline(always)]
            fn bitand_assign(&mut self, rhs: Self) {
                *self = *self & rhs;
            }
        }

        impl From<$native> for $name {
            #[inline(always)]
            fn from(v: $native) -> Self {
                Self::from_native(v)
            }
        }

        impl From<$name> for $native {
            #[inline(always)]
            fn from(v: $name) -> Self {
                v.to_native()
            }
        }

        impl From<$lane> for $name {
            #[inline(always)]
            fn from(value: $lane) -> Self {
                Self::splat(value)
            }
        }

        impl From<[$lane; $lanes]> for $name {
            #[inline(always)]
            fn from(lanes: [$lane; $lanes]) -> Self {
                Self::from_array(lanes)
            }
        }

        impl From<$name> for [$lane; $lanes] {
            #[inline(always)]
            fn from(v: $name) -> Self {
                v.to_array()
            }
        }

        impl Default for $name {
            /// All lanes zero.
            #[inline(always)]
            fn default() -> Self {
                Self::splat(<$lane>::default())
            }
        }

        impl PartialEq for $name {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.to_array() == other.to_array()
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&self.to_array())
                    .finish()
            }
        }

        static_assertions::assert_eq_size!($name, $native);
        static_assertions::assert_eq_align!($name, $native);
    };
}

#[cfg(feature = "method-api")]
#[allow(unused_imports)]
pub(crate) use vector_impls;
