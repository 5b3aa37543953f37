//! Tweenable values
//!
//! A tween interpolates a value made of one or more *dimensions*. Each
//! dimension is a [`Tweenable`] scalar slot; a [`TweenValues`] combines them
//! positionally. Supported shapes:
//!
//! - a bare scalar (`f32`, `i32`, ...) is one dimension
//! - tuples `(A,)` up to `(A, B, C, D, E, F)` mix slot kinds freely
//! - `[T; N]` and `Vec<T>` are homogeneous; a `Vec<T>` fixes its
//!   dimensionality at runtime from the initial value
//!
//! # Blend policy
//!
//! Every slot computes `start + (end - start) * eased` without clamping
//! `eased`, so overshooting curves overshoot the value too.
//!
//! - Floats blend in `f64` and convert back to the slot type. An eased
//!   ratio of exactly `0.0` or `1.0` returns `start` or `end` unchanged, so
//!   keyframe values are hit exactly.
//! - Integers blend in `f64` and round to the nearest integer, ties away
//!   from zero. Results outside the slot's range saturate to its bounds.

use std::fmt;

/// A single interpolated scalar slot
pub trait Tweenable: Copy + PartialEq + fmt::Debug {
    /// Blend between `start` and `end` by an already eased ratio
    fn blend(start: Self, end: Self, eased: f64) -> Self;
}

macro_rules! impl_tweenable_float {
    ($($t:ty),*) => {
        $(
            impl Tweenable for $t {
                #[inline]
                fn blend(start: Self, end: Self, eased: f64) -> Self {
                    if eased == 0.0 {
                        start
                    } else if eased == 1.0 {
                        end
                    } else {
                        (start as f64 + (end as f64 - start as f64) * eased) as $t
                    }
                }
            }
        )*
    };
}

macro_rules! impl_tweenable_int {
    ($($t:ty),*) => {
        $(
            impl Tweenable for $t {
                #[inline]
                fn blend(start: Self, end: Self, eased: f64) -> Self {
                    if eased == 0.0 {
                        return start;
                    }
                    if eased == 1.0 {
                        return end;
                    }
                    let from = start as f64;
                    let blended = from + (end as f64 - from) * eased;
                    // `as` saturates out-of-range floats and maps NaN to 0
                    blended.round() as $t
                }
            }
        )*
    };
}

impl_tweenable_float!(f32, f64);
impl_tweenable_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// A complete tweened value: one or more [`Tweenable`] dimensions
pub trait TweenValues: Clone + fmt::Debug {
    /// Number of dimensions
    fn dims(&self) -> usize;

    /// Blend every dimension. `eased` holds one ratio per dimension, already
    /// passed through that dimension's easing.
    fn interpolate(start: &Self, end: &Self, eased: &[f64]) -> Self;
}

macro_rules! impl_tween_values_scalar {
    ($($t:ty),*) => {
        $(
            impl TweenValues for $t {
                #[inline]
                fn dims(&self) -> usize {
                    1
                }

                #[inline]
                fn interpolate(start: &Self, end: &Self, eased: &[f64]) -> Self {
                    <$t as Tweenable>::blend(*start, *end, eased[0])
                }
            }
        )*
    };
}

impl_tween_values_scalar!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_tween_values_tuple {
    ($($len:expr => ($($name:ident $idx:tt),+);)+) => {
        $(
            impl<$($name: Tweenable),+> TweenValues for ($($name,)+) {
                #[inline]
                fn dims(&self) -> usize {
                    $len
                }

                #[inline]
                fn interpolate(start: &Self, end: &Self, eased: &[f64]) -> Self {
                    ($(<$name as Tweenable>::blend(start.$idx, end.$idx, eased[$idx]),)+)
                }
            }
        )+
    };
}

impl_tween_values_tuple! {
    1 => (A 0);
    2 => (A 0, B 1);
    3 => (A 0, B 1, C 2);
    4 => (A 0, B 1, C 2, D 3);
    5 => (A 0, B 1, C 2, D 3, E 4);
    6 => (A 0, B 1, C 2, D 3, E 4, F 5);
}

impl<T: Tweenable, const N: usize> TweenValues for [T; N] {
    fn dims(&self) -> usize {
        N
    }

    fn interpolate(start: &Self, end: &Self, eased: &[f64]) -> Self {
        std::array::from_fn(|i| T::blend(start[i], end[i], eased[i]))
    }
}

impl<T: Tweenable> TweenValues for Vec<T> {
    fn dims(&self) -> usize {
        self.len()
    }

    fn interpolate(start: &Self, end: &Self, eased: &[f64]) -> Self {
        start
            .iter()
            .zip(end)
            .zip(eased)
            .map(|((&a, &b), &t)| T::blend(a, b, t))
            .collect()
    }
}
