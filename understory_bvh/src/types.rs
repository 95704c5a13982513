// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned boxes in 2D and 3D, generic over the coordinate scalar.

use core::cmp::Ordering;
use core::fmt::Debug;

use crate::bounds::BoundingBox;

/// Numeric scalar abstraction for the boxes in this module.
///
/// Box space is computed in an associated widened accumulator type
/// (f32→f64, f64→f64, i64→i128) so that comparing candidate placements does not
/// lose precision for ordinary coordinates. Integer accumulators saturate instead of
/// overflowing.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Widened accumulator type used for area and volume.
    type Acc: Copy + PartialOrd + Debug;

    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Max of the scalar value and zero.
    fn max_zero(v: Self) -> Self;

    /// The smallest representable value (negative infinity for floats).
    fn lowest() -> Self;

    /// The largest representable value (positive infinity for floats).
    fn highest() -> Self;

    /// Convert a scalar to the accumulator type.
    fn widen(v: Self) -> Self::Acc;

    /// Multiply two accumulator values.
    fn mul_acc(a: Self::Acc, b: Self::Acc) -> Self::Acc;
}

impl Scalar for f32 {
    type Acc = f64;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn lowest() -> Self {
        Self::NEG_INFINITY
    }

    #[inline]
    fn highest() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as f64
    }

    #[inline]
    fn mul_acc(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a * b
    }
}

impl Scalar for f64 {
    type Acc = Self;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0.0)
    }

    #[inline]
    fn lowest() -> Self {
        Self::NEG_INFINITY
    }

    #[inline]
    fn highest() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v
    }

    #[inline]
    fn mul_acc(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a * b
    }
}

impl Scalar for i64 {
    type Acc = i128;

    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn max_zero(v: Self) -> Self {
        v.max(0)
    }

    #[inline]
    fn lowest() -> Self {
        Self::MIN
    }

    #[inline]
    fn highest() -> Self {
        Self::MAX
    }

    #[inline]
    fn widen(v: Self) -> Self::Acc {
        v as i128
    }

    #[inline]
    fn mul_acc(a: Self::Acc, b: Self::Acc) -> Self::Acc {
        a.saturating_mul(b)
    }
}

/// Helper alias for the widened accumulator type associated with a scalar `T`.
pub type ScalarAcc<T> = <T as Scalar>::Acc;

/// Axis-aligned bounding box in 2D.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Scalar> Aabb2D<T> {
    /// Create an AABB from origin and size.
    pub fn from_xywh(x: T, y: T, w: T, h: T) -> Self {
        Self::new(x, y, T::add(x, w), T::add(y, h))
    }

    /// Whether this AABB contains the point.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// This AABB moved by `(dx, dy)`.
    pub fn translated(&self, dx: T, dy: T) -> Self {
        Self::new(
            T::add(self.min_x, dx),
            T::add(self.min_y, dy),
            T::add(self.max_x, dx),
            T::add(self.max_y, dy),
        )
    }

    /// Area in the widened accumulator type; zero when empty or inverted.
    pub fn area(&self) -> ScalarAcc<T> {
        let w = T::max_zero(T::sub(self.max_x, self.min_x));
        let h = T::max_zero(T::sub(self.max_y, self.min_y));
        T::mul_acc(T::widen(w), T::widen(h))
    }
}

impl<T: Scalar> BoundingBox for Aabb2D<T> {
    type Space = ScalarAcc<T>;

    fn empty() -> Self {
        Self::new(T::highest(), T::highest(), T::lowest(), T::lowest())
    }

    fn union(&self, other: &Self) -> Self {
        Self::new(
            min_t(self.min_x, other.min_x),
            min_t(self.min_y, other.min_y),
            max_t(self.max_x, other.max_x),
            max_t(self.max_y, other.max_y),
        )
    }

    fn intersection(&self, other: &Self) -> Self {
        let out = Self::new(
            max_t(self.min_x, other.min_x),
            max_t(self.min_y, other.min_y),
            min_t(self.max_x, other.max_x),
            min_t(self.max_y, other.max_y),
        );
        if out.is_empty() { Self::empty() } else { out }
    }

    fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && le(self.min_x, other.max_x)
            && le(other.min_x, self.max_x)
            && le(self.min_y, other.max_y)
            && le(other.min_y, self.max_y)
    }

    fn contains(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }
        !self.is_empty()
            && le(self.min_x, other.min_x)
            && le(self.min_y, other.min_y)
            && le(other.max_x, self.max_x)
            && le(other.max_y, self.max_y)
    }

    fn box_space(&self) -> Self::Space {
        self.area()
    }

    /// True if the AABB is inverted on any axis. Assumes no NaN.
    fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }
}

/// Axis-aligned bounding box in 3D.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb3D<T> {
    /// Minimum x
    pub min_x: T,
    /// Minimum y
    pub min_y: T,
    /// Minimum z
    pub min_z: T,
    /// Maximum x
    pub max_x: T,
    /// Maximum y
    pub max_y: T,
    /// Maximum z
    pub max_z: T,
}

impl<T> Aabb3D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, min_z: T, max_x: T, max_y: T, max_z: T) -> Self {
        Self {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }
}

impl<T: Scalar> Aabb3D<T> {
    /// Create an AABB from its minimum corner and extents.
    pub fn from_origin_size(x: T, y: T, z: T, w: T, h: T, d: T) -> Self {
        Self::new(x, y, z, T::add(x, w), T::add(y, h), T::add(z, d))
    }

    /// Whether this AABB contains the point.
    pub fn contains_point(&self, x: T, y: T, z: T) -> bool {
        le(self.min_x, x)
            && le(self.min_y, y)
            && le(self.min_z, z)
            && le(x, self.max_x)
            && le(y, self.max_y)
            && le(z, self.max_z)
    }

    /// This AABB moved by `(dx, dy, dz)`.
    pub fn translated(&self, dx: T, dy: T, dz: T) -> Self {
        Self::new(
            T::add(self.min_x, dx),
            T::add(self.min_y, dy),
            T::add(self.min_z, dz),
            T::add(self.max_x, dx),
            T::add(self.max_y, dy),
            T::add(self.max_z, dz),
        )
    }

    /// Volume in the widened accumulator type; zero when empty or inverted.
    ///
    /// For `i64` the product saturates at `i128::MAX` once extents pass roughly 2^42.
    pub fn volume(&self) -> ScalarAcc<T> {
        let w = T::max_zero(T::sub(self.max_x, self.min_x));
        let h = T::max_zero(T::sub(self.max_y, self.min_y));
        let d = T::max_zero(T::sub(self.max_z, self.min_z));
        T::mul_acc(T::mul_acc(T::widen(w), T::widen(h)), T::widen(d))
    }
}

impl<T: Scalar> BoundingBox for Aabb3D<T> {
    type Space = ScalarAcc<T>;

    fn empty() -> Self {
        Self::new(
            T::highest(),
            T::highest(),
            T::highest(),
            T::lowest(),
            T::lowest(),
            T::lowest(),
        )
    }

    fn union(&self, other: &Self) -> Self {
        Self::new(
            min_t(self.min_x, other.min_x),
            min_t(self.min_y, other.min_y),
            min_t(self.min_z, other.min_z),
            max_t(self.max_x, other.max_x),
            max_t(self.max_y, other.max_y),
            max_t(self.max_z, other.max_z),
        )
    }

    fn intersection(&self, other: &Self) -> Self {
        let out = Self::new(
            max_t(self.min_x, other.min_x),
            max_t(self.min_y, other.min_y),
            max_t(self.min_z, other.min_z),
            min_t(self.max_x, other.max_x),
            min_t(self.max_y, other.max_y),
            min_t(self.max_z, other.max_z),
        );
        if out.is_empty() { Self::empty() } else { out }
    }

    fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && le(self.min_x, other.max_x)
            && le(other.min_x, self.max_x)
            && le(self.min_y, other.max_y)
            && le(other.min_y, self.max_y)
            && le(self.min_z, other.max_z)
            && le(other.min_z, self.max_z)
    }

    fn contains(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }
        !self.is_empty()
            && le(self.min_x, other.min_x)
            && le(self.min_y, other.min_y)
            && le(self.min_z, other.min_z)
            && le(other.max_x, self.max_x)
            && le(other.max_y, self.max_y)
            && le(other.max_z, self.max_z)
    }

    fn box_space(&self) -> Self::Space {
        self.volume()
    }

    fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y) || lt(self.max_z, self.min_z)
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
