use core::cmp::Ordering;
use core::ops::{Add, Mul, Sub};
use num::Integer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An N-dimensional point, which is usually just a primitive array of type `N`. In this crate only the 3-dimensional
/// integer lattice is used, so most code refers to the `Point3i` alias.
///
/// ```
/// use cube_stitch_core::prelude::*;
///
/// let p1 = PointN([1, 2, 3]);
/// let p2 = PointN([3, 4, 5]);
///
/// assert_eq!(p1 + p2, PointN([4, 6, 8]));
/// assert_eq!(p1 - p2, PointN([-2, -2, -2]));
/// assert_eq!(p1 * p2, PointN([3, 8, 15]));
/// ```
///
/// There is also a partial order defined on points which says that a point A is greater than a point B if and only if all
/// of the components of point A are greater than point B. This is useful for checking if a point is inside of the extent
/// between two other points:
///
/// ```
/// use cube_stitch_core::prelude::*;
///
/// let min = Point3i::ZERO;
/// let least_upper_bound = Point3i::fill(3);
///
/// let p = PointN([0, 1, 2]);
/// assert!(min <= p && p < least_upper_bound);
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PointN<N>(pub N);

/// A 3-dimensional point with scalar type `T`.
pub type Point3<T> = PointN<[T; 3]>;
/// A 3-dimensional point with scalar type `i32`.
pub type Point3i = PointN<[i32; 3]>;

impl<T> Point3<T>
where
    T: Copy,
{
    #[inline]
    pub fn fill(value: T) -> Self {
        PointN([value; 3])
    }

    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> T {
        self.0[2]
    }

    #[inline]
    pub fn map_components_binary(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        PointN([
            f(self.x(), other.x()),
            f(self.y(), other.y()),
            f(self.z(), other.z()),
        ])
    }
}

impl Point3i {
    pub const ZERO: Self = PointN([0; 3]);
    pub const ONES: Self = PointN([1; 3]);

    /// Component-wise division, rounding toward negative infinity.
    #[inline]
    pub fn vector_div_floor(&self, rhs: &Self) -> Self {
        self.map_components_binary(rhs, |c1, c2| Integer::div_floor(&c1, &c2))
    }

    /// Returns `true` iff all dimensions are strictly positive.
    #[inline]
    pub fn dimensions_are_positive(&self) -> bool {
        self.x() > 0 && self.y() > 0 && self.z() > 0
    }

    /// Returns `true` iff no component is negative.
    #[inline]
    pub fn is_non_negative(&self) -> bool {
        self.x() >= 0 && self.y() >= 0 && self.z() >= 0
    }

    /// The product of all components as a `u64`, or `None` if a component is negative or the product overflows.
    #[inline]
    pub fn checked_volume(&self) -> Option<u64> {
        if !self.is_non_negative() {
            return None;
        }

        (self.x() as u64)
            .checked_mul(self.y() as u64)?
            .checked_mul(self.z() as u64)
    }
}

impl<T> Add for Point3<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 + c2)
    }
}

impl<T> Sub for Point3<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 - c2)
    }
}

impl<T> Mul for Point3<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 * c2)
    }
}

impl<T> PartialOrd for Point3<T>
where
    T: Copy + PartialOrd,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self < other {
            Some(Ordering::Less)
        } else if self > other {
            Some(Ordering::Greater)
        } else if self.x() == other.x() && self.y() == other.y() && self.z() == other.z() {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        self.x() < other.x() && self.y() < other.y() && self.z() < other.z()
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        self.x() > other.x() && self.y() > other.y() && self.z() > other.z()
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        self.x() <= other.x() && self.y() <= other.y() && self.z() <= other.z()
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        self.x() >= other.x() && self.y() >= other.y() && self.z() >= other.z()
    }
}

impl<T> From<[T; 3]> for Point3<T> {
    #[inline]
    fn from(components: [T; 3]) -> Self {
        PointN(components)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
