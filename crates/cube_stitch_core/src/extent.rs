use crate::{Point3i, PointN};

use core::ops::Range;
use itertools::{iproduct, ConsTuples, Product};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3-dimensional extent. This is mathematically the Cartesian product of a half-closed interval `[a, b)` in each
/// dimension. You can also just think of it as an axis-aligned box with some shape and a minimum point.
///
/// Both fragments and the whole cube are described by extents: a fragment's extent has the fragment origin as its minimum,
/// and the cube's extent has its minimum at the origin.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Extent3i {
    /// The least point contained in the extent.
    pub minimum: Point3i,
    /// The length of each dimension.
    pub shape: Point3i,
}

impl Extent3i {
    /// The default representation of an extent as the minimum point and shape.
    #[inline]
    pub fn from_min_and_shape(minimum: Point3i, shape: Point3i) -> Self {
        Self { minimum, shape }
    }

    /// The least point `p` for which all points `q` in the extent satisfy `q < p`.
    #[inline]
    pub fn least_upper_bound(&self) -> Point3i {
        self.minimum + self.shape
    }

    /// The greatest point contained in the extent.
    #[inline]
    pub fn max(&self) -> Point3i {
        self.least_upper_bound() - Point3i::ONES
    }

    /// Returns `true` iff the point `p` is contained in this extent.
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        self.minimum <= p && p < self.least_upper_bound()
    }

    /// Iterates over all points in the extent in linear (x-major, z-minor) order. The n-th point yielded is the point whose
    /// local linear offset within the extent is n.
    #[inline]
    pub fn iter_points(&self) -> Extent3PointIter {
        let lub = self.least_upper_bound();

        Extent3PointIter {
            product_iter: iproduct!(
                self.minimum.x()..lub.x(),
                self.minimum.y()..lub.y(),
                self.minimum.z()..lub.z()
            ),
        }
    }
}

type RangeProduct2 = Product<Range<i32>, Range<i32>>;
type RangeProduct3 = Product<RangeProduct2, Range<i32>>;

/// An iterator over all points in an `Extent3i`.
pub struct Extent3PointIter {
    product_iter: ConsTuples<RangeProduct3, ((i32, i32), i32)>,
}

impl Iterator for Extent3PointIter {
    type Item = Point3i;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.product_iter.next().map(|(x, y, z)| PointN([x, y, z]))
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
