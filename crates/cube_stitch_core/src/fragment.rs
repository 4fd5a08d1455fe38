//! Coordinate arithmetic between the global cube lattice and the lattice local to one fragment.
//!
//! The cube is partitioned into fragments of a constant shape. The key of a fragment is its origin, i.e. the minimum point in
//! that fragment, which is always a multiple of the fragment shape. Within a fragment, points are addressed by a local linear
//! offset in x-major, z-minor order, which is also the order of the values in the fragment's file.
//!
//! ```
//! use cube_stitch_core::prelude::*;
//!
//! let indexer = FragmentIndexer::new(Point3i::fill(2));
//!
//! let p = PointN([3, 1, 0]);
//! let key = indexer.fragment_origin(p);
//! assert_eq!(key, FragmentKey(PointN([2, 0, 0])));
//!
//! let offset = indexer.local_offset(p, key);
//! assert_eq!(offset, LocalOffset(6));
//! assert_eq!(indexer.global_point(key, offset), p);
//! ```

use crate::{Extent3i, Point3i, PointN};

use core::fmt;
use core::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The origin (minimum point) of a fragment. Two points are in the same fragment iff they have the same key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct FragmentKey(pub Point3i);

impl Deref for FragmentKey {
    type Target = Point3i;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.x(), self.y(), self.z())
    }
}

/// Fragment-local coordinates, i.e. a point translated so that the fragment origin is at zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Local3i(pub Point3i);

impl Deref for Local3i {
    type Target = Point3i;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The position of a value in a fragment's flat array. This translates directly to a byte offset in the fragment file.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LocalOffset(pub u64);

/// Calculates fragment origins and converts between global points and local offsets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct FragmentIndexer {
    fragment_shape: Point3i,
}

impl FragmentIndexer {
    /// # Panics
    ///
    /// If any dimension of `fragment_shape` is not positive, or the fragment volume does not fit in a `u64`.
    #[inline]
    pub fn new(fragment_shape: Point3i) -> Self {
        match Self::try_new(fragment_shape) {
            Some(indexer) => indexer,
            None => panic!("invalid fragment shape {:?}", fragment_shape),
        }
    }

    /// Like `new`, but returns `None` instead of panicking.
    #[inline]
    pub fn try_new(fragment_shape: Point3i) -> Option<Self> {
        if fragment_shape.dimensions_are_positive() && fragment_shape.checked_volume().is_some() {
            Some(Self { fragment_shape })
        } else {
            None
        }
    }

    /// The constant shape of a fragment. The same for all fragments.
    #[inline]
    pub fn fragment_shape(&self) -> Point3i {
        self.fragment_shape
    }

    /// The number of values stored in every fragment file.
    #[inline]
    pub fn fragment_volume(&self) -> u64 {
        let s = self.fragment_shape;

        s.x() as u64 * s.y() as u64 * s.z() as u64
    }

    /// Returns the key of the fragment that contains `point`.
    #[inline]
    pub fn fragment_origin(&self, point: Point3i) -> FragmentKey {
        FragmentKey(point.vector_div_floor(&self.fragment_shape) * self.fragment_shape)
    }

    /// Returns the offset of `point` within the flat array of the fragment at `origin`.
    ///
    /// `point` must be contained in that fragment.
    #[inline]
    pub fn local_offset(&self, point: Point3i, origin: FragmentKey) -> LocalOffset {
        let local = point - origin.0;
        debug_assert!(local.is_non_negative() && local < self.fragment_shape);

        let s = self.fragment_shape;
        let yz = s.y() as u64 * s.z() as u64;

        LocalOffset(local.x() as u64 * yz + local.y() as u64 * s.z() as u64 + local.z() as u64)
    }

    /// The exact inverse of `local_offset`: recovers the fragment-local coordinates of `offset`.
    #[inline]
    pub fn delinearize(&self, offset: LocalOffset) -> Local3i {
        let s = self.fragment_shape;
        let yz = s.y() as u64 * s.z() as u64;
        let z_stride = s.z() as u64;

        let x = offset.0 / yz;
        let rem = offset.0 % yz;

        Local3i(PointN([
            x as i32,
            (rem / z_stride) as i32,
            (rem % z_stride) as i32,
        ]))
    }

    /// Translates `offset` in the fragment at `origin` back into global coordinates.
    #[inline]
    pub fn global_point(&self, origin: FragmentKey, offset: LocalOffset) -> Point3i {
        origin.0 + self.delinearize(offset).0
    }

    /// The extent spanned by the fragment at `origin`.
    #[inline]
    pub fn extent_for_fragment(&self, origin: FragmentKey) -> Extent3i {
        Extent3i::from_min_and_shape(origin.0, self.fragment_shape)
    }

    /// Returns an iterator over the keys of all fragments that overlap `extent`.
    #[inline]
    pub fn fragment_keys_for_extent(&self, extent: &Extent3i) -> impl Iterator<Item = FragmentKey> {
        let range_min = extent.minimum.vector_div_floor(&self.fragment_shape);
        let range_max = extent.max().vector_div_floor(&self.fragment_shape);
        let shape = self.fragment_shape;

        Extent3i::from_min_and_shape(range_min, range_max - range_min + Point3i::ONES)
            .iter_points()
            .map(move |p| FragmentKey(p * shape))
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;
    use rand::Rng;

    #[test]
    fn fragment_origin_is_multiple_of_shape() {
        let indexer = FragmentIndexer::new(PointN([2, 3, 5]));

        assert_eq!(indexer.fragment_origin(PointN([0, 0, 0])), FragmentKey(Point3i::ZERO));
        assert_eq!(indexer.fragment_origin(PointN([1, 2, 4])), FragmentKey(Point3i::ZERO));
        assert_eq!(indexer.fragment_origin(PointN([2, 3, 5])), FragmentKey(PointN([2, 3, 5])));
        assert_eq!(indexer.fragment_origin(PointN([7, 7, 7])), FragmentKey(PointN([6, 6, 5])));
    }

    #[test]
    fn fragment_origin_for_negative_point_is_negative() {
        let indexer = FragmentIndexer::new(Point3i::fill(16));

        assert_eq!(indexer.fragment_origin(Point3i::fill(-1)), FragmentKey(Point3i::fill(-16)));
    }

    #[test]
    fn local_offset_is_x_major() {
        let indexer = FragmentIndexer::new(Point3i::fill(2));
        let key = indexer.fragment_origin(PointN([3, 1, 0]));

        assert_eq!(key, FragmentKey(PointN([2, 0, 0])));
        assert_eq!(indexer.local_offset(PointN([3, 1, 0]), key), LocalOffset(6));
        assert_eq!(indexer.local_offset(PointN([2, 0, 1]), key), LocalOffset(1));
        assert_eq!(indexer.local_offset(PointN([3, 1, 1]), key), LocalOffset(7));
    }

    #[test]
    fn local_offsets_follow_extent_iteration_order() {
        let indexer = FragmentIndexer::new(PointN([3, 2, 4]));
        let key = FragmentKey(PointN([3, 4, 8]));
        let extent = indexer.extent_for_fragment(key);

        for (i, p) in extent.iter_points().enumerate() {
            assert_eq!(indexer.local_offset(p, key), LocalOffset(i as u64));
        }
        assert_eq!(extent.iter_points().count() as u64, indexer.fragment_volume());
    }

    #[test]
    fn delinearize_inverts_local_offset() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let shape = PointN([
                rng.gen_range(1..40),
                rng.gen_range(1..40),
                rng.gen_range(1..40),
            ]);
            let indexer = FragmentIndexer::new(shape);
            for _ in 0..100 {
                let p = PointN([
                    rng.gen_range(0..10_000),
                    rng.gen_range(0..10_000),
                    rng.gen_range(0..10_000),
                ]);
                let origin = indexer.fragment_origin(p);
                let offset = indexer.local_offset(p, origin);

                assert!(offset.0 < indexer.fragment_volume());
                assert_eq!(indexer.delinearize(offset), Local3i(p - origin.0));
                assert_eq!(indexer.global_point(origin, offset), p);
            }
        }
    }

    #[test]
    fn fragment_keys_for_extent_covers_extent() {
        let indexer = FragmentIndexer::new(PointN([2, 2, 3]));
        let cube = Extent3i::from_min_and_shape(Point3i::ZERO, PointN([4, 3, 3]));

        let keys: Vec<_> = indexer.fragment_keys_for_extent(&cube).collect();

        assert_eq!(
            keys,
            vec![
                FragmentKey(PointN([0, 0, 0])),
                FragmentKey(PointN([0, 2, 0])),
                FragmentKey(PointN([2, 0, 0])),
                FragmentKey(PointN([2, 2, 0])),
            ]
        );
    }

    #[test]
    fn key_display_is_dash_separated() {
        assert_eq!(FragmentKey(PointN([2, 0, 10])).to_string(), "2-0-10");
    }

    #[test]
    fn non_positive_shape_is_rejected() {
        assert_eq!(FragmentIndexer::try_new(PointN([2, 0, 2])), None);
        assert!(FragmentIndexer::try_new(PointN([1, 1, 1])).is_some());
    }

    #[test]
    fn shape_with_overflowing_volume_is_rejected() {
        assert_eq!(FragmentIndexer::try_new(Point3i::fill(2_000_000_000)), None);

        let indexer = FragmentIndexer::try_new(PointN([i32::MAX, i32::MAX, 3])).unwrap();
        assert_eq!(indexer.fragment_volume(), i32::MAX as u64 * i32::MAX as u64 * 3);
    }
}
