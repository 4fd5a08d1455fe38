//! Grouping surface points by the fragment that contains them.
//!
//! Each group holds the local offsets to read from one fragment file, sorted ascending so the file is read front to back.
//! Duplicate points are kept; every input point produces exactly one offset.
//!
//! ```
//! use cube_stitch_core::prelude::*;
//! use cube_stitch_storage::prelude::*;
//!
//! let indexer = FragmentIndexer::new(Point3i::fill(2));
//! let cube = CubeShape::new(Point3i::fill(4));
//! let surface = [PointN([3, 1, 0]), PointN([2, 0, 1]), PointN([0, 0, 0])];
//!
//! let bins = FragmentBins::bin_surface(&indexer, &cube, &surface);
//!
//! assert_eq!(bins.len(), 2);
//! assert_eq!(
//!     bins.get(FragmentKey(PointN([2, 0, 0]))),
//!     Some(&[LocalOffset(1), LocalOffset(6)][..])
//! );
//! ```

use crate::{Result, SmallKeyHashMap, StitchError};

use cube_stitch_core::prelude::*;

use rayon::prelude::*;

/// Local offsets to read, grouped by fragment. Built once from the whole surface and read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct FragmentBins {
    bins: SmallKeyHashMap<FragmentKey, Vec<LocalOffset>>,
}

impl FragmentBins {
    /// Bins every point of `surface`. The `cube` is not needed by the arithmetic, but callers always have it at hand and
    /// should have checked the surface against it with `validate_surface`.
    pub fn bin_surface(indexer: &FragmentIndexer, _cube: &CubeShape, surface: &[Point3i]) -> Self {
        let mut bins = SmallKeyHashMap::<FragmentKey, Vec<LocalOffset>>::default();
        for &p in surface.iter() {
            let key = indexer.fragment_origin(p);
            let offset = indexer.local_offset(p, key);
            bins.entry(key).or_insert_with(Vec::new).push(offset);
        }

        for offsets in bins.values_mut() {
            offsets.sort_unstable();
        }

        Self { bins }
    }

    /// The number of fragments touched by the surface.
    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// The total number of offsets over all fragments. Equal to the number of binned points.
    pub fn num_offsets(&self) -> usize {
        self.bins.values().map(Vec::len).sum()
    }

    #[inline]
    pub fn get(&self, key: FragmentKey) -> Option<&[LocalOffset]> {
        self.bins.get(&key).map(Vec::as_slice)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (FragmentKey, &[LocalOffset])> + '_ {
        self.bins.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    #[inline]
    pub fn par_iter(&self) -> impl ParallelIterator<Item = (FragmentKey, &[LocalOffset])> + '_ {
        self.bins.par_iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

/// Checks that every point of `surface` lies inside of `cube`. Negative points and points beyond the cube would otherwise
/// name fragment files that do not exist, or collide with other points in the global addressing.
pub fn validate_surface(cube: &CubeShape, surface: &[Point3i]) -> Result<()> {
    match surface.iter().position(|p| !cube.contains(*p)) {
        None => Ok(()),
        Some(i) => Err(StitchError::MalformedInput(format!(
            "surface point {} at {:?} is outside of the cube with shape {:?}",
            i,
            surface[i].0,
            cube.shape().0
        ))),
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

    fn random_surface(cube: &CubeShape, n: usize) -> Vec<Point3i> {
        let mut rng = rand::thread_rng();
        let s = cube.shape();

        (0..n)
            .map(|_| {
                PointN([
                    rng.gen_range(0..s.x()),
                    rng.gen_range(0..s.y()),
                    rng.gen_range(0..s.z()),
                ])
            })
            .collect()
    }

    #[test]
    fn same_fragment_iff_same_bin() {
        let indexer = FragmentIndexer::new(PointN([3, 4, 5]));
        let cube = CubeShape::new(PointN([20, 20, 20]));
        let surface = random_surface(&cube, 500);

        let bins = FragmentBins::bin_surface(&indexer, &cube, &surface);

        for (key, offsets) in bins.iter() {
            let extent = indexer.extent_for_fragment(key);
            let mut expected: Vec<_> = surface
                .iter()
                .filter(|p| extent.contains(**p))
                .map(|p| indexer.local_offset(*p, key))
                .collect();
            expected.sort();

            assert_eq!(offsets, expected.as_slice());
        }
        assert_eq!(bins.num_offsets(), surface.len());
    }

    #[test]
    fn offsets_are_sorted_and_keep_duplicates() {
        let indexer = FragmentIndexer::new(Point3i::fill(2));
        let cube = CubeShape::new(Point3i::fill(4));
        let surface = [
            PointN([3, 1, 1]),
            PointN([2, 0, 0]),
            PointN([3, 1, 1]),
            PointN([2, 1, 0]),
        ];

        let bins = FragmentBins::bin_surface(&indexer, &cube, &surface);

        assert_eq!(bins.len(), 1);
        assert_eq!(
            bins.get(FragmentKey(PointN([2, 0, 0]))).unwrap(),
            &[LocalOffset(0), LocalOffset(2), LocalOffset(7), LocalOffset(7)]
        );
    }

    #[test]
    fn random_surfaces_bin_sorted() {
        let indexer = FragmentIndexer::new(PointN([4, 3, 2]));
        let cube = CubeShape::new(PointN([17, 9, 11]));
        let surface = random_surface(&cube, 1000);

        let bins = FragmentBins::bin_surface(&indexer, &cube, &surface);

        for (_, offsets) in bins.iter() {
            assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        }
        assert_eq!(bins.num_offsets(), 1000);
    }

    #[test]
    fn empty_surface_has_no_bins() {
        let indexer = FragmentIndexer::new(Point3i::fill(2));
        let cube = CubeShape::new(Point3i::fill(4));

        let bins = FragmentBins::bin_surface(&indexer, &cube, &[]);

        assert!(bins.is_empty());
        assert_eq!(bins.num_offsets(), 0);
    }

    #[test]
    fn validate_rejects_points_outside_of_cube() {
        let cube = CubeShape::new(Point3i::fill(4));

        assert!(validate_surface(&cube, &[Point3i::ZERO, Point3i::fill(3)]).is_ok());

        match validate_surface(&cube, &[Point3i::ZERO, PointN([0, -1, 0])]) {
            Err(StitchError::MalformedInput(message)) => assert!(message.contains("surface point 1")),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(matches!(
            validate_surface(&cube, &[PointN([4, 0, 0])]),
            Err(StitchError::MalformedInput(_))
        ));
    }
}
