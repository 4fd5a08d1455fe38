use crate::{Extent3i, Point3i};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The shape of the whole, unfragmented cube. Its linear addressing gives every point a unique key in the output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct CubeShape(pub Point3i);

impl CubeShape {
    #[inline]
    pub fn new(shape: Point3i) -> Self {
        Self(shape)
    }

    #[inline]
    pub fn shape(&self) -> Point3i {
        self.0
    }

    /// The extent of the cube, with minimum at the origin.
    #[inline]
    pub fn extent(&self) -> Extent3i {
        Extent3i::from_min_and_shape(Point3i::ZERO, self.0)
    }

    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        self.extent().contains(p)
    }

    /// The number of samples in the whole cube, or `None` if that does not fit in a `u64`. Every offset returned by
    /// `global_linear_offset` for a contained point is smaller than this.
    #[inline]
    pub fn num_points(&self) -> Option<u64> {
        self.0.checked_volume()
    }

    /// The linear address of `p` in the whole cube, in the same x-major, z-minor order used within fragments.
    ///
    /// All arithmetic happens in `u64`, so cube shapes far beyond `i32::MAX` samples are fine. `p` must not have negative
    /// components.
    #[inline]
    pub fn global_linear_offset(&self, p: Point3i) -> u64 {
        debug_assert!(p.is_non_negative());

        let s = self.0;
        let z_stride = s.z() as u64;
        let x_stride = s.y() as u64 * z_stride;

        p.x() as u64 * x_stride + p.y() as u64 * z_stride + p.z() as u64
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
