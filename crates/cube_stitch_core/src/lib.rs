//! The core data types for addressing a cube that is partitioned into fragments:
//! - `PointN`: a lattice point, most importantly `Point3i`
//! - `Extent3i`: an axis-aligned box of lattice points
//! - `FragmentIndexer`: maps global points to a `FragmentKey` and `LocalOffset`, and back
//! - `CubeShape`: the linear addressing of the whole cube

pub mod cube;
pub mod extent;
pub mod fragment;
pub mod point;

pub use cube::CubeShape;
pub use extent::{Extent3PointIter, Extent3i};
pub use fragment::{FragmentIndexer, FragmentKey, Local3i, LocalOffset};
pub use point::{Point3, Point3i, PointN};

pub use num;

pub mod prelude {
    pub use super::{
        CubeShape, Extent3i, FragmentIndexer, FragmentKey, Local3i, LocalOffset, Point3, Point3i,
        PointN,
    };
}
