//! The core data types shared by the surface reconstruction crates:
//! - `PointN`: an N-dimensional point, most importantly `Point3d` and `Point3f`
//! - `Cube`: an axis-aligned cube given by its center and edge length
//! - `Octant`: the 3-bit index of one of the 8 sub-cubes of a `Cube`
//! - `Sample`: an oriented point with a characteristic scale, as produced by the upstream stages

pub mod axis;
pub mod cube;
pub mod octant;
pub mod point;
pub mod sample;

pub use axis::Axis3;
pub use cube::Cube;
pub use octant::Octant;
pub use point::*;
pub use sample::{Sample, SampleList, ScaledPoint};

pub use num;

pub mod prelude {
    pub use super::{
        Axis3, ConstZero, Cube, Distance, DotProduct, GetComponent, MapComponents, Norm,
        NormSquared, Octant, Ones, Point, Point3, Point3d, Point3f, PointN, Sample, SampleList,
        ScaledPoint,
    };
}
