//! Spatial indexing for floating scale surface reconstruction.
//!
//! Surface reconstruction consumes oriented point samples, each with a characteristic scale, and evaluates an implicit
//! function whose value at a point depends on the samples whose scale reaches that point. This library provides the
//! index that answers those queries.
//!
//! It is organized into several crates:
//! - **core**: points, cubes, octants and the `Sample` type
//! - **octree**: the adaptive octree that buckets samples by location and scale, with cursors, refinement, level
//!   limiting and influence queries

pub use fssr_core as core;
pub use fssr_octree as octree;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::octree::prelude::*;
}
