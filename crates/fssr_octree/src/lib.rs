//! An adaptive octree that buckets scaled samples (oriented points with a characteristic radius) by location and
//! resolution, so that an implicit surface evaluator can efficiently ask "which samples influence this point?"
//!
//! Each sample is stored in the coarsest node whose edge length does not exceed the sample's scale, bounded by a
//! configurable maximum depth. The octree grows upward (doubling the root cube) whenever a sample lands outside of it or
//! is too coarse for the root, and grows downward by lazily subdividing nodes.
//!
//! The typical workflow is:
//!
//! ```
//! use fssr_core::prelude::*;
//! use fssr_octree::prelude::*;
//!
//! # fn main() -> Result<(), OctreeError> {
//! let mut octree = Octree::with_config(OctreeConfig::new(8))?;
//! octree.insert_samples(vec![
//!     Sample::new(PointN([0.0, 0.0, 0.0]), 1.0),
//!     Sample::new(PointN([10.0, 0.0, 0.0]), 1.0),
//!     Sample::new(PointN([0.0, 0.0, 0.0]), 0.1),
//! ])?;
//!
//! // Optionally make the tree full or cap its depth before querying.
//! octree.limit_octree_level()?;
//!
//! let influences = octree.influence_query(PointN([0.0, 0.0, 0.0]), 3.0);
//! assert_eq!(influences.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Traversal
//!
//! Nodes can be traversed in three ways:
//! - with a `NodeCursor`, which tracks the `(level, path)` address of the current node and supports both positional
//!   navigation and depth-first enumeration
//! - with the `NodeIter`, `LeafIter` and `BreadthFirstIter` iterators, which yield cursors
//! - with an `OctreeVisitor`, which receives the geometry of every node and can prune subtrees

pub mod config;
pub mod cursor;
pub mod error;
pub mod iter;
pub mod node;
pub mod octree;
pub mod query;
pub mod refine;
pub mod stats;

pub use config::OctreeConfig;
pub use cursor::{NodeCursor, MAX_PATH_LEVEL};
pub use error::{OctreeError, OctreeResult};
pub use iter::{BreadthFirstIter, LeafIter, NodeIter};
pub use node::{BlockKey, Node, NodeArena, NodeId};
pub use octree::Octree;
pub use query::{OctreeVisitor, VisitStatus, VisitedNode};
pub use stats::OctreeStats;

pub mod prelude {
    pub use super::{
        NodeCursor, NodeId, Octree, OctreeConfig, OctreeError, OctreeResult, OctreeStats,
        OctreeVisitor, VisitStatus, VisitedNode,
    };
}
