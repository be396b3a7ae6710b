use crate::NodeId;

use fssr_core::Point3d;
use thiserror::Error;

pub type OctreeResult<T> = Result<T, OctreeError>;

/// Violated preconditions of octree operations. None of these are retryable; they indicate a logic error in the caller
/// or invalid input data.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OctreeError {
    #[error("node {0:?} already has children")]
    ChildrenExist(NodeId),
    #[error("node {0:?} does not exist")]
    MissingNode(NodeId),
    #[error("cannot descend from a leaf at level {level}")]
    DescendFromLeaf { level: usize },
    #[error("cannot ascend from the root")]
    AscendFromRoot,
    #[error("cursor is exhausted")]
    ExhaustedCursor,
    #[error(
        "requested address (level {level}, path {path:#o}) resolved to (level {found_level}, path {found_path:#o})"
    )]
    AddressMismatch {
        level: usize,
        path: u128,
        found_level: usize,
        found_path: u128,
    },
    #[error("level {level} exceeds the maximum addressable level {max}")]
    PathOverflow { level: usize, max: usize },
    #[error("octree is empty")]
    EmptyOctree,
    #[error("sample scale {scale} is too coarse for node of size {node_size} at level {level}")]
    ScaleTooCoarse {
        scale: f64,
        node_size: f64,
        level: usize,
    },
    #[error("sample scale {scale} is finer than the root size {root_size}")]
    ScaleTooFine { scale: f64, root_size: f64 },
    #[error("sample at {position:?} with scale {scale} is not finite and positive")]
    InvalidSample { position: Point3d, scale: f64 },
    #[error("maximum level {requested} exceeds the maximum addressable level {max}")]
    MaxLevelTooDeep { requested: usize, max: usize },
}
