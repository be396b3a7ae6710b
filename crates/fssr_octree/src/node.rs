//! Storage for octree nodes.
//!
//! Nodes are never allocated one at a time. The root is stored inline, and every other node lives in a `ChildBlock` of 8
//! siblings, keyed by a `BlockKey` into a `Slab`. A node refers to its children by block key, and a block refers back to
//! the node that owns it, so both directions of the tree can be walked without pointers.

use crate::{OctreeError, OctreeResult};

use fssr_core::Octant;
use slab::Slab;

/// The stable key of a block of 8 sibling nodes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BlockKey(usize);

/// Identifies a node within a `NodeArena`.
///
/// Ids of child nodes stay valid until their block is freed. In particular they survive root expansion, although the
/// level of every node increases by one when that happens.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeId {
    Root,
    Child { block: BlockKey, octant: Octant },
}

impl NodeId {
    #[inline]
    pub fn child(block: BlockKey, octant: Octant) -> Self {
        NodeId::Child { block, octant }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        matches!(self, NodeId::Root)
    }

    /// The octant this node occupies in its parent, or `None` for the root.
    #[inline]
    pub fn octant(&self) -> Option<Octant> {
        match self {
            NodeId::Root => None,
            NodeId::Child { octant, .. } => Some(*octant),
        }
    }
}

/// A leaf (no children) or an internal node (exactly 8 children). Either kind may own samples.
#[derive(Clone, Debug)]
pub struct Node<S> {
    pub(crate) samples: Vec<S>,
    pub(crate) children: Option<BlockKey>,
}

impl<S> Default for Node<S> {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
            children: None,
        }
    }
}

impl<S> Node<S> {
    #[inline]
    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    #[inline]
    pub fn children(&self) -> Option<BlockKey> {
        self.children
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    #[inline]
    pub fn child_id(&self, octant: Octant) -> Option<NodeId> {
        self.children.map(|block| NodeId::child(block, octant))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ChildBlock<S> {
    pub parent: NodeId,
    pub nodes: [Node<S>; 8],
}

impl<S> ChildBlock<S> {
    fn new(parent: NodeId) -> Self {
        Self {
            parent,
            nodes: Default::default(),
        }
    }
}

/// Owns the root node and all child blocks of one octree.
#[derive(Clone, Debug)]
pub struct NodeArena<S> {
    root: Option<Node<S>>,
    blocks: Slab<ChildBlock<S>>,
}

impl<S> Default for NodeArena<S> {
    fn default() -> Self {
        Self {
            root: None,
            blocks: Slab::new(),
        }
    }
}

impl<S> NodeArena<S> {
    #[inline]
    pub fn root(&self) -> Option<&Node<S>> {
        self.root.as_ref()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node<S>> {
        match id {
            NodeId::Root => self.root.as_ref(),
            NodeId::Child { block, octant } => self
                .blocks
                .get(block.0)
                .map(|b| &b.nodes[octant.index() as usize]),
        }
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<S>> {
        match id {
            NodeId::Root => self.root.as_mut(),
            NodeId::Child { block, octant } => self
                .blocks
                .get_mut(block.0)
                .map(|b| &mut b.nodes[octant.index() as usize]),
        }
    }

    /// Same as `get`, but a missing node is an error.
    #[inline]
    pub fn node(&self, id: NodeId) -> OctreeResult<&Node<S>> {
        self.get(id).ok_or(OctreeError::MissingNode(id))
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> OctreeResult<&mut Node<S>> {
        self.get_mut(id).ok_or(OctreeError::MissingNode(id))
    }

    /// The parent of `id`, or `None` for the root and for nodes that don't exist.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        match id {
            NodeId::Root => None,
            NodeId::Child { block, .. } => self.blocks.get(block.0).map(|b| b.parent),
        }
    }

    /// The number of allocated nodes, including the root.
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |_| 1) + 8 * self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Allocates 8 leaves as the children of `id`.
    pub(crate) fn create_children(&mut self, id: NodeId) -> OctreeResult<BlockKey> {
        if !self.node(id)?.is_leaf() {
            return Err(OctreeError::ChildrenExist(id));
        }
        let key = BlockKey(self.blocks.insert(ChildBlock::new(id)));
        self.node_mut(id)?.children = Some(key);

        Ok(key)
    }

    /// Frees the block without touching the node that refers to it.
    pub(crate) fn take_block(&mut self, key: BlockKey) -> Option<ChildBlock<S>> {
        if self.blocks.contains(key.0) {
            Some(self.blocks.remove(key.0))
        } else {
            None
        }
    }

    pub(crate) fn set_block_parent(&mut self, key: BlockKey, parent: NodeId) -> OctreeResult<()> {
        let block = self
            .blocks
            .get_mut(key.0)
            .ok_or(OctreeError::MissingNode(NodeId::child(key, Octant::FIRST)))?;
        block.parent = parent;

        Ok(())
    }

    pub(crate) fn replace_root(&mut self, root: Option<Node<S>>) -> Option<Node<S>> {
        std::mem::replace(&mut self.root, root)
    }

    pub(crate) fn clear(&mut self) {
        self.root = None;
        self.blocks.clear();
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
