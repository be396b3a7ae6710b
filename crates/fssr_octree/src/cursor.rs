use crate::{Node, NodeId, Octree, OctreeError, OctreeResult};

use fssr_core::Octant;

/// The deepest level whose path fits in the `u128` path of a `NodeCursor`.
pub const MAX_PATH_LEVEL: usize = 42;

/// A handle to one node of an `Octree`, along with the node's address.
///
/// The address is a `(level, path)` pair. The path packs the octant chosen at every level as 3 bits, with the choice made
/// at the root in the most significant position. For a node reached by octants `o_0, o_1, ..., o_{level-1}`:
///
/// ```text
/// path = o_0 << 3 * (level - 1) | o_1 << 3 * (level - 2) | ... | o_{level-1}
/// ```
///
/// Addresses are relative to the current root, so they become stale when the root expands. Since a cursor borrows the
/// octree, it can't be held across any mutation.
///
/// Besides positional navigation, a cursor can enumerate nodes depth-first with `next_node`, `next_leaf` and
/// `next_branch`. When enumeration runs out of nodes, the cursor becomes exhausted and `current` returns `None`.
///
/// Enumeration also works below `MAX_PATH_LEVEL`, but nodes there have no representable path, so `path` fails for them
/// and `descend`/`descend_to` refuse to go there.
pub struct NodeCursor<'a, S> {
    octree: &'a Octree<S>,
    current: Option<NodeId>,
    level: usize,
    // Always the path of the ancestor at level `min(level, MAX_PATH_LEVEL)`.
    path: u128,
}

impl<'a, S> Clone for NodeCursor<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S> Copy for NodeCursor<'a, S> {}

impl<'a, S> std::fmt::Debug for NodeCursor<'a, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeCursor")
            .field("current", &self.current)
            .field("level", &self.level)
            .field("path", &format_args!("{:#o}", self.path))
            .finish()
    }
}

impl<'a, S> NodeCursor<'a, S> {
    /// A cursor at the root of `octree`, which is exhausted if the octree is empty.
    pub(crate) fn new(octree: &'a Octree<S>) -> Self {
        let mut cursor = Self {
            octree,
            current: None,
            level: 0,
            path: 0,
        };
        cursor.first_node();

        cursor
    }

    #[inline]
    pub fn octree(&self) -> &'a Octree<S> {
        self.octree
    }

    #[inline]
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    #[inline]
    pub fn node(&self) -> Option<&'a Node<S>> {
        self.current.and_then(|id| self.octree.arena().get(id))
    }

    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// The path of the current node. Fails for nodes deeper than `MAX_PATH_LEVEL`.
    #[inline]
    pub fn path(&self) -> OctreeResult<u128> {
        if self.level > MAX_PATH_LEVEL {
            return Err(OctreeError::PathOverflow {
                level: self.level,
                max: MAX_PATH_LEVEL,
            });
        }

        Ok(self.path)
    }

    /// The octant that the current node occupies in its parent, or `None` at the root.
    #[inline]
    pub fn octant(&self) -> Option<Octant> {
        self.current.and_then(|id| id.octant())
    }

    /// The samples stored at the current node, empty if the cursor is exhausted.
    #[inline]
    pub fn samples(&self) -> &'a [S] {
        self.node().map(|n| n.samples()).unwrap_or(&[])
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.node().map_or(false, |n| n.is_leaf())
    }

    /// Moves to the root.
    pub fn first_node(&mut self) {
        self.current = self.octree.arena().root().map(|_| NodeId::Root);
        self.level = 0;
        self.path = 0;
    }

    /// Moves to the leftmost leaf, following octant 0 from the root.
    pub fn first_leaf(&mut self) {
        self.first_node();
        self.descend_to_first_leaf();
    }

    /// Moves to the next node in depth-first preorder.
    pub fn next_node(&mut self) {
        match self.first_child() {
            Some(child) => self.step_down(child, Octant::FIRST),
            None => self.next_branch(),
        }
    }

    /// Skips the subtree of the current node, moving to its next sibling, or the next sibling of the nearest ancestor
    /// that has one. Exhausts the cursor when no such node exists.
    pub fn next_branch(&mut self) {
        while let Some(id) = self.current {
            match id {
                NodeId::Root => {
                    self.current = None;
                }
                NodeId::Child { block, octant } => match octant.next() {
                    Some(next) => {
                        self.step_sibling(NodeId::child(block, next), next);
                        return;
                    }
                    None => match self.octree.arena().parent(id) {
                        Some(parent) => self.step_up(parent),
                        None => self.current = None,
                    },
                },
            }
        }
    }

    /// Moves to the next leaf in depth-first order.
    pub fn next_leaf(&mut self) {
        if self.first_child().is_none() {
            self.next_branch();
        }
        self.descend_to_first_leaf();
    }

    /// Moves to the child at `octant`.
    pub fn descend(&mut self, octant: Octant) -> OctreeResult<()> {
        let id = self.current.ok_or(OctreeError::ExhaustedCursor)?;
        let node = self.octree.arena().node(id)?;
        let child = node.child_id(octant).ok_or(OctreeError::DescendFromLeaf {
            level: self.level,
        })?;
        if self.level + 1 > MAX_PATH_LEVEL {
            return Err(OctreeError::PathOverflow {
                level: self.level + 1,
                max: MAX_PATH_LEVEL,
            });
        }
        self.step_down(child, octant);

        Ok(())
    }

    /// Moves to the node with address `(level, path)`, replaying the octant choices from the root.
    ///
    /// On failure, the cursor is left at the deepest node reached.
    pub fn descend_to(&mut self, level: usize, path: u128) -> OctreeResult<()> {
        if level > MAX_PATH_LEVEL {
            return Err(OctreeError::PathOverflow {
                level,
                max: MAX_PATH_LEVEL,
            });
        }
        self.first_node();
        if self.current.is_none() {
            return Err(OctreeError::EmptyOctree);
        }
        for i in 0..level {
            self.descend(Octant::from_low_bits(path >> (3 * (level - i - 1))))?;
        }
        if self.path != path {
            return Err(OctreeError::AddressMismatch {
                level,
                path,
                found_level: self.level,
                found_path: self.path,
            });
        }

        Ok(())
    }

    /// Moves to the parent.
    pub fn ascend(&mut self) -> OctreeResult<()> {
        let id = self.current.ok_or(OctreeError::ExhaustedCursor)?;
        if id.is_root() {
            return Err(OctreeError::AscendFromRoot);
        }
        let parent = self
            .octree
            .arena()
            .parent(id)
            .ok_or(OctreeError::MissingNode(id))?;
        self.step_up(parent);

        Ok(())
    }

    /// A cursor at the child at `octant`, without any path limit.
    pub(crate) fn child(&self, octant: Octant) -> Option<Self> {
        let child = self.node()?.child_id(octant)?;
        let mut cursor = *self;
        cursor.step_down(child, octant);

        Some(cursor)
    }

    fn first_child(&self) -> Option<NodeId> {
        self.node().and_then(|n| n.child_id(Octant::FIRST))
    }

    fn descend_to_first_leaf(&mut self) {
        while let Some(child) = self.first_child() {
            self.step_down(child, Octant::FIRST);
        }
    }

    fn step_down(&mut self, child: NodeId, octant: Octant) {
        if self.level < MAX_PATH_LEVEL {
            self.path = (self.path << 3) | u128::from(u8::from(octant));
        }
        self.level += 1;
        self.current = Some(child);
    }

    fn step_up(&mut self, parent: NodeId) {
        if self.level <= MAX_PATH_LEVEL {
            self.path >>= 3;
        }
        self.level -= 1;
        self.current = Some(parent);
    }

    fn step_sibling(&mut self, sibling: NodeId, octant: Octant) {
        if self.level <= MAX_PATH_LEVEL {
            self.path = (self.path & !0b111) | u128::from(u8::from(octant));
        }
        self.current = Some(sibling);
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod tests {
    use super::*;

    use fssr_core::prelude::*;
    use pretty_assertions::assert_eq;
    use utilities::data_sets::random_samples;

    fn two_level_octree() -> Octree {
        // The coarse sample pins the root size; the fine ones force subdivision down to level 2.
        let mut octree = Octree::new();
        octree
            .insert_samples(vec![
                Sample::new(PointN([0.0, 0.0, 0.0]), 4.0),
                Sample::new(PointN([1.5, 1.5, 1.5]), 1.0),
                Sample::new(PointN([-1.5, -1.5, -1.5]), 1.0),
            ])
            .unwrap();

        octree
    }

    #[test]
    fn empty_octree_has_exhausted_cursor() {
        let octree = Octree::<Sample>::new();
        let mut cursor = NodeCursor::new(&octree);

        assert!(cursor.is_exhausted());
        assert_eq!(cursor.descend_to(0, 0), Err(OctreeError::EmptyOctree));
        assert_eq!(cursor.ascend(), Err(OctreeError::ExhaustedCursor));
        assert!(octree.root_cursor().is_err());
    }

    #[test]
    fn descend_to_matches_octant_steps() {
        let octree = two_level_octree();

        let mut stepped = octree.root_cursor().unwrap();
        stepped.descend(Octant::LAST).unwrap();
        stepped.descend(Octant::FIRST).unwrap();
        assert_eq!(stepped.level(), 2);
        assert_eq!(stepped.path(), Ok(0o70));

        let mut addressed = octree.root_cursor().unwrap();
        addressed.descend_to(2, 0o70).unwrap();
        assert_eq!(addressed.current(), stepped.current());

        stepped.ascend().unwrap();
        assert_eq!(stepped.level(), 1);
        assert_eq!(stepped.path(), Ok(0o7));
        stepped.ascend().unwrap();
        assert_eq!(stepped.current(), Some(NodeId::Root));
        assert_eq!(stepped.ascend(), Err(OctreeError::AscendFromRoot));
    }

    #[test]
    fn every_address_round_trips() {
        let mut octree = Octree::new();
        octree.insert_samples(random_samples(500, 3)).unwrap();

        for node in octree.iter_nodes() {
            let level = node.level();
            let path = node.path().unwrap();

            let mut addressed = octree.root_cursor().unwrap();
            addressed.descend_to(level, path).unwrap();
            assert_eq!(addressed.current(), node.current());

            if level == 0 {
                continue;
            }
            let mut parent = node;
            parent.ascend().unwrap();
            let mut addressed_parent = octree.root_cursor().unwrap();
            addressed_parent.descend_to(level - 1, path >> 3).unwrap();
            assert_eq!(parent.current(), addressed_parent.current());
            assert_eq!((parent.level(), parent.path()), (level - 1, Ok(path >> 3)));

            // Descending by the node's octant undoes the ascent.
            parent.descend(node.octant().unwrap()).unwrap();
            assert_eq!(parent.current(), node.current());
            assert_eq!(parent.path(), Ok(path));
        }
    }

    #[test]
    fn descend_fails_at_leaves_and_bad_addresses() {
        let octree = two_level_octree();
        let mut cursor = octree.root_cursor().unwrap();

        // Octant 1 at level 1 is a leaf.
        assert_eq!(
            cursor.descend_to(2, 0o10),
            Err(OctreeError::DescendFromLeaf { level: 1 })
        );
        // Bits above the requested level can't be reproduced.
        assert_eq!(
            cursor.descend_to(1, 0o17),
            Err(OctreeError::AddressMismatch {
                level: 1,
                path: 0o17,
                found_level: 1,
                found_path: 0o7,
            })
        );
        assert_eq!(
            cursor.descend_to(MAX_PATH_LEVEL + 1, 0),
            Err(OctreeError::PathOverflow {
                level: MAX_PATH_LEVEL + 1,
                max: MAX_PATH_LEVEL
            })
        );
    }

    #[test]
    fn next_node_is_preorder() {
        let octree = two_level_octree();
        let mut cursor = octree.root_cursor().unwrap();

        let mut addresses = Vec::new();
        while !cursor.is_exhausted() {
            addresses.push((cursor.level(), cursor.path().unwrap()));
            cursor.next_node();
        }

        let mut expected = vec![(0, 0), (1, 0)];
        expected.extend((0..8).map(|i| (2, i)));
        expected.extend((1..7).map(|i| (1, i)));
        expected.push((1, 7));
        expected.extend((0..8).map(|i| (2, 0o70 | i)));
        assert_eq!(addresses, expected);
        assert_eq!(addresses.len(), octree.num_nodes());
    }

    #[test]
    fn next_leaf_skips_internal_nodes() {
        let octree = two_level_octree();
        let mut cursor = octree.root_cursor().unwrap();
        cursor.first_leaf();

        let mut num_leaves = 0;
        while !cursor.is_exhausted() {
            assert!(cursor.is_leaf());
            num_leaves += 1;
            cursor.next_leaf();
        }
        assert_eq!(num_leaves, 6 + 8 + 8);
    }

    #[test]
    fn next_branch_skips_subtree() {
        let octree = two_level_octree();
        let mut cursor = octree.root_cursor().unwrap();
        cursor.descend(Octant::FIRST).unwrap();

        cursor.next_branch();
        assert_eq!((cursor.level(), cursor.path()), (1, Ok(1)));

        cursor.descend_to(1, 7).unwrap();
        cursor.next_branch();
        assert!(cursor.is_exhausted());
    }
}
