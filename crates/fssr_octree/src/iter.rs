//! Iterators over the nodes of an `Octree`, yielding a `NodeCursor` for each node.

use crate::NodeCursor;

use fssr_core::Octant;
use std::collections::VecDeque;

/// Visits every node in depth-first preorder. Children are visited in octant order.
pub struct NodeIter<'a, S> {
    cursor: NodeCursor<'a, S>,
}

impl<'a, S> NodeIter<'a, S> {
    pub(crate) fn new(mut cursor: NodeCursor<'a, S>) -> Self {
        cursor.first_node();

        Self { cursor }
    }
}

impl<'a, S> Iterator for NodeIter<'a, S> {
    type Item = NodeCursor<'a, S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_exhausted() {
            return None;
        }
        let item = self.cursor;
        self.cursor.next_node();

        Some(item)
    }
}

/// Visits every leaf in depth-first order.
pub struct LeafIter<'a, S> {
    cursor: NodeCursor<'a, S>,
}

impl<'a, S> LeafIter<'a, S> {
    pub(crate) fn new(mut cursor: NodeCursor<'a, S>) -> Self {
        cursor.first_leaf();

        Self { cursor }
    }
}

impl<'a, S> Iterator for LeafIter<'a, S> {
    type Item = NodeCursor<'a, S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_exhausted() {
            return None;
        }
        let item = self.cursor;
        self.cursor.next_leaf();

        Some(item)
    }
}

/// Visits every node level by level, starting at the root. Within a level, nodes are ordered by path.
pub struct BreadthFirstIter<'a, S> {
    queue: VecDeque<NodeCursor<'a, S>>,
}

impl<'a, S> BreadthFirstIter<'a, S> {
    pub(crate) fn new(mut root: NodeCursor<'a, S>) -> Self {
        root.first_node();
        let mut queue = VecDeque::new();
        if !root.is_exhausted() {
            queue.push_back(root);
        }

        Self { queue }
    }
}

impl<'a, S> Iterator for BreadthFirstIter<'a, S> {
    type Item = NodeCursor<'a, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.queue.pop_front()?;
        self.queue
            .extend(Octant::ALL.iter().filter_map(|octant| item.child(*octant)));

        Some(item)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
