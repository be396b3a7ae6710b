use crate::{Node, NodeId, Octree, OctreeError, OctreeResult};

use fssr_core::Octant;
use std::collections::VecDeque;
use tracing::{debug, info, info_span};

impl<S> Octree<S> {
    /// Subdivides every leaf once, so the tree gains one level everywhere. Every node still has either 0 or 8 children.
    pub fn refine_octree(&mut self) -> OctreeResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        let _span = info_span!("refine_octree").entered();
        let num_nodes_before = self.num_nodes();

        let mut queue = VecDeque::new();
        queue.push_back(NodeId::Root);
        while let Some(id) = queue.pop_front() {
            match self.arena().node(id)?.children() {
                Some(block) => {
                    queue.extend(Octant::ALL.iter().map(|octant| NodeId::child(block, *octant)))
                }
                // The new children are not enqueued.
                None => {
                    self.create_children(id)?;
                }
            }
        }
        debug!(
            num_created = self.num_nodes() - num_nodes_before,
            "refined octree"
        );

        Ok(())
    }

    /// Removes every node deeper than the maximum level. The samples of removed nodes are moved into their ancestor at
    /// the maximum level, so no sample is lost.
    pub fn limit_octree_level(&mut self) -> OctreeResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        let _span = info_span!("limit_octree_level").entered();
        let max_level = self.max_level();

        let mut fold_targets = Vec::new();
        let mut stack = vec![(NodeId::Root, 0)];
        while let Some((id, level)) = stack.pop() {
            let block = match self.arena().node(id)?.children() {
                Some(block) => block,
                None => continue,
            };
            if level == max_level {
                fold_targets.push(id);
            } else {
                stack.extend(
                    Octant::ALL
                        .iter()
                        .map(|octant| (NodeId::child(block, *octant), level + 1)),
                );
            }
        }

        let mut num_removed = 0;
        let mut num_moved = 0;
        for target in fold_targets {
            let (samples, removed) = self.take_subtree_samples(target)?;
            num_removed += removed;
            num_moved += samples.len();
            self.arena_mut().node_mut(target)?.samples.extend(samples);
        }
        self.subtract_nodes(num_removed);
        info!(max_level, num_removed, num_moved, "limited octree level");

        Ok(())
    }

    /// Frees all descendants of `id`, turning it into a leaf. Returns their samples in depth-first preorder, along with the
    /// number of freed nodes.
    fn take_subtree_samples(&mut self, id: NodeId) -> OctreeResult<(Vec<S>, usize)> {
        let mut samples = Vec::new();
        let mut num_removed = 0;

        let mut stack: Vec<Node<S>> = Vec::new();
        if let Some(block) = self.arena_mut().node_mut(id)?.children.take() {
            stack.push(Node {
                samples: Vec::new(),
                children: Some(block),
            });
        }
        while let Some(node) = stack.pop() {
            samples.extend(node.samples);
            if let Some(key) = node.children {
                let block = self
                    .arena_mut()
                    .take_block(key)
                    .ok_or(OctreeError::MissingNode(NodeId::child(key, Octant::FIRST)))?;
                num_removed += 8;
                stack.extend(IntoIterator::into_iter(block.nodes).rev());
            }
        }

        Ok((samples, num_removed))
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
