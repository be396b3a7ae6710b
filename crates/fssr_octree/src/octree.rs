use crate::{
    BlockKey, BreadthFirstIter, LeafIter, Node, NodeArena, NodeCursor, NodeId, NodeIter,
    OctreeConfig, OctreeError, OctreeResult,
};

use fssr_core::{Cube, Octant, Point3d, PointN, Sample, ScaledPoint};
use tracing::{debug, info_span, trace};

/// An adaptive octree over samples with heterogeneous scales.
///
/// A sample lives in the coarsest node on its way down from the root whose edge length is at most the sample's scale,
/// or at the maximum level, whichever is reached first. Samples with a scale of at least twice the root size live in
/// the root, after the root has been expanded until it is large enough.
///
/// The root cube only grows. Every sample is contained in the closed root cube at the time it's inserted, and since
/// expansion keeps the old root as a child, in every later root as well.
#[derive(Clone, Debug)]
pub struct Octree<S = Sample> {
    arena: NodeArena<S>,
    root_center: Point3d,
    root_size: f64,
    num_nodes: usize,
    num_samples: usize,
    config: OctreeConfig,
}

impl<S> Default for Octree<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Octree<S> {
    /// An empty octree with the default configuration.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::default(),
            root_center: PointN([0.0; 3]),
            root_size: 0.0,
            num_nodes: 0,
            num_samples: 0,
            config: OctreeConfig::default(),
        }
    }

    pub fn with_config(config: OctreeConfig) -> OctreeResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            ..Self::new()
        })
    }

    #[inline]
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    #[inline]
    pub fn max_level(&self) -> usize {
        self.config.max_level
    }

    /// Only affects later insertions and `limit_octree_level`.
    pub fn set_max_level(&mut self, max_level: usize) -> OctreeResult<()> {
        let config = self.config.with_max_level(max_level);
        config.validate()?;
        self.config = config;

        Ok(())
    }

    #[inline]
    pub fn root_center(&self) -> Point3d {
        self.root_center
    }

    #[inline]
    pub fn root_size(&self) -> f64 {
        self.root_size
    }

    /// The cube covered by the root, or `None` if the octree is empty.
    #[inline]
    pub fn root_cube(&self) -> Option<Cube> {
        if self.is_empty() {
            None
        } else {
            Some(self.cube())
        }
    }

    /// Returns `true` iff `p` lies within the closed root cube. Always `false` for an empty octree.
    #[inline]
    pub fn is_inside_octree(&self, p: Point3d) -> bool {
        self.root_cube().map_or(false, |c| c.contains(p))
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Removes all nodes and samples. The configuration is kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root_center = PointN([0.0; 3]);
        self.root_size = 0.0;
        self.num_nodes = 0;
        self.num_samples = 0;
    }

    #[inline]
    pub fn arena(&self) -> &NodeArena<S> {
        &self.arena
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node<S>> {
        self.arena.get(id)
    }

    /// A cursor at the root.
    pub fn root_cursor(&self) -> OctreeResult<NodeCursor<'_, S>> {
        if self.is_empty() {
            return Err(OctreeError::EmptyOctree);
        }

        Ok(NodeCursor::new(self))
    }

    pub fn iter_nodes(&self) -> NodeIter<'_, S> {
        NodeIter::new(NodeCursor::new(self))
    }

    pub fn iter_leaves(&self) -> LeafIter<'_, S> {
        LeafIter::new(NodeCursor::new(self))
    }

    pub fn iter_nodes_breadth_first(&self) -> BreadthFirstIter<'_, S> {
        BreadthFirstIter::new(NodeCursor::new(self))
    }

    /// Every stored sample, in depth-first preorder of the nodes that own them.
    pub fn iter_samples(&self) -> impl Iterator<Item = &S> {
        self.iter_nodes().flat_map(|cursor| cursor.samples().iter())
    }

    /// The center and edge length of the node at `cursor`, recovered by replaying its path from the root.
    pub fn node_center_and_size(&self, cursor: &NodeCursor<'_, S>) -> OctreeResult<(Point3d, f64)> {
        if cursor.is_exhausted() {
            return Err(OctreeError::ExhaustedCursor);
        }
        let level = cursor.level();
        let path = cursor.path()?;

        let mut cube = self.cube();
        for i in 0..level {
            cube = cube.child(Octant::from_low_bits(path >> (3 * (level - i - 1))));
        }

        Ok((cube.center(), cube.edge_length()))
    }

    /// Turns the leaf `id` into an internal node with 8 empty leaves.
    pub fn create_children(&mut self, id: NodeId) -> OctreeResult<BlockKey> {
        let block = self.arena.create_children(id)?;
        self.num_nodes += 8;
        trace!(?id, ?block, "created children");

        Ok(block)
    }

    pub(crate) fn cube(&self) -> Cube {
        Cube::new(self.root_center, self.root_size)
    }

    pub(crate) fn arena_mut(&mut self) -> &mut NodeArena<S> {
        &mut self.arena
    }

    pub(crate) fn subtract_nodes(&mut self, num_removed: usize) {
        self.num_nodes -= num_removed;
    }
}

impl<S: ScaledPoint> Octree<S> {
    /// Inserts every sample of `samples` in order. Stops at the first invalid sample, keeping the ones before it.
    pub fn insert_samples(&mut self, samples: impl IntoIterator<Item = S>) -> OctreeResult<()> {
        let _span = info_span!("insert_samples").entered();

        for sample in samples {
            self.insert_sample(sample)?;
        }
        debug!(
            num_samples = self.num_samples,
            num_nodes = self.num_nodes,
            root_size = self.root_size,
            "inserted samples"
        );

        Ok(())
    }

    /// Inserts `sample`, growing the root and subdividing nodes as needed. Returns the node that received the sample.
    ///
    /// Samples must have a finite position and a finite, positive scale.
    pub fn insert_sample(&mut self, sample: S) -> OctreeResult<NodeId> {
        let pos = sample.position();
        let scale = sample.scale();
        if !(pos.is_finite() && scale.is_finite() && scale > 0.0) {
            return Err(OctreeError::InvalidSample {
                position: pos,
                scale,
            });
        }

        if self.is_empty() {
            self.arena.replace_root(Some(Node::default()));
            self.root_center = pos;
            self.root_size = scale;
            self.num_nodes = 1;
        }

        while !self.cube().contains(pos) {
            self.expand_root_for_point(pos)?;
        }

        let target = if scale >= self.root_size * 2.0 {
            self.find_node_expand(pos, scale)?
        } else {
            self.find_node_descend(pos, scale)?.0
        };
        self.arena.node_mut(target)?.samples.push(sample);
        self.num_samples += 1;

        Ok(target)
    }

    /// Doubles the root cube, growing towards `p` on every axis. The old root becomes a child of the new root, keeping its
    /// samples and descendants.
    pub fn expand_root_for_point(&mut self, p: Point3d) -> OctreeResult<()> {
        if self.is_empty() {
            return Err(OctreeError::EmptyOctree);
        }
        let old_root = self
            .arena
            .replace_root(Some(Node::default()))
            .unwrap_or_default();
        let (new_cube, octant) = self.cube().parent_toward(p);
        self.root_center = new_cube.center();
        self.root_size = new_cube.edge_length();

        let block = self.create_children(NodeId::Root)?;
        let moved = NodeId::child(block, octant);
        if let Some(grandchildren) = old_root.children {
            self.arena.set_block_parent(grandchildren, moved)?;
        }
        *self.arena.node_mut(moved)? = old_root;
        debug!(
            root_center = ?self.root_center,
            root_size = self.root_size,
            "expanded root"
        );

        Ok(())
    }

    /// Descends from the root towards `pos`, creating children as needed, until reaching a node with edge length at most
    /// `scale` or the maximum level. Returns that node and its level.
    ///
    /// Fails if `scale` is more than twice the root size, since such a sample belongs above the root.
    pub fn find_node_descend(&mut self, pos: Point3d, scale: f64) -> OctreeResult<(NodeId, usize)> {
        if self.is_empty() {
            return Err(OctreeError::EmptyOctree);
        }
        let mut cube = self.cube();
        if scale > cube.edge_length() * 2.0 {
            return Err(OctreeError::ScaleTooCoarse {
                scale,
                node_size: cube.edge_length(),
                level: 0,
            });
        }

        let mut id = NodeId::Root;
        let mut level = 0;
        while cube.edge_length() > scale && level < self.config.max_level {
            let block = match self.arena.node(id)?.children() {
                Some(block) => block,
                None => self.create_children(id)?,
            };
            let octant = cube.octant_containing(pos);
            id = NodeId::child(block, octant);
            cube = cube.child(octant);
            level += 1;
        }

        Ok((id, level))
    }

    /// Expands the root towards `pos` until `scale` is less than twice the root size, then returns the root.
    ///
    /// Fails if `scale` is smaller than the root size, since such a sample belongs below the root.
    pub fn find_node_expand(&mut self, pos: Point3d, scale: f64) -> OctreeResult<NodeId> {
        if self.is_empty() {
            return Err(OctreeError::EmptyOctree);
        }
        if scale < self.root_size {
            return Err(OctreeError::ScaleTooFine {
                scale,
                root_size: self.root_size,
            });
        }

        while scale >= self.root_size * 2.0 {
            self.expand_root_for_point(pos)?;
        }

        Ok(NodeId::Root)
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

    #[test]
    fn first_sample_defines_root() {
        let mut octree = Octree::new();
        let id = octree
            .insert_sample(Sample::new(PointN([1.0, 2.0, 3.0]), 0.5))
            .unwrap();

        assert_eq!(id, NodeId::Root);
        assert_eq!(octree.root_center(), PointN([1.0, 2.0, 3.0]));
        assert_eq!(octree.root_size(), 0.5);
        assert_eq!(octree.num_nodes(), 1);
        assert_eq!(octree.num_samples(), 1);
    }

    #[test]
    fn expansion_keeps_old_root_as_child() {
        let mut octree = Octree::new();
        octree
            .insert_sample(Sample::new(PointN([0.0; 3]), 1.0))
            .unwrap();
        octree
            .insert_sample(Sample::new(PointN([0.3, 0.3, 0.3]), 0.25))
            .unwrap();
        let nodes_before = octree.num_nodes();

        octree.expand_root_for_point(PointN([5.0, -5.0, 0.0])).unwrap();

        assert_eq!(octree.root_center(), PointN([0.5, -0.5, -0.5]));
        assert_eq!(octree.root_size(), 2.0);
        assert_eq!(octree.num_nodes(), nodes_before + 8);

        // The old root sits in the low half on x and the high half on y and z.
        let mut cursor = octree.root_cursor().unwrap();
        cursor.descend(Octant::new(0b110).unwrap()).unwrap();
        assert_eq!(cursor.samples().len(), 1);
        assert_eq!(
            octree.node_center_and_size(&cursor),
            Ok((PointN([0.0; 3]), 1.0))
        );

        // Grandchildren point back at the relocated node.
        let moved = cursor.current().unwrap();
        cursor.descend(Octant::LAST).unwrap();
        cursor.ascend().unwrap();
        assert_eq!(cursor.current(), Some(moved));
    }

    #[test]
    fn outside_sample_grows_root_until_contained() {
        let mut octree = Octree::new();
        octree
            .insert_sample(Sample::new(PointN([0.0; 3]), 1.0))
            .unwrap();
        octree
            .insert_sample(Sample::new(PointN([100.0, 0.0, 0.0]), 1.0))
            .unwrap();

        let root = octree.root_cube().unwrap();
        assert!(root.contains(PointN([0.0; 3])));
        assert!(root.contains(PointN([100.0, 0.0, 0.0])));
        assert_eq!(root.edge_length(), 128.0);
    }

    #[test]
    fn coarse_sample_expands_root_and_lands_there() {
        let mut octree = Octree::new();
        octree
            .insert_sample(Sample::new(PointN([0.0; 3]), 1.0))
            .unwrap();

        let id = octree
            .insert_sample(Sample::new(PointN([0.1, 0.1, 0.1]), 7.0))
            .unwrap();

        assert_eq!(id, NodeId::Root);
        assert_eq!(octree.root_size(), 4.0);
        assert_eq!(octree.node(NodeId::Root).unwrap().samples().len(), 1);
    }

    #[test]
    fn fine_samples_stop_at_max_level() {
        let mut octree = Octree::with_config(OctreeConfig::new(3)).unwrap();
        octree
            .insert_sample(Sample::new(PointN([0.0; 3]), 1.0))
            .unwrap();
        octree
            .insert_sample(Sample::new(PointN([0.2, 0.2, 0.2]), 0.001))
            .unwrap();

        assert_eq!(octree.samples_per_level(), vec![1, 0, 0, 1]);
        assert_eq!(octree.num_nodes(), 1 + 3 * 8);
    }

    #[test]
    fn inconsistent_scales_are_rejected() {
        let mut octree = Octree::new();
        assert_eq!(
            octree.find_node_descend(PointN([0.0; 3]), 1.0),
            Err(OctreeError::EmptyOctree)
        );

        octree
            .insert_sample(Sample::new(PointN([0.0; 3]), 1.0))
            .unwrap();
        assert_eq!(
            octree.find_node_descend(PointN([0.0; 3]), 3.0),
            Err(OctreeError::ScaleTooCoarse {
                scale: 3.0,
                node_size: 1.0,
                level: 0
            })
        );
        assert_eq!(
            octree.find_node_expand(PointN([0.0; 3]), 0.5),
            Err(OctreeError::ScaleTooFine {
                scale: 0.5,
                root_size: 1.0
            })
        );
        assert_eq!(
            octree.create_children(NodeId::Root).map(|_| ()),
            Ok(())
        );
        assert_eq!(
            octree.create_children(NodeId::Root),
            Err(OctreeError::ChildrenExist(NodeId::Root))
        );
    }

    #[test]
    fn invalid_samples_are_rejected() {
        let mut octree = Octree::new();
        for sample in [
            Sample::new(PointN([f64::NAN, 0.0, 0.0]), 1.0),
            Sample::new(PointN([0.0; 3]), 0.0),
            Sample::new(PointN([0.0; 3]), -1.0),
            Sample::new(PointN([0.0; 3]), f64::INFINITY),
        ] {
            assert!(matches!(
                octree.insert_sample(sample),
                Err(OctreeError::InvalidSample { .. })
            ));
        }
        assert!(octree.is_empty());
    }

    #[test]
    fn every_sample_is_inside_root() {
        let samples = random_samples(1000, 7);
        let mut octree = Octree::new();
        octree.insert_samples(samples.iter().cloned()).unwrap();

        assert_eq!(octree.num_samples(), samples.len());
        for s in samples.iter() {
            assert!(octree.is_inside_octree(s.pos));
        }
        assert_eq!(octree.iter_samples().count(), samples.len());
    }

    #[test]
    fn node_center_and_size_matches_descent() {
        let mut octree = Octree::new();
        octree.insert_samples(random_samples(300, 11)).unwrap();

        for cursor in octree.iter_nodes() {
            let (center, size) = octree.node_center_and_size(&cursor).unwrap();
            let expected_size = octree.root_size() / 2f64.powi(cursor.level() as i32);
            assert_eq!(size, expected_size);
            // Centers of relocated nodes may differ from the ones used at insertion by rounding.
            let cube = Cube::new(center, size * (1.0 + 1e-9));
            for s in cursor.samples() {
                assert!(cube.contains(s.pos));
            }
        }
    }

    #[test]
    fn clear_resets_metadata() {
        let mut octree = Octree::new();
        octree.insert_samples(random_samples(10, 5)).unwrap();

        octree.clear();

        assert!(octree.is_empty());
        assert_eq!(octree.num_nodes(), 0);
        assert_eq!(octree.num_samples(), 0);
        assert_eq!(octree.root_cube(), None);
        assert!(!octree.is_inside_octree(PointN([0.0; 3])));
    }

    #[test]
    fn octree_over_borrowed_samples() {
        let samples = random_samples(50, 13);
        let mut octree: Octree<&Sample> = Octree::new();
        octree.insert_samples(samples.iter()).unwrap();

        assert_eq!(octree.num_samples(), 50);
    }
}
