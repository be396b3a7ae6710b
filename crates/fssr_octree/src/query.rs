//! Preorder traversal with pruning, and the influence query built on it.
//!
//! ```
//! use fssr_core::prelude::*;
//! use fssr_octree::prelude::*;
//!
//! # fn main() -> Result<(), OctreeError> {
//! let mut octree = Octree::new();
//! octree.insert_samples(vec![
//!     Sample::new(PointN([0.0, 0.0, 0.0]), 1.0),
//!     Sample::new(PointN([0.4, 0.4, 0.4]), 0.1),
//! ])?;
//!
//! // Count the nodes down to level 1, without visiting any deeper nodes.
//! let mut count = 0;
//! octree.visit_nodes_in_preorder(&mut |node: &VisitedNode<Sample>| {
//!     count += 1;
//!     if node.level == 1 {
//!         VisitStatus::Stop
//!     } else {
//!         VisitStatus::Continue
//!     }
//! });
//! assert_eq!(count, 9);
//! # Ok(())
//! # }
//! ```

use crate::{NodeCursor, NodeId, Octree, OctreeError, OctreeResult};

use fssr_core::{Cube, Distance, Octant, Point, Point3d, ScaledPoint};

/// A node as seen by an `OctreeVisitor`, along with the cube it covers.
pub struct VisitedNode<'a, S> {
    pub id: NodeId,
    pub level: usize,
    pub cube: Cube,
    pub samples: &'a [S],
    pub is_leaf: bool,
}

pub trait OctreeVisitor<'a, S> {
    fn visit_node(&mut self, node: &VisitedNode<'a, S>) -> VisitStatus;
}

impl<'a, S, F> OctreeVisitor<'a, S> for F
where
    F: FnMut(&VisitedNode<'a, S>) -> VisitStatus,
{
    #[inline]
    fn visit_node(&mut self, node: &VisitedNode<'a, S>) -> VisitStatus {
        (self)(node)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VisitStatus {
    /// Continue traversing this branch.
    Continue,
    /// Stop traversing this branch.
    Stop,
    /// Stop traversing the entire tree. No further nodes will be visited.
    ExitEarly,
}

impl<S> Octree<S> {
    /// Visit every node in depth-first preorder, children in octant order.
    pub fn visit_nodes_in_preorder<'a>(
        &'a self,
        visitor: &mut impl OctreeVisitor<'a, S>,
    ) -> VisitStatus {
        if self.is_empty() {
            return VisitStatus::Continue;
        }

        self.visit_subtree_in_preorder(NodeId::Root, 0, self.cube(), visitor)
    }

    fn visit_subtree_in_preorder<'a>(
        &'a self,
        id: NodeId,
        level: usize,
        cube: Cube,
        visitor: &mut impl OctreeVisitor<'a, S>,
    ) -> VisitStatus {
        let mut stack = vec![(id, level, cube)];
        while let Some((id, level, cube)) = stack.pop() {
            let node = match self.node(id) {
                Some(node) => node,
                None => continue,
            };
            let visited = VisitedNode {
                id,
                level,
                cube,
                samples: node.samples(),
                is_leaf: node.is_leaf(),
            };
            match visitor.visit_node(&visited) {
                VisitStatus::ExitEarly => return VisitStatus::ExitEarly,
                VisitStatus::Stop => continue,
                VisitStatus::Continue => {}
            }
            if let Some(block) = node.children() {
                for octant in Octant::ALL.iter().rev() {
                    stack.push((
                        NodeId::child(block, *octant),
                        level + 1,
                        cube.child(*octant),
                    ));
                }
            }
        }

        VisitStatus::Continue
    }
}

impl<S: ScaledPoint> Octree<S> {
    /// All samples `s` with `|position - s.position()| <= factor * s.scale()`.
    pub fn influence_query(&self, position: Point3d, factor: f64) -> Vec<&S> {
        let mut result = Vec::new();
        if !self.is_empty() {
            self.collect_influences(position, factor, NodeId::Root, 0, self.cube(), &mut result);
        }

        result
    }

    /// Same as `influence_query`, but only searches the subtree at `cursor`, appending to `result`.
    ///
    /// `parent_center` is the center of the parent of the cursor's node, or the root center if the cursor is at the root.
    /// The center of the node itself is derived from it using the octant that the node occupies in its parent.
    pub fn influence_query_from<'a>(
        &'a self,
        position: Point3d,
        factor: f64,
        cursor: &NodeCursor<'a, S>,
        parent_center: Point3d,
        result: &mut Vec<&'a S>,
    ) -> OctreeResult<()> {
        let id = cursor.current().ok_or(OctreeError::ExhaustedCursor)?;
        let level = cursor.level();
        let node_size = self.root_size() / 2f64.powi(level as i32);

        let offset = if level > 0 { node_size / 2.0 } else { 0.0 };
        let bits = cursor.octant().map_or(0, u8::from);
        let mut center = parent_center - Point3d::fill(offset);
        for (i, c) in center.0.iter_mut().enumerate() {
            if bits & (1 << i) != 0 {
                *c += node_size;
            }
        }
        self.collect_influences(
            position,
            factor,
            id,
            level,
            Cube::new(center, node_size),
            result,
        );

        Ok(())
    }

    // A node only holds samples with scale below twice its edge length, since coarser samples stop at a shallower node.
    // So no sample in a subtree can reach `position` if the subtree's cube is farther away than that.
    fn collect_influences<'a>(
        &'a self,
        position: Point3d,
        factor: f64,
        id: NodeId,
        level: usize,
        cube: Cube,
        result: &mut Vec<&'a S>,
    ) {
        self.visit_subtree_in_preorder(id, level, cube, &mut |node: &VisitedNode<'a, S>| {
            let max_scale = node.cube.edge_length() * 2.0;
            if node.cube.min_distance_bound(position) > factor * max_scale {
                return VisitStatus::Stop;
            }
            for s in node.samples.iter() {
                let radius = factor * s.scale();
                if position.l2_distance_squared(&s.position()) <= radius * radius {
                    result.push(s);
                }
            }

            VisitStatus::Continue
        });
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

    use crate::OctreeConfig;

    use fssr_core::prelude::*;
    use pretty_assertions::assert_eq;
    use rand::prelude::*;
    use utilities::{
        data_sets::random_samples,
        test::{brute_force_influence, test_print},
    };

    #[test]
    fn three_sample_scenario() {
        let mut octree = Octree::with_config(OctreeConfig::new(8)).unwrap();
        octree
            .insert_samples(vec![
                Sample::new(PointN([0.0, 0.0, 0.0]), 1.0),
                Sample::new(PointN([10.0, 0.0, 0.0]), 1.0),
                Sample::new(PointN([0.0, 0.0, 0.0]), 0.1),
            ])
            .unwrap();

        assert!(octree.root_size() > 1.0);
        assert_eq!(octree.num_samples(), 3);

        let mut placements: Vec<(f64, f64, usize)> = octree
            .iter_nodes()
            .flat_map(|c| c.samples().iter().map(move |s| (s.scale, s.pos.x(), c.level())))
            .collect();
        placements.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let (fine, origin, far) = (placements[0], placements[1], placements[2]);
        assert_eq!((fine.0, origin.0, far.0), (0.1, 1.0, 1.0));
        assert_eq!((origin.1, far.1), (0.0, 10.0));
        assert_eq!(origin.2, far.2);
        assert!(origin.2 < fine.2);

        let mut found: Vec<f64> = octree
            .influence_query(PointN([0.0; 3]), 3.0)
            .into_iter()
            .map(|s| s.scale)
            .collect();
        found.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(found, vec![0.1, 1.0]);
    }

    #[test]
    fn query_is_sound_against_brute_force() {
        let samples = random_samples(2000, 51);
        let mut octree = Octree::new();
        octree.insert_samples(samples.iter()).unwrap();

        let mut rng = StdRng::seed_from_u64(52);
        for _ in 0..100 {
            let position = PointN([
                rng.gen_range(-12.0..12.0),
                rng.gen_range(-12.0..12.0),
                rng.gen_range(-12.0..12.0),
            ]);
            let factor = rng.gen_range(0.5..4.0);

            let found = octree.influence_query(position, factor);
            let expected = brute_force_influence(&samples, position, factor);

            // Every sample is stored once, so both sides must agree on the exact set.
            assert_eq!(found.len(), expected.len());
            for s in expected {
                assert!(found.iter().any(|f| std::ptr::eq(**f, s)));
            }
        }
    }

    #[test]
    fn query_is_sound_after_refine_and_limit() {
        // A shallow maximum level folds most samples far above the level their scale would pick.
        let samples = random_samples(1000, 61);
        let mut octree = Octree::with_config(OctreeConfig::new(6)).unwrap();
        octree.insert_samples(samples.iter()).unwrap();
        octree.refine_octree().unwrap();
        octree.set_max_level(3).unwrap();
        octree.limit_octree_level().unwrap();
        assert!(octree.num_levels() <= 4);

        let mut rng = StdRng::seed_from_u64(62);
        let mut positions: Vec<Point3d> = samples.iter().step_by(50).map(|s| s.pos).collect();
        positions.extend((0..100).map(|_| {
            PointN([
                rng.gen_range(-12.0..12.0),
                rng.gen_range(-12.0..12.0),
                rng.gen_range(-12.0..12.0),
            ])
        }));
        for position in positions {
            let factor = rng.gen_range(0.5..4.0);

            let found = octree.influence_query(position, factor);
            let expected = brute_force_influence(&samples, position, factor);

            assert_eq!(found.len(), expected.len());
            for s in expected {
                assert!(found.iter().any(|f| std::ptr::eq(**f, s)));
            }
        }
    }

    #[test]
    fn query_from_subtree_matches_filtered_full_query() {
        let mut octree = Octree::new();
        octree.insert_samples(random_samples(500, 71)).unwrap();
        let position = PointN([1.0, -2.0, 0.5]);

        let root = octree.root_cursor().unwrap();
        let mut total = 0;
        for octant in Octant::ALL.iter() {
            let mut child = root;
            if child.descend(*octant).is_err() {
                break;
            }
            let mut result = Vec::new();
            octree
                .influence_query_from(position, 2.0, &child, octree.root_center(), &mut result)
                .unwrap();
            total += result.len();
        }
        total += root
            .samples()
            .iter()
            .filter(|s| s.pos.l2_distance_squared(&position) <= (2.0 * s.scale) * (2.0 * s.scale))
            .count();

        assert_eq!(total, octree.influence_query(position, 2.0).len());
    }

    #[test]
    fn visitor_can_exit_early() {
        let mut octree = Octree::new();
        octree.insert_samples(random_samples(100, 81)).unwrap();

        let mut visited = 0;
        let status = octree.visit_nodes_in_preorder(&mut |_node: &VisitedNode<Sample>| {
            visited += 1;
            if visited == 3 {
                VisitStatus::ExitEarly
            } else {
                VisitStatus::Continue
            }
        });

        assert_eq!(status, VisitStatus::ExitEarly);
        assert_eq!(visited, 3);
    }

    #[test]
    fn visited_cubes_match_replayed_paths() {
        let mut octree = Octree::new();
        octree.insert_samples(random_samples(200, 91)).unwrap();

        let mut cubes = Vec::new();
        octree.visit_nodes_in_preorder(&mut |node: &VisitedNode<Sample>| {
            cubes.push((node.level, node.cube));
            VisitStatus::Continue
        });
        let replayed: Vec<(usize, Cube)> = octree
            .iter_nodes()
            .map(|c| {
                let (center, size) = octree.node_center_and_size(&c).unwrap();
                (c.level(), Cube::new(center, size))
            })
            .collect();

        assert_eq!(cubes, replayed);
        test_print(&format!("visited {} nodes", cubes.len()));
    }

    #[test]
    fn empty_octree_query_is_empty() {
        let octree = Octree::<Sample>::new();

        assert!(octree.influence_query(PointN([0.0; 3]), 10.0).is_empty());
    }
}
