use crate::{Axis3, Distance, Octant, Point, Point3d};

/// An axis-aligned cube given by its center and edge length.
///
/// Every node of an octree covers one `Cube`, although octrees in this workspace never store it per node. Instead it is
/// recovered from the root cube and the octant choices made on the way down, using `Cube::child`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Cube {
    center: Point3d,
    edge_length: f64,
}

impl Cube {
    #[inline]
    pub fn new(center: Point3d, edge_length: f64) -> Self {
        Self {
            center,
            edge_length,
        }
    }

    #[inline]
    pub fn center(&self) -> Point3d {
        self.center
    }

    #[inline]
    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    #[inline]
    pub fn half_edge_length(&self) -> f64 {
        self.edge_length / 2.0
    }

    #[inline]
    pub fn minimum(&self) -> Point3d {
        self.center - Point3d::fill(self.half_edge_length())
    }

    #[inline]
    pub fn maximum(&self) -> Point3d {
        self.center + Point3d::fill(self.half_edge_length())
    }

    /// Half the length of the space diagonal, i.e. the radius of the smallest ball around `center` that contains the cube.
    #[inline]
    pub fn half_diagonal(&self) -> f64 {
        3f64.sqrt() * self.half_edge_length()
    }

    /// Returns `true` iff `p` lies in the closed cube.
    #[inline]
    pub fn contains(&self, p: Point3d) -> bool {
        self.minimum() <= p && p <= self.maximum()
    }

    /// The octant of the child cube that `p` falls into. Points exactly on a splitting plane belong to the lower half.
    #[inline]
    pub fn octant_containing(&self, p: Point3d) -> Octant {
        let mut octant = Octant::FIRST;
        for axis in Axis3::ALL.iter() {
            if p.axis_component(*axis) > self.center.axis_component(*axis) {
                octant = octant.with_upper(*axis);
            }
        }

        octant
    }

    /// The child cube at `octant`, with half the edge length.
    #[inline]
    pub fn child(&self, octant: Octant) -> Self {
        let offset = self.edge_length / 4.0;
        let mut center = self.center;
        for axis in Axis3::ALL.iter() {
            if octant.is_upper(*axis) {
                *center.axis_component_mut(*axis) += offset;
            } else {
                *center.axis_component_mut(*axis) -= offset;
            }
        }

        Self::new(center, self.edge_length / 2.0)
    }

    /// The cube with twice the edge length that has `self` as one of its children, grown towards `p` on every axis. Also
    /// returns the octant that `self` occupies in the parent.
    ///
    /// On each axis where `p` is strictly greater than the center, `self` becomes the lower half; otherwise it becomes the
    /// upper half.
    #[inline]
    pub fn parent_toward(&self, p: Point3d) -> (Self, Octant) {
        let offset = self.half_edge_length();
        let mut octant = Octant::FIRST;
        let mut center = self.center;
        for axis in Axis3::ALL.iter() {
            if p.axis_component(*axis) > self.center.axis_component(*axis) {
                *center.axis_component_mut(*axis) += offset;
            } else {
                octant = octant.with_upper(*axis);
                *center.axis_component_mut(*axis) -= offset;
            }
        }

        (Self::new(center, self.edge_length * 2.0), octant)
    }

    /// A lower bound on the distance from `p` to any point within `half_diagonal` of the center.
    #[inline]
    pub fn min_distance_bound(&self, p: Point3d) -> f64 {
        p.l2_distance(&self.center) - self.half_diagonal()
    }
}
