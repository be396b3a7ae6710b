use crate::{Point3d, PointN};

/// Either the X, Y, or Z axis.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Axis3 {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis3 {
    /// All axes in component order.
    pub const ALL: [Axis3; 3] = [Axis3::X, Axis3::Y, Axis3::Z];

    /// The index for a point's component on this axis.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The bit that encodes this axis in an `Octant` index.
    #[inline]
    pub fn octant_bit(&self) -> u8 {
        1 << self.index()
    }

    #[inline]
    pub fn get_unit_vector(&self) -> Point3d {
        match self {
            Axis3::X => PointN([1.0, 0.0, 0.0]),
            Axis3::Y => PointN([0.0, 1.0, 0.0]),
            Axis3::Z => PointN([0.0, 0.0, 1.0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octant_bits_follow_component_order() {
        let bits: Vec<u8> = Axis3::ALL.iter().map(Axis3::octant_bit).collect();

        assert_eq!(bits, vec![0b001, 0b010, 0b100]);
    }
}
