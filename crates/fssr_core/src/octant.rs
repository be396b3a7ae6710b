use crate::Axis3;

/// The index of one of the 8 sub-cubes of a cube, as a number in `[0..7]` of the binary format `0bZYX`. A set bit means
/// the sub-cube occupies the upper half of its parent on that axis.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Octant(u8);

impl Octant {
    /// All octants in index order.
    pub const ALL: [Octant; 8] = [
        Octant(0),
        Octant(1),
        Octant(2),
        Octant(3),
        Octant(4),
        Octant(5),
        Octant(6),
        Octant(7),
    ];

    pub const FIRST: Self = Octant(0);
    pub const LAST: Self = Octant(7);

    /// Returns `None` if `index` is not in `[0..7]`.
    #[inline]
    pub fn new(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Octant(index))
        } else {
            None
        }
    }

    /// The octant encoded by the lowest 3 bits of `bits`. Higher bits are ignored.
    #[inline]
    pub fn from_low_bits(bits: u128) -> Self {
        Octant((bits & 0b111) as u8)
    }

    #[inline]
    pub fn index(&self) -> u8 {
        self.0
    }

    /// Returns `true` iff this octant is in the upper half of its parent along `axis`.
    #[inline]
    pub fn is_upper(&self, axis: Axis3) -> bool {
        self.0 & axis.octant_bit() != 0
    }

    /// The same octant, moved to the upper half along `axis`.
    #[inline]
    pub fn with_upper(self, axis: Axis3) -> Self {
        Octant(self.0 | axis.octant_bit())
    }

    #[inline]
    pub fn is_last(&self) -> bool {
        *self == Self::LAST
    }

    /// The next sibling in index order, if any.
    #[inline]
    pub fn next(&self) -> Option<Self> {
        Self::new(self.0 + 1)
    }
}

impl From<Octant> for u8 {
    #[inline]
    fn from(octant: Octant) -> Self {
        octant.0
    }
}
