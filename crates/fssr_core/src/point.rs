mod point3;
mod point_traits;

#[cfg(feature = "glam")]
mod glam_conversions;
#[cfg(feature = "mint")]
mod mint_conversions;

pub use point3::*;
pub use point_traits::*;

use core::ops::{AddAssign, SubAssign};

/// An N-dimensional point, which is usually just a primitive array of type `N`. It is most convenient to construct points
/// as:
///
/// ```
/// use fssr_core::PointN;
///
/// let p = PointN([1.0, 2.0, 3.0]);
/// ```
///
/// Points support basic linear algebraic operations such as addition, subtraction, scalar multiplication, and scalar
/// division.
///
/// ```
/// use fssr_core::{Point3d, PointN};
///
/// let p1: Point3d = PointN([1.0, 2.0, 3.0]);
/// let p2: Point3d = PointN([3.0, 4.0, 5.0]);
///
/// assert_eq!(p1 + p2, PointN([4.0, 6.0, 8.0]));
/// assert_eq!(p1 - p2, PointN([-2.0, -2.0, -2.0]));
///
/// assert_eq!(p1 * 2.0, PointN([2.0, 4.0, 6.0]));
/// assert_eq!(p1 / 2.0, PointN([0.5, 1.0, 1.5]));
/// ```
///
/// There is also a partial order defined on points which says that a point A is greater than a point B if and only if all
/// of the components of point A are greater than point B. This is useful for checking if a point is inside of the box
/// between two other points:
///
/// ```
/// use fssr_core::{Point3d, PointN};
///
/// let min: Point3d = PointN([0.0, 0.0, 0.0]);
/// let max: Point3d = PointN([3.0, 3.0, 3.0]);
///
/// let p = PointN([0.0, 1.0, 2.0]);
/// assert!(min <= p && p <= max);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PointN<N>(pub N);

impl<N> AddAssign for PointN<N>
where
    PointN<N>: Copy + core::ops::Add<Output = Self>,
{
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<N> SubAssign for PointN<N>
where
    PointN<N>: Copy + core::ops::Sub<Output = Self>,
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
