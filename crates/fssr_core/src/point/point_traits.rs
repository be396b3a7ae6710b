use core::ops::{Add, Div, Mul, Neg, Sub};
use num::Float;

/// A trait that bundles op traits that all `PointN<N>` (and its components) should have.
pub trait Point:
    'static
    + Add<Output = Self>
    + ConstZero
    + Copy
    + Div<<Self as Point>::Scalar, Output = Self>
    + GetComponent<Scalar = <Self as Point>::Scalar>
    + MapComponents<Scalar = <Self as Point>::Scalar>
    + Mul<<Self as Point>::Scalar, Output = Self>
    + Ones
    + PartialEq
    + PartialOrd
    + Sized
    + Sub<Output = Self>
    + Neg<Output = Self>
{
    type Scalar: Copy;

    fn fill(value: <Self as Point>::Scalar) -> Self;
}

pub trait GetComponent {
    type Scalar: Copy;

    /// Returns the component specified by index. I.e. X = 0, Y = 1, Z = 2.
    fn at(&self, component_index: usize) -> Self::Scalar;
}

pub trait MapComponents {
    type Scalar;

    /// Returns the point after applying `f` component-wise.
    fn map_components_unary(&self, f: impl Fn(Self::Scalar) -> Self::Scalar) -> Self;

    /// Returns the point after applying `f` component-wise to both `self` and `other` in parallel.
    fn map_components_binary(
        &self,
        other: &Self,
        f: impl Fn(Self::Scalar, Self::Scalar) -> Self::Scalar,
    ) -> Self;
}

pub trait Ones: Copy {
    /// A point of all ones.
    const ONES: Self;
}

pub trait Distance: Point {
    /// The L1 distance between points.
    fn l1_distance(&self, other: &Self) -> <Self as Point>::Scalar;

    /// The square of the L2 (Euclidean) distance between points.
    fn l2_distance_squared(&self, other: &Self) -> <Self as Point>::Scalar;

    /// The L2 (Euclidean) distance between points.
    fn l2_distance(&self, other: &Self) -> <Self as Point>::Scalar;
}

pub trait NormSquared {
    type Scalar;

    fn norm_squared(&self) -> Self::Scalar;
}

pub trait Norm {
    type Scalar;

    fn norm(&self) -> Self::Scalar;
}

impl<T> Norm for T
where
    T: NormSquared,
    <T as NormSquared>::Scalar: Float,
{
    type Scalar = <T as NormSquared>::Scalar;

    #[inline]
    fn norm(&self) -> Self::Scalar {
        self.norm_squared().sqrt()
    }
}

pub trait DotProduct {
    type Scalar: Copy;

    /// The vector dot product.
    fn dot(&self, other: &Self) -> Self::Scalar;
}

// `Zero` trait doesn't allow associated constants for zero because of bignums.
pub trait ConstZero: Copy {
    const ZERO: Self;
}

// `One` trait doesn't allow associated constants for one because of bignums.
pub trait ConstOne: Copy {
    const ONE: Self;
}

impl ConstZero for f32 {
    const ZERO: f32 = 0.0;
}
impl ConstOne for f32 {
    const ONE: f32 = 1.0;
}

impl ConstZero for f64 {
    const ZERO: f64 = 0.0;
}
impl ConstOne for f64 {
    const ONE: f64 = 1.0;
}
