use super::{point_traits::*, PointN};
use crate::Axis3;

use core::ops::{Add, Div, Mul, Neg, Sub};
use num::Float;
use std::cmp::Ordering;

/// A 3-dimensional point with scalar type `T`.
pub type Point3<T> = PointN<[T; 3]>;
/// A 3-dimensional point with scalar type `f64`. Sample positions and octree geometry use this type.
pub type Point3d = PointN<[f64; 3]>;
/// A 3-dimensional point with scalar type `f32`. Used for sample payload like normals and colors.
pub type Point3f = PointN<[f32; 3]>;

impl<T> Point3<T> {
    #[inline]
    pub fn x_mut(&mut self) -> &mut T {
        &mut self.0[0]
    }

    #[inline]
    pub fn y_mut(&mut self) -> &mut T {
        &mut self.0[1]
    }

    #[inline]
    pub fn z_mut(&mut self) -> &mut T {
        &mut self.0[2]
    }

    #[inline]
    pub fn axis_component(&self, axis: Axis3) -> &T {
        &self.0[axis.index()]
    }

    #[inline]
    pub fn axis_component_mut(&mut self, axis: Axis3) -> &mut T {
        &mut self.0[axis.index()]
    }
}

impl<T> Point3<T>
where
    T: Copy,
{
    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> T {
        self.0[2]
    }
}

impl<T> Point3<T>
where
    T: Copy + Mul<Output = T> + Sub<Output = T>,
{
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self([
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        ])
    }
}

impl<T> Point3<T>
where
    T: Float,
{
    /// Returns `true` iff every component is neither infinite nor NaN.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite() && self.z().is_finite()
    }
}

impl From<Point3f> for Point3d {
    #[inline]
    fn from(p: Point3f) -> Self {
        PointN([p.x() as f64, p.y() as f64, p.z() as f64])
    }
}

impl<T> MapComponents for Point3<T>
where
    T: Copy,
{
    type Scalar = T;

    #[inline]
    fn map_components_unary(&self, f: impl Fn(Self::Scalar) -> Self::Scalar) -> Self {
        PointN([f(self.x()), f(self.y()), f(self.z())])
    }

    #[inline]
    fn map_components_binary(
        &self,
        other: &Self,
        f: impl Fn(Self::Scalar, Self::Scalar) -> Self::Scalar,
    ) -> Self {
        PointN([
            f(self.x(), other.x()),
            f(self.y(), other.y()),
            f(self.z(), other.z()),
        ])
    }
}

impl<T> GetComponent for Point3<T>
where
    T: Copy,
{
    type Scalar = T;

    #[inline]
    fn at(&self, component_index: usize) -> T {
        self.0[component_index]
    }
}

impl<T> ConstZero for Point3<T>
where
    T: ConstZero,
{
    const ZERO: Self = PointN([T::ZERO; 3]);
}

impl<T> Ones for Point3<T>
where
    T: ConstOne,
{
    const ONES: Self = PointN([T::ONE; 3]);
}

impl<T> DotProduct for Point3<T>
where
    T: Copy + Add<Output = T> + Mul<Output = T>,
{
    type Scalar = T;

    #[inline]
    fn dot(&self, other: &Self) -> Self::Scalar {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }
}

impl<T> NormSquared for Point3<T>
where
    T: Copy + Add<Output = T> + Mul<Output = T>,
{
    type Scalar = T;

    #[inline]
    fn norm_squared(&self) -> T {
        self.dot(self)
    }
}

impl<T> Distance for Point3<T>
where
    T: Float,
    Point3<T>: Point<Scalar = T>,
{
    #[inline]
    fn l1_distance(&self, other: &Self) -> T {
        let diff = *self - *other;

        diff.x().abs() + diff.y().abs() + diff.z().abs()
    }

    #[inline]
    fn l2_distance_squared(&self, other: &Self) -> T {
        (*self - *other).norm_squared()
    }

    #[inline]
    fn l2_distance(&self, other: &Self) -> T {
        self.l2_distance_squared(other).sqrt()
    }
}

// This particular partial order allows us to say that a box contains a point p iff p is GEQ the minimum of the box and p
// is LEQ the maximum of the box.
impl<T> PartialOrd for Point3<T>
where
    T: Copy + PartialOrd,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self < other {
            Some(Ordering::Less)
        } else if self > other {
            Some(Ordering::Greater)
        } else if self.x() == other.x() && self.y() == other.y() && self.z() == other.z() {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        self.x() < other.x() && self.y() < other.y() && self.z() < other.z()
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        self.x() > other.x() && self.y() > other.y() && self.z() > other.z()
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        self.x() <= other.x() && self.y() <= other.y() && self.z() <= other.z()
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        self.x() >= other.x() && self.y() >= other.y() && self.z() >= other.z()
    }
}

impl<T> Add for Point3<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 + c2)
    }
}

impl<T> Sub for Point3<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 - c2)
    }
}

impl<T> Neg for Point3<T>
where
    T: Copy + Neg<Output = T>,
{
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.map_components_unary(|c| -c)
    }
}

impl<T> Mul<T> for Point3<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        self.map_components_unary(|c| rhs * c)
    }
}

impl<T> Mul<Point3<T>> for Point3<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        self.map_components_binary(&other, |c1, c2| c1 * c2)
    }
}

macro_rules! impl_float_point3 {
    ($scalar:ty) => {
        impl Point for Point3<$scalar> {
            type Scalar = $scalar;

            #[inline]
            fn fill(value: $scalar) -> Self {
                PointN([value; 3])
            }
        }

        impl Mul<Point3<$scalar>> for $scalar {
            type Output = Point3<$scalar>;

            #[inline]
            fn mul(self, rhs: Point3<$scalar>) -> Point3<$scalar> {
                rhs * self
            }
        }

        impl Div<$scalar> for Point3<$scalar> {
            type Output = Self;

            #[inline]
            fn div(self, rhs: $scalar) -> Self {
                self.map_components_unary(|c| c / rhs)
            }
        }

        impl Div<Self> for Point3<$scalar> {
            type Output = Self;

            #[inline]
            fn div(self, rhs: Self) -> Self {
                self.map_components_binary(&rhs, |c1, c2| c1 / c2)
            }
        }
    };
}

impl_float_point3!(f32);
impl_float_point3!(f64);
