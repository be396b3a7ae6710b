use crate::{ConstZero, Point3d, Point3f};

use auto_impl::auto_impl;

/// Anything with a position and a characteristic scale (radius of influence) can be indexed by an octree.
///
/// Implemented for references and smart pointers as well, so an index can be built over borrowed samples.
#[auto_impl(&, Box, Rc, Arc)]
pub trait ScaledPoint {
    fn position(&self) -> Point3d;

    /// The characteristic radius of the sample. Must be positive.
    fn scale(&self) -> f64;
}

/// An oriented point with a scale, produced by the point cloud stages upstream of surface reconstruction.
///
/// Only `pos` and `scale` matter for spatial indexing; the remaining fields are payload for the surface evaluator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Sample {
    pub pos: Point3d,
    pub normal: Point3f,
    pub color: Point3f,
    pub scale: f64,
    pub confidence: f32,
}

pub type SampleList = Vec<Sample>;

impl Sample {
    /// A sample with full confidence and zeroed normal and color.
    #[inline]
    pub fn new(pos: Point3d, scale: f64) -> Self {
        Self {
            pos,
            normal: Point3f::ZERO,
            color: Point3f::ZERO,
            scale,
            confidence: 1.0,
        }
    }

    #[inline]
    pub fn with_normal(mut self, normal: Point3f) -> Self {
        self.normal = normal;
        self
    }

    #[inline]
    pub fn with_color(mut self, color: Point3f) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

impl ScaledPoint for Sample {
    #[inline]
    fn position(&self) -> Point3d {
        self.pos
    }

    #[inline]
    fn scale(&self) -> f64 {
        self.scale
    }
}
