use super::*;

use glam as gl;

impl From<gl::Vec3> for Point3f {
    #[inline]
    fn from(p: gl::Vec3) -> Self {
        PointN([p.x, p.y, p.z])
    }
}

impl From<Point3f> for gl::Vec3 {
    #[inline]
    fn from(p: Point3f) -> Self {
        gl::Vec3::new(p.x(), p.y(), p.z())
    }
}

impl From<gl::DVec3> for Point3d {
    #[inline]
    fn from(p: gl::DVec3) -> Self {
        PointN([p.x, p.y, p.z])
    }
}

impl From<Point3d> for gl::DVec3 {
    #[inline]
    fn from(p: Point3d) -> Self {
        gl::DVec3::new(p.x(), p.y(), p.z())
    }
}
