//! Ember math - vectors, intervals, rays and bounding boxes.
//!
//! Everything is double precision. `Vec3`, `Point3` and `Color`-style values are all
//! `glam::DVec3` under different names.

pub use glam::{dvec3, DMat3, DVec3};

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{Axis, DMat3Ext};

/// Direction or displacement in 3D space.
pub type Vec3 = DVec3;

/// Position in 3D space.
pub type Point3 = DVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_alias_is_double_precision() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0_f64);
        assert_eq!(v, dvec3(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
    }
}
