// Rotation utilities for DMat3
//
// Axis-constrained rotations used by the rotate decorator and by in-place geometry
// mutators, plus box transformation for rebuilding bounds after a rotation.

use std::fmt;

use glam::DMat3;

use crate::{Aabb, Point3};

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Right-handed rotation about this axis by `degrees`.
    pub fn rotation(self, degrees: f64) -> DMat3 {
        let radians = degrees.to_radians();
        match self {
            Axis::X => DMat3::from_rotation_x(radians),
            Axis::Y => DMat3::from_rotation_y(radians),
            Axis::Z => DMat3::from_rotation_z(radians),
        }
    }

    /// Index of this axis in a `[x, y, z]` array.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Extension trait for DMat3 to provide ray tracing transform utilities.
pub trait DMat3Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl DMat3Ext for DMat3 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let mut result_min = Point3::splat(f64::INFINITY);
        let mut result_max = Point3::splat(f64::NEG_INFINITY);

        for corner in aabb.corners() {
            let rotated = *self * corner;
            result_min = result_min.min(rotated);
            result_max = result_max.max(rotated);
        }

        Aabb::from_points(result_min, result_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_axis_rotation_right_handed() {
        // +X rotated 90 degrees about Y lands on -Z
        assert!(approx(Axis::Y.rotation(90.0) * Vec3::X, -Vec3::Z));
        // +Y rotated 90 degrees about Z lands on -X
        assert!(approx(Axis::Z.rotation(90.0) * Vec3::Y, -Vec3::X));
        // +Z rotated 90 degrees about X lands on -Y
        assert!(approx(Axis::X.rotation(90.0) * Vec3::Z, -Vec3::Y));
    }

    #[test]
    fn test_rotation_inverse_is_transpose() {
        let m = Axis::Y.rotation(37.0);
        let p = Vec3::new(1.0, -2.0, 3.5);
        assert!(approx(m.transpose() * (m * p), p));
    }

    #[test]
    fn test_transform_aabb_quarter_turn() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        let rotated = Axis::Y.rotation(90.0).transform_aabb(&aabb);

        // Extent along x moves onto -z
        assert!((rotated.z.min - (-2.0)).abs() < 1e-9);
        assert!(rotated.z.max.abs() < 1e-9);
        assert!((rotated.x.max - 1.0).abs() < 1e-9);
        assert!((rotated.y.max - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_display_and_index() {
        assert_eq!(Axis::X.to_string(), "x");
        assert_eq!(Axis::Z.to_string(), "z");
        assert_eq!([Axis::X, Axis::Y, Axis::Z].map(Axis::index), [0, 1, 2]);
    }
}
