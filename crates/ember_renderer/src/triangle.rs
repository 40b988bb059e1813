//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable, TraceContext};
use crate::transform::Transformable;
use crate::{Material, Point3, Vec3};
use ember_math::{Aabb, Axis, Interval, Ray};

/// Determinant and distance threshold for rejecting degenerate hits.
const EPSILON: f64 = 1e-8;

/// A triangle primitive.
#[derive(Clone)]
pub struct Triangle {
    /// Vertices
    v0: Point3,
    v1: Point3,
    v2: Point3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    /// Material
    material: Arc<dyn Material>,
    /// Reject hits on the back face
    single_sided: bool,
    /// Bounding box
    bbox: Aabb,
}

impl Triangle {
    /// Create a new double-sided triangle from three vertices.
    pub fn new(v0: Point3, v1: Point3, v2: Point3, material: Arc<dyn Material>) -> Self {
        let mut tri = Self {
            v0,
            v1,
            v2,
            normal: Vec3::ZERO,
            material,
            single_sided: false,
            bbox: Aabb::EMPTY,
        };
        tri.update_derived();
        tri
    }

    /// Only accept hits where the ray approaches the counter-clockwise side.
    pub fn single_sided(mut self) -> Self {
        self.single_sided = true;
        self
    }

    pub fn vertices(&self) -> [Point3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn centroid(&self) -> Point3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Recompute normal and bounds after the vertices change.
    fn update_derived(&mut self) {
        // Degenerate triangles get a zero normal; their determinant is zero so they never hit
        self.normal = (self.v1 - self.v0).cross(self.v2 - self.v0).normalize_or_zero();

        let min = self.v0.min(self.v1).min(self.v2);
        let max = self.v0.max(self.v1).max(self.v2);
        self.bbox = Aabb::from_points(min, max);
    }
}

impl Hittable for Triangle {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        ctx: &mut TraceContext<'_>,
    ) -> bool {
        if !self.bbox.hit(ray, ray_t) {
            return false;
        }
        ctx.stats.record_bbox_hit();
        ctx.stats.record_triangle_test();

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let pvec = ray.direction().cross(edge2);
        let det = edge1.dot(pvec);

        // Back face of a single-sided triangle
        if self.single_sided && det < EPSILON {
            return false;
        }
        // Ray is parallel to triangle
        if det.abs() < EPSILON {
            return false;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin() - self.v0;
        let u = tvec.dot(pvec) * inv_det;

        // Check if intersection is outside triangle (u parameter)
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let qvec = tvec.cross(edge1);
        let v = ray.direction().dot(qvec) * inv_det;

        // Check if intersection is outside triangle (v parameter)
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = edge2.dot(qvec) * inv_det;
        if !ray_t.surrounds(t) || t <= EPSILON {
            return false;
        }

        // Valid intersection found
        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, self.normal);
        rec.u = u;
        rec.v = v;
        rec.material = self.material.as_ref();

        ctx.stats.record_triangle_hit();
        ctx.stats.record_object_hit();
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

impl Transformable for Triangle {
    fn translate(&mut self, offset: Vec3) {
        self.v0 += offset;
        self.v1 += offset;
        self.v2 += offset;
        self.update_derived();
    }

    /// Rotate about the triangle's own centroid.
    fn rotate(&mut self, axis: Axis, degrees: f64) {
        let pivot = self.centroid();
        let rotation = axis.rotation(degrees);

        self.v0 = pivot + rotation * (self.v0 - pivot);
        self.v1 = pivot + rotation * (self.v1 - pivot);
        self.v2 = pivot + rotation * (self.v2 - pivot);
        self.update_derived();
    }
}
