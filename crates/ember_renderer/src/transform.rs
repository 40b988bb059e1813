//! Spatial decorators and in-place transforms.
//!
//! [`Translate`] and [`Rotate`] wrap a child and move it without touching its data,
//! by transforming rays into the child's space. [`Transformable`] is the in-place
//! alternative used by animation code on concrete primitives.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable, TraceContext};
use crate::Vec3;
use ember_math::{Aabb, Axis, DMat3, DMat3Ext, Interval, Ray};

/// In-place geometry mutators.
///
/// Mutating a primitive that sits in a [`crate::HittableList`] leaves the list's cached
/// bounds stale: remove it first, mutate, then add it back.
pub trait Transformable {
    /// Move by `offset`, updating the bounding box.
    fn translate(&mut self, offset: Vec3);

    /// Rotate by `degrees` about `axis`.
    fn rotate(&mut self, axis: Axis, degrees: f64);
}

/// Child geometry displaced by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self {
            object,
            offset,
            bbox,
        }
    }
}

impl Hittable for Translate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        ctx: &mut TraceContext<'_>,
    ) -> bool {
        // Move the ray backwards by the offset
        let offset_ray = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        if !self.object.hit(&offset_ray, ray_t, rec, ctx) {
            return false;
        }

        // Move the intersection point forwards by the offset
        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Child geometry rotated about a coordinate axis through the origin.
pub struct Rotate {
    object: Arc<dyn Hittable>,
    /// Object to world
    rotation: DMat3,
    /// World to object
    inverse: DMat3,
    bbox: Aabb,
}

impl Rotate {
    pub fn new(object: Arc<dyn Hittable>, axis: Axis, degrees: f64) -> Self {
        let rotation = axis.rotation(degrees);
        let bbox = rotation.transform_aabb(&object.bounding_box());

        Self {
            object,
            rotation,
            inverse: rotation.transpose(),
            bbox,
        }
    }

    /// Rotation about the y axis.
    pub fn y(object: Arc<dyn Hittable>, degrees: f64) -> Self {
        Self::new(object, Axis::Y, degrees)
    }
}

impl Hittable for Rotate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        ctx: &mut TraceContext<'_>,
    ) -> bool {
        // Transform the ray from world space to object space
        let rotated_ray = Ray::new(
            self.inverse * ray.origin(),
            self.inverse * ray.direction(),
            ray.time(),
        );

        if !self.object.hit(&rotated_ray, ray_t, rec, ctx) {
            return false;
        }

        // Transform the intersection from object space back to world space
        rec.p = self.rotation * rec.p;
        rec.normal = self.rotation * rec.normal;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
