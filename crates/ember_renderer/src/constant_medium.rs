//! Homogeneous participating medium (smoke, fog) bounded by another geometry.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable, TraceContext};
use crate::sampling::gen_open01;
use crate::{Isotropic, Material, Vec3};
use ember_core::{Color, Texture};
use ember_math::{Aabb, Interval, Ray};

/// Volume of constant density filling a closed boundary.
///
/// The boundary must be convex with outward-facing normals: only the first entry and
/// exit along a ray are used, and a lone back-face hit means the ray starts inside.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    neg_inv_density: f64,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f64, albedo: Arc<dyn Texture>) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::new(albedo)),
        }
    }

    pub fn from_color(boundary: Arc<dyn Hittable>, density: f64, albedo: Color) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Isotropic::from_color(albedo)),
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        ctx: &mut TraceContext<'_>,
    ) -> bool {
        let mut rec1 = HitRecord::default();
        let mut rec2 = HitRecord::default();

        if !self.boundary.hit(ray, Interval::UNIVERSE, &mut rec1, ctx) {
            return false;
        }

        let (t_enter, t_exit) = if self.boundary.hit(
            ray,
            Interval::new(rec1.t + 0.0001, f64::INFINITY),
            &mut rec2,
            ctx,
        ) {
            (rec1.t, rec2.t)
        } else if !rec1.front_face {
            // Only the exit was found: the origin is inside and the boundary (a triangle
            // box, say) cannot report the entry behind it
            (ray_t.min, rec1.t)
        } else {
            return false;
        };

        let mut t_enter = t_enter.max(ray_t.min);
        let t_exit = t_exit.min(ray_t.max);

        if t_enter >= t_exit {
            return false;
        }
        if t_enter < 0.0 {
            t_enter = 0.0;
        }

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * gen_open01(ctx.rng).ln();

        if hit_distance > distance_inside_boundary {
            return false;
        }

        rec.t = t_enter + hit_distance / ray_length;
        rec.p = ray.at(rec.t);
        rec.normal = Vec3::X; // arbitrary
        rec.front_face = true; // also arbitrary
        rec.u = 0.0;
        rec.v = 0.0;
        rec.material = self.phase_function.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}
