//! Sphere primitive for ray tracing.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable, TraceContext};
use crate::transform::Transformable;
use crate::{Material, Point3, Vec3};
use ember_math::{Aabb, Axis, DMat3, Interval, Ray};

/// A sphere primitive, optionally moving linearly over the shutter interval.
///
/// Besides its position the sphere carries a texture orientation: accumulated
/// rotations about x, y and z that are applied to the normal before computing
/// `(u, v)`. Rotating a sphere spins its texture without moving its bounds.
#[derive(Clone)]
pub struct Sphere {
    /// Center at time 0
    center: Point3,
    /// Displacement from the time 0 center to the time 1 center
    center_vec: Vec3,
    radius: f64,
    material: Arc<dyn Material>,
    bbox: Aabb,
    /// Texture rotation in radians about x, y, z
    uv_rotation: [f64; 3],
}

impl Sphere {
    /// Create a new stationary sphere.
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self::moving(center, center, radius, material)
    }

    /// Create a sphere moving from `center0` at time 0 to `center1` at time 1.
    pub fn moving(
        center0: Point3,
        center1: Point3,
        radius: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let box0 = Aabb::from_points(center0 - rvec, center0 + rvec);
        let box1 = Aabb::from_points(center1 - rvec, center1 + rvec);

        Self {
            center: center0,
            center_vec: center1 - center0,
            radius,
            material,
            bbox: Aabb::surrounding(&box0, &box1),
            uv_rotation: [0.0; 3],
        }
    }

    /// Center at the given shutter time.
    #[inline]
    pub fn center(&self, time: f64) -> Point3 {
        self.center + time * self.center_vec
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_moving(&self) -> bool {
        self.center_vec != Vec3::ZERO
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f64, f64) {
        // theta: angle down from +Y
        // phi: angle around Y axis from -X
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        let mut u = phi / (2.0 * PI);
        let mut v = theta / PI;

        if u >= 1.0 {
            u -= 1.0;
        }
        if u < 0.0 {
            u += 1.0;
        }
        if v > 1.0 {
            v -= 1.0;
        }
        if v < 0.0 {
            v += 1.0;
        }
        (u, v)
    }

    /// Normal with the texture orientation applied, x then y then z.
    fn oriented_normal(&self, normal: Vec3) -> Vec3 {
        let [rx, ry, rz] = self.uv_rotation;
        if rx == 0.0 && ry == 0.0 && rz == 0.0 {
            return normal;
        }
        DMat3::from_rotation_z(rz)
            * DMat3::from_rotation_y(ry)
            * DMat3::from_rotation_x(rx)
            * normal
    }
}

impl Hittable for Sphere {
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

        let center = self.center(ray.time());
        let oc = ray.origin() - center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::get_sphere_uv(self.oriented_normal(outward_normal));
        rec.material = self.material.as_ref();

        ctx.stats.record_object_hit();
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

impl Transformable for Sphere {
    fn translate(&mut self, offset: Vec3) {
        self.center += offset;
        self.bbox = self.bbox.translate(offset);
    }

    fn rotate(&mut self, axis: Axis, degrees: f64) {
        self.uv_rotation[axis.index()] += degrees.to_radians();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, RenderStats};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::splat(0.5)))
    }

    fn trace(sphere: &Sphere, ray: &Ray, ray_t: Interval) -> Option<(f64, Point3, Vec3, bool)> {
        let stats = RenderStats::new();
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = TraceContext::new(&mut rng, &stats);
        let mut rec = HitRecord::default();
        sphere
            .hit(ray, ray_t, &mut rec, &mut ctx)
            .then_some((rec.t, rec.p, rec.normal, rec.front_face))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let (t, _, normal, front_face) =
            trace(&sphere, &ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((t - 0.5).abs() < 1e-9);
        assert!((normal - Vec3::Z).length() < 1e-9);
        assert!(front_face);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());

        // Ray pointing away from sphere
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(trace(&sphere, &ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::X);

        let (t, _, normal, front_face) =
            trace(&sphere, &ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((t - 1.0).abs() < 1e-9);
        assert!(!front_face);
        assert!((normal + Vec3::X).length() < 1e-9);
    }

    #[test]
    fn test_sphere_root_on_interval_boundary_is_rejected() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, grey());
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);

        // Near root is exactly t = 1 and far root exactly t = 3
        assert!(trace(&sphere, &ray, Interval::new(1.0, 3.0)).is_none());
        let (t, ..) = trace(&sphere, &ray, Interval::new(1.0, 3.5)).unwrap();
        assert!((t - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_points_lie_on_surface() {
        let mut rng = StdRng::seed_from_u64(42);
        let sphere = Sphere::moving(
            Point3::new(0.0, 0.0, -3.0),
            Point3::new(0.0, 1.0, -3.0),
            0.75,
            grey(),
        );

        let mut hits = 0;
        for _ in 0..500 {
            let time: f64 = rng.gen();
            let target = Point3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..2.0),
                -3.0,
            );
            let ray = Ray::new(Point3::ZERO, target, time);

            if let Some((_, p, _, _)) = trace(&sphere, &ray, Interval::new(0.001, f64::INFINITY)) {
                hits += 1;
                let off_surface = ((p - sphere.center(time)).length() - sphere.radius()).abs();
                assert!(off_surface <= 1e-4);
                // Every hit lies inside the bounding box
                assert!(sphere.bounding_box().x.contains(p.x));
                assert!(sphere.bounding_box().y.contains(p.y));
                assert!(sphere.bounding_box().z.contains(p.z));
            }
        }
        assert!(hits > 0);
    }

    #[test]
    fn test_moving_sphere_bbox_covers_both_ends() {
        let sphere = Sphere::moving(Point3::ZERO, Point3::new(4.0, 0.0, 0.0), 1.0, grey());
        let bbox = sphere.bounding_box();

        assert!(sphere.is_moving());
        assert!((bbox.x.min - (-1.0)).abs() < 1e-9);
        assert!((bbox.x.max - 5.0).abs() < 1e-9);
        assert_eq!(sphere.center(0.5), Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_translate_round_trip() {
        let mut sphere = Sphere::new(Point3::new(1.0, 2.0, 3.0), 0.5, grey());
        let original_center = sphere.center(0.0);
        let original_bbox = sphere.bounding_box();

        let offset = Vec3::new(0.3, -7.25, 12.5);
        sphere.translate(offset);
        assert!((sphere.center(0.0) - (original_center + offset)).length() < 1e-12);

        sphere.translate(-offset);
        assert!((sphere.center(0.0) - original_center).length() < 1e-12);
        let bbox = sphere.bounding_box();
        assert!((bbox.min() - original_bbox.min()).length() < 1e-9);
        assert!((bbox.max() - original_bbox.max()).length() < 1e-9);
    }

    #[test]
    fn test_sphere_uv_reference_points() {
        let (u, v) = Sphere::get_sphere_uv(Vec3::X);
        assert!((u - 0.5).abs() < 1e-9 && (v - 0.5).abs() < 1e-9);

        let (u, v) = Sphere::get_sphere_uv(Vec3::Y);
        assert!((u - 0.5).abs() < 1e-9 && (v - 1.0).abs() < 1e-9);

        let (u, _) = Sphere::get_sphere_uv(Vec3::Z);
        assert!((u - 0.25).abs() < 1e-9);

        let (u, _) = Sphere::get_sphere_uv(-Vec3::Z);
        assert!((u - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_spins_texture_not_bounds() {
        let mut sphere = Sphere::new(Point3::ZERO, 1.0, grey());
        let bbox = sphere.bounding_box();

        sphere.rotate(Axis::Y, 90.0);
        assert_eq!(sphere.bounding_box(), bbox);

        // +X rotated a quarter turn about Y faces -Z, which maps to u = 0.75
        let (u, v) = Sphere::get_sphere_uv(sphere.oriented_normal(Vec3::X));
        assert!((u - 0.75).abs() < 1e-9);
        assert!((v - 0.5).abs() < 1e-9);

        sphere.rotate(Axis::Y, -90.0);
        assert!((sphere.oriented_normal(Vec3::X) - Vec3::X).length() < 1e-12);
    }
}
