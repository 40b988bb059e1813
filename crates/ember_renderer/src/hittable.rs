//! Geometry interface: the `Hittable` trait, hit records and the object list.

use std::sync::Arc;

use crate::material::{Material, ScatterResult};
use crate::{Point3, RenderStats, Vec3};
use ember_math::{Aabb, Interval, Ray};
use rand::RngCore;

/// Placeholder for records that have not been filled in yet. Absorbs everything.
struct DummyMaterial;

impl Material for DummyMaterial {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }
}

static DUMMY_MATERIAL: DummyMaterial = DummyMaterial;

/// Per-sample state threaded through intersection and shading.
pub struct TraceContext<'r> {
    pub rng: &'r mut dyn RngCore,
    pub stats: &'r RenderStats,
}

impl<'r> TraceContext<'r> {
    pub fn new(rng: &'r mut dyn RngCore, stats: &'r RenderStats) -> Self {
        Self { rng, stats }
    }
}

/// Surface data at the nearest accepted intersection.
///
/// Borrows the material of the geometry that produced it.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// World-space hit point
    pub p: Point3,
    /// Unit normal, facing the incoming ray
    pub normal: Vec3,
    pub material: &'a dyn Material,
    /// Surface parameters for texture lookup
    pub u: f64,
    pub v: f64,
    /// Ray parameter of the hit
    pub t: f64,
    /// Ray arrived from the side the outward normal points to
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Point3::ZERO,
            normal: Vec3::ZERO,
            material: &DUMMY_MATERIAL,
            u: 0.0,
            v: 0.0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Store `outward_normal` (unit length) flipped to oppose `ray`, and record which
    /// side was hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Anything a ray can intersect.
///
/// Implementations must be safe to share across render threads and must not report a
/// hit outside the box returned by [`Hittable::bounding_box`].
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `t` strictly inside `ray_t`.
    ///
    /// Fills `rec` and returns true on a hit. On a miss `rec` may hold partial writes
    /// and must not be read.
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        ctx: &mut TraceContext<'_>,
    ) -> bool;

    /// Conservative world-space bounds, fixed until the object is mutated.
    fn bounding_box(&self) -> Aabb;
}

/// Ordered collection of shared geometry, tested front to back for the nearest hit.
///
/// Members are shared handles so scene code can keep its own reference for animation.
/// To mutate a member, remove it, mutate through `Arc::make_mut`, then add it back:
/// the cached bounding box only grows, so it still encloses everything afterwards.
#[derive(Clone)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    pub fn from_object(object: Arc<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    /// Append `object`, growing the cached bounds to cover it.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Remove the member that shares `handle`'s allocation.
    ///
    /// The bounding box is left as is. Returns whether anything was removed.
    pub fn remove<T: Hittable + ?Sized>(&mut self, handle: &Arc<T>) -> bool {
        let target = Arc::as_ptr(handle).cast::<()>();
        match self
            .objects
            .iter()
            .position(|o| Arc::as_ptr(o).cast::<()>() == target)
        {
            Some(index) => {
                self.objects.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every member and reset the bounds.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        ctx: &mut TraceContext<'_>,
    ) -> bool {
        let mut temp_rec = HitRecord::default();
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if object.hit(ray, interval, &mut temp_rec, ctx) {
                hit_anything = true;
                closest_so_far = temp_rec.t;
                *rec = temp_rec;
            }
        }

        hit_anything
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::splat(0.5)))
    }

    #[test]
    fn test_list_returns_nearest_hit() {
        let mut world = HittableList::new();
        // Far sphere is added first so ordering cannot explain the result
        world.add(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -5.5), 0.5, grey())));
        world.add(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -2.5), 0.5, grey())));

        let ray = Ray::new_simple(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let stats = RenderStats::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = TraceContext::new(&mut rng, &stats);
        let mut rec = HitRecord::default();

        assert!(world.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec, &mut ctx));
        assert!((rec.t - 2.0).abs() < 1e-9);
        assert!((rec.p.z - (-2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_list_never_hits() {
        let world = HittableList::new();
        let ray = Ray::new_simple(Point3::ZERO, Vec3::X);
        let stats = RenderStats::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ctx = TraceContext::new(&mut rng, &stats);
        let mut rec = HitRecord::default();

        assert!(!world.hit(&ray, Interval::UNIVERSE, &mut rec, &mut ctx));
        assert_eq!(world.bounding_box(), Aabb::EMPTY);
    }

    #[test]
    fn test_remove_by_identity_keeps_bbox() {
        let near = Arc::new(Sphere::new(Point3::ZERO, 1.0, grey()));
        let far = Arc::new(Sphere::new(Point3::new(10.0, 0.0, 0.0), 1.0, grey()));
        // Same geometry, different allocation
        let twin = Arc::new(Sphere::new(Point3::ZERO, 1.0, grey()));

        let mut world = HittableList::new();
        world.add(near.clone());
        world.add(far.clone());
        let before = world.bounding_box();

        assert!(!world.remove(&twin));
        assert!(world.remove(&far));
        assert!(!world.remove(&far));
        assert_eq!(world.len(), 1);
        assert_eq!(world.bounding_box(), before);

        world.clear();
        assert!(world.is_empty());
        assert_eq!(world.bounding_box(), Aabb::EMPTY);
    }

    #[test]
    fn test_set_face_normal() {
        let ray = Ray::new_simple(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        rec.set_face_normal(&ray, Vec3::Z);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);

        rec.set_face_normal(&ray, -Vec3::Z);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }
}
