//! Parallelogram primitive built from two triangles, and the box helper built on it.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable, HittableList, TraceContext};
use crate::transform::Transformable;
use crate::{Material, Point3, Triangle, Vec3};
use ember_math::{Aabb, Axis, Interval, Ray};

/// Parallelogram with corner `q` and edges `u`, `v`.
///
/// Hit records carry planar coordinates: `(0, 0)` at `q`, `(1, 0)` at `q + u`,
/// `(0, 1)` at `q + v`.
#[derive(Clone)]
pub struct Quad {
    q: Point3,
    u: Vec3,
    v: Vec3,
    material: Arc<dyn Material>,
    /// `(q, q+u, q+u+v)` and `(q, q+u+v, q+v)`
    triangles: [Triangle; 2],
    bbox: Aabb,
}

impl Quad {
    pub fn new(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let triangles = Self::split(q, u, v, &material);
        let bbox = Aabb::surrounding(
            &triangles[0].bounding_box(),
            &triangles[1].bounding_box(),
        );

        Self {
            q,
            u,
            v,
            material,
            triangles,
            bbox,
        }
    }

    fn split(q: Point3, u: Vec3, v: Vec3, material: &Arc<dyn Material>) -> [Triangle; 2] {
        [
            Triangle::new(q, q + u, q + u + v, material.clone()),
            Triangle::new(q, q + u + v, q + v, material.clone()),
        ]
    }

    fn rebuild(&mut self) {
        *self = Self::new(self.q, self.u, self.v, self.material.clone());
    }

    pub fn corner(&self) -> Point3 {
        self.q
    }

    pub fn center(&self) -> Point3 {
        self.q + 0.5 * (self.u + self.v)
    }
}

impl Hittable for Quad {
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

        for (index, tri) in self.triangles.iter().enumerate() {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if !tri.hit(ray, interval, &mut temp_rec, ctx) {
                continue;
            }

            // Barycentrics weight the second and third vertex of each half
            let (b1, b2) = (temp_rec.u, temp_rec.v);
            (temp_rec.u, temp_rec.v) = if index == 0 {
                (b1 + b2, b2)
            } else {
                (b1, b1 + b2)
            };

            hit_anything = true;
            closest_so_far = temp_rec.t;
            *rec = temp_rec;
        }

        hit_anything
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

impl Transformable for Quad {
    fn translate(&mut self, offset: Vec3) {
        self.q += offset;
        self.rebuild();
    }

    /// Rotate about the quad's center.
    fn rotate(&mut self, axis: Axis, degrees: f64) {
        let pivot = self.center();
        let rotation = axis.rotation(degrees);

        self.q = pivot + rotation * (self.q - pivot);
        self.u = rotation * self.u;
        self.v = rotation * self.v;
        self.rebuild();
    }
}

/// Closed box with opposite corners `a` and `b`, as six outward-facing quads.
pub fn make_box(a: Point3, b: Point3, material: Arc<dyn Material>) -> HittableList {
    let mut sides = HittableList::new();

    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let faces = [
        (Point3::new(min.x, min.y, max.z), dx, dy),  // front
        (Point3::new(max.x, min.y, max.z), -dz, dy), // right
        (Point3::new(max.x, min.y, min.z), -dx, dy), // back
        (Point3::new(min.x, min.y, min.z), dz, dy),  // left
        (Point3::new(min.x, max.y, max.z), dx, -dz), // top
        (Point3::new(min.x, min.y, min.z), dx, dz),  // bottom
    ];

    for (q, u, v) in faces {
        sides.add(Arc::new(Quad::new(q, u, v, material.clone())));
    }

    sides
}
