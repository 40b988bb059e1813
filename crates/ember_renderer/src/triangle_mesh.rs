//! Triangle soup geometry built from flat vertex and index arrays.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable, TraceContext};
use crate::{Material, Point3, Triangle};
use ember_core::{triangle_corners, Mesh};
use ember_math::{Aabb, Interval, Ray};

/// A collection of triangles sharing one material.
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    bbox: Aabb,
}

impl TriangleMesh {
    /// Build one triangle per index triple.
    ///
    /// `positions` holds `x, y, z` per vertex and `indices` holds 0-based vertex
    /// indices. Triples that reference a missing vertex are skipped.
    pub fn new(positions: &[f64], indices: &[u32], material: Arc<dyn Material>) -> Self {
        Self::from_corners(triangle_corners(positions, indices), material)
    }

    pub fn from_mesh(mesh: &Mesh, material: Arc<dyn Material>) -> Self {
        Self::from_corners(mesh.extract_triangle_vertices(), material)
    }

    fn from_corners(corners: Vec<[Point3; 3]>, material: Arc<dyn Material>) -> Self {
        let triangles: Vec<Triangle> = corners
            .into_iter()
            .map(|[v0, v1, v2]| Triangle::new(v0, v1, v2, material.clone()))
            .collect();

        let bbox = triangles
            .iter()
            .fold(Aabb::EMPTY, |acc, tri| Aabb::surrounding(&acc, &tri.bounding_box()));

        log::debug!("Built triangle mesh with {} triangles", triangles.len());
        Self { triangles, bbox }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

impl Hittable for TriangleMesh {
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

        let mut temp_rec = HitRecord::default();
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for tri in &self.triangles {
            if tri.hit(ray, Interval::new(ray_t.min, closest_so_far), &mut temp_rec, ctx) {
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
