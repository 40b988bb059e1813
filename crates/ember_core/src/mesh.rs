//! Triangle mesh ingestion.
//!
//! A [`Mesh`] is the hand-off format between file loaders and the renderer: a flat
//! array of vertex positions (`x0, y0, z0, x1, ...`) and a flat array of 0-based
//! vertex indices where every consecutive triple is one triangle. The renderer turns
//! each triple into a triangle primitive.

use std::path::Path;

use ember_math::{Aabb, Point3};
use thiserror::Error;

/// Errors that can occur while building or loading a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("Failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("Position array length {0} is not a multiple of 3")]
    RaggedPositions(usize),

    #[error("Index array length {0} is not a multiple of 3")]
    RaggedIndices(usize),
}

pub type MeshResult<T> = Result<T, MeshError>;

/// A mesh consisting of flat vertex positions and triangle indices.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// Vertex positions, three floats per vertex
    pub positions: Vec<f64>,

    /// Triangle indices (every 3 indices form a triangle, 0-based)
    pub indices: Vec<u32>,

    /// Axis-aligned bounding box of all positions
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a mesh from flat position and index arrays.
    ///
    /// Indices are not range-checked here; triangles that reference missing vertices
    /// are skipped (and logged) when the triangles are extracted.
    pub fn from_arrays(positions: Vec<f64>, indices: Vec<u32>) -> MeshResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::RaggedPositions(positions.len()));
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(indices.len()));
        }

        let bounds = Self::compute_bounds(&positions);
        Ok(Self {
            positions,
            indices,
            bounds,
        })
    }

    /// Load and triangulate every model in an OBJ file into one mesh.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshResult<Self> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &obj_load_options())?;

        let mesh = Self::from_models(&models)?;
        log::debug!(
            "Loaded OBJ {}: {} models, {} vertices, {} triangles",
            path.display(),
            models.len(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Load an OBJ file, falling back to an empty mesh if it cannot be read.
    pub fn load_obj_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::load_obj(path).unwrap_or_else(|err| {
            log::warn!("{} ({}), continuing with an empty mesh", err, path.display());
            Self::default()
        })
    }

    /// Parse OBJ text held in memory. Material libraries are ignored.
    pub fn from_obj_str(text: &str) -> MeshResult<Self> {
        let mut reader = text.as_bytes();
        let (models, _materials) = tobj::load_obj_buf(&mut reader, &obj_load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })?;
        Self::from_models(&models)
    }

    /// Concatenate tobj models, offsetting each model's indices past the vertices
    /// already collected.
    fn from_models(models: &[tobj::Model]) -> MeshResult<Self> {
        let mut positions = Vec::new();
        let mut indices = Vec::new();

        for model in models {
            let base = (positions.len() / 3) as u32;
            positions.extend(model.mesh.positions.iter().map(|&p| f64::from(p)));
            indices.extend(model.mesh.indices.iter().map(|&i| i + base));
        }

        Self::from_arrays(positions, indices)
    }

    fn compute_bounds(positions: &[f64]) -> Aabb {
        if positions.is_empty() {
            return Aabb::EMPTY;
        }

        let mut min = Point3::splat(f64::INFINITY);
        let mut max = Point3::splat(f64::NEG_INFINITY);

        for p in positions.chunks_exact(3) {
            let pos = Point3::new(p[0], p[1], p[2]);
            min = min.min(pos);
            max = max.max(pos);
        }

        Aabb::from_points(min, max)
    }

    /// Position of vertex `index`, if it exists.
    pub fn vertex(&self, index: usize) -> Option<Point3> {
        let start = index.checked_mul(3)?;
        let p = self.positions.get(start..start + 3)?;
        Some(Point3::new(p[0], p[1], p[2]))
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Get the mesh center (center of bounding box).
    pub fn center(&self) -> Point3 {
        self.bounds.centroid()
    }

    /// Extract triangle vertices as `[v0, v1, v2]` triplets.
    ///
    /// Triangles with an out-of-range index are dropped with a warning.
    pub fn extract_triangle_vertices(&self) -> Vec<[Point3; 3]> {
        triangle_corners(&self.positions, &self.indices)
    }
}

/// Resolve flat index triples against flat positions.
///
/// Triples referencing a missing vertex are skipped and logged; a trailing partial
/// triple is ignored.
pub fn triangle_corners(positions: &[f64], indices: &[u32]) -> Vec<[Point3; 3]> {
    let vertex = |index: u32| {
        let start = (index as usize).checked_mul(3)?;
        let p = positions.get(start..start + 3)?;
        Some(Point3::new(p[0], p[1], p[2]))
    };

    let mut triangles = Vec::with_capacity(indices.len() / 3);
    for chunk in indices.chunks_exact(3) {
        match (vertex(chunk[0]), vertex(chunk[1]), vertex(chunk[2])) {
            (Some(v0), Some(v1), Some(v2)) => triangles.push([v0, v1, v2]),
            _ => log::warn!(
                "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                chunk[0],
                chunk[1],
                chunk[2],
                positions.len() / 3
            ),
        }
    }

    triangles
}

fn obj_load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_OBJ: &str = "\
# unit square in the xy plane
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn test_mesh_from_arrays() {
        let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mesh = Mesh::from_arrays(positions, vec![0, 1, 2]).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex(1), Some(Point3::new(1.0, 0.0, 0.0)));
        assert_eq!(mesh.vertex(3), None);
    }

    #[test]
    fn test_mesh_rejects_ragged_arrays() {
        assert!(matches!(
            Mesh::from_arrays(vec![0.0; 4], vec![]),
            Err(MeshError::RaggedPositions(4))
        ));
        assert!(matches!(
            Mesh::from_arrays(vec![0.0; 9], vec![0, 1]),
            Err(MeshError::RaggedIndices(2))
        ));
    }

    #[test]
    fn test_bounds_computation() {
        let positions = vec![-1.0, -2.0, -3.0, 4.0, 5.0, 6.0, 0.0, 0.0, 0.0];
        let mesh = Mesh::from_arrays(positions, vec![0, 1, 2]).unwrap();

        assert!((mesh.bounds.x.min - (-1.0)).abs() < 1e-9);
        assert!((mesh.bounds.x.max - 4.0).abs() < 1e-9);
        assert!((mesh.bounds.z.min - (-3.0)).abs() < 1e-9);
        assert!((mesh.bounds.z.max - 6.0).abs() < 1e-9);
        assert_eq!(mesh.center(), Point3::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn test_extract_triangle_vertices_skips_bad_indices() {
        let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
        // Second triangle references vertex 7, which does not exist
        let mesh = Mesh::from_arrays(positions, vec![0, 1, 2, 1, 7, 2, 1, 3, 2]).unwrap();

        let triangles = mesh.extract_triangle_vertices();
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[1][1], Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_from_obj_str_triangulates_and_rebases_indices() {
        let mesh = Mesh::from_obj_str(QUAD_OBJ).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        // OBJ indices are 1-based; the mesh stores them 0-based
        assert!(mesh.indices.iter().all(|&i| i < 4));
        assert!(mesh.indices.contains(&0));
    }

    #[test]
    fn test_load_obj_or_empty_missing_file() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mesh = Mesh::load_obj_or_empty("definitely/not/here.obj");
        assert!(mesh.is_empty());
        assert_eq!(mesh.bounds, Aabb::EMPTY);
    }
}
