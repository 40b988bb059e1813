//! Ember Renderer - offline CPU path tracing
//!
//! A Monte Carlo path tracer for physically-based rendering of spheres, triangles,
//! quads, meshes and participating media. Images are written as plain-text PPM.

mod camera;
mod config;
mod constant_medium;
mod error;
mod hittable;
mod material;
mod output;
mod quad;
mod renderer;
mod sampling;
mod sphere;
mod stats;
mod transform;
mod triangle;
mod triangle_mesh;

pub use camera::{Camera, CameraSettings};
pub use config::SceneSettings;
pub use constant_medium::ConstantMedium;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList, TraceContext};
pub use material::{
    reflect, refract, schlick, Dielectric, DiffuseLight, Isotropic, Lambertian, Material,
    Metal, ScatterResult,
};
pub use output::{color_to_ppm_bytes, save_ppm, write_ppm};
pub use quad::{make_box, Quad};
pub use renderer::{ray_color, render, render_parallel, render_pixel, ImageBuffer, RenderConfig};
pub use sphere::Sphere;
pub use stats::{RenderStats, StatsSnapshot};
pub use transform::{Rotate, Transformable, Translate};
pub use triangle::Triangle;
pub use triangle_mesh::TriangleMesh;

/// Re-export textures and mesh loading from ember_core
pub use ember_core::{
    CheckerTexture, Color, ImageTexture, Mesh, MeshError, SolidColor, Texture, TextureError,
};
/// Re-export math types from ember_math
pub use ember_math::{Aabb, Axis, Interval, Point3, Ray, Vec3};
