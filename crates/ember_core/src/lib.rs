//! Ember Core - the collaborators the ray tracer consumes.
//!
//! This crate provides:
//!
//! - **Mesh ingestion**: `Mesh`, flat vertex/index arrays loaded from OBJ files
//! - **Textures**: the `Texture` contract with solid, checker and image variants
//!
//! # Example
//!
//! ```ignore
//! use ember_core::{ImageTexture, Mesh};
//!
//! let bunny = Mesh::load_obj("assets/bunny.obj")?;
//! println!("Loaded {} triangles", bunny.triangle_count());
//!
//! let earth = ImageTexture::open_or_fallback("assets/earthmap.jpg");
//! ```

pub mod mesh;
pub mod texture;

// Re-export commonly used types
pub use mesh::{triangle_corners, Mesh, MeshError, MeshResult};
pub use texture::{
    CheckerTexture, Color, ImageTexture, SolidColor, Texture, TextureError, TextureResult,
};
