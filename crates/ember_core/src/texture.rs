//! Texture sampling for materials.
//!
//! A [`Texture`] maps a surface location to a linear RGB color. Geometry hands the
//! sampler both the surface parametrization `(u, v)` and the world-space hit point,
//! so procedural textures may key off either.

use std::path::Path;
use std::sync::Arc;

use ember_math::{Point3, Vec3};
use thiserror::Error;

/// Linear RGB color.
pub type Color = Vec3;

/// Returned by an image texture with no pixel data, so missing textures stand out.
const DEBUG_CYAN: Color = Color::new(0.0, 1.0, 1.0);

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {0} has no pixels")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Color lookup at a surface point.
///
/// Textures are immutable once built and shared between materials and threads.
pub trait Texture: Send + Sync {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color;
}

/// Constant color everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolidColor {
    pub albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.albedo
    }
}

/// 3D checkerboard alternating between two textures.
///
/// Cell parity is `floor(x/scale) + floor(y/scale) + floor(z/scale)`, taken from the
/// world-space hit point rather than `(u, v)`.
#[derive(Clone)]
pub struct CheckerTexture {
    inv_scale: f64,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f64, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f64, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        let cell = (p * self.inv_scale).floor();
        let parity = (cell.x + cell.y + cell.z) as i64;

        if parity.rem_euclid(2) == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Image-backed texture.
///
/// Pixels are stored as linear RGB, converted from sRGB at load time. `(0, 0)` is the
/// bottom-left corner of the image.
#[derive(Clone, Debug, Default)]
pub struct ImageTexture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Row-major pixels, top row first
    pub pixels: Vec<Color>,

    /// Original file path (for debugging)
    pub path: String,
}

impl ImageTexture {
    /// Create a texture from linear pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, path: impl Into<String>) -> Self {
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Decode an image file.
    pub fn open<P: AsRef<Path>>(path: P) -> TextureResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let img = image::open(path).map_err(|source| TextureError::Load {
            path: display.clone(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(display));
        }

        let pixels = rgb
            .pixels()
            .map(|p| {
                Color::new(
                    srgb_to_linear(p[0]),
                    srgb_to_linear(p[1]),
                    srgb_to_linear(p[2]),
                )
            })
            .collect();

        log::debug!("Loaded texture: {} ({}x{})", display, width, height);
        Ok(Self::new(width, height, pixels, display))
    }

    /// Decode an image file, or return an empty texture (which samples cyan) on failure.
    pub fn open_or_fallback<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::open(path).unwrap_or_else(|err| {
            log::warn!("{}, using fallback texture", err);
            Self::new(0, 0, Vec::new(), path.display().to_string())
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Get pixel at integer coordinates.
    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied().unwrap_or(DEBUG_CYAN)
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _p: Point3) -> Color {
        if self.width == 0 || self.height == 0 {
            return DEBUG_CYAN;
        }

        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - v.clamp(0.0, 1.0); // Flip V for image coordinates

        let x = ((u * self.width as f64) as u32).min(self.width - 1);
        let y = ((v * self.height as f64) as u32).min(self.height - 1);

        self.get_pixel(x, y)
    }
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f64 {
    let v = value as f64 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
