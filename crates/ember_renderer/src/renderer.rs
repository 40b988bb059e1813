//! Path tracing integrator and the image loops that drive it.
//!
//! Every pixel draws from its own seeded random stream, so the serial and parallel
//! loops produce the same image.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::hittable::{HitRecord, Hittable, TraceContext};
use crate::sampling::gen_f64;
use crate::{Camera, Color, RenderStats};
use ember_math::{Interval, Ray};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Camera rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Path length limit, counted in `ray_color` calls
    pub max_depth: u32,
    /// Radiance for rays that leave the scene
    pub background: Color,
    /// Base seed for the per-pixel random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::ZERO,
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height.max(1) as f64
    }

    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "image size {}x{} has no pixels",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Radiance arriving along `ray`.
///
/// Follows one scattered path through `world`. Each call spends one unit of `depth`;
/// at zero the path is cut off and contributes black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: Color,
    ctx: &mut TraceContext<'_>,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();

    if !world.hit(ray, Interval::new(0.001, f64::INFINITY), &mut rec, ctx) {
        return background;
    }

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, ctx.rng) {
        Some(result) => {
            let scattered_color =
                ray_color(&result.scattered, world, depth - 1, background, ctx);
            emission + result.attenuation * scattered_color
        }
        // Ray was absorbed - just return emission
        None => emission,
    }
}

/// Average of `samples_per_pixel` jittered camera samples for one pixel.
///
/// `i` counts columns from the left and `j` counts rows from the bottom. Returns the
/// average over `samples_per_pixel` samples.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    ctx: &mut TraceContext<'_>,
) -> Color {
    let samples = config.samples_per_pixel.max(1);
    let w_span = config.width.saturating_sub(1).max(1) as f64;
    let h_span = config.height.saturating_sub(1).max(1) as f64;

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples {
        let s = (i as f64 + gen_f64(ctx.rng)) / w_span;
        let t = (j as f64 + gen_f64(ctx.rng)) / h_span;
        let ray = camera.get_ray(s, t, ctx.rng);
        ctx.stats.record_primary_ray();
        pixel_color += ray_color(&ray, world, config.max_depth, config.background, ctx);
    }

    pixel_color / samples as f64
}

/// Linear-RGB image, rows stored top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y), y counted from the top.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), y counted from the top.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Random stream for one pixel, independent of which thread renders it.
fn pixel_rng(seed: u64, pixel_index: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ pixel_index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Shade image row `y` (counted from the top) into `row`.
fn render_row(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    stats: &RenderStats,
    y: u32,
    row: &mut [Color],
) {
    let j = config.height - 1 - y;
    for (x, pixel) in (0u32..).zip(row.iter_mut()) {
        let pixel_index = y as u64 * config.width as u64 + x as u64;
        let mut rng = pixel_rng(config.seed, pixel_index);
        let mut ctx = TraceContext::new(&mut rng, stats);
        *pixel = render_pixel(camera, world, x, j, config, &mut ctx);
    }
}

/// Render the entire scene to an image buffer on the calling thread.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    stats: &RenderStats,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.width, config.height);
    if image.pixels.is_empty() {
        return image;
    }

    log::info!(
        "Rendering {}x{} @ {} spp, depth {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    for (y, row) in (0u32..).zip(image.pixels.chunks_mut(config.width as usize)) {
        log::debug!("Scanlines remaining: {}", config.height - y);
        render_row(camera, world, config, stats, y, row);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}

/// Render the entire scene, spreading rows over the rayon thread pool.
///
/// Produces the same image as [`render`] for the same config.
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    stats: &RenderStats,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.width, config.height);
    if image.pixels.is_empty() {
        return image;
    }

    log::info!(
        "Rendering {}x{} @ {} spp, depth {} on {} threads",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        rayon::current_num_threads()
    );
    let start = Instant::now();

    image
        .pixels
        .par_chunks_mut(config.width as usize)
        .enumerate()
        .for_each(|(y, row)| render_row(camera, world, config, stats, y as u32, row));

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
