//! Plain-text PPM (P3) image output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{RenderError, RenderResult};
use crate::{Color, ImageBuffer};

/// Convert a linear color to 8-bit display values.
///
/// Applies gamma 2 (square root), clamps to `[0, 0.999]` and scales by 256.
/// Negative and NaN channels come out as 0.
pub fn color_to_ppm_bytes(color: Color) -> [u8; 3] {
    let to_byte = |c: f64| {
        let c = if c > 0.0 { c.sqrt() } else { 0.0 };
        (256.0 * c.clamp(0.0, 0.999)) as u8
    };
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Write `image` as ASCII PPM: a `P3` header, then one `R G B` line per pixel, top row
/// first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut out: W) -> std::io::Result<()> {
    writeln!(out, "P3\n{} {}\n255", image.width, image.height)?;
    for pixel in &image.pixels {
        let [r, g, b] = color_to_ppm_bytes(*pixel);
        writeln!(out, "{} {} {}", r, g, b)?;
    }
    out.flush()
}

/// Write `image` to a PPM file at `path`, replacing any existing file.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_ppm(image, BufWriter::new(file))?;
    log::info!("Wrote {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
