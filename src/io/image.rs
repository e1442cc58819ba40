//! Image decode/encode collaborators and synthetic source generation

use crate::io::error::{Result, SynthesisError};
use crate::spatial::buffer::{Color, PixelBuffer};
use crate::spatial::partition::PartitionGrid;
use image::{ImageBuffer, Rgba};
use rand::{Rng, rngs::StdRng};
use std::path::Path;

/// Nine-color cycling palette for deterministic test and sample sources
pub const PALETTE: [Color; 9] = [
    Color::new(255, 0, 0, 255),
    Color::new(0, 255, 0, 255),
    Color::new(0, 0, 255, 255),
    Color::new(255, 255, 0, 255),
    Color::new(0, 255, 255, 255),
    Color::new(255, 0, 255, 255),
    Color::new(255, 165, 0, 255),
    Color::new(128, 0, 128, 255),
    Color::new(165, 42, 42, 255),
];

/// Palette color for an index, cycling past the palette length
pub fn palette_color(index: usize) -> Color {
    PALETTE
        .get(index % PALETTE.len())
        .copied()
        .unwrap_or(Color::new(255, 0, 0, 255))
}

/// Decode an image file into a pixel buffer
///
/// Any raster format the `image` crate recognizes is accepted; pixels are
/// extracted byte for byte as RGBA with no color-space conversion.
///
/// # Errors
///
/// Returns an image load error when the file cannot be opened or decoded.
pub fn load_pixel_buffer<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| SynthesisError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    let rgba = img.to_rgba8();

    let mut buffer = PixelBuffer::new(rgba.width() as usize, rgba.height() as usize);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [red, green, blue, alpha] = pixel.0;
        buffer.set([x as i32, y as i32], Color::new(red, green, blue, alpha));
    }
    Ok(buffer)
}

/// Persist a pixel buffer as a PNG file
///
/// Parent directories are created as needed and an existing file at `path`
/// is overwritten.
///
/// # Errors
///
/// Returns a file system error when the parent directory cannot be created,
/// or an image export error when encoding fails.
pub fn save_pixel_buffer<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut img = ImageBuffer::new(buffer.width() as u32, buffer.height() as u32);
    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let channels = buffer.get([x as i32, y as i32]).channels();
            img.put_pixel(x as u32, y as u32, Rgba(channels));
        }
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(path).map_err(|e| SynthesisError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Random opaque RGBA color
pub fn random_color(rng: &mut StdRng) -> Color {
    random_color_with_alpha(rng, 255)
}

/// Random RGBA color with a fixed alpha channel
pub fn random_color_with_alpha(rng: &mut StdRng, alpha: u8) -> Color {
    Color::new(
        rng.random::<u8>(),
        rng.random::<u8>(),
        rng.random::<u8>(),
        alpha,
    )
}

/// Generate a synthetic source whose regions are each flooded with one
/// independently drawn random color
///
/// A trivial generator for runs without an input image, not part of the
/// statistical core.
///
/// # Errors
///
/// Returns a dimension error when the subdivision counts do not evenly
/// divide the requested dimensions.
pub fn fill_random(
    width: usize,
    height: usize,
    columns: usize,
    rows: usize,
    rng: &mut StdRng,
) -> Result<PixelBuffer> {
    let grid = PartitionGrid::new(width, height, columns, rows)?;
    let mut buffer = PixelBuffer::new(width, height);
    for &region in grid.regions() {
        buffer.fill_region(region, random_color(rng));
    }
    Ok(buffer)
}
