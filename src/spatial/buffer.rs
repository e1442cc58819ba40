//! Bounds-tolerant RGBA pixel grid with region copy and composite operations

use crate::spatial::partition::Rect;
use ndarray::Array2;

/// Sentinel color returned for reads outside buffer bounds
///
/// Neighbor-offset arithmetic routinely probes past edges during analysis
/// and synthesis, so out-of-bounds reads must stay total.
pub const OUT_OF_BOUNDS_COLOR: Color = Color::new(255, 0, 0, 255);

/// An opaque RGBA value with structural equality and a total ordering
///
/// Colors key the adjacency statistics maps, so equality and ordering are
/// over exact component values with no color-space interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color([u8; 4]);

impl Color {
    /// Fully transparent black, the initial state of synthesized buffers
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a color from its channel values
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self([red, green, blue, alpha])
    }

    /// Channel values as `[red, green, blue, alpha]`
    pub const fn channels(self) -> [u8; 4] {
        self.0
    }
}

/// An addressable 2D grid of RGBA colors with bounds-checked access
///
/// Reads outside the grid return [`OUT_OF_BOUNDS_COLOR`]; writes outside the
/// grid are silently dropped. Positions are local to the buffer's own origin,
/// with (0, 0) at the top-left corner.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    pixels: Array2<Color>,
}

impl PixelBuffer {
    /// Create a transparent buffer of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), Color::TRANSPARENT),
        }
    }

    /// Buffer width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Buffer height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Check if a position is within the buffer bounds
    pub fn contains(&self, position: [i32; 2]) -> bool {
        position[0] >= 0
            && position[1] >= 0
            && (position[0] as usize) < self.width()
            && (position[1] as usize) < self.height()
    }

    /// Read the color at a position
    ///
    /// Out-of-bounds positions yield [`OUT_OF_BOUNDS_COLOR`] rather than an
    /// error.
    pub fn get(&self, position: [i32; 2]) -> Color {
        if position[0] < 0 || position[1] < 0 {
            return OUT_OF_BOUNDS_COLOR;
        }
        self.pixels
            .get([position[1] as usize, position[0] as usize])
            .copied()
            .unwrap_or(OUT_OF_BOUNDS_COLOR)
    }

    /// Write the color at a position, dropping out-of-bounds writes
    pub fn set(&mut self, position: [i32; 2], color: Color) {
        if position[0] < 0 || position[1] < 0 {
            return;
        }
        if let Some(pixel) = self
            .pixels
            .get_mut([position[1] as usize, position[0] as usize])
        {
            *pixel = color;
        }
    }

    /// Flood the entire buffer with one color
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Flood a rectangular region with one color
    ///
    /// Cells outside the buffer are skipped.
    pub fn fill_region(&mut self, region: Rect, color: Color) {
        for y in region.min[1]..region.max[1] {
            for x in region.min[0]..region.max[0] {
                self.set([x, y], color);
            }
        }
    }

    /// Copy a region into an independent buffer with its own (0, 0) origin
    ///
    /// Source cells outside this buffer read as [`OUT_OF_BOUNDS_COLOR`].
    #[must_use]
    pub fn copy_region(&self, region: Rect) -> Self {
        let mut copy = Self::new(region.width(), region.height());
        for y in 0..region.height() as i32 {
            for x in 0..region.width() as i32 {
                let source = [region.min[0] + x, region.min[1] + y];
                copy.set([x, y], self.get(source));
            }
        }
        copy
    }

    /// Write this buffer's pixels into `target` at the given offset
    ///
    /// Existing target pixels are overwritten without blending; pixels
    /// landing outside the target are dropped.
    pub fn composite_into(&self, target: &mut Self, offset: [i32; 2]) {
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                target.set([offset[0] + x, offset[1] + y], self.get([x, y]));
            }
        }
    }
}
