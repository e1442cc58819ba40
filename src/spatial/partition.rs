//! Rectangular subdivision of source buffers into analysis regions

use crate::io::error::{Result, dimension_error};

/// Axis-aligned rectangle with an inclusive min and exclusive max corner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Top-left corner (inclusive)
    pub min: [i32; 2],
    /// Bottom-right corner (exclusive)
    pub max: [i32; 2],
}

impl Rect {
    /// Create a rectangle from its corner points
    pub const fn from_corners(min: [i32; 2], max: [i32; 2]) -> Self {
        Self { min, max }
    }

    /// Width in cells
    pub const fn width(&self) -> usize {
        let span = self.max[0] - self.min[0];
        if span < 0 { 0 } else { span as usize }
    }

    /// Height in cells
    pub const fn height(&self) -> usize {
        let span = self.max[1] - self.min[1];
        if span < 0 { 0 } else { span as usize }
    }

    /// Check if a position is within the rectangle
    pub const fn contains(&self, position: [i32; 2]) -> bool {
        position[0] >= self.min[0]
            && position[0] < self.max[0]
            && position[1] >= self.min[1]
            && position[1] < self.max[1]
    }

    /// The same rectangle displaced by `offset`
    #[must_use]
    pub const fn translated(&self, offset: [i32; 2]) -> Self {
        Self {
            min: [self.min[0] + offset[0], self.min[1] + offset[1]],
            max: [self.max[0] + offset[0], self.max[1] + offset[1]],
        }
    }
}

/// Equal-size rectangular partitioning of a source buffer
///
/// Regions are laid out in row-major order and cover the source exactly,
/// with no gaps and no overlaps. Construction fails when the subdivision
/// counts do not evenly divide the source dimensions.
#[derive(Clone, Debug)]
pub struct PartitionGrid {
    columns: usize,
    rows: usize,
    region_width: usize,
    region_height: usize,
    regions: Vec<Rect>,
}

impl PartitionGrid {
    /// Partition a `width` x `height` area into `columns` x `rows` regions
    ///
    /// # Errors
    ///
    /// Returns a dimension error if:
    /// - Either source dimension is zero
    /// - Either subdivision count is zero
    /// - A subdivision count does not evenly divide its source dimension
    pub fn new(width: usize, height: usize, columns: usize, rows: usize) -> Result<Self> {
        if width == 0 {
            return Err(dimension_error("width", &width, &"source width must be positive"));
        }
        if height == 0 {
            return Err(dimension_error(
                "height",
                &height,
                &"source height must be positive",
            ));
        }
        if columns == 0 {
            return Err(dimension_error(
                "columns",
                &columns,
                &"subdivision count must be positive",
            ));
        }
        if rows == 0 {
            return Err(dimension_error(
                "rows",
                &rows,
                &"subdivision count must be positive",
            ));
        }
        if width % columns != 0 {
            return Err(dimension_error(
                "columns",
                &columns,
                &format!("source width {width} is not evenly divisible by {columns}"),
            ));
        }
        if height % rows != 0 {
            return Err(dimension_error(
                "rows",
                &rows,
                &format!("source height {height} is not evenly divisible by {rows}"),
            ));
        }

        let region_width = width / columns;
        let region_height = height / rows;

        let mut regions = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                let min = [
                    (column * region_width) as i32,
                    (row * region_height) as i32,
                ];
                let max = [
                    ((column + 1) * region_width) as i32,
                    ((row + 1) * region_height) as i32,
                ];
                regions.push(Rect::from_corners(min, max));
            }
        }

        Ok(Self {
            columns,
            rows,
            region_width,
            region_height,
            regions,
        })
    }

    /// Partition regions in row-major order
    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    /// Number of partition columns
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of partition rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Width of each region in cells
    pub const fn region_width(&self) -> usize {
        self.region_width
    }

    /// Height of each region in cells
    pub const fn region_height(&self) -> usize {
        self.region_height
    }

    /// Total number of regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Test if the grid holds no regions
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
