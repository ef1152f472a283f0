//! Tile layout types and builder

pub use crate::error::BuilderError;

/// LCD width in pixels (portrait)
pub const LCD_WIDTH: usize = 240;
/// LCD height in pixels (portrait)
pub const LCD_HEIGHT: usize = 320;
/// Largest tile the output path transfers at once, in bytes
pub const LCD_MAX_TILE_BYTES: usize = 64 * 1024;
/// Largest tile the output path transfers at once, in RGB565 pixels
pub const LCD_MAX_TILE_PIXELS: usize = LCD_MAX_TILE_BYTES / 2;

/// Tile dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if either side is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, BuilderError> {
        if width == 0 || height == 0 {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Placement and memory layout of a tile
///
/// Use [`Builder`] to create a `TileLayout`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileLayout {
    /// Left edge in screen pixels
    pub x: i32,
    /// Top edge in screen pixels
    pub y: i32,
    /// Tile size
    pub dimensions: Dimensions,
    /// Row pitch in pixels
    pub stride: usize,
}

impl TileLayout {
    /// Minimum backing slice length in pixels
    ///
    /// The last row only needs `width` pixels, not a full stride.
    pub fn buffer_len(&self) -> usize {
        match self.dimensions.height.checked_sub(1) {
            Some(rows) => rows * self.stride + self.dimensions.width,
            None => 0,
        }
    }
}

/// Builder for constructing a tile layout
///
/// # Example
///
/// ```
/// use tilegfx::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(32, 16) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let layout = match Builder::new().origin(64, 48).dimensions(dims).stride(40).build() {
///     Ok(layout) => layout,
///     Err(_) => return,
/// };
/// assert_eq!(layout.buffer_len(), 15 * 40 + 32);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Screen origin
    origin: (i32, i32),
    /// Tile size (required)
    dimensions: Option<Dimensions>,
    /// Row pitch, defaults to the width
    stride: Option<usize>,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tile origin in screen pixels
    pub fn origin(mut self, x: i32, y: i32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Set tile dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the row pitch in pixels
    ///
    /// Use this when the tile is a sub-rectangle of a wider buffer.
    pub fn stride(mut self, stride: usize) -> Self {
        self.stride = Some(stride);
        self
    }

    /// Build the layout
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set,
    /// or `BuilderError::InvalidStride` if the stride is narrower than the tile.
    pub fn build(self) -> Result<TileLayout, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let stride = self.stride.unwrap_or(dimensions.width);
        if stride < dimensions.width {
            return Err(BuilderError::InvalidStride {
                stride,
                width: dimensions.width,
            });
        }
        Ok(TileLayout {
            x: self.origin.0,
            y: self.origin.1,
            dimensions,
            stride,
        })
    }
}
