//! Strided pixel tiles
//!
//! A [`PixTile`] borrows a slice of [`Rgb565`] pixels and places it on the
//! screen at an origin. Every drawing call takes screen coordinates. The tile
//! translates them, so a scene can be drawn once per tile without knowing
//! where the tile sits.
//!
//! ## Example
//!
//! ```
//! use tilegfx::{Builder, Dimensions, PixTile, Rgb565};
//!
//! let dims = match Dimensions::new(4, 2) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let layout = match Builder::new().origin(100, 50).dimensions(dims).build() {
//!     Ok(layout) => layout,
//!     Err(_) => return,
//! };
//! let mut pixels = [Rgb565::BLACK; 8];
//! let mut tile = match PixTile::new(&mut pixels, layout) {
//!     Ok(tile) => tile,
//!     Err(_) => return,
//! };
//!
//! tile.set_pixel(101, 51, Rgb565::WHITE);
//! assert_eq!(tile.pixel(101, 51), Some(Rgb565::WHITE));
//! assert_eq!(tile.pixel(0, 0), None);
//! assert_eq!(pixels[5], Rgb565::WHITE);
//! ```

use crate::color::Rgb565;
use crate::config::TileLayout;
use crate::error::TileError;
use crate::geometry::{Point, Rect};

/// A rectangular, strided view of pixel storage placed on the screen
#[derive(Debug)]
pub struct PixTile<'a> {
    pub(crate) pixels: &'a mut [Rgb565],
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) stride: usize,
}

impl<'a> PixTile<'a> {
    /// Wrap `pixels` with the placement and pitch from `layout`
    ///
    /// # Errors
    ///
    /// Returns `TileError::BufferTooSmall` if `pixels` is shorter than
    /// [`TileLayout::buffer_len()`].
    pub fn new(pixels: &'a mut [Rgb565], layout: TileLayout) -> Result<Self, TileError> {
        let required = layout.buffer_len();
        if pixels.len() < required {
            return Err(TileError::BufferTooSmall {
                required,
                provided: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            x: layout.x,
            y: layout.y,
            width: layout.dimensions.width,
            height: layout.dimensions.height,
            stride: layout.stride,
        })
    }

    /// Left edge in screen pixels
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Top edge in screen pixels
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row pitch in pixels
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// One past the right edge in screen pixels
    pub(crate) fn x_end(&self) -> i32 {
        self.x + self.width as i32
    }

    /// One past the bottom edge in screen pixels
    pub(crate) fn y_end(&self) -> i32 {
        self.y + self.height as i32
    }

    /// The covered area `[x, x + w] × [y, y + h]` in continuous coordinates
    pub fn bounds(&self) -> Rect {
        Rect::new(
            Point::new(self.x as f32, self.y as f32),
            Point::new(self.x_end() as f32, self.y_end() as f32),
        )
    }

    /// Whether the screen pixel `(x, y)` lies on this tile
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.offset(x, y).is_some()
    }

    /// Index into the backing slice of screen pixel `(x, y)`, if on the tile
    pub(crate) fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let col = usize::try_from(x.checked_sub(self.x)?).ok()?;
        let row = usize::try_from(y.checked_sub(self.y)?).ok()?;
        (col < self.width && row < self.height).then_some(row * self.stride + col)
    }

    /// Index into the backing slice of screen pixel `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is not on the tile.
    pub fn pixel_address(&self, x: i32, y: i32) -> usize {
        let Some(offset) = self.offset(x, y) else {
            unreachable!(
                "pixel ({x}, {y}) outside tile at ({}, {}) size {}x{}",
                self.x, self.y, self.width, self.height
            );
        };
        offset
    }

    /// Read the pixel at screen `(x, y)`
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.offset(x, y).map(|i| self.pixels[i])
    }

    /// Store a packed pixel at screen `(x, y)`; off-tile writes are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color;
        }
    }

    /// The on-tile pixels of screen row `y`
    pub fn row(&self, y: i32) -> Option<&[Rgb565]> {
        let start = self.offset(self.x, y)?;
        Some(&self.pixels[start..start + self.width])
    }

    pub(crate) fn row_mut(&mut self, y: i32) -> Option<&mut [Rgb565]> {
        let start = self.offset(self.x, y)?;
        Some(&mut self.pixels[start..start + self.width])
    }

    /// Fill every pixel of the tile, leaving stride padding untouched
    pub fn clear(&mut self, color: Rgb565) {
        for y in self.y..self.y_end() {
            if let Some(row) = self.row_mut(y) {
                row.fill(color);
            }
        }
    }
}

/// Owning pixel storage with a layout
///
/// Hands out [`PixTile`] views via [`TileBuffer::tile()`].
#[cfg(any(test, feature = "alloc"))]
#[derive(Clone, Debug)]
pub struct TileBuffer {
    pixels: alloc::vec::Vec<Rgb565>,
    layout: TileLayout,
}

#[cfg(any(test, feature = "alloc"))]
impl TileBuffer {
    /// Allocate black storage for `layout`
    pub fn new(layout: TileLayout) -> Self {
        Self {
            pixels: alloc::vec![Rgb565::BLACK; layout.buffer_len()],
            layout,
        }
    }

    /// The layout this buffer was allocated for
    pub fn layout(&self) -> TileLayout {
        self.layout
    }

    /// Raw backing storage, stride padding included
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// A drawing view of the whole buffer
    pub fn tile(&mut self) -> PixTile<'_> {
        PixTile {
            pixels: &mut self.pixels,
            x: self.layout.x,
            y: self.layout.y,
            width: self.layout.dimensions.width,
            height: self.layout.dimensions.height,
            stride: self.layout.stride,
        }
    }
}
