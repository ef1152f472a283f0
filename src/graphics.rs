//! Graphics support via embedded-graphics
//!
//! [`PixTile`] implements [`DrawTarget`] with the embedded-graphics
//! [`Rgb565`](embedded_graphics_core::pixelcolor::Rgb565) color, so text, images and
//! the stock primitives can be drawn next to the crate's own lines and
//! triangles. The bounding box is the tile's rectangle in screen coordinates,
//! and drawing outside it is clipped.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics::{
//!     pixelcolor::Rgb565,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use tilegfx::{Builder, Dimensions, PixTile};
//!
//! let dims = match Dimensions::new(16, 16) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let layout = match Builder::new().origin(32, 32).dimensions(dims).build() {
//!     Ok(layout) => layout,
//!     Err(_) => return,
//! };
//! let mut pixels = [tilegfx::Rgb565::BLACK; 256];
//! let mut tile = match PixTile::new(&mut pixels, layout) {
//!     Ok(tile) => tile,
//!     Err(_) => return,
//! };
//!
//! // Only the part overlapping the tile is drawn
//! let _ = Rectangle::new(Point::new(24, 24), Size::new(16, 16))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
//!     .draw(&mut tile);
//! assert_eq!(tile.pixel(39, 39), Some(tilegfx::Rgb565(0xF800)));
//! assert_eq!(tile.pixel(40, 40), Some(tilegfx::Rgb565::BLACK));
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, Point, Size},
    pixelcolor::{
        Rgb565 as EgRgb565,
        raw::{RawData, RawU16},
    },
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::color::Rgb565;
use crate::tile::PixTile;

impl From<EgRgb565> for Rgb565 {
    fn from(color: EgRgb565) -> Self {
        Self(RawU16::from(color).into_inner())
    }
}

impl From<Rgb565> for EgRgb565 {
    fn from(color: Rgb565) -> Self {
        Self::from(RawU16::new(color.0))
    }
}

impl DrawTarget for PixTile<'_> {
    type Color = EgRgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.set_pixel(x, y, color.into());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let color = Rgb565::from(color).unpack();
        for y in area.top_left.y..=bottom_right.y {
            self.fill_span(area.top_left.x, bottom_right.x, y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        PixTile::clear(self, color.into());
        Ok(())
    }
}

impl Dimensions for PixTile<'_> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.x, self.y),
            Size::new(self.width as u32, self.height as u32),
        )
    }
}
