//! Tile Rasterizer for RGB565 LCDs
//!
//! A software rasterizer that draws lines, trapezoids and triangles into
//! small RGB565 pixel tiles, with optional anti-aliasing and alpha blending,
//! plus the output path that streams finished tiles to an ILI9341-class LCD.
//!
//! ## Features
//!
//! - `no_std` compatible, no allocation on any drawing path
//! - Hard-edged and anti-aliased lines (Bresenham, Wu)
//! - Triangle fill via trapezoid decomposition and rectangle clipping
//! - Per-call alpha blending on every primitive
//! - `embedded-hal` v1.0 support for the LCD output path
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Owning tile buffers (with `alloc` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use tilegfx::{Interface, Lcd, Point, Rgb565, Rgb888};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let mut lcd = Lcd::new(Interface::new(spi, dc, rst));
//! let _ = lcd.init(&mut delay);
//! lcd.set_bg_color(Rgb565(0x0010));
//!
//! // Draw the screen in 240x40 bands
//! let mut pixels = [Rgb565::BLACK; 240 * 40];
//! for band in 0..8 {
//!     let mut tile = match lcd.alloc_tile(&mut pixels, 0, band * 40, 240, 40) {
//!         Ok(tile) => tile,
//!         Err(_) => return,
//!     };
//!     let verts = [
//!         Point::new(120.0, 20.0),
//!         Point::new(220.0, 300.0),
//!         Point::new(20.0, 250.0),
//!     ];
//!     tile.fill_triangle_aa(verts, Rgb888(0xFF_8000), 255);
//!     tile.draw_line_aa(0.0, 0.0, 239.0, 319.0, Rgb888::WHITE);
//!     let _ = lcd.send_tile(&tile);
//! }
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Trapezoid clipping against a rectangle
pub mod clip;
/// RGB888 and RGB565 colors and blending
pub mod color;
/// ILI9341 command definitions
pub mod command;
/// Tile layout types and builder
pub mod config;
/// 24.8 fixed-point coordinates
pub mod coord;
/// Error types for the crate
pub mod error;
/// Trapezoid and triangle fills
pub mod fill;
/// Points, rectangles and trapezoids
pub mod geometry;
/// Hardware interface abstraction
pub mod interface;
/// LCD output path
pub mod lcd;
/// Line rasterizers
pub mod line;
/// Pixel and span primitives
pub mod span;
/// Strided pixel tiles
pub mod tile;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use clip::{MAX_TRAPEZOIDS, Trapezoids, clip_trapezoids};
pub use color::{Alpha, OPAQUE, Rgb565, Rgb888, TRANSPARENT};
pub use config::{
    Builder, Dimensions, LCD_HEIGHT, LCD_MAX_TILE_BYTES, LCD_MAX_TILE_PIXELS, LCD_WIDTH,
    TileLayout,
};
pub use coord::Coord;
pub use error::{BuilderError, Error, TileError};
pub use fill::triangle_trapezoids;
pub use geometry::{Point, Rect, Trapezoid};
pub use interface::InterfaceError;
pub use interface::{DisplayInterface, Interface, RESET_RECOVERY_MS};
pub use lcd::Lcd;
pub use tile::PixTile;

#[cfg(any(test, feature = "alloc"))]
pub use tile::TileBuffer;
