//! Error types for the crate
//!
//! Drawing never fails: out-of-bounds pixels are clipped, and broken geometry
//! invariants inside the trapezoid pipeline panic. The recoverable errors are
//! the ones a caller can provoke with bad input at the edges of the crate.
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during tile layout construction
//! - [`TileError`] - A pixel buffer that cannot back the requested layout
//! - [`Error`] - Errors on the LCD output path
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use tilegfx::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Zero-sized tiles are rejected
//! let result = Dimensions::new(0, 16);
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Errors that can occur on the LCD output path
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// The backing buffer cannot hold the tile
    Tile(TileError),
    /// The tile does not lie entirely on the screen
    TileOutOfBounds {
        /// Left edge in screen pixels
        x: i32,
        /// Top edge in screen pixels
        y: i32,
        /// Width in pixels
        width: usize,
        /// Height in pixels
        height: usize,
    },
    /// The tile exceeds the largest single transfer
    TileTooLarge {
        /// Requested pixel count
        pixels: usize,
        /// Maximum pixel count
        max: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::Tile(e) => write!(f, "Tile error: {e}"),
            Self::TileOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "Tile off screen: x={x}, y={y}, w={width}, h={height}")
            }
            Self::TileTooLarge { pixels, max } => {
                write!(f, "Tile too large: {pixels} pixels, max {max}")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

impl<I: DisplayInterface> From<TileError> for Error<I> {
    fn from(e: TileError) -> Self {
        Self::Tile(e)
    }
}

/// Errors that can occur when wrapping a pixel buffer in a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileError {
    /// Buffer is too small for the layout
    ///
    /// The buffer must hold at least [`TileLayout::buffer_len()`](crate::config::TileLayout::buffer_len) pixels.
    BufferTooSmall {
        /// Required buffer length in pixels
        required: usize,
        /// Provided buffer length in pixels
        provided: usize,
    },
}

impl core::fmt::Display for TileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall { required, provided } => write!(
                f,
                "Buffer too small: required {required} pixels, provided {provided}"
            ),
        }
    }
}

impl core::error::Error for TileError {}

/// Errors that can occur when building a tile layout
///
/// These errors occur during the builder pattern before any tile is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width requested
        width: usize,
        /// Height requested
        height: usize,
    },
    /// Row pitch narrower than the tile
    InvalidStride {
        /// Stride requested
        stride: usize,
        /// Tile width
        width: usize,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions {width}x{height} (both must be non-zero)")
            }
            Self::InvalidStride { stride, width } => {
                write!(f, "Invalid stride {stride} (must be at least width {width})")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
