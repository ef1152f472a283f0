//! ILI9341 command definitions
//!
//! This module defines the command bytes used to bring up the LCD
//! controller and stream tiles into its frame memory. Commands are sent over
//! SPI with the DC pin low for commands and high for data.
//!
//! ## Command Structure
//!
//! All commands follow the pattern:
//! 1. Assert CS (Chip Select)
//! 2. Set DC low (command mode)
//! 3. Send command byte
//! 4. Set DC high (data mode)
//! 5. Send data bytes (if any)
//! 6. Deassert CS
//!
//! Multi-byte parameters are big-endian.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tilegfx::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//! # let pixel_data = [0xF8u8, 0x00];
//! // Columns 0..=9
//! let _ = interface.send_command(command::COLUMN_ADDRESS_SET);
//! let _ = interface.send_data(&[0, 0, 0, 9]);
//!
//! // Write to frame memory
//! let _ = interface.send_command(command::MEMORY_WRITE);
//! let _ = interface.send_data(&pixel_data);
//! ```

// System control commands

/// Software reset command (0x01)
///
/// Resets the controller registers to their defaults. Wait 5ms before the
/// next command.
pub const SOFTWARE_RESET: u8 = 0x01;

/// Sleep out command (0x11)
///
/// Turns on the DC/DC converter and oscillator. Wait 120ms before display on.
pub const SLEEP_OUT: u8 = 0x11;

/// Display on command (0x29)
pub const DISPLAY_ON: u8 = 0x29;

// Pixel format and addressing

/// Pixel format set command (0x3A)
///
/// Requires 1 byte of data.
pub const PIXEL_FORMAT_SET: u8 = 0x3A;

/// 16 bits per pixel over the MCU interface (RGB565)
pub const PIXEL_FORMAT_16BPP: u8 = 0x55;

/// Memory access control command (0x36)
///
/// Sets scan direction and RGB/BGR order. Requires 1 byte of data.
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;

/// Column order mirrored, BGR panel: portrait with the origin top-left
pub const MADCTL_PORTRAIT: u8 = 0x48;

// Frame memory commands

/// Column address set command (0x2A)
///
/// Requires 4 bytes: [start (MSB), start (LSB), end (MSB), end (LSB)],
/// both ends inclusive.
pub const COLUMN_ADDRESS_SET: u8 = 0x2A;

/// Page (row) address set command (0x2B)
///
/// Same layout as [`COLUMN_ADDRESS_SET`].
pub const PAGE_ADDRESS_SET: u8 = 0x2B;

/// Memory write command (0x2C)
///
/// Following data bytes fill the address window row by row, two bytes per
/// pixel, most significant byte first.
pub const MEMORY_WRITE: u8 = 0x2C;
