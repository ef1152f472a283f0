//! LCD output path
//!
//! [`Lcd`] brackets a draw batch: [`Lcd::alloc_tile`] hands out a tile over
//! caller-owned storage, cleared to the background color, and
//! [`Lcd::send_tile`] streams the finished tile into the controller's frame
//! memory. Tiles must lie entirely on the 240x320 portrait screen.

use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::color::Rgb565;
use crate::command::{
    COLUMN_ADDRESS_SET, DISPLAY_ON, MADCTL_PORTRAIT, MEMORY_ACCESS_CONTROL, MEMORY_WRITE,
    PAGE_ADDRESS_SET, PIXEL_FORMAT_16BPP, PIXEL_FORMAT_SET, SLEEP_OUT, SOFTWARE_RESET,
};
use crate::config::{Dimensions, LCD_HEIGHT, LCD_MAX_TILE_PIXELS, LCD_WIDTH, TileLayout};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::tile::PixTile;

type LcdResult<T, I> = core::result::Result<T, Error<I>>;

/// Pixels per SPI write while streaming a row
const CHUNK_PIXELS: usize = 32;

/// Driver for the LCD output path
pub struct Lcd<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Color freshly allocated tiles start out with
    bg_color: Rgb565,
}

impl<I> Lcd<I>
where
    I: DisplayInterface,
{
    /// Create a new Lcd with a black background
    pub fn new(interface: I) -> Self {
        Self {
            interface,
            bg_color: Rgb565::BLACK,
        }
    }

    /// Reset the controller and switch the panel on
    ///
    /// Leaves the controller in 16-bit RGB565 mode, portrait, origin top-left.
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if a command cannot be sent.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> LcdResult<(), I> {
        debug!("lcd: hardware reset");
        self.interface.reset(delay);

        self.send_command(SOFTWARE_RESET)?;
        delay.delay_ms(5);

        self.send_command(SLEEP_OUT)?;
        delay.delay_ms(120);

        self.send_command(PIXEL_FORMAT_SET)?;
        self.send_data(&[PIXEL_FORMAT_16BPP])?;

        self.send_command(MEMORY_ACCESS_CONTROL)?;
        self.send_data(&[MADCTL_PORTRAIT])?;

        self.send_command(DISPLAY_ON)?;
        debug!("lcd: display on, {LCD_WIDTH}x{LCD_HEIGHT}");
        Ok(())
    }

    /// Background color of new tiles
    pub fn bg_color(&self) -> Rgb565 {
        self.bg_color
    }

    /// Set the background color of tiles allocated from now on
    pub fn set_bg_color(&mut self, color: Rgb565) {
        self.bg_color = color;
    }

    /// Wrap `buffer` as a `w` x `h` tile at screen `(x, y)`
    ///
    /// The tile is packed (stride equals width) and cleared to
    /// [`bg_color()`](Self::bg_color).
    ///
    /// # Errors
    ///
    /// - `Error::TileOutOfBounds` if the tile is empty or not entirely on screen
    /// - `Error::TileTooLarge` if it has more than [`LCD_MAX_TILE_PIXELS`] pixels
    /// - `Error::Tile` if `buffer` is too short
    #[allow(clippy::many_single_char_names)]
    pub fn alloc_tile<'a>(
        &self,
        buffer: &'a mut [Rgb565],
        x: i32,
        y: i32,
        w: usize,
        h: usize,
    ) -> LcdResult<PixTile<'a>, I> {
        Self::check_on_screen(x, y, w, h)?;
        let pixels = w * h;
        if pixels > LCD_MAX_TILE_PIXELS {
            return Err(Error::TileTooLarge {
                pixels,
                max: LCD_MAX_TILE_PIXELS,
            });
        }

        let layout = TileLayout {
            x,
            y,
            dimensions: Dimensions {
                width: w,
                height: h,
            },
            stride: w,
        };
        let mut tile = PixTile::new(buffer, layout)?;
        tile.clear(self.bg_color);
        Ok(tile)
    }

    /// Stream `tile` into the controller's frame memory
    ///
    /// Sets the address window to the tile's rectangle, then writes its rows
    /// top to bottom as big-endian RGB565. Stride padding is not sent.
    ///
    /// # Errors
    ///
    /// Returns `Error::TileOutOfBounds` if the tile is not entirely on screen,
    /// or `Error::Interface` if the transfer fails.
    pub fn send_tile(&mut self, tile: &PixTile<'_>) -> LcdResult<(), I> {
        let (x, y, w, h) = (tile.x(), tile.y(), tile.width(), tile.height());
        Self::check_on_screen(x, y, w, h)?;
        trace!("lcd: send tile {w}x{h} at ({x}, {y})");

        self.set_window(x, y, w, h)?;
        self.send_command(MEMORY_WRITE)?;

        let mut bytes = [0u8; CHUNK_PIXELS * 2];
        for row in (tile.y()..tile.y() + h as i32).filter_map(|y| tile.row(y)) {
            for chunk in row.chunks(CHUNK_PIXELS) {
                for (pair, pixel) in bytes.chunks_exact_mut(2).zip(chunk) {
                    pair.copy_from_slice(&pixel.0.to_be_bytes());
                }
                self.send_data(&bytes[..chunk.len() * 2])?;
            }
        }
        Ok(())
    }

    /// Get a reference to the interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Get a mutable reference to the interface
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Consume the driver and give back the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Set the inclusive column and page address window
    #[allow(clippy::many_single_char_names)]
    fn set_window(&mut self, x: i32, y: i32, w: usize, h: usize) -> LcdResult<(), I> {
        // On screen, so every coordinate fits in u16
        let x0 = x as u16;
        let y0 = y as u16;
        let x1 = x0 + w as u16 - 1;
        let y1 = y0 + h as u16 - 1;

        self.send_command(COLUMN_ADDRESS_SET)?;
        self.send_data(&window_bytes(x0, x1))?;

        self.send_command(PAGE_ADDRESS_SET)?;
        self.send_data(&window_bytes(y0, y1))?;
        Ok(())
    }

    /// Reject tiles that are empty or not entirely on screen
    #[allow(clippy::many_single_char_names)]
    fn check_on_screen(x: i32, y: i32, w: usize, h: usize) -> LcdResult<(), I> {
        let fits = |origin: i32, len: usize, limit: usize| {
            usize::try_from(origin).is_ok_and(|o| len > 0 && o.saturating_add(len) <= limit)
        };
        if fits(x, w, LCD_WIDTH) && fits(y, h, LCD_HEIGHT) {
            Ok(())
        } else {
            Err(Error::TileOutOfBounds {
                x,
                y,
                width: w,
                height: h,
            })
        }
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> LcdResult<(), I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> LcdResult<(), I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}

fn window_bytes(start: u16, end: u16) -> [u8; 4] {
    let [s0, s1] = start.to_be_bytes();
    let [e0, e1] = end.to_be_bytes();
    [s0, s1, e0, e1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Debug)]
    struct MockInterface {
        commands: Vec<u8>,
        command_data: Vec<(u8, Vec<u8>)>,
        last_command: Option<u8>,
        resets: usize,
    }

    impl MockInterface {
        fn new() -> Self {
            Self {
                commands: Vec::new(),
                command_data: Vec::new(),
                last_command: None,
                resets: 0,
            }
        }

        fn data_for(&self, command: u8) -> Vec<&[u8]> {
            self.command_data
                .iter()
                .filter(|(cmd, _)| *cmd == command)
                .map(|(_, data)| data.as_slice())
                .collect()
        }
    }

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
            self.commands.push(command);
            self.last_command = Some(command);
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if let Some(cmd) = self.last_command {
                self.command_data.push((cmd, data.to_vec()));
            }
            Ok(())
        }

        fn reset<D: DelayNs>(&mut self, _delay: &mut D) {
            self.resets += 1;
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn test_lcd() -> Lcd<MockInterface> {
        Lcd::new(MockInterface::new())
    }

    #[test]
    fn test_init_sequence() {
        let mut lcd = test_lcd();
        lcd.init(&mut MockDelay).unwrap();
        let interface = lcd.release();
        assert_eq!(interface.resets, 1);
        assert_eq!(
            interface.commands,
            [
                SOFTWARE_RESET,
                SLEEP_OUT,
                PIXEL_FORMAT_SET,
                MEMORY_ACCESS_CONTROL,
                DISPLAY_ON
            ]
        );
        assert_eq!(interface.data_for(PIXEL_FORMAT_SET), [[0x55]]);
        assert_eq!(interface.data_for(MEMORY_ACCESS_CONTROL), [[0x48]]);
    }

    #[test]
    fn test_alloc_tile_clears_to_background() {
        let mut lcd = test_lcd();
        lcd.set_bg_color(Rgb565::WHITE);
        assert_eq!(lcd.bg_color(), Rgb565::WHITE);

        let mut buffer = vec![Rgb565::BLACK; 64];
        let tile = lcd.alloc_tile(&mut buffer, 16, 32, 8, 4).unwrap();
        assert_eq!((tile.x(), tile.y(), tile.stride()), (16, 32, 8));
        assert_eq!(tile.pixel(23, 35), Some(Rgb565::WHITE));
        assert!(buffer[..32].iter().all(|p| *p == Rgb565::WHITE));
        assert!(buffer[32..].iter().all(|p| *p == Rgb565::BLACK));
    }

    #[test]
    fn test_alloc_tile_off_screen_returns_error() {
        let lcd = test_lcd();
        let mut buffer = vec![Rgb565::BLACK; 400];
        for (x, y, w, h) in [
            (-1, 0, 10, 10),
            (0, -1, 10, 10),
            (231, 0, 10, 10),
            (0, 311, 10, 10),
            (0, 0, 0, 10),
        ] {
            let result = lcd.alloc_tile(&mut buffer, x, y, w, h);
            assert!(
                matches!(result, Err(Error::TileOutOfBounds { .. })),
                "({x}, {y}) {w}x{h}"
            );
        }
        assert!(lcd.alloc_tile(&mut buffer, 230, 310, 10, 10).is_ok());
    }

    #[test]
    fn test_alloc_tile_too_large_returns_error() {
        let lcd = test_lcd();
        let mut buffer = vec![Rgb565::BLACK; LCD_WIDTH * 137];
        let result = lcd.alloc_tile(&mut buffer, 0, 0, LCD_WIDTH, 137);
        assert!(matches!(
            result,
            Err(Error::TileTooLarge {
                pixels: 32_880,
                max: 32_768
            })
        ));
        assert!(lcd.alloc_tile(&mut buffer, 0, 0, LCD_WIDTH, 136).is_ok());
    }

    #[test]
    fn test_alloc_tile_buffer_too_small_returns_error() {
        let lcd = test_lcd();
        let mut buffer = vec![Rgb565::BLACK; 10];
        let result = lcd.alloc_tile(&mut buffer, 0, 0, 4, 4);
        assert!(matches!(
            result,
            Err(Error::Tile(crate::error::TileError::BufferTooSmall {
                required: 16,
                provided: 10
            }))
        ));
    }

    #[test]
    fn test_send_tile_window_and_pixels() {
        let mut lcd = test_lcd();
        let mut buffer = vec![Rgb565::BLACK; 6];
        let mut tile = lcd.alloc_tile(&mut buffer, 10, 300, 3, 2).unwrap();
        tile.set_pixel(10, 300, Rgb565(0xF800));
        tile.set_pixel(12, 301, Rgb565(0x1234));
        lcd.send_tile(&tile).unwrap();

        let interface = lcd.release();
        assert_eq!(
            interface.commands,
            [COLUMN_ADDRESS_SET, PAGE_ADDRESS_SET, MEMORY_WRITE]
        );
        assert_eq!(interface.data_for(COLUMN_ADDRESS_SET), [[0, 10, 0, 12]]);
        assert_eq!(interface.data_for(PAGE_ADDRESS_SET), [[0x01, 0x2C, 0x01, 0x2D]]);
        assert_eq!(
            interface.data_for(MEMORY_WRITE),
            [
                [0xF8, 0x00, 0, 0, 0, 0],
                [0, 0, 0, 0, 0x12, 0x34]
            ]
        );
    }

    #[test]
    fn test_send_tile_chunks_rows_and_skips_padding() {
        let mut lcd = test_lcd();
        let layout = Builder::new()
            .origin(0, 0)
            .dimensions(Dimensions::new(40, 2).unwrap())
            .stride(48)
            .build()
            .unwrap();
        let mut buffer = vec![Rgb565::WHITE; layout.buffer_len()];
        let tile = PixTile::new(&mut buffer, layout).unwrap();
        lcd.send_tile(&tile).unwrap();

        let interface = lcd.release();
        let lens: Vec<usize> = interface
            .data_for(MEMORY_WRITE)
            .iter()
            .map(|d| d.len())
            .collect();
        assert_eq!(lens, [64, 16, 64, 16]);
    }

    #[test]
    fn test_send_tile_off_screen_returns_error() {
        let mut lcd = test_lcd();
        let layout = Builder::new()
            .origin(-4, 0)
            .dimensions(Dimensions::new(8, 8).unwrap())
            .build()
            .unwrap();
        let mut buffer = vec![Rgb565::BLACK; 64];
        let tile = PixTile::new(&mut buffer, layout).unwrap();
        let result = lcd.send_tile(&tile);
        assert!(matches!(result, Err(Error::TileOutOfBounds { x: -4, .. })));
        assert!(lcd.interface().commands.is_empty());
    }
}
