//! Packed color formats and alpha compositing
//!
//! Callers pass colors as packed 24-bit [`Rgb888`] (`0x00RRGGBB`); tiles store
//! packed 16-bit [`Rgb565`] (`RRRRRGGGGGGBBBBB`).
//!
//! ## Conversion
//!
//! Packing rounds each channel to the nearest 5- or 6-bit level, and unpacking
//! widens by bit replication (`c5 << 3 | c5 >> 2`, `c6 << 2 | c6 >> 4`). A
//! round trip through [`Rgb565`] stays within ±4 of the original per channel,
//! and an already quantized color packs back to itself.
//!
//! | Channel | Bits | Widened                |
//! |---------|------|------------------------|
//! | Red     | 5    | `r5 << 3 \| r5 >> 2`   |
//! | Green   | 6    | `g6 << 2 \| g6 >> 4`   |
//! | Blue    | 5    | `b5 << 3 \| b5 >> 2`   |
//!
//! ## Example
//!
//! ```
//! use tilegfx::{Rgb565, Rgb888};
//!
//! let orange = Rgb888::new(0xFF, 0x80, 0x00);
//! let packed = orange.pack();
//! assert_eq!(packed, Rgb565(0xFC00));
//!
//! // Half-way blend of orange over black
//! let mixed = Rgb565(0x0000).blend(orange, 128);
//! assert_eq!(mixed.unpack().r(), 0x84);
//! ```

/// Alpha (opacity) in `0..=255`; 0 is transparent, 255 is opaque
pub type Alpha = u8;

/// Fully transparent
pub const TRANSPARENT: Alpha = 0x00;
/// Fully opaque
pub const OPAQUE: Alpha = 0xFF;

/// 24-bit color packed as `0x00RRGGBB`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Rgb888(pub u32);

/// 16-bit color packed as 5 bits red, 6 bits green, 5 bits blue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Rgb565(pub u16);

impl Rgb888 {
    /// Black
    pub const BLACK: Self = Self(0x00_0000);
    /// White
    pub const WHITE: Self = Self(0xFF_FFFF);

    /// Build from 8-bit channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self((r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Red channel
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Quantize to RGB565, rounding each channel to the nearest level
    pub const fn pack(self) -> Rgb565 {
        Rgb565::from_channels(self.r(), self.g(), self.b())
    }
}

impl Rgb565 {
    /// Black
    pub const BLACK: Self = Self(0x0000);
    /// White
    pub const WHITE: Self = Self(0xFFFF);

    /// Quantize 8-bit channels, rounding to the nearest 5/6/5-bit level
    pub const fn from_channels(r: u8, g: u8, b: u8) -> Self {
        let r5 = (r as u32 * 31 + 127) / 255;
        let g6 = (g as u32 * 63 + 127) / 255;
        let b5 = (b as u32 * 31 + 127) / 255;
        Self((r5 << 11 | g6 << 5 | b5) as u16)
    }

    /// Raw 5-bit red
    pub const fn r5(self) -> u8 {
        (self.0 >> 11 & 0x1F) as u8
    }

    /// Raw 6-bit green
    pub const fn g6(self) -> u8 {
        (self.0 >> 5 & 0x3F) as u8
    }

    /// Raw 5-bit blue
    pub const fn b5(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// Widen to 24-bit color by bit replication
    pub const fn unpack(self) -> Rgb888 {
        let r5 = self.r5();
        let g6 = self.g6();
        let b5 = self.b5();
        Rgb888::new(r5 << 3 | r5 >> 2, g6 << 2 | g6 >> 4, b5 << 3 | b5 >> 2)
    }

    /// Composite `src` over this pixel with opacity `alpha`
    ///
    /// Each channel becomes `dest + (src - dest) * alpha / 255`, truncated,
    /// then repacked. Alpha 0 returns `self` unchanged and alpha 255 returns
    /// `src.pack()`.
    pub const fn blend(self, src: Rgb888, alpha: Alpha) -> Self {
        match alpha {
            TRANSPARENT => self,
            OPAQUE => src.pack(),
            _ => {
                let dest = self.unpack();
                Self::from_channels(
                    mix(dest.r(), src.r(), alpha),
                    mix(dest.g(), src.g(), alpha),
                    mix(dest.b(), src.b(), alpha),
                )
            }
        }
    }
}

const fn mix(dest: u8, src: u8, alpha: Alpha) -> u8 {
    let d = dest as i32;
    let s = src as i32;
    (d + (s - d) * alpha as i32 / 255) as u8
}

/// Scale a coverage value by an alpha, both in `0..=255`
pub(crate) const fn scale_alpha(coverage: u8, alpha: Alpha) -> Alpha {
    (coverage as u32 * alpha as u32 / 255) as u8
}

impl From<Rgb888> for Rgb565 {
    fn from(color: Rgb888) -> Self {
        color.pack()
    }
}

impl From<Rgb565> for Rgb888 {
    fn from(color: Rgb565) -> Self {
        color.unpack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_error(a: Rgb888, b: Rgb888) -> u8 {
        a.r()
            .abs_diff(b.r())
            .max(a.g().abs_diff(b.g()))
            .max(a.b().abs_diff(b.b()))
    }

    #[test]
    fn test_pack_primaries() {
        assert_eq!(Rgb888::new(0xFF, 0, 0).pack(), Rgb565(0xF800));
        assert_eq!(Rgb888::new(0, 0xFF, 0).pack(), Rgb565(0x07E0));
        assert_eq!(Rgb888::new(0, 0, 0xFF).pack(), Rgb565(0x001F));
        assert_eq!(Rgb888::WHITE.pack(), Rgb565::WHITE);
        assert_eq!(Rgb888::BLACK.pack(), Rgb565::BLACK);
    }

    #[test]
    fn test_unpack_replicates_top_bits() {
        assert_eq!(Rgb565(0xF800).unpack(), Rgb888(0xFF_0000));
        assert_eq!(Rgb565(0x7BEF).unpack(), Rgb888(0x7B_7D7B));
        assert_eq!(Rgb565::WHITE.unpack(), Rgb888::WHITE);
    }

    #[test]
    fn test_round_trip_error_bound_every_level() {
        for v in 0..=255u8 {
            let c = Rgb888::new(v, v, v);
            assert!(channel_error(c, c.pack().unpack()) <= 4, "level {v}");
        }
    }

    #[test]
    fn test_pack_is_idempotent_on_quantized() {
        for raw in 0..=u16::MAX {
            let p = Rgb565(raw);
            assert_eq!(p.unpack().pack(), p);
        }
    }

    #[test]
    fn test_blend_boundaries() {
        let dest = Rgb565(0x1234);
        let src = Rgb888(0xAB_CDEF);
        assert_eq!(dest.blend(src, TRANSPARENT), dest);
        assert_eq!(dest.blend(src, OPAQUE), src.pack());
    }

    #[test]
    fn test_blend_midpoint() {
        let mixed = Rgb565::BLACK.blend(Rgb888::WHITE, 128);
        let c = mixed.unpack();
        // 255 * 128 / 255 = 128, quantized
        assert!(c.r().abs_diff(128) <= 4);
        assert!(c.g().abs_diff(128) <= 2);
        assert!(c.b().abs_diff(128) <= 4);
    }

    #[test]
    fn test_blend_toward_darker_source() {
        let mixed = Rgb565::WHITE.blend(Rgb888::BLACK, 64);
        let c = mixed.unpack();
        // 255 - 255 * 64 / 255 = 191
        assert!(c.r().abs_diff(191) <= 4);
        assert!(c.g().abs_diff(191) <= 2);
    }

    #[test]
    fn test_scale_alpha() {
        assert_eq!(scale_alpha(255, 255), 255);
        assert_eq!(scale_alpha(255, 0), 0);
        assert_eq!(scale_alpha(128, 255), 128);
        assert_eq!(scale_alpha(255, 100), 100);
    }
}
