//! Pixel and span primitives
//!
//! Every primitive comes in a clipped and an unclipped flavor. The clipped
//! ones silently drop whatever falls off the tile. The unclipped ones trust
//! the caller: an off-tile coordinate is a bug, caught by a debug assertion
//! or by slice bounds checks, never by a silent wrap into another row.
//!
//! Spans are inclusive: `fill_span(x0, x1, y, ..)` touches `x0..=x1`.

use crate::color::{Alpha, OPAQUE, Rgb565, Rgb888, TRANSPARENT};
use crate::tile::PixTile;

impl PixTile<'_> {
    /// Set the pixel at screen `(x, y)` to `color`; off-tile is a no-op
    pub fn fill_pixel(&mut self, x: i32, y: i32, color: Rgb888) {
        self.set_pixel(x, y, color.pack());
    }

    /// Composite `color` with opacity `alpha` onto the pixel at `(x, y)`
    ///
    /// Alpha 0 leaves the pixel untouched and alpha 255 overwrites it exactly.
    pub fn fill_pixel_blend(&mut self, x: i32, y: i32, color: Rgb888, alpha: Alpha) {
        if alpha == TRANSPARENT {
            return;
        }
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = self.pixels[i].blend(color, alpha);
        }
    }

    /// Set an on-tile pixel without a bounds test
    pub fn fill_pixel_unclipped(&mut self, x: i32, y: i32, color: Rgb888) {
        let i = self.unclipped_offset(x, y);
        self.pixels[i] = color.pack();
    }

    /// Blend onto an on-tile pixel without a bounds test
    pub fn fill_pixel_blend_unclipped(&mut self, x: i32, y: i32, color: Rgb888, alpha: Alpha) {
        let i = self.unclipped_offset(x, y);
        self.pixels[i] = self.pixels[i].blend(color, alpha);
    }

    /// Fill `x0..=x1` on row `y`, clipped to the tile
    pub fn fill_span(&mut self, x0: i32, x1: i32, y: i32, color: Rgb888) {
        if let Some(run) = self.clipped_run(x0, x1, y) {
            run.fill(color.pack());
        }
    }

    /// Blend `color` over `x0..=x1` on row `y`, clipped to the tile
    pub fn fill_span_blend(&mut self, x0: i32, x1: i32, y: i32, color: Rgb888, alpha: Alpha) {
        match alpha {
            TRANSPARENT => {}
            OPAQUE => self.fill_span(x0, x1, y, color),
            _ => {
                if let Some(run) = self.clipped_run(x0, x1, y) {
                    blend_run(run, color, alpha);
                }
            }
        }
    }

    /// Fill an on-tile span without clipping
    pub fn fill_span_unclipped(&mut self, x0: i32, x1: i32, y: i32, color: Rgb888) {
        if x1 < x0 {
            return;
        }
        let start = self.unclipped_offset(x0, y);
        let end = self.unclipped_offset(x1, y);
        self.pixels[start..=end].fill(color.pack());
    }

    /// Blend over an on-tile span without clipping
    pub fn fill_span_blend_unclipped(
        &mut self,
        x0: i32,
        x1: i32,
        y: i32,
        color: Rgb888,
        alpha: Alpha,
    ) {
        if x1 < x0 || alpha == TRANSPARENT {
            return;
        }
        let start = self.unclipped_offset(x0, y);
        let end = self.unclipped_offset(x1, y);
        blend_run(&mut self.pixels[start..=end], color, alpha);
    }

    fn unclipped_offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            self.contains(x, y),
            "unclipped write at ({x}, {y}) outside tile"
        );
        (y - self.y) as usize * self.stride + (x - self.x) as usize
    }

    fn clipped_run(&mut self, x0: i32, x1: i32, y: i32) -> Option<&mut [Rgb565]> {
        let lo = x0.max(self.x);
        let hi = x1.min(self.x_end() - 1);
        if lo > hi {
            return None;
        }
        let origin = self.x;
        let row = self.row_mut(y)?;
        Some(&mut row[(lo - origin) as usize..=(hi - origin) as usize])
    }
}

fn blend_run(run: &mut [Rgb565], color: Rgb888, alpha: Alpha) {
    for pixel in run {
        *pixel = pixel.blend(color, alpha);
    }
}
