//! Line rasterizers
//!
//! Two algorithms, each in an opaque and a blended flavor:
//!
//! - [`PixTile::draw_line`] is Bresenham on 24.8 fixed point. The error
//!   accumulator starts at `2|minor| - |major|`, corrected for the fractional
//!   part of the start point, and the minor axis steps whenever it is
//!   non-negative. The pixel set does not depend on endpoint order.
//! - [`PixTile::draw_line_aa`] is Wu's algorithm. Every column (row, for steep
//!   lines) between the endpoints blends two pixels whose coverages sum to 255.
//!
//! Pixels are clipped individually, so lines may run off the tile. Endpoints
//! further than [`GUARD_BAND`] pixels from the screen origin are first pulled
//! in along the line, which keeps the fixed-point deltas in range. Lines with
//! a non-finite endpoint draw nothing.
//!
//! ## Example
//!
//! ```
//! use tilegfx::{Builder, Dimensions, PixTile, Rgb565, Rgb888};
//!
//! let dims = match Dimensions::new(16, 16) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let layout = match Builder::new().dimensions(dims).build() {
//!     Ok(layout) => layout,
//!     Err(_) => return,
//! };
//! let mut pixels = [Rgb565::BLACK; 256];
//! let mut tile = match PixTile::new(&mut pixels, layout) {
//!     Ok(tile) => tile,
//!     Err(_) => return,
//! };
//!
//! tile.draw_line(0.0, 0.0, 15.0, 15.0, Rgb888::WHITE);
//! assert_eq!(tile.pixel(7, 7), Some(Rgb565::WHITE));
//!
//! tile.draw_line_aa(0.0, 15.0, 15.0, 0.0, Rgb888(0xFF_0000));
//! ```

use crate::color::{Alpha, OPAQUE, Rgb888, scale_alpha};
use crate::coord::Coord;
use crate::tile::PixTile;

impl PixTile<'_> {
    /// Draw a hard-edged line between two points
    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb888) {
        let Some((x0, y0, x1, y1)) = to_coords(x0, y0, x1, y1) else {
            return;
        };
        if y0 == y1 {
            self.fill_span(x0.min(x1).floor_int(), x0.max(x1).floor_int(), y0.floor_int(), color);
            return;
        }
        let packed = color.pack();
        bresenham(x0, y0, x1, y1, |x, y| self.set_pixel(x, y, packed));
    }

    /// Draw a hard-edged line composited with opacity `alpha`
    pub fn draw_line_blend(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: Rgb888,
        alpha: Alpha,
    ) {
        let Some((x0, y0, x1, y1)) = to_coords(x0, y0, x1, y1) else {
            return;
        };
        if y0 == y1 {
            self.fill_span_blend(
                x0.min(x1).floor_int(),
                x0.max(x1).floor_int(),
                y0.floor_int(),
                color,
                alpha,
            );
            return;
        }
        bresenham(x0, y0, x1, y1, |x, y| {
            self.fill_pixel_blend(x, y, color, alpha);
        });
    }

    /// Draw an anti-aliased line
    pub fn draw_line_aa(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb888) {
        self.draw_line_aa_blend(x0, y0, x1, y1, color, OPAQUE);
    }

    /// Draw an anti-aliased line, scaling every coverage by `alpha`
    pub fn draw_line_aa_blend(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: Rgb888,
        alpha: Alpha,
    ) {
        let Some((x0, y0, x1, y1)) = to_coords(x0, y0, x1, y1) else {
            return;
        };
        wu(x0, y0, x1, y1, |x, y, coverage| {
            self.fill_pixel_blend(x, y, color, scale_alpha(coverage, alpha));
        });
    }
}

/// Half-width in pixels of the square around the screen origin that line
/// endpoints are trimmed to
pub const GUARD_BAND: f32 = 65_536.0;

/// Trim a segment to the guard band and convert it to fixed point
///
/// The endpoints are put in a canonical order first so that both argument
/// orders trim to the same segment. Endpoints already inside the band are
/// kept bit for bit.
fn to_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Option<(Coord, Coord, Coord, Coord)> {
    if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
        return None;
    }
    let ((x0, y0), (x1, y1)) = if (x1, y1) < (x0, y0) {
        ((x1, y1), (x0, y0))
    } else {
        ((x0, y0), (x1, y1))
    };

    let band = f64::from(GUARD_BAND);
    let (fx0, fy0) = (f64::from(x0), f64::from(y0));
    let (dx, dy) = (f64::from(x1) - fx0, f64::from(y1) - fy0);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    // Liang-Barsky against |x| <= band, |y| <= band
    for (p, q) in [(-dx, fx0 + band), (dx, band - fx0), (-dy, fy0 + band), (dy, band - fy0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
    }
    if t0 > t1 {
        return None;
    }

    let at = |t: f64| {
        (
            (fx0 + t * dx).clamp(-band, band) as f32,
            (fy0 + t * dy).clamp(-band, band) as f32,
        )
    };
    let (x0, y0) = if t0 > 0.0 { at(t0) } else { (x0, y0) };
    let (x1, y1) = if t1 < 1.0 { at(t1) } else { (x1, y1) };
    Some((
        Coord::from_f32(x0),
        Coord::from_f32(y0),
        Coord::from_f32(x1),
        Coord::from_f32(y1),
    ))
}

/// Visit the pixels of a hard-edged line
pub(crate) fn bresenham(x0: Coord, y0: Coord, x1: Coord, y1: Coord, mut plot: impl FnMut(i32, i32)) {
    if y0 == y1 {
        let y = y0.floor_int();
        for x in x0.min(x1).floor_int()..=x0.max(x1).floor_int() {
            plot(x, y);
        }
        return;
    }
    if x0 == x1 {
        let x = x0.floor_int();
        for y in y0.min(y1).floor_int()..=y0.max(y1).floor_int() {
            plot(x, y);
        }
        return;
    }

    if x0.delta_to(x1).abs() >= y0.delta_to(y1).abs() {
        walk_major(x0, y0, x1, y1, |major, minor| plot(major, minor));
    } else {
        walk_major(y0, x0, y1, x1, |major, minor| plot(minor, major));
    }
}

/// Step pixel by pixel along the major axis `a`, tracking the minor axis `b`
///
/// `|b1 - b0| <= |a1 - a0|` and `a0 != a1`. The error term is kept scaled by
/// 256 so the fractional start correction stays exact.
fn walk_major(a0: Coord, b0: Coord, a1: Coord, b1: Coord, mut plot: impl FnMut(i32, i32)) {
    let (a0, b0, a1, b1) = if a0 > a1 { (a1, b1, a0, b0) } else { (a0, b0, a1, b1) };
    let da = a0.delta_to(a1);
    let db = b0.delta_to(b1).abs();
    let dir: i32 = if b1 > b0 { 1 } else { -1 };
    let fa = i64::from(a0.frac().raw());
    let fb = i64::from(b0.frac().raw());

    // 2|db| - da in raw units, corrected for where a0 and b0 sit inside
    // their pixels
    let mut d = 2 * (256 - fa) * db + i64::from(dir) * 2 * fb * da - 256 * da;
    let lo = b0.min(b1).floor_int();
    let hi = b0.max(b1).floor_int();
    let mut minor = b0.floor_int();

    for major in a0.floor_int()..=a1.floor_int() {
        plot(major, minor.clamp(lo, hi));
        if d >= 0 {
            minor += dir;
            d -= 512 * da;
        }
        d += 512 * db;
    }
}

/// Coverage of a pixel from two fractional extents
fn coverage(a: Coord, b: Coord) -> u8 {
    ((a.raw() * b.raw() * 255) >> 16).clamp(0, 255) as u8
}

/// Visit the pixels of an anti-aliased line with their coverage
pub(crate) fn wu(x0: Coord, y0: Coord, x1: Coord, y1: Coord, mut plot: impl FnMut(i32, i32, u8)) {
    let steep = y0.delta_to(y1).abs() > x0.delta_to(x1).abs();
    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };
    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x0.delta_to(x1);
    if dx == 0 {
        return;
    }
    let gradient = y0.delta_to(y1) as f32 / dx as f32;

    let mut put = |x: i32, y: i32, c: u8| {
        if steep {
            plot(y, x, c);
        } else {
            plot(x, y, c);
        }
    };

    let xend = x0.round();
    let yend = y0 + Coord::from_f32(gradient * (xend - x0).to_f32());
    let xgap = (x0 + Coord::HALF).rfrac();
    let xpxl1 = xend.floor_int();
    put(xpxl1, yend.floor_int(), coverage(yend.rfrac(), xgap));
    put(xpxl1, yend.floor_int() + 1, coverage(yend.frac(), xgap));
    let mut intery = yend.to_f32() + gradient;

    let xend = x1.round();
    let yend = y1 + Coord::from_f32(gradient * (xend - x1).to_f32());
    let xgap = (x1 + Coord::HALF).frac();
    let xpxl2 = xend.floor_int();
    put(xpxl2, yend.floor_int(), coverage(yend.rfrac(), xgap));
    put(xpxl2, yend.floor_int() + 1, coverage(yend.frac(), xgap));

    for x in xpxl1 + 1..xpxl2 {
        let y = Coord::from_f32(intery);
        let f = y.frac().raw() as u8;
        put(x, y.floor_int(), 255 - f);
        put(x, y.floor_int() + 1, f);
        intery += gradient;
    }
}
