//! Trapezoid and triangle fills
//!
//! A triangle is sorted by y and cut at its middle vertex into at most two
//! trapezoids, which are clipped to the tile and rasterized.
//!
//! # Hard fill
//!
//! Pixel `(px, py)` is filled when its top-left corner lies inside the
//! trapezoid, with the top and left edges inclusive and the bottom and right
//! edges exclusive. Row `py` therefore spans `[ceil(xl), ceil(xr))` with the
//! edges sampled at `y = py`, and trapezoids sharing an edge never fill the
//! same pixel twice.
//!
//! # Anti-aliased fill
//!
//! Each row is cut to the part of `[py, py + 1)` the trapezoid covers. Over
//! that slice an edge sweeps the x interval `[xa, xb]`, and the share of pixel
//! column `px` on the inner side of the edge is the area under a linear ramp,
//! computed exactly in 16.16 fixed point. The two edge coverages `l` and `r`
//! combine as `max(0, l + r - 255)` and are weighted by the slice height.
//!
//! The weighted coverages of every trapezoid touching a row are summed before
//! the row is written, and each pixel is blended once with the sum scaled by
//! the fill alpha. Rows shared by two trapezoids, at the middle vertex or at
//! a clip split, therefore come out as solid as any other interior row.
//!
//! ## Example
//!
//! ```
//! use tilegfx::{Builder, Dimensions, PixTile, Point, Rgb565, Rgb888};
//!
//! let dims = match Dimensions::new(10, 10) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let layout = match Builder::new().dimensions(dims).build() {
//!     Ok(layout) => layout,
//!     Err(_) => return,
//! };
//! let mut pixels = [Rgb565::BLACK; 100];
//! let mut tile = match PixTile::new(&mut pixels, layout) {
//!     Ok(tile) => tile,
//!     Err(_) => return,
//! };
//!
//! let verts = [Point::new(1.0, 1.0), Point::new(4.0, 1.0), Point::new(1.0, 4.0)];
//! tile.fill_triangle(verts, Rgb888::WHITE);
//! assert_eq!(tile.pixel(3, 1), Some(Rgb565::WHITE));
//! assert_eq!(tile.pixel(3, 2), Some(Rgb565::BLACK));
//! ```

use heapless::Vec;

use crate::clip::{MAX_TRAPEZOIDS, Trapezoids, clip_trapezoids};
use crate::color::{Alpha, OPAQUE, Rgb888};
use crate::geometry::{Point, Trapezoid};
use crate::tile::PixTile;

const FIX_BITS: u32 = 16;
const FIX_ONE: i64 = 1 << FIX_BITS;

/// Columns summed at a time by the anti-aliased fill
const ROW_CHUNK: usize = 64;

impl PixTile<'_> {
    /// Clip and fill a contiguous run of trapezoids
    pub fn fill_trapezoids(&mut self, zoids: Trapezoids, color: Rgb888) {
        self.fill_trapezoids_blend(zoids, color, OPAQUE);
    }

    /// Clip and fill a contiguous run of trapezoids with opacity `alpha`
    pub fn fill_trapezoids_blend(&mut self, mut zoids: Trapezoids, color: Rgb888, alpha: Alpha) {
        clip_trapezoids(&mut zoids, &self.bounds());
        for z in &zoids {
            self.fill_trapezoid(z, color, alpha);
        }
    }

    /// Clip and fill a contiguous run of trapezoids with anti-aliased edges
    ///
    /// Every pixel is blended at most once, with the coverage of all the
    /// trapezoids summed.
    pub fn fill_trapezoids_aa(&mut self, mut zoids: Trapezoids, color: Rgb888, alpha: Alpha) {
        clip_trapezoids(&mut zoids, &self.bounds());
        let shapes: Vec<AaTrapezoid, MAX_TRAPEZOIDS> =
            zoids.iter().filter_map(AaTrapezoid::new).collect();
        let Some(first) = shapes.iter().map(|z| z.y0 >> FIX_BITS).min() else {
            return;
        };
        let last = shapes.iter().map(|z| ceil_fix(z.y1) - 1).max().unwrap_or(first);
        let left = i64::from(self.x());
        let right = i64::from(self.x_end()) - 1;

        for py in first..=last {
            let rows: Vec<AaRow, MAX_TRAPEZOIDS> =
                shapes.iter().filter_map(|z| z.row(py)).collect();
            let Some(x0) = rows.iter().map(|r| r.first).min() else {
                continue;
            };
            let x1 = rows.iter().map(|r| r.last).max().unwrap_or(x0).min(right);

            let mut cx = x0.max(left);
            while cx <= x1 {
                let end = (cx + ROW_CHUNK as i64 - 1).min(x1);
                let mut sums = [0_i64; ROW_CHUNK];
                for r in &rows {
                    for px in r.first.max(cx)..=r.last.min(end) {
                        sums[(px - cx) as usize] += r.coverage(px) * r.h;
                    }
                }
                for (px, sum) in (cx..=end).zip(sums) {
                    let c = (sum >> FIX_BITS).min(255);
                    let a = (c * i64::from(alpha) / 255) as Alpha;
                    self.fill_pixel_blend(px as i32, py as i32, color, a);
                }
                cx = end + 1;
            }
        }
    }

    /// Fill a triangle with hard edges
    pub fn fill_triangle(&mut self, verts: [Point; 3], color: Rgb888) {
        self.fill_trapezoids(triangle_trapezoids(verts), color);
    }

    /// Fill a triangle with hard edges and opacity `alpha`
    pub fn fill_triangle_blend(&mut self, verts: [Point; 3], color: Rgb888, alpha: Alpha) {
        self.fill_trapezoids_blend(triangle_trapezoids(verts), color, alpha);
    }

    /// Fill a triangle with anti-aliased edges and opacity `alpha`
    pub fn fill_triangle_aa(&mut self, verts: [Point; 3], color: Rgb888, alpha: Alpha) {
        self.fill_trapezoids_aa(triangle_trapezoids(verts), color, alpha);
    }

    fn fill_trapezoid(&mut self, z: &Trapezoid, color: Rgb888, alpha: Alpha) {
        if z.height() <= 0.0 {
            return;
        }
        let top = libm::ceilf(z.y0) as i32;
        let bottom = libm::ceilf(z.y1) as i32;
        for py in top..bottom {
            let y = py as f32;
            let xl = libm::ceilf(z.intersect_left_with_y(y)) as i32;
            let xr = libm::ceilf(z.intersect_right_with_y(y)) as i32;
            if xr > xl {
                self.fill_span_blend(xl, xr - 1, py, color, alpha);
            }
        }
    }
}

/// A clipped trapezoid prepared for the anti-aliased fill
struct AaTrapezoid {
    y0: i64,
    y1: i64,
    left: Edge,
    right: Edge,
}

impl AaTrapezoid {
    fn new(z: &Trapezoid) -> Option<Self> {
        let (y0, y1) = (to_fix(z.y0), to_fix(z.y1));
        (y1 > y0).then(|| Self {
            y0,
            y1,
            left: Edge::new(to_fix(z.xl0), to_fix(z.xl1), y0, y1),
            right: Edge::new(to_fix(z.xr0), to_fix(z.xr1), y0, y1),
        })
    }

    /// The slice of pixel row `py` this trapezoid covers
    fn row(&self, py: i64) -> Option<AaRow> {
        let ya = self.y0.max(py << FIX_BITS);
        let yb = self.y1.min((py + 1) << FIX_BITS);
        if yb <= ya {
            return None;
        }
        let (la, lb) = self.left.sweep(ya, yb);
        let (ra, rb) = self.right.sweep(ya, yb);
        let first = la >> FIX_BITS;
        Some(AaRow {
            h: yb - ya,
            la,
            lb,
            ra,
            rb,
            first,
            last: first.max(ra >> FIX_BITS).max(ceil_fix(rb) - 1),
        })
    }
}

/// One trapezoid's part of a pixel row
struct AaRow {
    /// Slice height in 16.16
    h: i64,
    la: i64,
    lb: i64,
    ra: i64,
    rb: i64,
    /// Leftmost column touched
    first: i64,
    /// Rightmost column touched
    last: i64,
}

impl AaRow {
    /// 8-bit share of column `px` between the two edges
    fn coverage(&self, px: i64) -> i64 {
        let l = coverage(ramp_area(self.la, self.lb, px));
        let r = 255 - coverage(ramp_area(self.ra, self.rb, px));
        (l + r - 255).max(0)
    }
}

/// Split a triangle into at most two trapezoids
///
/// The vertices are sorted by y, keeping the given order among equal y. The
/// long edge from the top vertex to the bottom one is cut at the middle
/// vertex's y. Trapezoids of zero height are left out, so a triangle with a
/// horizontal side gives one trapezoid.
#[allow(clippy::float_cmp)]
pub fn triangle_trapezoids(verts: [Point; 3]) -> Trapezoids {
    let [v0, v1, v2] = sort_by_y(verts);
    let px = project_y_to_line(v1.y, v0, v2);
    let (xl, xr) = if px <= v1.x { (px, v1.x) } else { (v1.x, px) };

    let mut zoids = Trapezoids::new();
    if v0.y != v1.y {
        let _ = zoids.push(Trapezoid::new(v0.x, v0.x, v0.y, xl, xr, v1.y));
    }
    if v1.y != v2.y {
        let _ = zoids.push(Trapezoid::new(xl, xr, v1.y, v2.x, v2.x, v2.y));
    }
    zoids
}

fn sort_by_y(mut v: [Point; 3]) -> [Point; 3] {
    for (a, b) in [(0, 1), (1, 2), (0, 1)] {
        if v[a].y > v[b].y {
            v.swap(a, b);
        }
    }
    v
}

/// The x where the line through `a` and `b` crosses height `y`
#[allow(clippy::float_cmp)]
fn project_y_to_line(y: f32, a: Point, b: Point) -> f32 {
    if a.y == b.y {
        a.x
    } else {
        a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y)
    }
}

/// A trapezoid edge in 16.16 fixed point
struct Edge {
    x0: i64,
    y0: i64,
    gradient: i64,
}

impl Edge {
    fn new(x0: i64, x1: i64, y0: i64, y1: i64) -> Self {
        Self {
            x0,
            y0,
            gradient: ((x1 - x0) << FIX_BITS) / (y1 - y0),
        }
    }

    fn x_at(&self, y: i64) -> i64 {
        self.x0 + (((y - self.y0) * self.gradient) >> FIX_BITS)
    }

    /// The x interval the edge covers between `ya` and `yb`, low end first
    fn sweep(&self, ya: i64, yb: i64) -> (i64, i64) {
        let (a, b) = (self.x_at(ya), self.x_at(yb));
        (a.min(b), a.max(b))
    }
}

fn to_fix(v: f32) -> i64 {
    (v * FIX_ONE as f32) as i64
}

fn ceil_fix(v: i64) -> i64 {
    (v + FIX_ONE - 1) >> FIX_BITS
}

/// `∫ max(0, p - x) dx / (xb - xa)` for `x` over `[xa, xb]`
fn ramp(xa: i64, xb: i64, p: i64) -> i64 {
    if p <= xa {
        0
    } else if p >= xb {
        p - xa - (xb - xa) / 2
    } else {
        let t = p - xa;
        t * t / (2 * (xb - xa))
    }
}

/// Share of pixel column `px` right of an edge sweeping `[xa, xb]`, in 16.16
fn ramp_area(xa: i64, xb: i64, px: i64) -> i64 {
    let p = px << FIX_BITS;
    ramp(xa, xb, p + FIX_ONE) - ramp(xa, xb, p)
}

/// 16.16 area to an 8-bit coverage
fn coverage(area: i64) -> i64 {
    ((area * 255 + FIX_ONE / 2) >> FIX_BITS).clamp(0, 255)
}
