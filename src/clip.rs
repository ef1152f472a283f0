//! Trapezoid clipping against a rectangle
//!
//! [`clip_trapezoids`] takes a vertically contiguous run of trapezoids (the
//! bottom of each is the top of the next) and clips it against a rectangle
//! in four passes: max y, min y, min x, max x.
//!
//! The y passes trim whole trapezoids from either end of the run and cut the
//! boundary trapezoid at the clip line. The x passes look at each trapezoid's
//! four corners independently. A corner beyond the bound on the near edge
//! (the left edge for the min-x pass) and the far edge gives a 4-bit mask;
//! because `xl <= xr` on both rows, a far corner can only be out when the near
//! corner on the same row is, which leaves nine realizable masks. Masks that
//! put the crossing of the near edge strictly inside the trapezoid split it in
//! two, so the run can grow. For a triangle it never exceeds
//! [`MAX_TRAPEZOIDS`] pieces: each vertical bound crosses the triangle's
//! outline twice, and only crossings of a near edge split.
//!
//! The max-x pass reuses the min-x logic on the mirror image `x -> -x`.
//!
//! ## Example
//!
//! ```
//! use tilegfx::{Point, Rect, Trapezoid, Trapezoids, clip_trapezoids};
//!
//! let mut zoids = Trapezoids::new();
//! let _ = zoids.push(Trapezoid::new(-4.0, 4.0, -4.0, -4.0, 12.0, 4.0));
//! let bounds = Rect::new(Point::new(0.0, 0.0), Point::new(8.0, 8.0));
//!
//! let n = clip_trapezoids(&mut zoids, &bounds);
//! assert!(n >= 1);
//! for z in &zoids {
//!     assert!(z.xl0 >= 0.0 && z.xr1 <= 8.0 && z.y0 >= 0.0 && z.y1 <= 4.0);
//! }
//! ```

use log::trace;

use crate::geometry::{Rect, Trapezoid};

/// Largest number of trapezoids clipping a triangle can produce
pub const MAX_TRAPEZOIDS: usize = 5;

/// Fixed-capacity working set of trapezoids
pub type Trapezoids = heapless::Vec<Trapezoid, MAX_TRAPEZOIDS>;

/// Which corners of a trapezoid lie beyond the bound, for the min-x pass
///
/// "Near" is the left edge and "far" the right edge; "top" is row `y0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Clip {
    /// Nothing beyond the bound
    Inside,
    /// Near top corner only
    NearTop,
    /// Near bottom corner only
    NearBottom,
    /// Both near corners
    NearEdge,
    /// Both top corners
    Top,
    /// Every corner but the far bottom one
    AllButFarBottom,
    /// Both bottom corners
    Bottom,
    /// Every corner but the far top one
    AllButFarTop,
    /// All four corners
    Outside,
}

impl Clip {
    fn classify(z: &Trapezoid, bound: f32) -> Self {
        let out = |x: f32| x < bound;
        match (out(z.xl0), out(z.xl1), out(z.xr0), out(z.xr1)) {
            (false, false, false, false) => Self::Inside,
            (true, false, false, false) => Self::NearTop,
            (false, true, false, false) => Self::NearBottom,
            (true, true, false, false) => Self::NearEdge,
            (true, false, true, false) => Self::Top,
            (true, true, true, false) => Self::AllButFarBottom,
            (false, true, false, true) => Self::Bottom,
            (true, true, false, true) => Self::AllButFarTop,
            (true, true, true, true) => Self::Outside,
            mask => unreachable!("unrealizable clip mask {mask:?} at x = {bound} for {z:?}"),
        }
    }
}

/// Clip a contiguous run of trapezoids to `bounds`, returning the new count
///
/// Trapezoids of zero height are dropped first. Survivors satisfy
/// `xl0 <= xr0`, `xl1 <= xr1` and `y0 < y1`, with every coordinate inside
/// `bounds`. They stay sorted top to bottom only until the x passes, which
/// append split pieces at the end.
///
/// # Panics
///
/// Panics if the run is not contiguous, a trapezoid is upside down, or its
/// edges cross.
pub fn clip_trapezoids(zoids: &mut Trapezoids, bounds: &Rect) -> usize {
    drop_flat(zoids);
    assert_contiguous(zoids);

    clip_max_y(zoids, bounds.max.y);
    clip_min_y(zoids, bounds.min.y);
    clip_min_x(zoids, bounds.min.x);
    mirror(zoids);
    clip_min_x(zoids, -bounds.max.x);
    mirror(zoids);

    for z in zoids.iter_mut() {
        clamp(z, bounds);
    }
    zoids.len()
}

#[allow(clippy::float_cmp)]
fn drop_flat(zoids: &mut Trapezoids) {
    let mut kept = 0;
    for i in 0..zoids.len() {
        if zoids[i].height() != 0.0 {
            zoids[kept] = zoids[i];
            kept += 1;
        }
    }
    zoids.truncate(kept);
}

#[allow(clippy::float_cmp)]
fn assert_contiguous(zoids: &[Trapezoid]) {
    for z in zoids {
        assert!(z.y0 <= z.y1, "trapezoid upside down: {z:?}");
    }
    for pair in zoids.windows(2) {
        assert!(
            pair[0].y1 == pair[1].y0,
            "trapezoids not contiguous: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }
}

fn clip_max_y(zoids: &mut Trapezoids, max_y: f32) {
    while zoids.last().is_some_and(|z| z.y0 >= max_y) {
        zoids.pop();
    }
    if let Some(z) = zoids.last_mut() {
        if z.y1 > max_y {
            z.xl1 = z.intersect_left_with_y(max_y);
            z.xr1 = z.intersect_right_with_y(max_y);
            z.y1 = max_y;
            (z.xl1, z.xr1) = settle(z.xl1, z.xr1);
        }
    }
}

fn clip_min_y(zoids: &mut Trapezoids, min_y: f32) {
    let skip = zoids
        .iter()
        .position(|z| z.y1 > min_y)
        .unwrap_or(zoids.len());
    if skip > 0 {
        zoids.rotate_left(skip);
        zoids.truncate(zoids.len() - skip);
    }
    if let Some(z) = zoids.first_mut() {
        if z.y0 < min_y {
            z.xl0 = z.intersect_left_with_y(min_y);
            z.xr0 = z.intersect_right_with_y(min_y);
            z.y0 = min_y;
            (z.xl0, z.xr0) = settle(z.xl0, z.xr0);
        }
    }
}

/// Collapse an edge that rounding turned inside out
fn settle(xl: f32, xr: f32) -> (f32, f32) {
    if xl > xr {
        let mid = (xl + xr) / 2.0;
        (mid, mid)
    } else {
        (xl, xr)
    }
}

fn mirror(zoids: &mut Trapezoids) {
    for z in zoids.iter_mut() {
        *z = z.mirrored();
    }
}

fn clip_min_x(zoids: &mut Trapezoids, bound: f32) {
    for z in zoids.iter() {
        assert!(
            z.xl0 <= z.xr0 && z.xl1 <= z.xr1,
            "trapezoid edges cross: {z:?}"
        );
    }

    let mut i = 0;
    while i < zoids.len() {
        let (kept, piece) = split_min_x(zoids[i], bound);
        match kept {
            Some(z) if z.height() > 0.0 => {
                zoids[i] = z;
                i += 1;
            }
            _ => {
                trace!("clip: discarding trapezoid {:?} at x = {bound}", zoids[i]);
                zoids.swap_remove(i);
            }
        }
        if let Some(piece) = piece.filter(|p| p.height() > 0.0) {
            let pushed = zoids.push(piece);
            assert!(
                pushed.is_ok(),
                "clipping grew past {MAX_TRAPEZOIDS} trapezoids"
            );
        }
    }
}

/// Clip one trapezoid to `x >= bound`
///
/// Returns the clipped trapezoid (`None` if nothing is left) and the extra
/// piece a split produces.
fn split_min_x(z: Trapezoid, b: f32) -> (Option<Trapezoid>, Option<Trapezoid>) {
    let (y0, y1) = (z.y0, z.y1);
    // Crossings of the bound, clamped against rounding
    let near_y = |lo: f32| z.intersect_left_with_x(b).clamp(lo, y1);
    let far_y = |lo: f32| z.intersect_right_with_x(b).clamp(lo, y1);
    let far_x = |y: f32| z.intersect_right_with_y(y).max(b);

    match Clip::classify(&z, b) {
        Clip::Inside => (Some(z), None),
        Clip::NearTop => {
            let ny = near_y(y0);
            let nx = far_x(ny);
            (
                Some(Trapezoid::new(b, z.xr0, y0, b, nx, ny)),
                Some(Trapezoid::new(b, nx, ny, z.xl1, z.xr1, y1)),
            )
        }
        Clip::NearBottom => {
            let ny = near_y(y0);
            let nx = far_x(ny);
            (
                Some(Trapezoid::new(z.xl0, z.xr0, y0, b, nx, ny)),
                Some(Trapezoid::new(b, nx, ny, b, z.xr1, y1)),
            )
        }
        Clip::NearEdge => (Some(Trapezoid::new(b, z.xr0, y0, b, z.xr1, y1)), None),
        Clip::Top => {
            let top = far_y(y0);
            let ny = near_y(top);
            let nx = far_x(ny);
            (
                Some(Trapezoid::new(b, b, top, b, nx, ny)),
                Some(Trapezoid::new(b, nx, ny, z.xl1, z.xr1, y1)),
            )
        }
        Clip::AllButFarBottom => {
            let ny = far_y(y0);
            (Some(Trapezoid::new(b, b, ny, b, z.xr1, y1)), None)
        }
        Clip::Bottom => {
            let ny = near_y(y0);
            let bottom = far_y(ny);
            let nx = far_x(ny);
            (
                Some(Trapezoid::new(z.xl0, z.xr0, y0, b, nx, ny)),
                Some(Trapezoid::new(b, nx, ny, b, b, bottom)),
            )
        }
        Clip::AllButFarTop => {
            let ny = far_y(y0);
            (Some(Trapezoid::new(b, z.xr0, y0, b, b, ny)), None)
        }
        Clip::Outside => (None, None),
    }
}

fn clamp(z: &mut Trapezoid, bounds: &Rect) {
    let cx = |x: f32| x.clamp(bounds.min.x, bounds.max.x);
    let cy = |y: f32| y.clamp(bounds.min.y, bounds.max.y);
    *z = Trapezoid::new(
        cx(z.xl0),
        cx(z.xr0),
        cy(z.y0),
        cx(z.xl1),
        cx(z.xr1),
        cy(z.y1),
    );
}
