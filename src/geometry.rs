//! Points, rectangles and trapezoids in continuous screen coordinates
//!
//! Pixel `(x, y)` covers the unit square `[x, x + 1) × [y, y + 1)`.

/// A point in screen space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal position
    pub x: f32,
    /// Vertical position, growing downwards
    pub y: f32,
}

impl Point {
    /// Create a point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle `[min.x, max.x] × [min.y, max.y]`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Point,
    /// Bottom-right corner
    pub max: Point,
}

impl Rect {
    /// Create a rectangle from two corners
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Horizontal extent
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Vertical extent
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self::new(
            Point::new(self.min.x + margin, self.min.y + margin),
            Point::new(self.max.x - margin, self.max.y - margin),
        )
    }
}

/// A quadrilateral with horizontal top and bottom edges
///
/// The top edge runs from `xl0` to `xr0` at `y0`, the bottom edge from `xl1`
/// to `xr1` at `y1`. A well-formed trapezoid has `y0 <= y1`, `xl0 <= xr0`
/// and `xl1 <= xr1`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Trapezoid {
    /// Left x of the top edge
    pub xl0: f32,
    /// Right x of the top edge
    pub xr0: f32,
    /// Top y
    pub y0: f32,
    /// Left x of the bottom edge
    pub xl1: f32,
    /// Right x of the bottom edge
    pub xr1: f32,
    /// Bottom y
    pub y1: f32,
}

impl Trapezoid {
    /// Create a trapezoid from its top and bottom edges
    pub const fn new(xl0: f32, xr0: f32, y0: f32, xl1: f32, xr1: f32, y1: f32) -> Self {
        Self {
            xl0,
            xr0,
            y0,
            xl1,
            xr1,
            y1,
        }
    }

    /// `y1 - y0`
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Whether both edges are ordered left to right and the top is above the bottom
    pub fn is_well_formed(&self) -> bool {
        self.y0 <= self.y1 && self.xl0 <= self.xr0 && self.xl1 <= self.xr1
    }

    /// The y at which the left edge crosses the vertical line at `x`
    ///
    /// # Panics
    ///
    /// Panics if the left edge is vertical.
    #[allow(clippy::float_cmp)]
    pub fn intersect_left_with_x(&self, x: f32) -> f32 {
        assert!(
            self.xl0 != self.xl1,
            "vertical left edge has no single crossing at x = {x}: {self:?}"
        );
        lerp(self.y0, self.y1, (x - self.xl0) / (self.xl1 - self.xl0))
    }

    /// The y at which the right edge crosses the vertical line at `x`
    ///
    /// # Panics
    ///
    /// Panics if the right edge is vertical.
    #[allow(clippy::float_cmp)]
    pub fn intersect_right_with_x(&self, x: f32) -> f32 {
        assert!(
            self.xr0 != self.xr1,
            "vertical right edge has no single crossing at x = {x}: {self:?}"
        );
        lerp(self.y0, self.y1, (x - self.xr0) / (self.xr1 - self.xr0))
    }

    /// The x at which the left edge crosses the horizontal line at `y`
    ///
    /// # Panics
    ///
    /// Panics if the trapezoid has zero height.
    #[allow(clippy::float_cmp)]
    pub fn intersect_left_with_y(&self, y: f32) -> f32 {
        assert!(
            self.y0 != self.y1,
            "flat trapezoid has no single crossing at y = {y}: {self:?}"
        );
        lerp(self.xl0, self.xl1, (y - self.y0) / (self.y1 - self.y0))
    }

    /// The x at which the right edge crosses the horizontal line at `y`
    ///
    /// # Panics
    ///
    /// Panics if the trapezoid has zero height.
    #[allow(clippy::float_cmp)]
    pub fn intersect_right_with_y(&self, y: f32) -> f32 {
        assert!(
            self.y0 != self.y1,
            "flat trapezoid has no single crossing at y = {y}: {self:?}"
        );
        lerp(self.xr0, self.xr1, (y - self.y0) / (self.y1 - self.y0))
    }

    /// Reflect about `x = 0`, which swaps the left and right edges
    pub(crate) fn mirrored(&self) -> Self {
        Self::new(-self.xr0, -self.xl0, self.y0, -self.xr1, -self.xl1, self.y1)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
