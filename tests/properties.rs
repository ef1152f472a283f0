use proptest::prelude::*;
use tilegfx::{
    Builder, Dimensions, PixTile, Point, Rect, Rgb565, Rgb888, clip_trapezoids,
    triangle_trapezoids,
};

/// Draw into a fresh black `w` x `h` tile at `(x, y)` and return its pixels
fn render(x: i32, y: i32, w: usize, h: usize, draw: impl FnOnce(&mut PixTile<'_>)) -> Vec<Rgb565> {
    let layout = Builder::new()
        .origin(x, y)
        .dimensions(Dimensions::new(w, h).unwrap())
        .build()
        .unwrap();
    let mut pixels = vec![Rgb565::BLACK; layout.buffer_len()];
    let mut tile = PixTile::new(&mut pixels, layout).unwrap();
    draw(&mut tile);
    pixels
}

/// Screen coordinates of the non-black pixels of a packed tile
fn lit(x: i32, y: i32, w: usize, pixels: &[Rgb565]) -> Vec<(i32, i32)> {
    pixels
        .iter()
        .enumerate()
        .filter(|(_, p)| **p != Rgb565::BLACK)
        .map(|(i, _)| (x + (i % w) as i32, y + (i / w) as i32))
        .collect()
}

/// Colour levels `(r5, g6, b5)` of a packed pixel
fn levels(p: Rgb565) -> [i32; 3] {
    [
        i32::from(p.0 >> 11),
        i32::from((p.0 >> 5) & 0x3F),
        i32::from(p.0 & 0x1F),
    ]
}

/// Twice the signed area and the perimeter of a triangle
fn area_and_perimeter(v: [Point; 3]) -> (f32, f32) {
    let cross = (v[1].x - v[0].x) * (v[2].y - v[0].y) - (v[2].x - v[0].x) * (v[1].y - v[0].y);
    let side = |a: Point, b: Point| ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
    (
        cross.abs() / 2.0,
        side(v[0], v[1]) + side(v[1], v[2]) + side(v[2], v[0]),
    )
}

fn quarter(lo: i32, hi: i32) -> impl Strategy<Value = f32> {
    (lo * 4..hi * 4).prop_map(|v| v as f32 / 4.0)
}

fn point(lo: i32, hi: i32) -> impl Strategy<Value = Point> {
    (quarter(lo, hi), quarter(lo, hi)).prop_map(|(x, y)| Point::new(x, y))
}

fn triangle(lo: i32, hi: i32) -> impl Strategy<Value = [Point; 3]> {
    (point(lo, hi), point(lo, hi), point(lo, hi)).prop_map(|(a, b, c)| [a, b, c])
}

proptest! {
    #[test]
    fn pack_round_trip_is_close(c in 0u32..=0xFF_FFFF) {
        let c = Rgb888(c);
        let back = c.pack().unpack();
        prop_assert!(c.r().abs_diff(back.r()) <= 4);
        prop_assert!(c.g().abs_diff(back.g()) <= 4);
        prop_assert!(c.b().abs_diff(back.b()) <= 4);
        prop_assert_eq!(back.pack().unpack(), back);
    }

    #[test]
    fn blend_boundaries_are_exact(dest in any::<u16>(), src in 0u32..=0xFF_FFFF) {
        let dest = Rgb565(dest);
        let src = Rgb888(src);
        prop_assert_eq!(dest.blend(src, 0), dest);
        prop_assert_eq!(dest.blend(src, 255), src.pack());
    }

    #[test]
    fn line_ignores_endpoint_order(a in point(-8, 40), b in point(-8, 40)) {
        let red = Rgb888(0xFF_0000);
        let forward = render(0, 0, 32, 32, |t| t.draw_line(a.x, a.y, b.x, b.y, red));
        let backward = render(0, 0, 32, 32, |t| t.draw_line(b.x, b.y, a.x, a.y, red));
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn line_clipping_matches_a_larger_tile(a in point(-8, 72), b in point(-8, 72)) {
        let red = Rgb888(0xFF_0000);
        let full = render(0, 0, 64, 64, |t| t.draw_line(a.x, a.y, b.x, b.y, red));
        let window = render(20, 24, 16, 12, |t| t.draw_line(a.x, a.y, b.x, b.y, red));
        for row in 0..12 {
            let y = 24 + row;
            let expected = &full[y * 64 + 20..y * 64 + 36];
            prop_assert_eq!(&window[row * 16..row * 16 + 16], expected);
        }
    }

    #[test]
    fn fill_clipping_matches_a_larger_tile(verts in triangle(-8, 72)) {
        let white = Rgb888::WHITE;
        let full = render(0, 0, 64, 64, |t| t.fill_triangle(verts, white));
        let window = render(20, 24, 16, 12, |t| t.fill_triangle(verts, white));
        for row in 0..12 {
            let y = 24 + row;
            let expected = &full[y * 64 + 20..y * 64 + 36];
            let differing = window[row * 16..row * 16 + 16]
                .iter()
                .zip(expected)
                .filter(|(a, b)| a != b)
                .count();
            // An edge through a pixel corner can land an ulp either side once clipped
            prop_assert!(differing <= 2, "row {}: {} pixels differ", y, differing);
        }
    }

    #[test]
    fn aa_fill_clipping_matches_a_larger_tile(verts in triangle(-8, 72)) {
        let white = Rgb888::WHITE;
        let full = render(0, 0, 64, 64, |t| t.fill_triangle_aa(verts, white, 255));
        let window = render(20, 24, 16, 12, |t| t.fill_triangle_aa(verts, white, 255));
        for row in 0..12 {
            for col in 0..16 {
                let a = window[row * 16 + col];
                let b = full[(24 + row) * 64 + 20 + col];
                for (ca, cb) in levels(a).into_iter().zip(levels(b)) {
                    prop_assert!(
                        (ca - cb).abs() <= 2,
                        "({}, {}): {:?} vs {:?}",
                        20 + col,
                        24 + row,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn fills_conserve_area(verts in triangle(0, 64)) {
        let (area, perimeter) = area_and_perimeter(verts);
        let white = Rgb888::WHITE;

        let hard = render(0, 0, 64, 64, |t| t.fill_triangle(verts, white));
        let count = hard.iter().filter(|p| **p == Rgb565::WHITE).count() as f32;
        prop_assert!(
            (count - area).abs() <= 0.5 * (perimeter + 1.0),
            "hard fill lit {} for area {}",
            count,
            area
        );

        let aa = render(0, 0, 64, 64, |t| t.fill_triangle_aa(verts, white, 255));
        let coverage: f32 = aa.iter().map(|p| levels(*p)[1] as f32 / 63.0).sum();
        prop_assert!(
            (coverage - area).abs() <= 0.05 * (perimeter + 1.0),
            "anti-aliased fill covered {} for area {}",
            coverage,
            area
        );
    }

    #[test]
    fn clipped_trapezoids_stay_in_bounds(verts in triangle(-40, 72)) {
        let bounds = Rect::new(Point::new(0.0, 0.0), Point::new(32.0, 32.0));
        let mut zoids = triangle_trapezoids(verts);
        let n = clip_trapezoids(&mut zoids, &bounds);
        prop_assert_eq!(n, zoids.len());
        for z in &zoids {
            prop_assert!(z.is_well_formed(), "{:?}", z);
            prop_assert!(z.y0 < z.y1, "{:?}", z);
            for x in [z.xl0, z.xr0, z.xl1, z.xr1] {
                prop_assert!((0.0..=32.0).contains(&x), "{:?}", z);
            }
            for y in [z.y0, z.y1] {
                prop_assert!((0.0..=32.0).contains(&y), "{:?}", z);
            }
        }
    }

    #[test]
    fn triangle_fill_is_deterministic_and_bounded(verts in triangle(-16, 48)) {
        let white = Rgb888::WHITE;
        let first = render(4, 4, 24, 24, |t| t.fill_triangle(verts, white));
        let second = render(4, 4, 24, 24, |t| {
            t.fill_triangle(verts, white);
            t.fill_triangle(verts, white);
        });
        prop_assert_eq!(&first, &second);

        let min_x = verts.iter().map(|v| v.x).fold(f32::INFINITY, f32::min);
        let max_x = verts.iter().map(|v| v.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = verts.iter().map(|v| v.y).fold(f32::INFINITY, f32::min);
        let max_y = verts.iter().map(|v| v.y).fold(f32::NEG_INFINITY, f32::max);
        for (x, y) in lit(4, 4, 24, &first) {
            prop_assert!(min_x.floor() <= x as f32 && x as f32 <= max_x.ceil());
            prop_assert!(min_y.floor() <= y as f32 && y as f32 <= max_y.ceil());
        }
    }

    #[test]
    fn aa_fill_with_zero_alpha_draws_nothing(verts in triangle(-16, 48)) {
        let pixels = render(0, 0, 32, 32, |t| t.fill_triangle_aa(verts, Rgb888::WHITE, 0));
        prop_assert!(pixels.iter().all(|p| *p == Rgb565::BLACK));
    }

    #[test]
    fn aa_fill_stays_near_the_triangle(verts in triangle(-16, 48)) {
        let pixels = render(0, 0, 32, 32, |t| t.fill_triangle_aa(verts, Rgb888::WHITE, 255));
        let min_x = verts.iter().map(|v| v.x).fold(f32::INFINITY, f32::min);
        let max_x = verts.iter().map(|v| v.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = verts.iter().map(|v| v.y).fold(f32::INFINITY, f32::min);
        let max_y = verts.iter().map(|v| v.y).fold(f32::NEG_INFINITY, f32::max);
        for (x, y) in lit(0, 0, 32, &pixels) {
            prop_assert!(min_x.floor() - 1.0 <= x as f32 && x as f32 <= max_x.ceil() + 1.0);
            prop_assert!(min_y.floor() - 1.0 <= y as f32 && y as f32 <= max_y.ceil() + 1.0);
        }
    }
}

#[test]
fn right_triangle_regression() {
    let verts = [
        Point::new(1.0, 1.0),
        Point::new(4.0, 1.0),
        Point::new(1.0, 4.0),
    ];
    let pixels = render(0, 0, 10, 10, |t| t.fill_triangle(verts, Rgb888::WHITE));
    assert_eq!(
        lit(0, 0, 10, &pixels),
        [(1, 1), (2, 1), (3, 1), (1, 2), (2, 2), (1, 3)]
    );
}

#[test]
fn colinear_triangle_fills_nothing() {
    let verts = [
        Point::new(1.0, 1.0),
        Point::new(5.0, 5.0),
        Point::new(9.0, 9.0),
    ];
    let pixels = render(0, 0, 10, 10, |t| {
        t.fill_triangle(verts, Rgb888::WHITE);
        t.fill_triangle_aa(verts, Rgb888::WHITE, 255);
    });
    assert!(pixels.iter().all(|p| *p == Rgb565::BLACK));
}
