use kurbo::Point;

use crate::foundation::color::Color;
use crate::layer::chain::LayerChain;
use crate::raster::line;

/// Nudges exact half-integer chord boundaries inward before rounding, so a
/// chord that lands precisely on a pixel boundary excludes that column.
const CHORD_EPS: f64 = 1e-9;

/// Fills a discrete disk of the given pixel diameter.
///
/// Parity rule: an odd diameter snaps the center to the nearest pixel
/// center (`round`), an even diameter to the nearest pixel-corner crossing
/// (`(c - 0.5).round() + 0.5`), so a diameter-2 disk is always an aligned
/// 2x2 block. Each covered row paints the columns whose centers fall
/// within the row's chord. `diameter == 0` paints nothing.
pub(crate) fn fill_disk(
    chain: &mut LayerChain,
    layer: usize,
    center: Point,
    diameter: u32,
    color: Color,
) {
    if diameter == 0 {
        return;
    }

    let r = f64::from(diameter) / 2.0;
    let even = diameter % 2 == 0;
    let (cx, cy) = if even {
        ((center.x - 0.5).round() + 0.5, (center.y - 0.5).round() + 0.5)
    } else {
        (center.x.round(), center.y.round())
    };

    // First covered row; exact by construction for either parity.
    let top = (cy - r + 0.5) as i32;

    for i in 0..diameter as i32 {
        let y = top + i;
        let rel = f64::from(y) - cy;
        let half = (r * r - rel * rel).max(0.0).sqrt();

        let (lo, hi) = if even {
            let off = (-half - CHORD_EPS).round();
            ((cx + off + 0.5) as i32, (cx - off - 0.5) as i32)
        } else {
            let off = (0.5 - half - CHORD_EPS).round();
            ((cx + off) as i32, (cx - off) as i32)
        };

        for x in lo..=hi {
            chain.paint(layer, x, y, color);
        }
    }
}

/// Strokes the outline of a circle.
///
/// Samples the circle at angular steps of `brush / radius` radians
/// starting from angle 0 and sweeps consecutive samples with the thick
/// stroke, closing the loop back to the first sample. `diameter == 0`
/// paints nothing, as does a brush so wide that no intermediate sample
/// fits on the circumference.
pub(crate) fn stroke_ring(
    chain: &mut LayerChain,
    layer: usize,
    center: Point,
    diameter: u32,
    brush: u32,
    color: Color,
) {
    if diameter == 0 {
        return;
    }

    let radius = f64::from(diameter) / 2.0;
    let step = f64::from(brush.max(1)) / radius;

    let first = Point::new(center.x + radius, center.y);
    let mut prev = first;
    let mut t = step;
    while t < std::f64::consts::TAU {
        let p = Point::new(center.x + radius * t.cos(), center.y + radius * t.sin());
        line::stroke(chain, layer, prev, p, brush, color);
        prev = p;
        t += step;
    }
    line::stroke(chain, layer, prev, first, brush, color);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::layer::chain::LayerChain;

    fn mark() -> Color {
        Color::opaque(0, 200, 0)
    }

    fn painted(size: u32, draw: impl FnOnce(&mut LayerChain)) -> BTreeSet<(i32, i32)> {
        let mut chain = LayerChain::new(size, size, 1, Color::BLACK).unwrap();
        chain.ensure_layer(1).unwrap();
        draw(&mut chain);
        chain.compose();
        let mut out = BTreeSet::new();
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                if chain.present()[(y * size as i32 + x) as usize] == mark().packed() {
                    out.insert((x, y));
                }
            }
        }
        out
    }

    fn set(pixels: &[(i32, i32)]) -> BTreeSet<(i32, i32)> {
        pixels.iter().copied().collect()
    }

    fn block(x0: i32, y0: i32, x1: i32, y1: i32) -> BTreeSet<(i32, i32)> {
        let mut out = BTreeSet::new();
        for x in x0..=x1 {
            for y in y0..=y1 {
                out.insert((x, y));
            }
        }
        out
    }

    #[test]
    fn zero_diameter_disk_paints_nothing() {
        let got = painted(16, |c| {
            fill_disk(c, 1, Point::new(5.0, 5.0), 0, mark());
        });
        assert!(got.is_empty());
    }

    #[test]
    fn diameter_one_is_a_single_pixel() {
        let got = painted(16, |c| {
            fill_disk(c, 1, Point::new(5.0, 5.0), 1, mark());
        });
        assert_eq!(got, set(&[(5, 5)]));
    }

    #[test]
    fn diameter_two_is_an_aligned_square() {
        let got = painted(8, |c| {
            fill_disk(c, 1, Point::new(3.0, 3.0), 2, mark());
        });
        assert_eq!(got, block(3, 3, 4, 4));
    }

    #[test]
    fn diameter_three_is_a_full_square() {
        let got = painted(16, |c| {
            fill_disk(c, 1, Point::new(5.0, 5.0), 3, mark());
        });
        assert_eq!(got, block(4, 4, 6, 6));
    }

    #[test]
    fn diameter_four_rounds_its_corners() {
        let got = painted(16, |c| {
            fill_disk(c, 1, Point::new(5.0, 5.0), 4, mark());
        });
        assert_eq!(
            got,
            set(&[
                (4, 5),
                (4, 6),
                (5, 4),
                (5, 5),
                (5, 6),
                (5, 7),
                (6, 4),
                (6, 5),
                (6, 6),
                (6, 7),
                (7, 5),
                (7, 6),
            ])
        );
    }

    #[test]
    fn diameter_five_rounds_its_corners() {
        let got = painted(16, |c| {
            fill_disk(c, 1, Point::new(5.0, 5.0), 5, mark());
        });
        let mut expect = block(4, 3, 6, 7);
        expect.extend([(3, 4), (3, 5), (3, 6), (7, 4), (7, 5), (7, 6)]);
        assert_eq!(got, expect);
    }

    #[test]
    fn fractional_center_snaps_to_the_parity_grid() {
        let got = painted(16, |c| {
            fill_disk(c, 1, Point::new(5.4, 4.6), 3, mark());
        });
        assert_eq!(got, block(4, 4, 6, 6));
    }

    #[test]
    fn disk_clips_at_the_canvas_edge() {
        let got = painted(8, |c| {
            fill_disk(c, 1, Point::new(0.0, 0.0), 4, mark());
        });
        assert_eq!(got, set(&[(0, 0), (0, 1), (1, 0)]));
    }

    #[test]
    fn zero_diameter_ring_paints_nothing() {
        let got = painted(16, |c| {
            stroke_ring(c, 1, Point::new(8.0, 8.0), 0, 2, mark());
        });
        assert!(got.is_empty());
    }

    #[test]
    fn ring_traces_a_closed_outline() {
        let got = painted(16, |c| {
            stroke_ring(c, 1, Point::new(8.0, 8.0), 6, 1, mark());
        });
        assert_eq!(
            got,
            set(&[
                (5, 6),
                (5, 7),
                (5, 8),
                (5, 9),
                (5, 10),
                (6, 5),
                (6, 10),
                (7, 5),
                (7, 10),
                (8, 5),
                (8, 10),
                (9, 5),
                (9, 10),
                (10, 6),
                (10, 7),
                (10, 8),
                (10, 9),
                (11, 8),
            ])
        );
    }

    #[test]
    fn ring_interior_stays_unpainted() {
        let got = painted(32, |c| {
            stroke_ring(c, 1, Point::new(15.0, 15.0), 12, 3, mark());
        });
        assert!(!got.is_empty());
        assert!(!got.contains(&(15, 15)));
        // Every painted pixel sits in an annulus around the radius.
        for &(x, y) in &got {
            let dist = (f64::from(x - 15).powi(2) + f64::from(y - 15).powi(2)).sqrt();
            assert!((2.5..=9.5).contains(&dist), "pixel ({x},{y}) at distance {dist}");
        }
    }
}
