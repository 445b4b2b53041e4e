use kurbo::Point;

use crate::foundation::color::Color;
use crate::layer::chain::LayerChain;

/// A one-pixel Bresenham segment with a fixed delta, replayed from
/// different anchors to sweep a thick stroke.
///
/// Canonical endpoint ordering (see [`stroke`]) guarantees `dx >= 0`, and
/// `dy >= 0` whenever `dx == 0`, so the x step is always `+1`.
struct Segment {
    dx: i32,
    dy: i32,
    adx: i32,
    ady: i32,
    sy: i32,
}

impl Segment {
    fn new(dx: i32, dy: i32) -> Self {
        Self {
            dx,
            dy,
            adx: dx.abs(),
            ady: -dy.abs(),
            sy: if dy >= 0 { 1 } else { -1 },
        }
    }

    /// Paints the segment translated to start at `(x0, y0)`.
    fn replay(&self, chain: &mut LayerChain, layer: usize, x0: i32, y0: i32, color: Color) {
        let (x1, y1) = (x0 + self.dx, y0 + self.dy);
        let (mut x, mut y) = (x0, y0);
        let mut err = self.adx + self.ady;
        loop {
            chain.paint(layer, x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= self.ady {
                err += self.ady;
                x += 1;
            }
            if e2 <= self.adx {
                err += self.adx;
                y += self.sy;
            }
        }
    }
}

/// Paints a stroke of width `brush` between two fractional endpoints.
///
/// Endpoints truncate toward zero to pixel coordinates and are then put in
/// canonical (lexicographic) order, which makes the painted pixel set
/// independent of call direction. A zero-length stroke paints nothing.
///
/// The stroke is swept by an outer Bresenham walk along the segment normal
/// between the endpoints offset by `+/-(brush - 1) / 2`, painting one parallel
/// segment per anchor. When the outer walk advances diagonally in a single
/// step, an extra parallel at the half step closes the corner seam that
/// the two anchors would otherwise leave between them. Brush 0 and 1 both
/// paint the single center segment.
///
/// Every pixel passes through the chain's bounds check; geometry outside
/// the canvas is silently dropped.
pub(crate) fn stroke(
    chain: &mut LayerChain,
    layer: usize,
    p0: Point,
    p1: Point,
    brush: u32,
    color: Color,
) {
    let (mut x0, mut y0) = (p0.x as i32, p0.y as i32);
    let (mut x1, mut y1) = (p1.x as i32, p1.y as i32);
    if (x1, y1) < (x0, y0) {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = y1 - y0;
    if dx == 0 && dy == 0 {
        return;
    }

    let seg = Segment::new(dx, dy);

    let half = f64::from(brush.saturating_sub(1)) / 2.0;
    let len = f64::from(dx * dx + dy * dy).sqrt();
    let nx = -f64::from(dy) / len * half;
    let ny = f64::from(dx) / len * half;

    let ax = (f64::from(x0) - nx).round() as i32;
    let ay = (f64::from(y0) - ny).round() as i32;
    let bx = (f64::from(x0) + nx).round() as i32;
    let by = (f64::from(y0) + ny).round() as i32;

    let odx = (bx - ax).abs();
    let ody = -(by - ay).abs();
    let osx = if ax <= bx { 1 } else { -1 };
    let osy = if ay <= by { 1 } else { -1 };
    let mut err = odx + ody;
    let (mut ox, mut oy) = (ax, ay);

    loop {
        seg.replay(chain, layer, ox, oy, color);
        if ox == bx && oy == by {
            break;
        }
        let e2 = 2 * err;
        let mut stepped_x = false;
        if e2 >= ody {
            err += ody;
            ox += osx;
            stepped_x = true;
        }
        if e2 <= odx {
            if stepped_x {
                // Diagonal outer advance; fill the corner at the half step.
                seg.replay(chain, layer, ox, oy, color);
            }
            err += odx;
            oy += osy;
        }
    }
}
