use kurbo::Point;

use crate::foundation::color::Color;
use crate::foundation::error::LimnResult;
use crate::layer::chain::LayerChain;
use crate::raster::{circle, line};

/// A layered raster canvas.
///
/// The canvas owns a fixed-size pixel grid and a budget of paint layers.
/// Callers draw primitives onto layers (which materialize on first use),
/// then [`Canvas::compose`] folds every change down the layer stack, and
/// [`Canvas::present`] hands back the composited buffer in O(1).
///
/// All calls are synchronous and single-threaded; the canvas owns every
/// buffer and only ever exposes the read-only presentation view.
///
/// ```
/// use limn::{Canvas, Color, Point};
///
/// let mut canvas = Canvas::new(64, 64, 4)?;
/// canvas.draw_line(Point::new(5.0, 5.0), Point::new(40.0, 20.0), 3, Color::opaque(255, 0, 0), 1)?;
/// canvas.draw_solid_circle(Point::new(32.0, 32.0), 9, Color::from_rgba(0, 0, 255, 128), 2)?;
/// canvas.compose();
/// let frame: &[u32] = canvas.present();
/// assert_eq!(frame.len(), 64 * 64);
/// # Ok::<(), limn::LimnError>(())
/// ```
#[derive(Debug)]
pub struct Canvas {
    chain: LayerChain,
}

impl Canvas {
    /// Creates a canvas over an opaque black background.
    ///
    /// `max_layer_count` is the number of paintable layers (targets
    /// `1..=max_layer_count`); the background occupies slot 0. Dimensions
    /// and the layer budget are fixed for the canvas lifetime.
    pub fn new(width: u32, height: u32, max_layer_count: usize) -> LimnResult<Self> {
        Self::with_background(width, height, max_layer_count, Color::BLACK)
    }

    /// Creates a canvas with an explicit background color.
    pub fn with_background(
        width: u32,
        height: u32,
        max_layer_count: usize,
        background: Color,
    ) -> LimnResult<Self> {
        Ok(Self {
            chain: LayerChain::new(width, height, max_layer_count, background)?,
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.chain.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.chain.height()
    }

    /// Total pixel count (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.chain.pixel_count()
    }

    /// Draws a stroke of width `brush` between two fractional endpoints on
    /// the given layer, materializing the layer if needed.
    ///
    /// Geometry outside the canvas is silently clipped, and the painted
    /// pixel set is independent of endpoint order. Endpoints truncate
    /// toward zero to pixel coordinates; a stroke whose endpoints truncate
    /// to the same pixel paints nothing.
    pub fn draw_line(
        &mut self,
        p0: Point,
        p1: Point,
        brush: u32,
        color: Color,
        layer: usize,
    ) -> LimnResult<()> {
        self.chain.ensure_layer(layer)?;
        line::stroke(&mut self.chain, layer, p0, p1, brush, color);
        Ok(())
    }

    /// Fills a disk of the given pixel diameter centered at `center`
    /// (which may be fractional) on the given layer.
    ///
    /// Odd diameters center on a pixel, even diameters on a pixel corner;
    /// `diameter == 0` paints nothing.
    pub fn draw_solid_circle(
        &mut self,
        center: Point,
        diameter: u32,
        color: Color,
        layer: usize,
    ) -> LimnResult<()> {
        self.chain.ensure_layer(layer)?;
        circle::fill_disk(&mut self.chain, layer, center, diameter, color);
        Ok(())
    }

    /// Strokes a circle outline of the given diameter with a brush of
    /// width `brush` on the given layer. `diameter == 0` paints nothing.
    pub fn draw_hollow_circle(
        &mut self,
        center: Point,
        diameter: u32,
        brush: u32,
        color: Color,
        layer: usize,
    ) -> LimnResult<()> {
        self.chain.ensure_layer(layer)?;
        circle::stroke_ring(&mut self.chain, layer, center, diameter, brush, color);
        Ok(())
    }

    /// Folds every change since the previous compose down the layer stack.
    ///
    /// Call after a batch of draws and before [`Canvas::present`]. Cost is
    /// proportional to the number of changed pixels, not the canvas size;
    /// composing an unchanged canvas does nothing.
    pub fn compose(&mut self) {
        self.chain.compose();
    }

    /// Wipes one layer back to fully transparent and schedules every pixel
    /// it ever painted for re-composition on the next [`Canvas::compose`].
    /// Layer 0 is not a valid target.
    pub fn clear(&mut self, layer: usize) -> LimnResult<()> {
        self.chain.clear(layer)
    }

    /// The composited frame: row-major, one packed ARGB word per pixel
    /// (alpha in the high byte), `width * height` words. O(1); the slice
    /// borrows the outermost layer's composed buffer.
    pub fn present(&self) -> &[u32] {
        self.chain.present()
    }
}
