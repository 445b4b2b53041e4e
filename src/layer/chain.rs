use crate::foundation::color::{Color, over};
use crate::foundation::error::{LimnError, LimnResult};
use crate::layer::buffer::PixelBuffer;

/// Fixed-capacity arena of layer slots threaded into a doubly-linked chain.
///
/// Slot 0 is the opaque background and is always materialized; slots
/// `1..=max_layer_count` materialize lazily on first draw reference.
/// Materialized layers form an ascending chain through the parallel
/// `next`/`prev` index arrays, so sparse layer usage (say, only layers 2
/// and 7 of 10) composes without visiting empty slots. `tail` names the
/// outermost chain member; its composed buffer is what gets presented, and
/// it is re-resolved through the index on every call rather than cached,
/// since a later splice can retarget it.
#[derive(Debug)]
pub(crate) struct LayerChain {
    width: u32,
    height: u32,
    pixel_count: usize,
    slots: Vec<PixelBuffer>,
    next: Vec<Option<usize>>,
    prev: Vec<Option<usize>>,
    tail: usize,
}

impl LayerChain {
    pub(crate) fn new(
        width: u32,
        height: u32,
        max_layer_count: usize,
        background: Color,
    ) -> LimnResult<Self> {
        if width == 0 || height == 0 {
            return Err(LimnError::validation("canvas width/height must be > 0"));
        }
        if max_layer_count == 0 {
            return Err(LimnError::validation("max_layer_count must be > 0"));
        }
        let pixel_count = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| LimnError::validation("canvas pixel count overflows"))?;

        let slot_count = max_layer_count + 1;
        let mut slots: Vec<PixelBuffer> = (0..slot_count)
            .map(|_| PixelBuffer::unmaterialized())
            .collect();
        slots[0].materialize(pixel_count);
        slots[0].fill_background(background);

        Ok(Self {
            width,
            height,
            pixel_count,
            slots,
            next: vec![None; slot_count],
            prev: vec![None; slot_count],
            tail: 0,
        })
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Materializes a slot and splices it into the chain after the nearest
    /// lower materialized layer. Idempotent for already-active layers.
    pub(crate) fn ensure_layer(&mut self, index: usize) -> LimnResult<()> {
        self.check_target(index)?;
        if self.slots[index].is_materialized() {
            return Ok(());
        }

        self.slots[index].materialize(self.pixel_count);

        let anchor = (1..index)
            .rev()
            .find(|&i| self.slots[i].is_materialized())
            .unwrap_or(0);

        self.next[index] = self.next[anchor];
        match self.next[index] {
            Some(above) => self.prev[above] = Some(index),
            None => self.tail = index,
        }
        self.next[anchor] = Some(index);
        self.prev[index] = Some(anchor);

        // The new layer's raw plane is all-transparent, so its composed
        // state is exactly whatever the layer beneath it composed to.
        let (below, rest) = self.slots.split_at_mut(index);
        rest[0].seed_composed_from(&below[anchor]);
        Ok(())
    }

    /// Paints one pixel on a materialized layer. Coordinates outside the
    /// canvas are silently dropped.
    pub(crate) fn paint(&mut self, layer: usize, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let pixel = y as usize * self.width as usize + x as usize;
        self.slots[layer].paint(pixel, color);
    }

    /// Re-blends every dirty pixel up the chain.
    ///
    /// Walks the active chain from the background outward. Each layer
    /// drains its dirty list, blends the predecessor's composed color with
    /// its own raw color, and forwards pixels whose composed color actually
    /// changed to the successor's dirty list, unless the successor's raw
    /// pixel is fully opaque and occludes the change. Cost is proportional
    /// to the number of dirty pixels, not the canvas size.
    #[tracing::instrument(skip(self))]
    pub(crate) fn compose(&mut self) {
        let mut changed: Vec<usize> = Vec::new();
        let mut cursor = self.next[0];

        while let Some(layer) = cursor {
            cursor = self.next[layer];

            if !self.slots[layer].has_dirty() {
                continue;
            }
            let Some(below) = self.prev[layer] else {
                continue;
            };

            let drained = self.slots[layer].take_dirty();
            changed.clear();

            {
                // Chain order is ascending, so the predecessor always sits
                // left of the split point.
                let (lower, rest) = self.slots.split_at_mut(layer);
                let below_buf = &lower[below];
                let buf = &mut rest[0];
                for &pixel in &drained {
                    let blended = over(below_buf.composed_at(pixel), buf.raw_at(pixel));
                    if buf.store_composed(pixel, blended) {
                        changed.push(pixel);
                    }
                }
            }

            if let Some(above) = cursor {
                let above_buf = &mut self.slots[above];
                for &pixel in &changed {
                    if above_buf.raw_at(pixel).is_opaque() {
                        continue;
                    }
                    above_buf.mark_dirty(pixel);
                }
            }

            self.slots[layer].finish_compose(drained);
        }
    }

    /// Wipes one layer back to transparent, scheduling every pixel it ever
    /// painted for re-composition. Clearing a never-materialized layer is a
    /// no-op.
    #[tracing::instrument(skip(self))]
    pub(crate) fn clear(&mut self, index: usize) -> LimnResult<()> {
        self.check_target(index)?;
        self.slots[index].clear();
        Ok(())
    }

    /// The composited buffer of the outermost active layer, row-major
    /// packed ARGB, one word per pixel.
    pub(crate) fn present(&self) -> &[u32] {
        self.slots[self.tail].composed()
    }

    fn check_target(&self, index: usize) -> LimnResult<()> {
        if index == 0 {
            return Err(LimnError::layer(
                "layer 0 is the background and not a valid target",
            ));
        }
        if index >= self.slots.len() {
            return Err(LimnError::layer(format!(
                "layer {index} exceeds the configured maximum of {}",
                self.slots.len() - 1
            )));
        }
        Ok(())
    }
}
