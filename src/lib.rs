//! Limn is a layered raster canvas with incremental alpha compositing.
//!
//! The crate turns primitive draw calls (strokes, disks, circle outlines)
//! into pixels on independently-paintable layers, then folds the layer
//! stack into a single presentable frame, touching only the pixels that
//! actually changed.
//!
//! # Pipeline overview
//!
//! 1. **Draw**: `Canvas::draw_*` rasterizes a primitive onto one layer,
//!    recording each painted pixel in the layer's dirty set
//! 2. **Compose**: `Canvas::compose` walks the chain of materialized
//!    layers and re-blends exactly the dirty pixels, propagating changes
//!    outward unless an opaque pixel occludes them
//! 3. **Present**: `Canvas::present` returns the outermost composed
//!    buffer in O(1), row-major packed ARGB, ready for display upload
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Incremental-by-construction**: compose cost tracks the number of
//!   dirty pixels, clear cost tracks a layer's painted footprint; neither
//!   scales with canvas size.
//! - **Sparse layers**: layers materialize lazily on first use and chain
//!   together, so unused layer indices cost nothing.
//! - **Exact integer blending**: the source-over blend is defined in
//!   truncating integer arithmetic and is bit-reproducible.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod canvas;
mod foundation;
mod layer;
mod raster;

pub use canvas::Canvas;
pub use foundation::color::{Color, over};
pub use foundation::error::{LimnError, LimnResult};

pub use kurbo::Point;
