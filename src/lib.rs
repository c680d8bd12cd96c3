//! segoverlay scores and visualizes semantic-segmentation output.
//!
//! A pretrained model (treated as an external [`Segmenter`]) labels every pixel of an image or
//! video frame with a class id. This crate provides the pieces around that call:
//!
//! 1. **Rasterize**: `Polygon + Canvas -> Mask` (ground truth as a `{0, 1}` occupancy mask,
//!    filled on a `vello_cpu` surface)
//! 2. **Evaluate**: `Mask x Mask -> IouStats` (intersection over union, `0` for an empty union)
//! 3. **Composite**: `FrameRGBA + Mask + Legend -> FrameRGBA` (50/50 blend of legend colors,
//!    in place)
//! 4. **Drive**: [`SegmentationSession`] runs the still-image flow and the continuous capture
//!    loop over an explicit session struct.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded**: every operation runs to completion on the caller's thread.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod geometry;
mod mask;
mod render;
mod session;

pub use foundation::core::{BezPath, Canvas, Point, Rgba8};
pub use foundation::error::{SegError, SegResult};
pub use geometry::polygon::Polygon;
pub use mask::iou::{IouStats, MaskValue, intersection_over_union, iou_stats, mask_iou};
pub use mask::model::{CategoryMask, Mask, SegmentationResult, discretize_normalized};
pub use mask::raster::{CoverageChannel, FillRule, MaskRasterizer, RasterSettings, rasterize};
pub use render::composite::{blend_half, composite, composite_in_place};
pub use render::frame::FrameRGBA;
pub use render::legend::{
    LEGEND_COLORS, Legend, PASCAL_VOC_LABELS, label_for, pascal_voc_labels,
};
pub use session::driver::{
    CaptureEnd, CaptureStats, ImageReport, SegmentationSession, SessionOpts, VideoTick,
};
pub use session::segmenter::{
    FrameSink, FrameSource, InMemorySink, RunningMode, Segmenter, StaticMaskSegmenter,
};
