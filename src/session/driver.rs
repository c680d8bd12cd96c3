use std::time::{Duration, Instant};

use crate::foundation::error::SegResult;
use crate::geometry::polygon::Polygon;
use crate::mask::iou::{IouStats, mask_iou};
use crate::mask::model::Mask;
use crate::mask::raster::{MaskRasterizer, RasterSettings};
use crate::render::composite::composite;
use crate::render::frame::FrameRGBA;
use crate::render::legend::{Legend, label_for, pascal_voc_labels};
use crate::session::segmenter::{FrameSink, FrameSource, RunningMode, Segmenter};

/// Options for a [`SegmentationSession`].
#[derive(Clone, Debug)]
pub struct SessionOpts {
    /// Ground-truth region scored against still-image predictions, in mask pixel coordinates.
    pub ground_truth: Option<Polygon>,
    /// How the ground-truth polygon is rasterized.
    pub raster: RasterSettings,
    /// Overlay palette.
    pub legend: Legend,
    /// Class labels indexed by class id, used for the category readout.
    pub labels: Vec<String>,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            ground_truth: None,
            raster: RasterSettings::default(),
            legend: Legend::default(),
            labels: pascal_voc_labels(),
        }
    }
}

/// Outcome of segmenting one still image.
#[derive(Clone, Debug)]
pub struct ImageReport {
    /// Input image resized to the mask and blended with the legend colors.
    pub overlay: FrameRGBA,
    /// Discretized class ids.
    pub mask: Mask,
    /// Overlap with the ground truth, when one was configured.
    pub iou: Option<IouStats>,
    /// Label of the last foreground class in scan order.
    pub category: Option<String>,
    /// Wall time spent inside the segmentation call.
    pub latency: Duration,
}

/// Result of one capture cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum VideoTick {
    /// Capture is not running; nothing was done.
    Stopped,
    /// The source has not advanced since the previous cycle.
    Duplicate,
    /// The segmenter is not ready; the frame was not processed and capture has been stopped.
    NotReady,
    /// The source ran out of frames; capture has been stopped.
    Ended,
    /// A composited frame and the timestamp it was segmented at.
    Rendered {
        /// Source time in milliseconds.
        timestamp_ms: f64,
        /// The composited frame.
        frame: FrameRGBA,
    },
}

/// Why a [`SegmentationSession::run_capture`] loop returned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureEnd {
    /// The capture flag was already cleared.
    #[default]
    Stopped,
    /// The frame source ran out of frames.
    SourceEnded,
    /// The segmenter was not ready, so no further cycle was scheduled.
    NotReady,
    /// The sink answered a frame with [`std::ops::ControlFlow::Break`].
    SinkStopped,
    /// `max_cycles` was reached.
    CycleLimit,
}

/// Counters for a [`SegmentationSession::run_capture`] loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Cycles executed.
    pub cycles: u64,
    /// Frames segmented and pushed to the sink.
    pub frames_rendered: u64,
    /// Cycles skipped because the source had not advanced.
    pub frames_skipped: u64,
    /// Reason the loop stopped.
    pub end: CaptureEnd,
}

/// Owns the segmenter and all mutable driver state (running mode, capture flag, last frame time).
///
/// Both flows run on the caller's thread and each issues exactly one segmentation call per cycle.
pub struct SegmentationSession<S: Segmenter> {
    segmenter: S,
    opts: SessionOpts,
    rasterizer: MaskRasterizer,
    mode: RunningMode,
    capturing: bool,
    last_frame_time: Option<f64>,
}

impl<S: Segmenter> SegmentationSession<S> {
    /// Create a session in [`RunningMode::Image`] with capture stopped.
    pub fn new(segmenter: S, opts: SessionOpts) -> Self {
        let rasterizer = MaskRasterizer::new(opts.raster);
        Self {
            segmenter,
            opts,
            rasterizer,
            mode: RunningMode::Image,
            capturing: false,
            last_frame_time: None,
        }
    }

    /// Current running mode.
    pub fn mode(&self) -> RunningMode {
        self.mode
    }

    /// Whether continuous capture is running.
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Borrow the segmenter.
    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    /// Session options.
    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// Start continuous capture.
    pub fn start_capture(&mut self) {
        self.capturing = true;
    }

    /// Stop continuous capture. Takes effect before the next cycle; an in-progress cycle finishes.
    pub fn stop_capture(&mut self) {
        self.capturing = false;
    }

    /// Flip the capture flag and return the new state.
    pub fn toggle_capture(&mut self) -> bool {
        self.capturing = !self.capturing;
        self.capturing
    }

    fn ensure_mode(&mut self, mode: RunningMode) -> SegResult<()> {
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "switching running mode");
            self.segmenter.set_running_mode(mode)?;
            self.mode = mode;
        }
        Ok(())
    }

    /// Segment a still image, score it against the ground truth and build the overlay.
    ///
    /// Returns `Ok(None)` without touching the segmenter when it is not ready.
    #[tracing::instrument(skip_all, fields(width = image.width, height = image.height))]
    pub fn segment_image(&mut self, image: &FrameRGBA) -> SegResult<Option<ImageReport>> {
        if !self.segmenter.is_ready() {
            tracing::warn!("segmenter not ready; skipping image");
            return Ok(None);
        }
        self.ensure_mode(RunningMode::Image)?;

        let start = Instant::now();
        let result = self.segmenter.segment(image)?;
        let latency = start.elapsed();

        let mask = result.to_class_mask()?;
        let iou = match &self.opts.ground_truth {
            Some(polygon) => {
                let truth = self.rasterizer.rasterize(polygon, mask.canvas())?;
                Some(mask_iou(&mask, &truth)?)
            }
            None => None,
        };

        let mut overlay = image.resized(mask.canvas())?;
        composite(&mut overlay, &mask, &self.opts.legend)?;

        let category = mask
            .last_foreground_class()
            .and_then(|id| label_for(&self.opts.labels, id))
            .map(str::to_string);

        tracing::info!(
            latency_ms = latency.as_secs_f64() * 1000.0,
            iou = iou.map(IouStats::iou),
            category = category.as_deref().unwrap_or(""),
            "segmented image"
        );

        Ok(Some(ImageReport {
            overlay,
            mask,
            iou,
            category,
            latency,
        }))
    }

    /// Run one capture cycle: skip duplicates, segment the new frame and composite it.
    pub fn video_tick(&mut self, source: &mut dyn FrameSource) -> SegResult<VideoTick> {
        if !self.capturing {
            return Ok(VideoTick::Stopped);
        }

        let time = source.current_time();
        if self.last_frame_time == Some(time) {
            return Ok(VideoTick::Duplicate);
        }
        self.last_frame_time = Some(time);

        let Some(frame) = source.capture()? else {
            tracing::debug!("frame source ended; stopping capture");
            self.capturing = false;
            return Ok(VideoTick::Ended);
        };

        if !self.segmenter.is_ready() {
            tracing::warn!("segmenter not ready; stopping capture");
            self.capturing = false;
            return Ok(VideoTick::NotReady);
        }
        self.ensure_mode(RunningMode::Video)?;

        let timestamp_ms = time * 1000.0;
        let result = self.segmenter.segment_for_video(&frame, timestamp_ms)?;
        let mask = result.to_class_mask()?;

        let mut out = frame.resized(mask.canvas())?;
        composite(&mut out, &mask, &self.opts.legend)?;
        Ok(VideoTick::Rendered {
            timestamp_ms,
            frame: out,
        })
    }

    /// Start capture and cycle until it is stopped or the source ends, pushing frames to `sink`.
    ///
    /// The loop ends when the source runs out, the segmenter is not ready, the sink answers
    /// [`std::ops::ControlFlow::Break`], or `max_cycles` is reached. Capture is stopped on
    /// every exit, including errors.
    #[tracing::instrument(skip_all)]
    pub fn run_capture(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
        max_cycles: Option<u64>,
    ) -> SegResult<CaptureStats> {
        self.start_capture();
        let mut stats = CaptureStats::default();

        let end = loop {
            if !self.capturing {
                break CaptureEnd::Stopped;
            }
            if max_cycles.is_some_and(|max| stats.cycles >= max) {
                self.stop_capture();
                break CaptureEnd::CycleLimit;
            }
            stats.cycles += 1;
            match self.capture_cycle(source, sink, &mut stats) {
                Ok(None) => {}
                Ok(Some(end)) => break end,
                Err(err) => {
                    self.stop_capture();
                    tracing::warn!(error = %err, cycles = stats.cycles, "capture cycle failed");
                    return Err(err);
                }
            }
        };
        stats.end = end;

        tracing::info!(
            cycles = stats.cycles,
            rendered = stats.frames_rendered,
            skipped = stats.frames_skipped,
            end = ?stats.end,
            "capture stopped"
        );
        Ok(stats)
    }

    fn capture_cycle(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
        stats: &mut CaptureStats,
    ) -> SegResult<Option<CaptureEnd>> {
        match self.video_tick(source)? {
            VideoTick::Rendered {
                timestamp_ms,
                frame,
            } => {
                let flow = sink.push_frame(timestamp_ms, &frame)?;
                stats.frames_rendered += 1;
                if flow.is_break() {
                    self.stop_capture();
                    return Ok(Some(CaptureEnd::SinkStopped));
                }
                Ok(None)
            }
            VideoTick::Duplicate => {
                stats.frames_skipped += 1;
                Ok(None)
            }
            VideoTick::Stopped => Ok(Some(CaptureEnd::Stopped)),
            VideoTick::Ended => Ok(Some(CaptureEnd::SourceEnded)),
            VideoTick::NotReady => Ok(Some(CaptureEnd::NotReady)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
