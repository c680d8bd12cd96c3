use std::ops::ControlFlow;

use crate::foundation::error::{SegError, SegResult};
use crate::mask::model::{CategoryMask, Mask, SegmentationResult};
use crate::render::frame::FrameRGBA;

/// Which kind of input the segmentation provider is configured for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RunningMode {
    /// One-off still images.
    #[default]
    Image,
    /// Successive frames of a live stream.
    Video,
}

/// A pretrained segmentation model, treated as an opaque collaborator.
///
/// Calls are synchronous: each returns once the result for that input is available, so a
/// driver never has more than one call in flight.
pub trait Segmenter {
    /// Whether the model has finished loading. Drivers skip work until this is true.
    fn is_ready(&self) -> bool {
        true
    }

    /// Reconfigure the model for a different input kind.
    fn set_running_mode(&mut self, mode: RunningMode) -> SegResult<()>;

    /// Segment a still image.
    fn segment(&mut self, image: &FrameRGBA) -> SegResult<SegmentationResult>;

    /// Segment one frame of a stream captured at `timestamp_ms`.
    fn segment_for_video(
        &mut self,
        frame: &FrameRGBA,
        timestamp_ms: f64,
    ) -> SegResult<SegmentationResult>;
}

/// A supplier of successive frames (still image or camera stream).
pub trait FrameSource {
    /// Playback position of the frame that [`FrameSource::capture`] would return, in seconds.
    fn current_time(&self) -> f64;

    /// Grab the current frame; `None` once the stream has ended.
    fn capture(&mut self) -> SegResult<Option<FrameRGBA>>;
}

/// Consumer of composited video frames, called in capture order.
///
/// The returned [`ControlFlow`] is the sink's way to stop a running capture loop:
/// `Break` clears the capture flag and no further frame is segmented.
pub trait FrameSink {
    /// Push one composited frame.
    fn push_frame(
        &mut self,
        timestamp_ms: f64,
        frame: &FrameRGBA,
    ) -> SegResult<ControlFlow<()>>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    frames: Vec<(f64, FrameRGBA)>,
    limit: Option<usize>,
}

impl InMemorySink {
    /// Create a new in-memory sink that accepts frames until the loop ends on its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that asks the loop to stop once it holds `limit` frames.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            frames: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(f64, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn push_frame(
        &mut self,
        timestamp_ms: f64,
        frame: &FrameRGBA,
    ) -> SegResult<ControlFlow<()>> {
        self.frames.push((timestamp_ms, frame.clone()));
        match self.limit {
            Some(limit) if self.frames.len() >= limit => Ok(ControlFlow::Break(())),
            _ => Ok(ControlFlow::Continue(())),
        }
    }
}

/// A [`Segmenter`] that answers every call with a precomputed class mask.
///
/// Still-image calls return the ids as an integer mask; video calls return them normalized to
/// `[0, 1]` floats, the shape streaming providers produce.
#[derive(Clone, Debug)]
pub struct StaticMaskSegmenter {
    mask: Mask,
    mode: RunningMode,
    mode_switches: usize,
}

impl StaticMaskSegmenter {
    /// Serve `mask` for every call.
    pub fn new(mask: Mask) -> Self {
        Self {
            mask,
            mode: RunningMode::Image,
            mode_switches: 0,
        }
    }

    /// Mode the segmenter is currently configured for.
    pub fn mode(&self) -> RunningMode {
        self.mode
    }

    /// How many times `set_running_mode` was called.
    pub fn mode_switches(&self) -> usize {
        self.mode_switches
    }

    fn check_mode(&self, expected: RunningMode) -> SegResult<()> {
        if self.mode != expected {
            return Err(SegError::evaluation(format!(
                "segmenter is in {:?} mode, call needs {expected:?}",
                self.mode
            )));
        }
        Ok(())
    }
}

impl Segmenter for StaticMaskSegmenter {
    fn set_running_mode(&mut self, mode: RunningMode) -> SegResult<()> {
        self.mode = mode;
        self.mode_switches += 1;
        Ok(())
    }

    fn segment(&mut self, _image: &FrameRGBA) -> SegResult<SegmentationResult> {
        self.check_mode(RunningMode::Image)?;
        Ok(SegmentationResult {
            canvas: self.mask.canvas(),
            category_mask: CategoryMask::Integer(self.mask.as_slice().to_vec()),
        })
    }

    fn segment_for_video(
        &mut self,
        _frame: &FrameRGBA,
        _timestamp_ms: f64,
    ) -> SegResult<SegmentationResult> {
        self.check_mode(RunningMode::Video)?;
        let values = self
            .mask
            .as_slice()
            .iter()
            .map(|&id| f32::from(id) / 255.0)
            .collect();
        Ok(SegmentationResult {
            canvas: self.mask.canvas(),
            category_mask: CategoryMask::NormalizedFloat(values),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/segmenter.rs"]
mod tests;
