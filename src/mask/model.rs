use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Canvas;
use crate::foundation::error::{SegError, SegResult};

/// Row-major per-pixel mask of class ids (predictions) or occupancy flags (ground truth).
///
/// `0` is background; any nonzero value is foreground.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    canvas: Canvas,
    data: Vec<u8>,
}

impl Mask {
    /// Wrap existing values; `data.len()` must equal `width * height`.
    pub fn new(canvas: Canvas, data: Vec<u8>) -> SegResult<Self> {
        if data.len() != canvas.pixel_count() {
            return Err(SegError::validation(format!(
                "mask length {} does not match {}x{}",
                data.len(),
                canvas.width,
                canvas.height
            )));
        }
        Ok(Self { canvas, data })
    }

    /// All-background mask.
    pub fn zeros(canvas: Canvas) -> Self {
        Self {
            canvas,
            data: vec![0; canvas.pixel_count()],
        }
    }

    /// Mask with every pixel set to `value`.
    pub fn filled(canvas: Canvas, value: u8) -> Self {
        Self {
            canvas,
            data: vec![value; canvas.pixel_count()],
        }
    }

    /// Dimensions of the mask.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Raw row-major values.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the mask, returning its values.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True only for a zero-pixel mask, which [`Canvas`] validation normally prevents.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(x, y)`, or `None` out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        self.data
            .get((y as usize) * (self.canvas.width as usize) + (x as usize))
            .copied()
    }

    /// Count of nonzero pixels.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }

    /// The class id of the last foreground pixel in scan order.
    ///
    /// This is the class the image flow reports as "the" category of a picture.
    pub fn last_foreground_class(&self) -> Option<u8> {
        self.data.iter().rev().copied().find(|&v| v > 0)
    }

    /// Interpret an 8-bit grayscale image as class ids.
    pub fn from_luma_image(img: &image::GrayImage) -> SegResult<Self> {
        let (w, h) = img.dimensions();
        let canvas = Canvas::new(w, h)?;
        Self::new(canvas, img.as_raw().clone())
    }

    /// Load a grayscale PNG (or any format `image` decodes) as class ids.
    ///
    /// Color images are converted to luma first.
    pub fn from_luma_png(path: &Path) -> SegResult<Self> {
        let img = image::open(path)
            .with_context(|| format!("open mask image '{}'", path.display()))?
            .to_luma8();
        Self::from_luma_image(&img)
    }

    /// Render as a grayscale image.
    ///
    /// With `stretch_binary`, every foreground pixel becomes 255 so binary masks are visible.
    pub fn to_luma_image(&self, stretch_binary: bool) -> SegResult<image::GrayImage> {
        let data = if stretch_binary {
            self.data
                .iter()
                .map(|&v| if v > 0 { 255 } else { 0 })
                .collect()
        } else {
            self.data.clone()
        };
        image::GrayImage::from_raw(self.canvas.width, self.canvas.height, data)
            .ok_or_else(|| SegError::evaluation("mask buffer does not fit its dimensions"))
    }
}

/// Raw category output of a segmentation provider.
///
/// Still-image providers hand back 8-bit class ids; the streaming variant hands back
/// floats in `[0, 1]` that encode `class_id / 255`.
#[derive(Clone, Debug, PartialEq)]
pub enum CategoryMask {
    /// Class ids, one byte per pixel.
    Integer(Vec<u8>),
    /// Normalized values in `[0, 1]`, one per pixel.
    NormalizedFloat(Vec<f32>),
}

impl CategoryMask {
    /// Number of pixel values carried.
    pub fn len(&self) -> usize {
        match self {
            Self::Integer(v) => v.len(),
            Self::NormalizedFloat(v) => v.len(),
        }
    }

    /// True when no pixel values are carried.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to discrete class ids.
    pub fn to_class_ids(&self) -> Vec<u8> {
        match self {
            Self::Integer(v) => v.clone(),
            Self::NormalizedFloat(v) => v.iter().copied().map(discretize_normalized).collect(),
        }
    }
}

/// `round(value * 255)`, saturated into a byte.
pub fn discretize_normalized(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// `{width, height, categoryMask}` as produced by a segmentation call.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentationResult {
    /// Mask dimensions.
    pub canvas: Canvas,
    /// Per-pixel category output.
    pub category_mask: CategoryMask,
}

impl SegmentationResult {
    /// Discretize into a class-id [`Mask`], checking the pixel count.
    pub fn to_class_mask(&self) -> SegResult<Mask> {
        if self.category_mask.len() != self.canvas.pixel_count() {
            return Err(SegError::validation(format!(
                "category mask carries {} values for a {}x{} result",
                self.category_mask.len(),
                self.canvas.width,
                self.canvas.height
            )));
        }
        Mask::new(self.canvas, self.category_mask.to_class_ids())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/model.rs"]
mod tests;
