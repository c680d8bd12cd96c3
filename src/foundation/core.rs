use crate::foundation::error::{SegError, SegResult};

pub use kurbo::{BezPath, Point};

/// Straight (non-premultiplied) RGBA8 color, one byte per channel.
pub type Rgba8 = [u8; 4];

/// Pixel grid dimensions shared by masks and frame buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> SegResult<Self> {
        if width == 0 || height == 0 {
            return Err(SegError::validation(format!(
                "canvas dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Byte length of a tightly packed RGBA8 buffer with these dimensions.
    pub fn rgba_len(self) -> usize {
        self.pixel_count() * 4
    }

    /// Dimensions narrowed to what the raster surface accepts.
    pub(crate) fn raster_dims(self) -> SegResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| SegError::validation("raster width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| SegError::validation("raster height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(SegError::validation("raster dimensions must be positive"));
        }
        Ok((w, h))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
