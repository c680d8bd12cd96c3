use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{SegError, SegResult};

/// A displayed frame as straight-alpha RGBA8 pixels, tightly packed and row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Wrap an existing buffer, checking its length.
    pub fn new(canvas: Canvas, data: Vec<u8>) -> SegResult<Self> {
        if data.len() != canvas.rgba_len() {
            return Err(SegError::validation(format!(
                "frame buffer length {} does not match {}x{} rgba8",
                data.len(),
                canvas.width,
                canvas.height
            )));
        }
        Ok(Self {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }

    /// Frame with every pixel set to `rgba`.
    pub fn filled(canvas: Canvas, rgba: Rgba8) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: rgba.repeat(canvas.pixel_count()),
        }
    }

    /// Frame dimensions.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Take ownership of a decoded RGBA image.
    pub fn from_image(img: image::RgbaImage) -> SegResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(Canvas::new(width, height)?, img.into_raw())
    }

    /// Decode an image file into RGBA8.
    pub fn load(path: &Path) -> SegResult<Self> {
        let img = image::open(path)
            .with_context(|| format!("open image '{}'", path.display()))?
            .to_rgba8();
        Self::from_image(img)
    }

    /// Copy into an `image` buffer.
    pub fn to_rgba_image(&self) -> SegResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| SegError::evaluation("frame buffer does not fit its dimensions"))
    }

    /// Resample to `canvas` (bilinear); returns a copy when the size already matches.
    pub fn resized(&self, canvas: Canvas) -> SegResult<Self> {
        if self.canvas() == canvas {
            return Ok(self.clone());
        }
        let img = self.to_rgba_image()?;
        let out = image::imageops::resize(
            &img,
            canvas.width,
            canvas.height,
            image::imageops::FilterType::Triangle,
        );
        Self::from_image(out)
    }

    /// Encode as PNG, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> SegResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
