use crate::foundation::core::Rgba8;
use crate::foundation::error::{SegError, SegResult};
use crate::mask::model::Mask;
use crate::render::frame::FrameRGBA;
use crate::render::legend::Legend;

/// Per-channel 50/50 blend with floor division: `(dst + src) / 2`.
pub fn blend_half(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = ((u16::from(dst[i]) + u16::from(src[i])) / 2) as u8;
    }
    out
}

/// Blend the legend color of each class id into the matching RGBA8 pixel of `dst`.
///
/// Every pixel is visited exactly once; class id 0 blends `legend[0]` like any other id.
pub fn composite_in_place(dst: &mut [u8], class_ids: &[u8], legend: &Legend) -> SegResult<()> {
    if dst.len() != class_ids.len() * 4 {
        return Err(SegError::validation(format!(
            "composite expects an rgba8 buffer of {} bytes for {} class ids, got {}",
            class_ids.len() * 4,
            class_ids.len(),
            dst.len()
        )));
    }
    for (d, &id) in dst.chunks_exact_mut(4).zip(class_ids) {
        let out = blend_half([d[0], d[1], d[2], d[3]], legend.color_for(id));
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// [`composite_in_place`] over a frame and a mask of the same dimensions.
#[tracing::instrument(skip_all, fields(width = frame.width, height = frame.height))]
pub fn composite(frame: &mut FrameRGBA, mask: &Mask, legend: &Legend) -> SegResult<()> {
    if frame.canvas() != mask.canvas() {
        return Err(SegError::validation(format!(
            "composite expects matching sizes (frame {}x{}, mask {}x{})",
            frame.width,
            frame.height,
            mask.width(),
            mask.height()
        )));
    }
    composite_in_place(&mut frame.data, mask.as_slice(), legend)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
