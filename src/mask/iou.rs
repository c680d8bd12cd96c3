use crate::foundation::error::{SegError, SegResult};
use crate::mask::model::Mask;

/// A per-pixel value that can be read as foreground/background.
///
/// Anything strictly greater than zero is foreground, so class identity is discarded.
pub trait MaskValue: Copy {
    /// Whether this value marks a foreground pixel.
    fn is_foreground(self) -> bool;
}

impl MaskValue for u8 {
    fn is_foreground(self) -> bool {
        self > 0
    }
}

impl MaskValue for u16 {
    fn is_foreground(self) -> bool {
        self > 0
    }
}

impl MaskValue for u32 {
    fn is_foreground(self) -> bool {
        self > 0
    }
}

impl MaskValue for f32 {
    fn is_foreground(self) -> bool {
        self > 0.0
    }
}

/// Raw pixel counts behind an IoU score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IouStats {
    /// Pixels that are foreground in both masks.
    pub intersection: u64,
    /// Pixels that are foreground in either mask.
    pub union: u64,
}

impl IouStats {
    /// `intersection / union`, or `0.0` when the union is empty.
    pub fn iou(self) -> f64 {
        if self.union == 0 {
            return 0.0;
        }
        self.intersection as f64 / self.union as f64
    }

    /// `1 - iou()`, the overlap distance shown by some callers.
    pub fn distance(self) -> f64 {
        1.0 - self.iou()
    }
}

/// Count intersection and union over paired pixels in a single pass.
///
/// Fails with a validation error when the slices differ in length.
pub fn iou_stats<P: MaskValue, G: MaskValue>(
    predicted: &[P],
    ground_truth: &[G],
) -> SegResult<IouStats> {
    if predicted.len() != ground_truth.len() {
        return Err(SegError::validation(format!(
            "iou expects equal-length masks (predicted {}, ground truth {})",
            predicted.len(),
            ground_truth.len()
        )));
    }

    let mut stats = IouStats::default();
    for (&p, &g) in predicted.iter().zip(ground_truth) {
        let (p, g) = (p.is_foreground(), g.is_foreground());
        stats.intersection += u64::from(p && g);
        stats.union += u64::from(p || g);
    }
    Ok(stats)
}

/// Intersection over union of two masks, in `[0, 1]`.
///
/// Both masks entirely empty yields `0.0`, never NaN.
pub fn intersection_over_union<P: MaskValue, G: MaskValue>(
    predicted: &[P],
    ground_truth: &[G],
) -> SegResult<f64> {
    Ok(iou_stats(predicted, ground_truth)?.iou())
}

/// [`iou_stats`] over two [`Mask`]s, additionally requiring matching dimensions.
#[tracing::instrument(skip_all, fields(width = predicted.width(), height = predicted.height()))]
pub fn mask_iou(predicted: &Mask, ground_truth: &Mask) -> SegResult<IouStats> {
    if predicted.canvas() != ground_truth.canvas() {
        return Err(SegError::validation(format!(
            "iou expects masks of equal size (predicted {}x{}, ground truth {}x{})",
            predicted.width(),
            predicted.height(),
            ground_truth.width(),
            ground_truth.height()
        )));
    }
    let stats = iou_stats(predicted.as_slice(), ground_truth.as_slice())?;
    if stats.union == 0 {
        tracing::warn!("both masks are empty; reporting iou = 0");
    }
    tracing::debug!(
        intersection = stats.intersection,
        union = stats.union,
        "computed iou"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/mask/iou.rs"]
mod tests;
