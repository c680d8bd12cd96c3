use super::*;
use crate::foundation::core::Canvas;

#[test]
fn identical_nonempty_masks_score_one() {
    let m = [0u8, 3, 3, 0, 1];
    assert_eq!(intersection_over_union(&m, &m).unwrap(), 1.0);
}

#[test]
fn empty_union_scores_zero_not_nan() {
    let z = [0u8; 16];
    let stats = iou_stats(&z, &z).unwrap();
    assert_eq!(stats, IouStats::default());
    assert_eq!(stats.iou(), 0.0);
    assert_eq!(stats.distance(), 1.0);
}

#[test]
fn iou_is_symmetric() {
    let a = [1u8, 1, 0, 0, 2, 0];
    let b = [0u8, 1, 1, 0, 7, 0];
    let ab = intersection_over_union(&a, &b).unwrap();
    let ba = intersection_over_union(&b, &a).unwrap();
    assert_eq!(ab, ba);
    assert_eq!(ab, 0.5);
}

#[test]
fn class_identity_is_discarded() {
    let predicted = [15u8, 4, 0, 0];
    let truth = [1u8, 1, 0, 0];
    assert_eq!(intersection_over_union(&predicted, &truth).unwrap(), 1.0);
}

#[test]
fn float_predictions_binarize_on_positive() {
    let predicted = [0.0f32, 0.2, 1.0, 0.0];
    let truth = [0u8, 1, 0, 0];
    let stats = iou_stats(&predicted, &truth).unwrap();
    assert_eq!(stats.intersection, 1);
    assert_eq!(stats.union, 2);
    assert_eq!(stats.distance(), 0.5);
}

#[test]
fn length_mismatch_fails_fast() {
    let err = intersection_over_union(&[1u8, 0], &[1u8]).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("invalid input:"));
}

#[test]
fn mask_iou_requires_equal_dimensions() {
    let a = Mask::zeros(Canvas::new(4, 2).unwrap());
    let b = Mask::zeros(Canvas::new(2, 4).unwrap());
    assert!(mask_iou(&a, &b).is_err());
    assert_eq!(mask_iou(&a, &a).unwrap().iou(), 0.0);
}
