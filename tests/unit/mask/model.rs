use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn new_checks_length() {
    assert!(Mask::new(canvas(2, 2), vec![0; 3]).is_err());
    let m = Mask::new(canvas(2, 2), vec![0, 1, 0, 3]).unwrap();
    assert_eq!(m.len(), 4);
    assert_eq!(m.foreground_count(), 2);
    assert_eq!(m.get(1, 1), Some(3));
    assert_eq!(m.get(2, 0), None);
}

#[test]
fn last_foreground_class_scans_to_the_end() {
    let m = Mask::new(canvas(3, 2), vec![0, 15, 0, 7, 0, 0]).unwrap();
    assert_eq!(m.last_foreground_class(), Some(7));
    assert_eq!(Mask::zeros(canvas(3, 2)).last_foreground_class(), None);
}

#[test]
fn normalized_float_rounds_to_nearest_bucket() {
    assert_eq!(discretize_normalized(0.0), 0);
    assert_eq!(discretize_normalized(1.0), 255);
    assert_eq!(discretize_normalized(15.0 / 255.0), 15);
    assert_eq!(discretize_normalized(15.4 / 255.0), 15);
    assert_eq!(discretize_normalized(15.6 / 255.0), 16);
    assert_eq!(discretize_normalized(-0.5), 0);
    assert_eq!(discretize_normalized(2.0), 255);
}

#[test]
fn segmentation_result_rejects_short_masks() {
    let r = SegmentationResult {
        canvas: canvas(2, 2),
        category_mask: CategoryMask::Integer(vec![1, 2, 3]),
    };
    assert!(r.to_class_mask().is_err());

    let r = SegmentationResult {
        canvas: canvas(2, 1),
        category_mask: CategoryMask::NormalizedFloat(vec![0.0, 15.0 / 255.0]),
    };
    assert_eq!(r.to_class_mask().unwrap().as_slice(), &[0, 15]);
}

#[test]
fn luma_image_stretch_makes_binary_visible() {
    let m = Mask::new(canvas(2, 1), vec![0, 1]).unwrap();
    assert_eq!(m.to_luma_image(true).unwrap().as_raw(), &vec![0, 255]);
    assert_eq!(m.to_luma_image(false).unwrap().as_raw(), &vec![0, 1]);

    let back = Mask::from_luma_image(&m.to_luma_image(false).unwrap()).unwrap();
    assert_eq!(back, m);
}
