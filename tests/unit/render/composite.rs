use super::*;
use crate::foundation::core::Canvas;

#[test]
fn blend_half_floors_per_channel() {
    assert_eq!(blend_half([0, 0, 0, 0], [255, 197, 0, 255]), [127, 98, 0, 127]);
    assert_eq!(blend_half([255, 255, 255, 255], [255, 197, 0, 255]), [255, 226, 127, 255]);
    assert_eq!(blend_half([10, 20, 30, 40], [10, 20, 30, 40]), [10, 20, 30, 40]);
}

#[test]
fn class_zero_on_black_blends_first_legend_color() {
    let canvas = Canvas::new(3, 2).unwrap();
    let mut frame = FrameRGBA::filled(canvas, [0, 0, 0, 0]);
    let mask = Mask::zeros(canvas);
    composite(&mut frame, &mask, &Legend::default()).unwrap();
    for px in frame.data.chunks_exact(4) {
        assert_eq!(px, &[127, 98, 0, 127]);
    }
}

#[test]
fn each_pixel_uses_its_own_class_color() {
    let canvas = Canvas::new(2, 1).unwrap();
    let legend = Legend::new(vec![[0, 0, 0, 0], [200, 100, 50, 250]]).unwrap();
    let mut frame = FrameRGBA::filled(canvas, [100, 100, 100, 100]);
    let mask = Mask::new(canvas, vec![0, 3]).unwrap();
    composite(&mut frame, &mask, &legend).unwrap();
    assert_eq!(frame.pixel(0, 0), Some([50, 50, 50, 50]));
    assert_eq!(frame.pixel(1, 0), Some([150, 100, 75, 175]));
}

#[test]
fn repeated_composites_converge_toward_the_legend_color() {
    let canvas = Canvas::new(4, 4).unwrap();
    let legend = Legend::default();
    let target = legend.color_for(0);
    let mask = Mask::zeros(canvas);
    let mut frame = FrameRGBA::filled(canvas, [0, 0, 0, 0]);

    let mut prev_err = [255u16; 4];
    for n in 1..=10u32 {
        composite(&mut frame, &mask, &legend).unwrap();
        let px = frame.pixel(2, 2).unwrap();
        for c in 0..4 {
            let err = u16::from(target[c]).abs_diff(u16::from(px[c]));
            let bound = 255u16.div_ceil(1 << n).max(1);
            assert!(err <= bound, "n={n} c={c} err={err} bound={bound}");
            assert!(err <= prev_err[c]);
            prev_err[c] = err;
        }
    }
    // Floor division stops one step short of channels at 255, so this is convergence,
    // not a fixed point at the legend color.
    assert_eq!(frame.pixel(0, 0), Some([254, 196, 0, 254]));
}

#[test]
fn mismatched_sizes_are_rejected() {
    let mut frame = FrameRGBA::filled(Canvas::new(2, 2).unwrap(), [0, 0, 0, 0]);
    let mask = Mask::zeros(Canvas::new(4, 1).unwrap());
    assert!(composite(&mut frame, &mask, &Legend::default()).is_err());

    let mut raw = vec![0u8; 7];
    assert!(composite_in_place(&mut raw, &[0, 0], &Legend::default()).is_err());
}
