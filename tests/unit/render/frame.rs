use super::*;

#[test]
fn new_checks_rgba_length() {
    let c = Canvas::new(2, 2).unwrap();
    assert!(FrameRGBA::new(c, vec![0; 15]).is_err());
    let f = FrameRGBA::new(c, vec![0; 16]).unwrap();
    assert_eq!(f.canvas(), c);
}

#[test]
fn filled_and_pixel_access() {
    let f = FrameRGBA::filled(Canvas::new(3, 2).unwrap(), [1, 2, 3, 4]);
    assert_eq!(f.data.len(), 24);
    assert_eq!(f.pixel(2, 1), Some([1, 2, 3, 4]));
    assert_eq!(f.pixel(3, 0), None);
}

#[test]
fn resize_changes_dimensions_and_keeps_flat_color() {
    let f = FrameRGBA::filled(Canvas::new(8, 8).unwrap(), [10, 20, 30, 255]);
    let r = f.resized(Canvas::new(4, 2).unwrap()).unwrap();
    assert_eq!((r.width, r.height), (4, 2));
    assert_eq!(r.pixel(1, 1), Some([10, 20, 30, 255]));

    let same = f.resized(f.canvas()).unwrap();
    assert_eq!(same, f);
}

#[test]
fn png_roundtrip_through_disk() {
    let dir = std::path::PathBuf::from("target").join("unit_frame_png");
    let path = dir.join("f.png");
    let f = FrameRGBA::filled(Canvas::new(3, 3).unwrap(), [200, 100, 50, 255]);
    f.save_png(&path).unwrap();
    let back = FrameRGBA::load(&path).unwrap();
    assert_eq!(back, f);
}
