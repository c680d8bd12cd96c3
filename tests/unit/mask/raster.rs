use super::*;

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon::from_points([(x0, y0), (x1, y0), (x1, y1), (x0, y1)]).unwrap()
}

#[test]
fn top_left_block_fills_exactly() {
    let canvas = Canvas::new(4, 4).unwrap();
    let expected = [1, 1, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

    for fill_rule in [FillRule::NonZero, FillRule::EvenOdd] {
        for channel in [CoverageChannel::Alpha, CoverageChannel::Red] {
            let settings = RasterSettings { fill_rule, channel };
            let mask = rasterize(&square(0.0, 0.0, 2.0, 2.0), canvas, settings).unwrap();
            assert_eq!(mask.as_slice(), &expected, "{settings:?}");
        }
    }
}

#[test]
fn collinear_polygon_yields_empty_mask() {
    let canvas = Canvas::new(8, 8).unwrap();
    let line = Polygon::from_points([(0.0, 0.0), (3.0, 3.0), (6.0, 6.0)]).unwrap();
    let mask = rasterize(&line, canvas, RasterSettings::default()).unwrap();
    assert_eq!(mask.foreground_count(), 0);
}

#[test]
fn doubly_wound_polygon_depends_on_fill_rule() {
    let canvas = Canvas::new(8, 8).unwrap();
    let twice = Polygon::from_points([
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 4.0),
        (0.0, 4.0),
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 4.0),
        (0.0, 4.0),
    ])
    .unwrap();

    let nonzero = rasterize(
        &twice,
        canvas,
        RasterSettings {
            fill_rule: FillRule::NonZero,
            ..RasterSettings::default()
        },
    )
    .unwrap();
    assert_eq!(nonzero.foreground_count(), 16);

    let even_odd = rasterize(
        &twice,
        canvas,
        RasterSettings {
            fill_rule: FillRule::EvenOdd,
            ..RasterSettings::default()
        },
    )
    .unwrap();
    assert_eq!(even_odd.foreground_count(), 0);
}

#[test]
fn values_are_strictly_binary_and_offcanvas_vertices_clip() {
    let canvas = Canvas::new(16, 16).unwrap();
    let big = Polygon::from_points([(-10.0, -10.0), (40.0, -5.0), (30.0, 50.0)]).unwrap();
    let mask = rasterize(&big, canvas, RasterSettings::default()).unwrap();
    assert_eq!(mask.len(), 256);
    assert!(mask.as_slice().iter().all(|&v| v <= 1));
    assert!(mask.foreground_count() > 0);
}

#[test]
fn annotation_polygon_covers_part_of_a_256_canvas() {
    let polygon = Polygon::from_json_str(include_str!("../../data/woman.json")).unwrap();
    let canvas = Canvas::new(256, 256).unwrap();
    let mask = rasterize(&polygon, canvas, RasterSettings::default()).unwrap();
    let covered = mask.foreground_count();
    assert!(covered > 0);
    assert!(covered < canvas.pixel_count());
    // Everything left of the leftmost vertex (x ~= 160.2) stays background.
    assert_eq!(mask.get(100, 200), Some(0));
}

#[test]
fn rasterizer_reuses_and_resizes_its_surface() {
    let mut r = MaskRasterizer::default();
    let a = r
        .rasterize(&square(0.0, 0.0, 2.0, 2.0), Canvas::new(4, 4).unwrap())
        .unwrap();
    let b = r
        .rasterize(&square(0.0, 0.0, 2.0, 2.0), Canvas::new(8, 2).unwrap())
        .unwrap();
    let c = r
        .rasterize(&square(2.0, 2.0, 4.0, 4.0), Canvas::new(4, 4).unwrap())
        .unwrap();
    assert_eq!(a.foreground_count(), 4);
    assert_eq!(b.len(), 16);
    assert_eq!(b.foreground_count(), 4);
    assert_eq!(c.get(0, 0), Some(0));
    assert_eq!(c.get(3, 3), Some(1));
}

#[test]
fn oversized_canvas_is_rejected() {
    let canvas = Canvas::new(70_000, 1).unwrap();
    assert!(rasterize(&square(0.0, 0.0, 1.0, 1.0), canvas, RasterSettings::default()).is_err());
}

#[test]
fn outline_keeps_vertices_and_closes() {
    let polygon = Polygon::from_points([(0.5, 1.0), (3.0, 1.0), (3.0, 2.5)]).unwrap();
    let outline = outline_for_surface(&polygon.to_bezpath());
    let els = outline.elements();
    assert_eq!(els.len(), 4);
    assert_eq!(
        els[0],
        vello_cpu::kurbo::PathEl::MoveTo(vello_cpu::kurbo::Point::new(0.5, 1.0))
    );
    assert_eq!(
        els[2],
        vello_cpu::kurbo::PathEl::LineTo(vello_cpu::kurbo::Point::new(3.0, 2.5))
    );
    assert_eq!(els[3], vello_cpu::kurbo::PathEl::ClosePath);
}
