use crate::foundation::core::{BezPath, Canvas, Point};
use crate::foundation::error::SegResult;
use crate::geometry::polygon::Polygon;
use crate::mask::model::Mask;

/// Winding rule used to decide which regions of a self-intersecting polygon are inside.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FillRule {
    /// Inside where the winding number is nonzero (the 2D canvas default).
    #[default]
    NonZero,
    /// Inside where the winding number is odd.
    EvenOdd,
}

/// Which channel of the filled surface marks a pixel as covered.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CoverageChannel {
    /// Covered when alpha > 0.
    #[default]
    Alpha,
    /// Covered when red > 0 after filling with opaque white.
    Red,
}

/// Rasterization options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RasterSettings {
    /// Winding rule for the polygon fill.
    #[serde(default)]
    pub fill_rule: FillRule,
    /// Channel thresholded into the occupancy mask.
    #[serde(default)]
    pub channel: CoverageChannel,
}

/// Fills polygons on an offscreen `vello_cpu` surface and thresholds them into binary masks.
///
/// The surface is kept between calls and only reallocated when the target size changes.
pub struct MaskRasterizer {
    settings: RasterSettings,
    surface: Option<RasterSurface>,
}

struct RasterSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl MaskRasterizer {
    /// Create a rasterizer with the given settings.
    pub fn new(settings: RasterSettings) -> Self {
        Self {
            settings,
            surface: None,
        }
    }

    /// Settings in effect.
    pub fn settings(&self) -> RasterSettings {
        self.settings
    }

    /// Rasterize `polygon` into a `{0, 1}` mask of the given size.
    ///
    /// Vertices outside the canvas are clipped. A degenerate (collinear) polygon covers no
    /// area and yields an all-zero mask.
    #[tracing::instrument(skip(self, polygon), fields(points = polygon.len()))]
    pub fn rasterize(&mut self, polygon: &Polygon, canvas: Canvas) -> SegResult<Mask> {
        let (w, h) = canvas.raster_dims()?;
        let settings = self.settings;
        let surface = self.ensure_surface(w, h);
        clear_pixmap(&mut surface.pixmap);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_fill_rule(fill_rule_to_cpu(settings.fill_rule));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(&outline_for_surface(&polygon.to_bezpath()));
        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);

        let channel = match settings.channel {
            CoverageChannel::Alpha => 3,
            CoverageChannel::Red => 0,
        };
        let data: Vec<u8> = surface
            .pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| u8::from(px[channel] > 0))
            .collect();

        let mask = Mask::new(canvas, data)?;
        tracing::debug!(covered = mask.foreground_count(), "rasterized polygon");
        Ok(mask)
    }

    fn ensure_surface(&mut self, width: u16, height: u16) -> &mut RasterSurface {
        let stale = self
            .surface
            .as_ref()
            .is_none_or(|s| s.width != width || s.height != height);
        if stale {
            self.surface = None;
        }
        self.surface.get_or_insert_with(|| RasterSurface {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }
}

impl Default for MaskRasterizer {
    fn default() -> Self {
        Self::new(RasterSettings::default())
    }
}

/// One-shot rasterization with a temporary surface.
pub fn rasterize(polygon: &Polygon, canvas: Canvas, settings: RasterSettings) -> SegResult<Mask> {
    MaskRasterizer::new(settings).rasterize(polygon, canvas)
}

fn fill_rule_to_cpu(rule: FillRule) -> vello_cpu::peniko::Fill {
    match rule {
        FillRule::NonZero => vello_cpu::peniko::Fill::NonZero,
        FillRule::EvenOdd => vello_cpu::peniko::Fill::EvenOdd,
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

/// Polygon outline in the path type the raster surface is built against.
fn outline_for_surface(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;
    use vello_cpu::kurbo::PathEl as SurfaceEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    path.iter()
        .map(|el| match el {
            PathEl::MoveTo(p) => SurfaceEl::MoveTo(pt(p)),
            PathEl::LineTo(p) => SurfaceEl::LineTo(pt(p)),
            PathEl::QuadTo(c, p) => SurfaceEl::QuadTo(pt(c), pt(p)),
            PathEl::CurveTo(c1, c2, p) => SurfaceEl::CurveTo(pt(c1), pt(c2), pt(p)),
            PathEl::ClosePath => SurfaceEl::ClosePath,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/mask/raster.rs"]
mod tests;
