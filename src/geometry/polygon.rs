use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{SegError, SegResult};

/// Closed polygon given as parallel `xs` / `ys` coordinate lists.
///
/// The serialized form follows the VGG Image Annotator region shape
/// (`all_points_x` / `all_points_y`). The last vertex may repeat the first; the path is
/// closed regardless.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawPolygon", into = "RawPolygon")]
pub struct Polygon {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct RawPolygon {
    all_points_x: Vec<f64>,
    all_points_y: Vec<f64>,
}

impl TryFrom<RawPolygon> for Polygon {
    type Error = SegError;

    fn try_from(raw: RawPolygon) -> SegResult<Self> {
        Self::new(raw.all_points_x, raw.all_points_y)
    }
}

impl From<Polygon> for RawPolygon {
    fn from(p: Polygon) -> Self {
        Self {
            all_points_x: p.xs,
            all_points_y: p.ys,
        }
    }
}

impl Polygon {
    /// Minimum number of vertices of a closed polygon.
    pub const MIN_POINTS: usize = 3;

    /// Build a polygon from parallel coordinate lists.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> SegResult<Self> {
        if xs.len() != ys.len() {
            return Err(SegError::validation(format!(
                "polygon coordinate lists differ in length ({} xs, {} ys)",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < Self::MIN_POINTS {
            return Err(SegError::validation(format!(
                "polygon needs at least {} points, got {}",
                Self::MIN_POINTS,
                xs.len()
            )));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(SegError::validation("polygon coordinates must be finite"));
        }
        Ok(Self { xs, ys })
    }

    /// Build a polygon from `(x, y)` pairs.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> SegResult<Self> {
        let (xs, ys) = points.into_iter().unzip();
        Self::new(xs, ys)
    }

    /// Parse the `{"all_points_x": [..], "all_points_y": [..]}` JSON shape.
    pub fn from_json_str(s: &str) -> SegResult<Self> {
        serde_json::from_str(s).map_err(|e| SegError::serde(format!("parse polygon JSON: {e}")))
    }

    /// Read a polygon JSON file.
    pub fn load(path: &Path) -> SegResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read polygon '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// X coordinates in vertex order.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y coordinates in vertex order.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of vertices as given (a repeated closing vertex counts).
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Never true for a constructed polygon.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Vertices in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .map(|(&x, &y)| Point::new(x, y))
    }

    /// Closed path visiting the vertices in order.
    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points();
        if let Some(first) = points.next() {
            path.move_to(first);
            for p in points {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }

    /// Signed shoelace area; zero for collinear vertex sets.
    pub fn signed_area(&self) -> f64 {
        let n = self.len();
        let mut acc = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            acc += self.xs[i] * self.ys[j] - self.xs[j] * self.ys[i];
        }
        acc * 0.5
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/polygon.rs"]
mod tests;
