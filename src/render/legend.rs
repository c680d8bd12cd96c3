use crate::foundation::core::Rgba8;
use crate::foundation::error::{SegError, SegResult};

/// The default 21-entry overlay palette, indexed by `class_id % 21`.
pub const LEGEND_COLORS: [Rgba8; 21] = [
    [255, 197, 0, 255],
    [128, 62, 117, 255],
    [255, 104, 0, 255],
    [166, 189, 215, 255],
    [193, 0, 32, 255],
    [206, 162, 98, 255],
    [129, 112, 102, 255],
    [0, 125, 52, 255],
    [246, 118, 142, 255],
    [0, 83, 138, 255],
    [255, 112, 92, 255],
    [83, 55, 112, 255],
    [255, 142, 0, 255],
    [179, 40, 81, 255],
    [244, 200, 0, 255],
    [127, 24, 13, 255],
    [147, 170, 0, 255],
    [89, 51, 21, 255],
    [241, 58, 19, 255],
    [35, 44, 22, 255],
    [0, 161, 194, 255],
];

/// Class labels of the 21-class PASCAL VOC DeepLab models, indexed by class id.
pub const PASCAL_VOC_LABELS: [&str; 21] = [
    "background",
    "aeroplane",
    "bicycle",
    "bird",
    "boat",
    "bottle",
    "bus",
    "car",
    "cat",
    "chair",
    "cow",
    "diningtable",
    "dog",
    "horse",
    "motorbike",
    "person",
    "pottedplant",
    "sheep",
    "sofa",
    "train",
    "tv",
];

/// Immutable palette mapping class ids to overlay colors.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Rgba8>", into = "Vec<Rgba8>")]
pub struct Legend {
    colors: Vec<Rgba8>,
}

impl Legend {
    /// Build a legend from an explicit palette; at least one color is required.
    pub fn new(colors: Vec<Rgba8>) -> SegResult<Self> {
        if colors.is_empty() {
            return Err(SegError::validation("legend needs at least one color"));
        }
        Ok(Self { colors })
    }

    /// Number of palette entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a constructed legend.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Palette entries in order.
    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    /// Color for `class_id`, wrapping modulo the palette length. Id 0 maps to the first entry.
    pub fn color_for(&self, class_id: u8) -> Rgba8 {
        self.colors[usize::from(class_id) % self.colors.len()]
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            colors: LEGEND_COLORS.to_vec(),
        }
    }
}

impl TryFrom<Vec<Rgba8>> for Legend {
    type Error = SegError;

    fn try_from(colors: Vec<Rgba8>) -> SegResult<Self> {
        Self::new(colors)
    }
}

impl From<Legend> for Vec<Rgba8> {
    fn from(l: Legend) -> Self {
        l.colors
    }
}

/// Label for `class_id`, or `None` when the label list is too short.
pub fn label_for(labels: &[String], class_id: u8) -> Option<&str> {
    labels.get(usize::from(class_id)).map(String::as_str)
}

/// [`PASCAL_VOC_LABELS`] as owned strings.
pub fn pascal_voc_labels() -> Vec<String> {
    PASCAL_VOC_LABELS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/legend.rs"]
mod tests;
