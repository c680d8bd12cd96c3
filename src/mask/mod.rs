pub(crate) mod iou;
pub(crate) mod model;
pub(crate) mod raster;
