/// Result alias for every fallible segoverlay call.
pub type SegResult<T> = Result<T, SegError>;

/// Failures surfaced by rasterizing, scoring, compositing and the session driver.
#[derive(thiserror::Error, Debug)]
pub enum SegError {
    /// Shapes that do not line up: polygon arity, mask or frame length against its canvas,
    /// predicted vs ground-truth size, raster dimensions past the surface limit.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The segmentation provider or the raster surface failed to produce a result.
    #[error("segmentation failed: {0}")]
    Evaluation(String),

    /// Polygon JSON or a category-mask payload could not be decoded.
    #[error("malformed data: {0}")]
    Serde(String),

    /// Image decoding, file access and other errors carried with their context chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SegError {
    /// Shorthand for [`SegError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for [`SegError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Shorthand for [`SegError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the error is a shape mismatch the caller can fix by passing matching inputs.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
