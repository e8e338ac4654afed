/// Convenience result type used across shadowcast.
pub type ShadowcastResult<T> = Result<T, ShadowcastError>;

/// Top-level error taxonomy used by the compositing APIs.
#[derive(thiserror::Error, Debug)]
pub enum ShadowcastError {
    /// No mask was supplied and the foreground carries no alpha channel.
    #[error("missing alpha: foreground has no alpha channel; provide a mask")]
    MissingAlpha,

    /// Buffers participating in one compose call differ in size.
    #[error(
        "dimension mismatch: {what} is {actual_w}x{actual_h}, expected {expected_w}x{expected_h}"
    )]
    DimensionMismatch {
        /// Which buffer disagreed with the reference size.
        what: &'static str,
        /// Reference width.
        expected_w: u32,
        /// Reference height.
        expected_h: u32,
        /// Offending width.
        actual_w: u32,
        /// Offending height.
        actual_h: u32,
    },

    /// The mask has no non-zero pixel, so no contact line can be derived.
    #[error("empty mask: no non-zero pixels found")]
    EmptyMask,

    /// Invalid user-provided parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShadowcastError {
    /// Build a [`ShadowcastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShadowcastError::DimensionMismatch`] from `(width, height)` pairs.
    pub fn dimension_mismatch(
        what: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    ) -> Self {
        Self::DimensionMismatch {
            what,
            expected_w: expected.0,
            expected_h: expected.1,
            actual_w: actual.0,
            actual_h: actual.1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
