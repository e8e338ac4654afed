use crate::foundation::error::{ShadowcastError, ShadowcastResult};

pub use kurbo::{Affine, Point, Vec2};

/// Tight integer bounds of the non-zero pixels of a plane.
///
/// `right` and `bottom` are exclusive, so `bottom` is one past the last covered row. That
/// row index is the subject's ground contact line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    /// First covered column.
    pub left: u32,
    /// First covered row.
    pub top: u32,
    /// One past the last covered column.
    pub right: u32,
    /// One past the last covered row.
    pub bottom: u32,
}

impl PixelBounds {
    /// Number of covered columns.
    pub fn width(self) -> u32 {
        self.right - self.left
    }

    /// Number of covered rows.
    pub fn height(self) -> u32 {
        self.bottom - self.top
    }
}

/// Fails with [`ShadowcastError::DimensionMismatch`] unless `actual` equals `expected`.
pub fn ensure_same_size(
    what: &'static str,
    expected: (u32, u32),
    actual: (u32, u32),
) -> ShadowcastResult<()> {
    if expected != actual {
        return Err(ShadowcastError::dimension_mismatch(what, expected, actual));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
