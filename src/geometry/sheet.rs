//! The rectangular sheet shapes are cut from.

use super::{BoundingBox, Shape, Vec2};
use crate::error::{Axis, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative tolerance for edge comparisons in [`Sheet::contains`].
const EDGE_TOLERANCE: f64 = 1e-9;

/// Fixed-size sheet with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sheet {
    pub width: f64,
    pub height: f64,
}

impl Sheet {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Checks that both dimensions are positive and finite.
    pub fn validate(&self) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(Error::InvalidSheet {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Checks that `shape` can be placed inside the sheet on both axes.
    pub fn check_fits(&self, index: usize, shape: &Shape) -> Result<()> {
        let extent = shape.extent();
        if extent.x > self.width {
            return Err(Error::ShapeDoesNotFit {
                index,
                axis: Axis::X,
                extent: extent.x,
                limit: self.width,
            });
        }
        if extent.y > self.height {
            return Err(Error::ShapeDoesNotFit {
                index,
                axis: Axis::Y,
                extent: extent.y,
                limit: self.height,
            });
        }
        Ok(())
    }

    /// Returns `true` if the box lies entirely on the sheet.
    ///
    /// The left and top edges are exact, since clamping yields exactly `0.0`.
    /// The right and bottom edges allow a small tolerance so that a clamped
    /// position (`sheet_dim - extent`) is never reported out of bounds by
    /// rounding.
    pub fn contains(&self, bbox: &BoundingBox) -> bool {
        let tol_x = EDGE_TOLERANCE * self.width.max(1.0);
        let tol_y = EDGE_TOLERANCE * self.height.max(1.0);
        bbox.left >= 0.0
            && bbox.top >= 0.0
            && bbox.right <= self.width + tol_x
            && bbox.bottom <= self.height + tol_y
    }

    /// Largest valid top-left position for `shape`.
    ///
    /// Components are negative when the shape does not fit.
    pub fn max_position(&self, shape: &Shape) -> Vec2 {
        Vec2::new(
            self.width - shape.effective_width(),
            self.height - shape.effective_height(),
        )
    }

    /// Clamps each axis of `position` to `[0, sheet_dim - extent]`.
    ///
    /// Outward movement is discarded, not reflected.
    pub fn clamp(&self, shape: &Shape, position: Vec2) -> Vec2 {
        let max = self.max_position(shape);
        Vec2::new(position.x.max(0.0).min(max.x), position.y.max(0.0).min(max.y))
    }
}
