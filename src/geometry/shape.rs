//! Cutout shapes and their placed footprints.

use super::Vec2;
use crate::error::{Error, Result};
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a placed shape.
///
/// `top` is the smaller y coordinate; y grows downwards like the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Returns `true` if the two boxes share interior area.
    ///
    /// Boxes whose edges only touch are not overlapping.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !(self.right <= other.left
            || other.right <= self.left
            || self.bottom <= other.top
            || other.bottom <= self.top)
    }
}

/// A cutout to be placed on the sheet.
///
/// Rectangles and diamonds occupy a `width x height` footprint; a circle
/// occupies its bounding square of side `2 * radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Shape {
    Rectangular { width: f64, height: f64 },
    Diamond { width: f64, height: f64 },
    Circular { radius: f64 },
}

impl Shape {
    pub fn rectangular(width: f64, height: f64) -> Self {
        Shape::Rectangular { width, height }
    }

    pub fn diamond(width: f64, height: f64) -> Self {
        Shape::Diamond { width, height }
    }

    pub fn circular(radius: f64) -> Self {
        Shape::Circular { radius }
    }

    /// Horizontal extent of the footprint.
    pub fn effective_width(&self) -> f64 {
        match *self {
            Shape::Rectangular { width, .. } | Shape::Diamond { width, .. } => width,
            Shape::Circular { radius } => 2.0 * radius,
        }
    }

    /// Vertical extent of the footprint.
    pub fn effective_height(&self) -> f64 {
        match *self {
            Shape::Rectangular { height, .. } | Shape::Diamond { height, .. } => height,
            Shape::Circular { radius } => 2.0 * radius,
        }
    }

    /// `(effective_width, effective_height)` as a vector.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.effective_width(), self.effective_height())
    }

    /// True (not bounding-box) area of the shape.
    pub fn area(&self) -> f64 {
        match *self {
            Shape::Rectangular { width, height } => width * height,
            Shape::Diamond { width, height } => width * height / 2.0,
            Shape::Circular { radius } => PI * radius * radius,
        }
    }

    /// Bounding box of the shape with its top-left corner at `position`.
    pub fn bounding_box(&self, position: Vec2) -> BoundingBox {
        let extent = self.extent();
        BoundingBox {
            left: position.x,
            top: position.y,
            right: position.x + extent.x,
            bottom: position.y + extent.y,
        }
    }

    /// Tests whether `self` placed at `position` overlaps `other` placed at
    /// `other_position`.
    ///
    /// Two circles are compared exactly by centre distance (touching circles
    /// do not overlap). Every other pairing uses the bounding boxes, which is
    /// an approximation for diamonds and mixed circle pairs.
    pub fn overlaps(&self, position: Vec2, other: &Shape, other_position: Vec2) -> bool {
        match (*self, *other) {
            (Shape::Circular { radius: r1 }, Shape::Circular { radius: r2 }) => {
                let c1 = position + Vec2::splat(r1);
                let c2 = other_position + Vec2::splat(r2);
                c1.distance(c2) < r1 + r2
            }
            _ => self
                .bounding_box(position)
                .overlaps(&other.bounding_box(other_position)),
        }
    }

    /// Checks that all dimensions are positive and finite.
    pub(crate) fn validate(&self, index: usize) -> Result<()> {
        let dims = match *self {
            Shape::Rectangular { width, height } | Shape::Diamond { width, height } => {
                vec![("width", width), ("height", height)]
            }
            Shape::Circular { radius } => vec![("radius", radius)],
        };
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidShape {
                    index,
                    reason: format!("{name} must be positive and finite, got {value}"),
                });
            }
        }
        Ok(())
    }
}
