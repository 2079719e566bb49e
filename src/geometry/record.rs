//! Tagged shape records exchanged with callers and layout sinks.
//!
//! Records carry a string type tag and optional dimension fields. They are
//! converted into the closed [`Shape`] type once, at the boundary, and an
//! unrecognized tag is rejected instead of being treated as an empty shape.

use super::{Shape, Vec2};
use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const TAG_RECTANGULAR: &str = "rectangular";
pub const TAG_DIAMOND: &str = "diamante";
pub const TAG_CIRCULAR: &str = "circular";

/// A shape record, optionally placed at `(x, y)`.
///
/// With the `serde` feature the wire field names are `tipo`, `largura`,
/// `altura`, `r`, `x` and `y`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeRecord {
    /// Type tag: `rectangular` (or `retangular`), `diamante` or `circular`.
    #[cfg_attr(feature = "serde", serde(rename = "tipo"))]
    pub kind: String,

    #[cfg_attr(
        feature = "serde",
        serde(rename = "largura", default, skip_serializing_if = "Option::is_none")
    )]
    pub width: Option<f64>,

    #[cfg_attr(
        feature = "serde",
        serde(rename = "altura", default, skip_serializing_if = "Option::is_none")
    )]
    pub height: Option<f64>,

    #[cfg_attr(
        feature = "serde",
        serde(rename = "r", default, skip_serializing_if = "Option::is_none")
    )]
    pub radius: Option<f64>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub x: Option<f64>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub y: Option<f64>,
}

impl ShapeRecord {
    pub fn rectangular(width: f64, height: f64) -> Self {
        Self::from(Shape::rectangular(width, height))
    }

    pub fn diamond(width: f64, height: f64) -> Self {
        Self::from(Shape::diamond(width, height))
    }

    pub fn circular(radius: f64) -> Self {
        Self::from(Shape::circular(radius))
    }

    /// Position of a placed record, if both coordinates are set.
    pub fn position(&self) -> Option<Vec2> {
        Some(Vec2::new(self.x?, self.y?))
    }

    /// Copy of this record with `x` and `y` set to `position`.
    pub fn placed_at(&self, position: Vec2) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            ..self.clone()
        }
    }

    /// Converts the record into a [`Shape`], validating its dimensions.
    ///
    /// `index` is the record's position in its list and is reported in
    /// errors.
    pub fn to_shape(&self, index: usize) -> Result<Shape> {
        let field = |value: Option<f64>, name: &str| {
            value.ok_or_else(|| Error::InvalidShape {
                index,
                reason: format!("`{}` shape is missing `{name}`", self.kind),
            })
        };

        let shape = match self.kind.as_str() {
            TAG_RECTANGULAR | "retangular" => {
                Shape::rectangular(field(self.width, "width")?, field(self.height, "height")?)
            }
            TAG_DIAMOND | "diamond" => {
                Shape::diamond(field(self.width, "width")?, field(self.height, "height")?)
            }
            TAG_CIRCULAR => Shape::circular(field(self.radius, "radius")?),
            other => {
                return Err(Error::UnknownShapeType {
                    index,
                    tag: other.to_string(),
                })
            }
        };
        shape.validate(index)?;
        Ok(shape)
    }
}

impl From<Shape> for ShapeRecord {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Rectangular { width, height } => Self {
                kind: TAG_RECTANGULAR.into(),
                width: Some(width),
                height: Some(height),
                ..Self::default()
            },
            Shape::Diamond { width, height } => Self {
                kind: TAG_DIAMOND.into(),
                width: Some(width),
                height: Some(height),
                ..Self::default()
            },
            Shape::Circular { radius } => Self {
                kind: TAG_CIRCULAR.into(),
                radius: Some(radius),
                ..Self::default()
            },
        }
    }
}

/// Converts a list of records into shapes, failing on the first bad record.
pub fn shapes_from_records(records: &[ShapeRecord]) -> Result<Vec<Shape>> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| record.to_shape(i))
        .collect()
}
