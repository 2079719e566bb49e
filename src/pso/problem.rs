//! The layout problem: a sheet, the shapes to place on it and the penalty
//! weights used to score candidate layouts.

use super::fitness::Penalties;
use crate::error::{Error, Result};
use crate::geometry::{shapes_from_records, Shape, ShapeRecord, Sheet, Vec2};
use rand::Rng;

/// A validated layout problem.
///
/// Construction fails if the sheet is degenerate, the shape list is empty,
/// a shape has invalid dimensions, or a shape is larger than the sheet, so
/// every shape always has a non-empty range of in-bounds positions.
#[derive(Debug, Clone)]
pub struct LayoutProblem {
    sheet: Sheet,
    shapes: Vec<Shape>,
    penalties: Penalties,
}

impl LayoutProblem {
    pub fn new(sheet: Sheet, shapes: Vec<Shape>) -> Result<Self> {
        sheet.validate()?;
        if shapes.is_empty() {
            return Err(Error::InvalidConfig("shape list must not be empty".into()));
        }
        for (i, shape) in shapes.iter().enumerate() {
            shape.validate(i)?;
            sheet.check_fits(i, shape)?;
        }
        Ok(Self {
            sheet,
            shapes,
            penalties: Penalties::default(),
        })
    }

    /// Builds a problem from tagged shape records.
    pub fn from_records(sheet: Sheet, records: &[ShapeRecord]) -> Result<Self> {
        Self::new(sheet, shapes_from_records(records)?)
    }

    /// Replaces the penalty weights, rejecting NaN, infinite or negative
    /// values with [`Error::InvalidConfig`].
    pub fn with_penalties(mut self, penalties: Penalties) -> Result<Self> {
        penalties.validate()?;
        self.penalties = penalties;
        Ok(self)
    }

    pub fn sheet(&self) -> Sheet {
        self.sheet
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn penalties(&self) -> &Penalties {
        &self.penalties
    }

    /// Total area of all shapes.
    pub fn shape_area(&self) -> f64 {
        self.shapes.iter().map(Shape::area).sum()
    }

    /// Draws an in-bounds position for shape `index`, uniformly over
    /// `[0, sheet_width - width] x [0, sheet_height - height]`.
    pub(crate) fn random_position<R: Rng>(&self, index: usize, rng: &mut R) -> Vec2 {
        let max = self.sheet.max_position(&self.shapes[index]);
        Vec2::new(rng.random_range(0.0..=max.x), rng.random_range(0.0..=max.y))
    }

    /// Clamps `position` so shape `index` stays on the sheet.
    pub(crate) fn clamp(&self, index: usize, position: Vec2) -> Vec2 {
        self.sheet.clamp(&self.shapes[index], position)
    }
}
