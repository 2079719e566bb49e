//! Fitness (cost) evaluation for candidate layouts.
//!
//! A layout is scored by
//!
//! - a **boundary penalty** for every shape whose bounding box leaves the
//!   sheet,
//! - an **overlap penalty** for every unordered pair of overlapping shapes,
//! - a **waste term** (full-layout scoring only): `sheet_area - Σ area` over
//!   in-bounds shapes, plus `out_of_bounds_area_factor * area` for every
//!   shape off the sheet.
//!
//! Lower is better. The per-shape score of a single shape omits the waste
//! term and is zero when that shape is on the sheet and overlaps nothing.

use super::problem::LayoutProblem;
use crate::error::{Error, Result};
use crate::geometry::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Penalty weights.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Penalties {
    /// Added once per shape outside the sheet.
    pub boundary: f64,

    /// Added once per overlapping pair.
    pub overlap: f64,

    /// Multiplier applied to the area of an out-of-bounds shape in the waste
    /// term.
    pub out_of_bounds_area_factor: f64,
}

impl Default for Penalties {
    fn default() -> Self {
        Self {
            boundary: 1000.0,
            overlap: 1000.0,
            out_of_bounds_area_factor: 100.0,
        }
    }
}

impl Penalties {
    /// Checks that every weight is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("boundary", self.boundary),
            ("overlap", self.overlap),
            ("out_of_bounds_area_factor", self.out_of_bounds_area_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "penalty {name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Components of a full-layout fitness value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitnessBreakdown {
    pub waste: f64,
    pub boundary_penalty: f64,
    pub overlap_penalty: f64,

    /// Number of shapes outside the sheet.
    pub out_of_bounds: usize,

    /// Number of unordered overlapping pairs.
    pub overlapping_pairs: usize,
}

impl FitnessBreakdown {
    pub fn total(&self) -> f64 {
        self.waste + self.boundary_penalty + self.overlap_penalty
    }

    /// `true` when every shape is on the sheet and no two shapes overlap.
    pub fn is_feasible(&self) -> bool {
        self.out_of_bounds == 0 && self.overlapping_pairs == 0
    }
}

impl LayoutProblem {
    /// Scores a complete layout, one position per shape. Lower is better.
    pub fn layout_fitness(&self, positions: &[Vec2]) -> f64 {
        self.layout_breakdown(positions).total()
    }

    /// Scores a complete layout and returns the individual components.
    ///
    /// Every shape contributes to the waste term and every distinct pair is
    /// tested for overlap, so the cost is O(n²) in the number of shapes.
    pub fn layout_breakdown(&self, positions: &[Vec2]) -> FitnessBreakdown {
        debug_assert_eq!(positions.len(), self.shapes().len());
        let sheet = self.sheet();
        let penalties = self.penalties();

        let mut in_bounds_area = 0.0;
        let mut out_of_bounds_area = 0.0;
        let mut out_of_bounds = 0usize;
        for (shape, &pos) in self.shapes().iter().zip(positions) {
            if sheet.contains(&shape.bounding_box(pos)) {
                in_bounds_area += shape.area();
            } else {
                out_of_bounds_area += shape.area();
                out_of_bounds += 1;
            }
        }

        let overlapping_pairs = self.count_overlapping_pairs(positions);

        FitnessBreakdown {
            waste: sheet.area() - in_bounds_area
                + penalties.out_of_bounds_area_factor * out_of_bounds_area,
            boundary_penalty: penalties.boundary * out_of_bounds as f64,
            overlap_penalty: penalties.overlap * overlapping_pairs as f64,
            out_of_bounds,
            overlapping_pairs,
        }
    }

    /// Scores shape `index` at `positions[index]` against all other shapes.
    ///
    /// Used by the per-shape representation, where `positions` holds the
    /// current position of every particle.
    pub(crate) fn shape_fitness(&self, index: usize, positions: &[Vec2]) -> f64 {
        let shapes = self.shapes();
        let penalties = self.penalties();
        let shape = &shapes[index];
        let pos = positions[index];

        let mut fitness = 0.0;
        if !self.sheet().contains(&shape.bounding_box(pos)) {
            fitness += penalties.boundary;
        }
        for (j, (other, &other_pos)) in shapes.iter().zip(positions).enumerate() {
            if j != index && shape.overlaps(pos, other, other_pos) {
                fitness += penalties.overlap;
            }
        }
        fitness
    }

    fn count_overlapping_pairs(&self, positions: &[Vec2]) -> usize {
        let shapes = self.shapes();
        let mut count = 0;
        for i in 0..shapes.len() {
            for j in (i + 1)..shapes.len() {
                if shapes[i].overlaps(positions[i], &shapes[j], positions[j]) {
                    count += 1;
                }
            }
        }
        count
    }
}
