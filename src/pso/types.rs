//! Particle state and best-position bookkeeping.

use crate::geometry::{Shape, Vec2};

/// A full-layout particle: one position and velocity per shape.
///
/// `best_position` is an owned snapshot, updated by copying, and never
/// shares storage with the live `position`.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec<Vec2>,
    pub velocity: Vec<Vec2>,
    pub best_position: Vec<Vec2>,
    pub best_fitness: f64,
    pub fitness: f64,
}

impl Particle {
    pub(crate) fn new(position: Vec<Vec2>, velocity: Vec<Vec2>) -> Self {
        Self {
            best_position: position.clone(),
            position,
            velocity,
            best_fitness: f64::INFINITY,
            fitness: f64::INFINITY,
        }
    }

    /// Replaces the personal best if the current fitness is strictly lower.
    pub(crate) fn update_personal_best(&mut self) -> bool {
        if self.fitness < self.best_fitness {
            self.best_fitness = self.fitness;
            self.best_position.clone_from(&self.position);
            true
        } else {
            false
        }
    }
}

/// A per-shape particle: the position of one shape.
#[derive(Debug, Clone)]
pub struct ShapeParticle {
    /// Index of the shape this particle moves.
    pub shape_index: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub best_position: Vec2,
    pub best_fitness: f64,
    pub fitness: f64,
}

impl ShapeParticle {
    pub(crate) fn new(shape_index: usize, position: Vec2, velocity: Vec2) -> Self {
        Self {
            shape_index,
            position,
            velocity,
            best_position: position,
            best_fitness: f64::INFINITY,
            fitness: f64::INFINITY,
        }
    }

    pub(crate) fn update_personal_best(&mut self) -> bool {
        if self.fitness < self.best_fitness {
            self.best_fitness = self.fitness;
            self.best_position = self.position;
            true
        } else {
            false
        }
    }
}

/// Best position seen by the swarm.
#[derive(Debug, Clone)]
pub(crate) struct GlobalBest<P> {
    pub position: P,
    pub fitness: f64,
}

impl<P: Clone> GlobalBest<P> {
    pub fn new(position: P) -> Self {
        Self {
            position,
            fitness: f64::INFINITY,
        }
    }

    /// Takes `candidate` if `fitness` is strictly lower than the current best.
    pub fn offer(&mut self, candidate: &P, fitness: f64) -> bool {
        if fitness < self.fitness {
            self.fitness = fitness;
            self.position.clone_from(candidate);
            true
        } else {
            false
        }
    }
}

/// Index and value of the lowest fitness; ties go to the earliest index.
pub(crate) fn iteration_best(fitness: impl IntoIterator<Item = f64>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, f) in fitness.into_iter().enumerate() {
        if best.is_none_or(|(_, b)| f < b) {
            best = Some((i, f));
        }
    }
    best
}

/// A shape paired with its assigned position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedShape {
    pub shape: Shape,
    pub position: Vec2,
}
