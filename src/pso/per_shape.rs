//! Per-shape swarm: one particle per shape.
//!
//! The particles together form a single layout. Each particle is scored by
//! its own boundary and overlap penalties against the current positions of
//! all other particles. The global best is a single point shared by all
//! particles, whichever shape produced it, so the social term pulls every
//! shape towards the same spot; the repulsive force is what spreads them
//! out again.
//!
//! The final layout is each particle's personal best position.

use super::config::PsoConfig;
use super::problem::LayoutProblem;
use super::runner::{evaluate_all, IterationTracker};
use super::types::{iteration_best, GlobalBest, ShapeParticle};
use super::update::{pso_velocity, repulsion};
use crate::geometry::Vec2;
use log::debug;
use rand::Rng;

/// Runs the per-shape swarm and returns the layout and the global best
/// fitness.
pub(crate) fn run<R: Rng>(
    problem: &LayoutProblem,
    config: &PsoConfig,
    rng: &mut R,
    tracker: &mut IterationTracker<'_>,
) -> (Vec<Vec2>, f64) {
    let shapes = problem.shapes();

    let mut particles: Vec<ShapeParticle> = Vec::with_capacity(shapes.len());
    for i in 0..shapes.len() {
        let position = problem.random_position(i, rng);
        let velocity = config.initial_velocity.sample(rng);
        particles.push(ShapeParticle::new(i, position, velocity));
    }

    let mut global = GlobalBest::new(particles[0].position);

    for iteration in 0..config.num_iterations {
        if !tracker.should_continue(iteration) {
            break;
        }

        // Snapshot: evaluation and repulsion both see the positions from the
        // start of the iteration.
        let positions: Vec<Vec2> = particles.iter().map(|p| p.position).collect();

        let fitness = evaluate_all(particles.len(), config.parallel, |i| {
            problem.shape_fitness(particles[i].shape_index, &positions)
        });
        for (particle, &f) in particles.iter_mut().zip(&fitness) {
            particle.fitness = f;
            particle.update_personal_best();
        }

        let improved = iteration_best(fitness.iter().copied())
            .is_some_and(|(i, f)| global.offer(&particles[i].position, f));
        if improved {
            debug!(
                "iteration {}: new global best {:.3} at ({:.3}, {:.3})",
                iteration + 1,
                global.fitness,
                global.position.x,
                global.position.y
            );
        }
        tracker.record(improved, global.fitness);

        for particle in particles.iter_mut() {
            let mut velocity = pso_velocity(
                config,
                particle.velocity,
                particle.position,
                particle.best_position,
                global.position,
                rng,
            );
            if let Some(factor) = config.repulsive_factor {
                velocity += repulsion(shapes, &positions, particle.shape_index, factor);
            }
            particle.velocity = velocity;
        }
        for particle in particles.iter_mut() {
            particle.position = problem.clamp(particle.shape_index, particle.position + particle.velocity);
        }
    }

    let layout = particles.iter().map(|p| p.best_position).collect();
    (layout, global.fitness)
}
