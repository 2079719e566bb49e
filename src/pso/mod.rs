//! Particle Swarm Optimization (PSO) for sheet layouts.
//!
//! A population of particles moves through the space of shape positions,
//! each pulled towards its own best-known position and the swarm's
//! best-known position:
//!
//! ```text
//! v = w·v + c1·r1·(pbest - x) + c2·r2·(gbest - x)
//! x = clamp(x + v)
//! ```
//!
//! # Key Types
//!
//! - [`LayoutProblem`]: sheet, shapes and penalty weights
//! - [`PsoConfig`]: swarm size, iteration budget, coefficients, representation
//! - [`PsoRunner`]: executes the optimization loop
//! - [`PsoResult`]: final layout with statistics
//!
//! # Representations
//!
//! - [`Representation::FullLayout`]: every particle is a complete layout
//!   (the default)
//! - [`Representation::PerShape`]: every particle is one shape's position
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod fitness;
mod per_shape;
mod problem;
mod runner;
mod types;
mod update;

pub use config::{InitialVelocity, PsoConfig, Representation};
pub use fitness::{FitnessBreakdown, Penalties};
pub use problem::LayoutProblem;
pub use runner::{PsoResult, PsoRunner};
pub use types::{Particle, PlacedShape, ShapeParticle};
