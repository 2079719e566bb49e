//! PSO configuration.
//!
//! [`PsoConfig`] holds the swarm size, iteration budget and the coefficients
//! of the velocity update rule.

use crate::error::{Error, Result};
use crate::geometry::Vec2;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How particles map onto the layout being optimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Representation {
    /// Each particle is a complete candidate layout (one position per shape).
    ///
    /// This is classical PSO: every particle is a full solution and the
    /// global best is the best layout seen so far.
    #[default]
    FullLayout,

    /// Each particle is the position of a single shape; the swarm as a whole
    /// forms one layout.
    ///
    /// The swarm has exactly one particle per shape, and all particles are
    /// attracted to one shared global-best point regardless of which shape
    /// produced it. Usually paired with a repulsive force.
    PerShape,
}

/// Initial particle velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitialVelocity {
    /// Every shape starts with velocity `(v, v)`.
    Fixed(f64),

    /// Each component is drawn uniformly from `[-max_speed, max_speed]`.
    Random {
        /// Largest absolute initial speed per axis.
        max_speed: f64,
    },
}

impl Default for InitialVelocity {
    fn default() -> Self {
        InitialVelocity::Fixed(0.5)
    }
}

impl InitialVelocity {
    pub(crate) fn sample<R: Rng>(&self, rng: &mut R) -> Vec2 {
        match *self {
            InitialVelocity::Fixed(v) => Vec2::splat(v),
            InitialVelocity::Random { max_speed } => Vec2::new(
                rng.random_range(-max_speed..=max_speed),
                rng.random_range(-max_speed..=max_speed),
            ),
        }
    }
}

/// Configuration for Particle Swarm Optimization.
///
/// # Examples
///
/// ```
/// use u_pso_layout::pso::{InitialVelocity, PsoConfig};
///
/// let config = PsoConfig::default()
///     .with_num_particles(40)
///     .with_num_iterations(200)
///     .with_inertia(0.7)
///     .with_initial_velocity(InitialVelocity::Random { max_speed: 1.0 })
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PsoConfig {
    /// Number of particles in the swarm.
    ///
    /// Ignored by [`Representation::PerShape`], which always uses one
    /// particle per shape, but must still be positive.
    pub num_particles: usize,

    /// Fixed number of iterations. Must be positive.
    pub num_iterations: usize,

    /// Inertia weight `w`: persistence of the previous velocity.
    pub inertia: f64,

    /// Cognitive weight `c1`: attraction to the particle's own best.
    pub cognitive: f64,

    /// Social weight `c2`: attraction to the swarm's best.
    pub social: f64,

    /// Strength of the force pushing overlapping shapes apart.
    ///
    /// `None` disables the force.
    pub repulsive_factor: Option<f64>,

    /// How initial velocities are chosen.
    pub initial_velocity: InitialVelocity,

    /// Particle representation.
    pub representation: Representation,

    /// Iterations without global-best improvement before stopping.
    ///
    /// Set to 0 to always run all `num_iterations` (the default).
    pub stagnation_limit: usize,

    /// Whether to evaluate particles in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            num_particles: 30,
            num_iterations: 100,
            inertia: 0.5,
            cognitive: 1.5,
            social: 1.5,
            repulsive_factor: None,
            initial_velocity: InitialVelocity::default(),
            representation: Representation::FullLayout,
            stagnation_limit: 0,
            parallel: true,
            seed: None,
        }
    }
}

impl PsoConfig {
    /// Preset for the full-layout representation (same as `default()`).
    pub fn full_layout() -> Self {
        Self::default()
    }

    /// Preset for the per-shape representation.
    ///
    /// - Repulsive factor: 0.7
    /// - Initial velocity: random, up to 1.0 per axis
    pub fn per_shape() -> Self {
        Self {
            representation: Representation::PerShape,
            repulsive_factor: Some(0.7),
            initial_velocity: InitialVelocity::Random { max_speed: 1.0 },
            ..Self::default()
        }
    }

    pub fn with_num_particles(mut self, n: usize) -> Self {
        self.num_particles = n;
        self
    }

    pub fn with_num_iterations(mut self, n: usize) -> Self {
        self.num_iterations = n;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.inertia = w;
        self
    }

    pub fn with_cognitive(mut self, c1: f64) -> Self {
        self.cognitive = c1;
        self
    }

    pub fn with_social(mut self, c2: f64) -> Self {
        self.social = c2;
        self
    }

    /// Enables the repulsive force with the given factor.
    pub fn with_repulsive_factor(mut self, factor: f64) -> Self {
        self.repulsive_factor = Some(factor);
        self
    }

    /// Disables the repulsive force.
    pub fn without_repulsion(mut self) -> Self {
        self.repulsive_factor = None;
        self
    }

    pub fn with_initial_velocity(mut self, velocity: InitialVelocity) -> Self {
        self.initial_velocity = velocity;
        self
    }

    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_particles == 0 {
            return Err(invalid("num_particles must be positive"));
        }
        if self.num_iterations == 0 {
            return Err(invalid("num_iterations must be positive"));
        }
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if let Some(factor) = self.repulsive_factor {
            if !factor.is_finite() || factor < 0.0 {
                return Err(invalid(format!(
                    "repulsive_factor must be finite and non-negative, got {factor}"
                )));
            }
        }
        match self.initial_velocity {
            InitialVelocity::Fixed(v) if !v.is_finite() => {
                return Err(invalid(format!("fixed initial velocity must be finite, got {v}")));
            }
            InitialVelocity::Random { max_speed } if !max_speed.is_finite() || max_speed < 0.0 => {
                return Err(invalid(format!(
                    "max_speed must be finite and non-negative, got {max_speed}"
                )));
            }
            _ => {}
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfig(msg.into())
}
