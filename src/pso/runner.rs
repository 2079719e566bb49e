//! PSO execution loop.
//!
//! [`PsoRunner`] validates the configuration, initializes the swarm and runs
//! the fixed-iteration loop:
//!
//! 1. evaluate every particle (optionally in parallel),
//! 2. update personal bests, then reduce to the iteration's best particle and
//!    offer it to the global best in one sequential step,
//! 3. update every velocity, then every position.
//!
//! All random draws come from a single generator in a fixed order, so a
//! seeded run produces the same layout with or without parallel evaluation.

use super::config::{PsoConfig, Representation};
use super::fitness::FitnessBreakdown;
use super::per_shape;
use super::problem::LayoutProblem;
use super::types::{iteration_best, GlobalBest, Particle, PlacedShape};
use super::update::{pso_velocity, repulsion};
use crate::display::{LayoutSink, INITIAL_LAYOUT_TITLE, OPTIMIZED_LAYOUT_TITLE};
use crate::error::Result;
use crate::geometry::{Sheet, ShapeRecord, Vec2};
use crate::random::rng_for;
use log::{debug, info, trace, warn};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a PSO run.
#[derive(Debug, Clone)]
pub struct PsoResult {
    /// Every input shape with its optimized position, in input order.
    pub layout: Vec<PlacedShape>,

    /// Best fitness reached by the swarm.
    ///
    /// For [`Representation::FullLayout`] this is the fitness of `layout`.
    /// For [`Representation::PerShape`] it is the best single-shape score.
    pub best_fitness: f64,

    /// Full-layout scoring of `layout`.
    pub breakdown: FitnessBreakdown,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Global best fitness after each iteration.
    pub fitness_history: Vec<f64>,
}

impl PsoResult {
    pub fn positions(&self) -> Vec<Vec2> {
        self.layout.iter().map(|p| p.position).collect()
    }

    /// Copies of `records` with `x` and `y` set from the optimized layout.
    ///
    /// `records` must be the list the problem was built from.
    pub fn to_records(&self, records: &[ShapeRecord]) -> Vec<ShapeRecord> {
        records
            .iter()
            .zip(&self.layout)
            .map(|(record, placed)| record.placed_at(placed.position))
            .collect()
    }
}

/// Executes Particle Swarm Optimization on a [`LayoutProblem`].
///
/// # Usage
///
/// ```
/// use u_pso_layout::geometry::{Shape, Sheet};
/// use u_pso_layout::pso::{LayoutProblem, PsoConfig, PsoRunner};
///
/// let problem = LayoutProblem::new(
///     Sheet::new(20.0, 10.0),
///     vec![Shape::rectangular(8.0, 8.0), Shape::circular(2.0)],
/// )?;
/// let config = PsoConfig::default()
///     .with_num_particles(20)
///     .with_num_iterations(50)
///     .with_seed(42);
///
/// let result = PsoRunner::run(&problem, &config)?;
/// assert_eq!(result.layout.len(), 2);
/// # Ok::<(), u_pso_layout::Error>(())
/// ```
pub struct PsoRunner;

impl PsoRunner {
    /// Runs PSO optimization.
    pub fn run(problem: &LayoutProblem, config: &PsoConfig) -> Result<PsoResult> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs PSO with an optional cancellation token.
    ///
    /// The flag is checked between iterations. The first iteration always
    /// completes, so a cancelled run still returns a scored layout.
    pub fn run_with_cancel(
        problem: &LayoutProblem,
        config: &PsoConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<PsoResult> {
        config.validate()?;

        let mut rng = rng_for(config.seed);
        let mut tracker = IterationTracker::new(config, cancel.as_deref());

        info!(
            "PSO start: {:?}, {} shapes, {} particles, {} iterations",
            config.representation,
            problem.shapes().len(),
            match config.representation {
                Representation::FullLayout => config.num_particles,
                Representation::PerShape => problem.shapes().len(),
            },
            config.num_iterations
        );

        let (positions, best_fitness) = match config.representation {
            Representation::FullLayout => run_full_layout(problem, config, &mut rng, &mut tracker),
            Representation::PerShape => per_shape::run(problem, config, &mut rng, &mut tracker),
        };

        let breakdown = problem.layout_breakdown(&positions);
        let layout = problem
            .shapes()
            .iter()
            .zip(positions)
            .map(|(&shape, position)| PlacedShape { shape, position })
            .collect();

        if tracker.cancelled {
            warn!("PSO cancelled after {} iterations", tracker.iterations());
        }
        info!(
            "PSO finished after {} iterations: best fitness {:.3}, {} overlapping pairs, {} out of bounds",
            tracker.iterations(),
            best_fitness,
            breakdown.overlapping_pairs,
            breakdown.out_of_bounds
        );

        Ok(PsoResult {
            layout,
            best_fitness,
            breakdown,
            iterations: tracker.iterations(),
            stagnated: tracker.stagnated,
            cancelled: tracker.cancelled,
            fitness_history: tracker.history,
        })
    }

    /// Validates the records, shows the initial layout, optimizes, and shows
    /// the optimized layout.
    ///
    /// Returns the records augmented with `x` and `y`, in input order. The
    /// sink is not invoked if validation fails.
    pub fn optimize_and_display<S: LayoutSink + ?Sized>(
        sheet: Sheet,
        records: &[ShapeRecord],
        config: &PsoConfig,
        sink: &S,
    ) -> Result<Vec<ShapeRecord>> {
        let problem = LayoutProblem::from_records(sheet, records)?;
        config.validate()?;

        sink.display_layout(records, INITIAL_LAYOUT_TITLE);
        let result = Self::run(&problem, config)?;
        let optimized = result.to_records(records);
        sink.display_layout(&optimized, OPTIMIZED_LAYOUT_TITLE);

        Ok(optimized)
    }
}

/// Iteration-boundary bookkeeping: history, stagnation and cancellation.
pub(crate) struct IterationTracker<'a> {
    cancel: Option<&'a AtomicBool>,
    stagnation_limit: usize,
    since_improvement: usize,
    pub history: Vec<f64>,
    pub stagnated: bool,
    pub cancelled: bool,
}

impl<'a> IterationTracker<'a> {
    pub fn new(config: &PsoConfig, cancel: Option<&'a AtomicBool>) -> Self {
        Self {
            cancel,
            stagnation_limit: config.stagnation_limit,
            since_improvement: 0,
            history: Vec::with_capacity(config.num_iterations),
            stagnated: false,
            cancelled: false,
        }
    }

    /// Decides whether iteration `iteration` (0-based) runs. Iteration 0
    /// always runs.
    pub fn should_continue(&mut self, iteration: usize) -> bool {
        if iteration == 0 {
            return true;
        }
        if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            self.cancelled = true;
            return false;
        }
        if self.stagnation_limit > 0 && self.since_improvement >= self.stagnation_limit {
            debug!("no improvement for {} iterations, stopping", self.since_improvement);
            self.stagnated = true;
            return false;
        }
        true
    }

    pub fn record(&mut self, improved: bool, global_best: f64) {
        if improved {
            self.since_improvement = 0;
        } else {
            self.since_improvement += 1;
        }
        trace!("iteration {}: global best {}", self.history.len() + 1, global_best);
        self.history.push(global_best);
    }

    pub fn iterations(&self) -> usize {
        self.history.len()
    }
}

/// Evaluates `count` particles; parallel when enabled.
#[cfg(feature = "parallel")]
pub(crate) fn evaluate_all<F>(count: usize, parallel: bool, f: F) -> Vec<f64>
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    if parallel {
        (0..count).into_par_iter().map(f).collect()
    } else {
        (0..count).map(f).collect()
    }
}

/// Evaluates `count` particles.
#[cfg(not(feature = "parallel"))]
pub(crate) fn evaluate_all<F>(count: usize, _parallel: bool, f: F) -> Vec<f64>
where
    F: Fn(usize) -> f64 + Sync + Send,
{
    (0..count).map(f).collect()
}

/// Full-layout swarm: every particle is a complete layout.
///
/// Returns the global best layout and its fitness.
fn run_full_layout<R: Rng>(
    problem: &LayoutProblem,
    config: &PsoConfig,
    rng: &mut R,
    tracker: &mut IterationTracker<'_>,
) -> (Vec<Vec2>, f64) {
    let n_shapes = problem.shapes().len();

    let mut particles = Vec::with_capacity(config.num_particles);
    for _ in 0..config.num_particles {
        let mut position = Vec::with_capacity(n_shapes);
        let mut velocity = Vec::with_capacity(n_shapes);
        for i in 0..n_shapes {
            position.push(problem.random_position(i, rng));
            velocity.push(config.initial_velocity.sample(rng));
        }
        particles.push(Particle::new(position, velocity));
    }

    let mut global = GlobalBest::new(particles[0].position.clone());

    for iteration in 0..config.num_iterations {
        if !tracker.should_continue(iteration) {
            break;
        }

        let fitness = evaluate_all(particles.len(), config.parallel, |i| {
            problem.layout_fitness(&particles[i].position)
        });
        for (particle, &f) in particles.iter_mut().zip(&fitness) {
            particle.fitness = f;
            particle.update_personal_best();
        }

        let improved = iteration_best(fitness.iter().copied())
            .is_some_and(|(i, f)| global.offer(&particles[i].position, f));
        if improved {
            debug!("iteration {}: new global best {:.3}", iteration + 1, global.fitness);
        }
        tracker.record(improved, global.fitness);

        for particle in particles.iter_mut() {
            advance(problem, config, &global.position, particle, rng);
        }
    }

    (global.position, global.fitness)
}

/// Moves every shape of one layout particle.
fn advance<R: Rng>(
    problem: &LayoutProblem,
    config: &PsoConfig,
    global_best: &[Vec2],
    particle: &mut Particle,
    rng: &mut R,
) {
    let shapes = problem.shapes();

    for i in 0..shapes.len() {
        let mut velocity = pso_velocity(
            config,
            particle.velocity[i],
            particle.position[i],
            particle.best_position[i],
            global_best[i],
            rng,
        );
        if let Some(factor) = config.repulsive_factor {
            velocity += repulsion(shapes, &particle.position, i, factor);
        }
        particle.velocity[i] = velocity;
    }

    for i in 0..shapes.len() {
        particle.position[i] = problem.clamp(i, particle.position[i] + particle.velocity[i]);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geometry::Shape;
    use crate::pso::InitialVelocity;
    use std::cell::RefCell;

    fn two_squares() -> LayoutProblem {
        LayoutProblem::new(
            Sheet::new(20.0, 10.0),
            vec![Shape::rectangular(8.0, 8.0), Shape::rectangular(8.0, 8.0)],
        )
        .unwrap()
    }

    fn mixed() -> LayoutProblem {
        LayoutProblem::new(
            Sheet::new(30.0, 20.0),
            vec![
                Shape::rectangular(8.0, 6.0),
                Shape::diamond(6.0, 6.0),
                Shape::circular(3.0),
                Shape::circular(2.0),
                Shape::rectangular(5.0, 9.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_two_squares_fit_without_overlap() {
        let config = PsoConfig::default()
            .with_num_particles(40)
            .with_num_iterations(200)
            .with_seed(42)
            .with_parallel(false);

        let result = PsoRunner::run(&two_squares(), &config).unwrap();

        assert_eq!(result.breakdown.overlap_penalty, 0.0);
        assert_eq!(result.breakdown.boundary_penalty, 0.0);
        assert!((result.best_fitness - 72.0).abs() < 1e-9);
        assert_eq!(result.iterations, 200);
        assert!(!result.cancelled && !result.stagnated);
    }

    #[test]
    fn test_layout_preserves_order_and_bounds() {
        let problem = mixed();
        let config = PsoConfig::default()
            .with_num_particles(30)
            .with_num_iterations(100)
            .with_repulsive_factor(0.3)
            .with_seed(7)
            .with_parallel(false);

        let result = PsoRunner::run(&problem, &config).unwrap();

        assert_eq!(result.layout.len(), problem.shapes().len());
        for (placed, shape) in result.layout.iter().zip(problem.shapes()) {
            assert_eq!(placed.shape, *shape);
            let max = problem.sheet().max_position(shape);
            assert!(placed.position.x >= 0.0 && placed.position.x <= max.x);
            assert!(placed.position.y >= 0.0 && placed.position.y <= max.y);
        }
        assert!((result.breakdown.total() - result.best_fitness).abs() < 1e-9);
    }

    #[test]
    fn test_global_best_never_regresses() {
        let config = PsoConfig::default()
            .with_num_particles(15)
            .with_num_iterations(80)
            .with_seed(3)
            .with_parallel(false);

        let result = PsoRunner::run(&mixed(), &config).unwrap();

        assert_eq!(result.fitness_history.len(), 80);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "global best should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(result.fitness_history.last().copied(), Some(result.best_fitness));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let config = PsoConfig::default()
            .with_num_particles(20)
            .with_num_iterations(60)
            .with_repulsive_factor(0.5)
            .with_initial_velocity(InitialVelocity::Random { max_speed: 1.0 })
            .with_seed(1234)
            .with_parallel(false);

        let a = PsoRunner::run(&mixed(), &config).unwrap();
        let b = PsoRunner::run(&mixed(), &config).unwrap();

        assert_eq!(a.layout, b.layout);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let config = PsoConfig::default()
            .with_num_particles(25)
            .with_num_iterations(50)
            .with_seed(99);

        let sequential = PsoRunner::run(&mixed(), &config.clone().with_parallel(false)).unwrap();
        let parallel = PsoRunner::run(&mixed(), &config.with_parallel(true)).unwrap();

        assert_eq!(sequential.layout, parallel.layout);
        assert_eq!(sequential.best_fitness, parallel.best_fitness);
    }

    #[test]
    fn test_shape_wider_than_sheet_fails_before_running() {
        let err = LayoutProblem::new(
            Sheet::new(20.0, 10.0),
            vec![Shape::rectangular(21.0, 5.0)],
        )
        .unwrap_err();
        assert!(matches!(err, Error::ShapeDoesNotFit { index: 0, .. }));

        let records = vec![ShapeRecord::rectangular(21.0, 5.0)];
        let calls = RefCell::new(0);
        let sink = |_: &[ShapeRecord], _: &str| *calls.borrow_mut() += 1;
        let result = PsoRunner::optimize_and_display(
            Sheet::new(20.0, 10.0),
            &records,
            &PsoConfig::default(),
            &sink,
        );
        assert!(matches!(result, Err(Error::ShapeDoesNotFit { .. })));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_zero_particles_is_configuration_error() {
        let config = PsoConfig::default().with_num_particles(0);
        let err = PsoRunner::run(&two_squares(), &config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_iterations_is_configuration_error() {
        let config = PsoConfig::default().with_num_iterations(0);
        assert!(PsoRunner::run(&two_squares(), &config).is_err());
    }

    #[test]
    fn test_cancellation() {
        let config = PsoConfig::default()
            .with_num_particles(10)
            .with_num_iterations(10_000)
            .with_seed(42);

        // Set before running: the run stops after its first iteration.
        let cancel = Arc::new(AtomicBool::new(true));
        let result = PsoRunner::run_with_cancel(&two_squares(), &config, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.iterations, 1);
        assert!(result.best_fitness.is_finite());
    }

    #[test]
    fn test_stagnation_stops_early() {
        let config = PsoConfig::default()
            .with_num_particles(20)
            .with_num_iterations(5_000)
            .with_stagnation_limit(10)
            .with_seed(42)
            .with_parallel(false);

        let result = PsoRunner::run(&two_squares(), &config).unwrap();

        assert!(result.stagnated);
        assert!(result.iterations < 5_000);
        assert_eq!(result.fitness_history.len(), result.iterations);
    }

    #[test]
    fn test_optimize_and_display() {
        let records = vec![
            ShapeRecord::rectangular(8.0, 8.0),
            ShapeRecord::circular(2.0),
        ];
        let seen = RefCell::new(Vec::new());
        let sink = |layout: &[ShapeRecord], title: &str| {
            seen.borrow_mut().push((title.to_string(), layout.to_vec()));
        };
        let config = PsoConfig::default()
            .with_num_particles(20)
            .with_num_iterations(50)
            .with_seed(5);

        let optimized =
            PsoRunner::optimize_and_display(Sheet::new(20.0, 10.0), &records, &config, &sink)
                .unwrap();

        assert_eq!(optimized.len(), 2);
        assert!(optimized.iter().all(|r| r.position().is_some()));
        assert_eq!(optimized[1].radius, Some(2.0));

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, INITIAL_LAYOUT_TITLE);
        assert_eq!(seen[0].1, records);
        assert_eq!(seen[1].0, OPTIMIZED_LAYOUT_TITLE);
        assert_eq!(seen[1].1, optimized);
    }
}
