//! Velocity and position update rules.
//!
//! ```text
//! v' = w·v + c1·r1·(pbest - x) + c2·r2·(gbest - x) [+ repulsion]
//! x' = clamp(x + v', 0, sheet_dim - extent)
//! ```
//!
//! `r1` and `r2` are drawn independently per axis on every call.

use super::config::PsoConfig;
use crate::geometry::{Shape, Vec2};
use rand::Rng;

/// Standard PSO velocity for one 2D coordinate.
pub(crate) fn pso_velocity<R: Rng>(
    config: &PsoConfig,
    velocity: Vec2,
    position: Vec2,
    personal_best: Vec2,
    global_best: Vec2,
    rng: &mut R,
) -> Vec2 {
    let r1 = Vec2::new(rng.random::<f64>(), rng.random::<f64>());
    let r2 = Vec2::new(rng.random::<f64>(), rng.random::<f64>());

    let axis = |v: f64, x: f64, p: f64, g: f64, r1: f64, r2: f64| {
        config.inertia * v + config.cognitive * r1 * (p - x) + config.social * r2 * (g - x)
    };

    Vec2::new(
        axis(velocity.x, position.x, personal_best.x, global_best.x, r1.x, r2.x),
        axis(velocity.y, position.y, personal_best.y, global_best.y, r1.y, r2.y),
    )
}

/// Repulsive force on shape `index` from every shape whose bounding box
/// currently overlaps its own.
///
/// Each overlapping neighbour contributes `factor * (centre_self -
/// centre_other)`.
pub(crate) fn repulsion(shapes: &[Shape], positions: &[Vec2], index: usize, factor: f64) -> Vec2 {
    let own = shapes[index].bounding_box(positions[index]);
    let own_center = own.center();

    shapes
        .iter()
        .zip(positions)
        .enumerate()
        .filter(|&(j, _)| j != index)
        .map(|(_, (shape, &pos))| shape.bounding_box(pos))
        .filter(|other| own.overlaps(other))
        .fold(Vec2::ZERO, |force, other| {
            force + (own_center - other.center()) * factor
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_zero_coefficients_keep_inertia() {
        let config = PsoConfig::default()
            .with_inertia(0.5)
            .with_cognitive(0.0)
            .with_social(0.0);
        let mut rng = create_rng(3);
        let v = pso_velocity(
            &config,
            Vec2::new(2.0, -4.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(9.0, 9.0),
            Vec2::new(-9.0, -9.0),
            &mut rng,
        );
        assert_eq!(v, Vec2::new(1.0, -2.0));
    }

    #[test]
    fn test_attraction_points_towards_bests() {
        let config = PsoConfig::default().with_inertia(0.0);
        let mut rng = create_rng(11);
        for _ in 0..50 {
            let v = pso_velocity(
                &config,
                Vec2::ZERO,
                Vec2::new(5.0, 5.0),
                Vec2::new(8.0, 8.0),
                Vec2::new(10.0, 6.0),
                &mut rng,
            );
            assert!(v.x >= 0.0 && v.y >= 0.0);
            // c1 * 3 + c2 * 5 at most on x
            assert!(v.x <= 1.5 * 3.0 + 1.5 * 5.0);
        }
    }

    #[test]
    fn test_at_best_position_only_inertia_remains() {
        let config = PsoConfig::default();
        let mut rng = create_rng(5);
        let p = Vec2::new(4.0, 4.0);
        let v = pso_velocity(&config, Vec2::splat(1.0), p, p, p, &mut rng);
        assert_eq!(v, Vec2::splat(0.5));
    }

    #[test]
    fn test_repulsion_pushes_apart() {
        let shapes = [Shape::rectangular(4.0, 4.0), Shape::rectangular(4.0, 4.0)];
        let positions = [Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0)];
        let f0 = repulsion(&shapes, &positions, 0, 0.7);
        let f1 = repulsion(&shapes, &positions, 1, 0.7);
        assert!((f0.x - (-1.4)).abs() < 1e-12 && (f0.y - (-0.7)).abs() < 1e-12);
        assert_eq!(f0, f1 * -1.0);
    }

    #[test]
    fn test_repulsion_ignores_touching_and_distant() {
        let shapes = [Shape::rectangular(4.0, 4.0), Shape::circular(2.0), Shape::diamond(1.0, 1.0)];
        let positions = [Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(20.0, 20.0)];
        assert_eq!(repulsion(&shapes, &positions, 0, 0.7), Vec2::ZERO);
    }

    #[test]
    fn test_repulsion_sums_neighbours() {
        let shapes = [Shape::rectangular(2.0, 2.0); 3];
        let positions = [Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0), Vec2::new(2.0, 1.0)];
        // symmetric neighbours cancel out
        assert_eq!(repulsion(&shapes, &positions, 0, 1.0), Vec2::ZERO);
    }
}
