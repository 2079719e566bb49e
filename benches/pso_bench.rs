//! Criterion benchmarks for u-pso-layout.
//!
//! Measures fitness evaluation cost and full optimization runs for both
//! particle representations on synthetic shape sets.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_pso_layout::geometry::{Shape, Sheet, Vec2};
use u_pso_layout::pso::{LayoutProblem, PsoConfig, PsoRunner};
use u_pso_layout::random::create_rng;

fn mixed_problem(n: usize) -> LayoutProblem {
    let shapes = (0..n)
        .map(|i| match i % 3 {
            0 => Shape::rectangular(4.0 + (i % 5) as f64, 3.0 + (i % 4) as f64),
            1 => Shape::diamond(5.0, 4.0 + (i % 3) as f64),
            _ => Shape::circular(1.5 + (i % 4) as f64 * 0.5),
        })
        .collect();
    LayoutProblem::new(Sheet::new(100.0, 60.0), shapes).expect("valid benchmark problem")
}

// ===========================================================================
// Fitness evaluation
// ===========================================================================

fn bench_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_fitness");
    for n in [10, 50, 200] {
        let problem = mixed_problem(n);
        let mut rng = create_rng(42);
        let positions: Vec<Vec2> = problem
            .shapes()
            .iter()
            .map(|s| {
                let max = problem.sheet().max_position(s);
                Vec2::new(rng.random_range(0.0..=max.x), rng.random_range(0.0..=max.y))
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &positions, |b, positions| {
            b.iter(|| black_box(problem.layout_fitness(black_box(positions))))
        });
    }
    group.finish();
}

// ===========================================================================
// Full runs
// ===========================================================================

fn bench_full_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("pso_full_layout");
    group.sample_size(10);
    for n in [10, 30] {
        let problem = mixed_problem(n);
        let config = PsoConfig::default()
            .with_num_particles(30)
            .with_num_iterations(100)
            .with_seed(42);

        group.bench_with_input(BenchmarkId::from_parameter(n), &problem, |b, problem| {
            b.iter(|| black_box(PsoRunner::run(problem, &config).expect("valid config")))
        });
    }
    group.finish();
}

fn bench_per_shape(c: &mut Criterion) {
    let problem = mixed_problem(30);
    let config = PsoConfig::per_shape().with_num_iterations(200).with_seed(42);

    c.bench_function("pso_per_shape_30", |b| {
        b.iter(|| black_box(PsoRunner::run(&problem, &config).expect("valid config")))
    });
}

criterion_group!(benches, bench_fitness, bench_full_layout, bench_per_shape);
criterion_main!(benches);
