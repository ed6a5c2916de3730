//! Benchmarks for site-plan placement.
//!
//! Measures collision queries, the settlement-wide search and connector
//! routing on grid-shaped settlements of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use siteplan_placement::{
    BoundedObject, Building, BuildingType, CollisionEvaluator, SitePlanner, SiteSnapshot,
};

/// `n * n` life-support buildings on a 25-unit grid.
fn grid_settlement(n: usize) -> SiteSnapshot {
    let mut site = SiteSnapshot::new();
    for i in 0..n {
        for j in 0..n {
            let bounds = BoundedObject::new(i as f64 * 25.0, j as f64 * 25.0, 10.0, 12.0, 0.0);
            site = site.with_building(
                Building::new(format!("B{}-{}", i, j), "Lander Hab", bounds)
                    .with_life_support(true),
            );
        }
    }
    site
}

fn bench_collision_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_is_open");

    for &n in &[4, 8, 16] {
        let site = grid_settlement(n);
        let evaluator = CollisionEvaluator::from_index(&site).unwrap();
        let candidate = BoundedObject::new(12.5, 12.5, 6.0, 6.0, 30.0);

        group.bench_with_input(
            BenchmarkId::new("grid", n * n),
            &(evaluator, candidate),
            |b, (e, cand)| b.iter(|| black_box(e.is_open(black_box(cand)))),
        );
    }
    group.finish();
}

fn bench_find_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_placement");
    group.sample_size(20);

    let greenhouse = BuildingType::new("Greenhouse", 8.0, 14.0).with_life_support(true);
    let planner = SitePlanner::default_config();

    for &n in &[2, 4, 8] {
        let site = grid_settlement(n);
        group.bench_with_input(BenchmarkId::new("greenhouse", n * n), &site, |b, s| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| black_box(planner.place(&greenhouse, s, &mut rng)))
        });
    }
    group.finish();
}

fn bench_connector_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("connector_routing");
    group.sample_size(10);

    let hallway = BuildingType::connector("Hallway", 2.0);
    let planner = SitePlanner::default_config();

    for &n in &[2, 4, 6] {
        let site = grid_settlement(n);
        group.bench_with_input(BenchmarkId::new("hallway", n * n), &site, |b, s| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(planner.place(&hallway, s, &mut rng)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_collision_queries,
    bench_find_placement,
    bench_connector_routing
);
criterion_main!(benches);
