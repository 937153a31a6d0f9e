//! Benchmarks for load plan generation and analysis.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use u_loadplan_core::{CargoItem, Planner, VehicleSpec};
use u_loadplan_engine::LoadPlanner;

fn mixed_cargo(count: usize) -> Vec<CargoItem> {
    (0..count)
        .filter_map(|i| {
            let scale = 0.5 + (i % 4) as f64 * 0.15;
            CargoItem::new(
                format!("C{}", i),
                50.0 + (i % 7) as f64 * 40.0,
                scale,
                scale * 0.8,
                0.4 + (i % 3) as f64 * 0.2,
            )
            .ok()
        })
        .collect()
}

fn planner_benchmark(c: &mut Criterion) {
    let vehicle = VehicleSpec::new(12.0, 2.4, 2.6, 20000.0).unwrap();
    let planner = LoadPlanner::default_config();

    let small = mixed_cargo(10);
    c.bench_function("generate_10_items", |b| {
        b.iter(|| {
            let result = planner.generate(black_box(&vehicle), black_box(&small));
            black_box(result)
        })
    });

    let large = mixed_cargo(40);
    c.bench_function("generate_40_items", |b| {
        b.iter(|| {
            let result = planner.generate(black_box(&vehicle), black_box(&large));
            black_box(result)
        })
    });

    if let Ok(plan) = planner.generate(&vehicle, &large) {
        c.bench_function("analyze_40_items", |b| {
            b.iter(|| {
                let result = planner.analyze(
                    black_box(&vehicle),
                    black_box(&large),
                    black_box(&plan.placements),
                );
                black_box(result)
            })
        });
    }
}

criterion_group!(benches, planner_benchmark);
criterion_main!(benches);
