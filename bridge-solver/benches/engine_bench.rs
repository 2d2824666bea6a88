//! Benchmarks for the bridge analysis pipeline

use bridge_solver::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn create_truss(panels: usize) -> BridgeModel {
    let mut model = BridgeModel::new();

    let panel = 300.0;
    let rise = 250.0;

    for i in 0..=panels {
        model.add_node(i as f64 * panel, 0.0);
    }
    for i in 0..panels {
        model.add_node((i as f64 + 0.5) * panel, rise);
    }

    let top = |i: usize| panels + 1 + i;

    for i in 0..panels {
        model.add_beam(i, i + 1);
        model.add_beam(i, top(i));
        model.add_beam(top(i), i + 1);
    }
    for i in 0..panels.saturating_sub(1) {
        model.add_beam(top(i), top(i + 1));
    }

    model.add_support(0);
    model.add_support(panels);

    for i in 1..panels {
        model.add_load(i, 0.0, -15000.0);
    }

    model
}

fn benchmark_small_truss(c: &mut Criterion) {
    let model = create_truss(4);
    let config = AnalysisConfig::seeded(1);
    c.bench_function("truss_4_panels", |b| {
        b.iter(|| {
            let assessment = analyze(black_box(&model), &config).unwrap();
            black_box(assessment);
        })
    });
}

fn benchmark_large_truss(c: &mut Criterion) {
    let model = create_truss(200);
    let config = AnalysisConfig::seeded(1);
    c.bench_function("truss_200_panels", |b| {
        b.iter(|| {
            let assessment = analyze(black_box(&model), &config).unwrap();
            black_box(assessment);
        })
    });
}

criterion_group!(benches, benchmark_small_truss, benchmark_large_truss);
criterion_main!(benches);
