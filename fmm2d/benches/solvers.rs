use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};

use fmm2d::{
    traits::fmm::{Solver, SourceToTargetTranslation, TargetTranslation},
    tree::helpers::{points_fixture, targets_from},
    BarnesHutBuilder, MlfmmBuilder,
};

fn benchmark_mlfmm(c: &mut Criterion) {
    let mut group = c.benchmark_group("MLFMM");
    group
        .sample_size(10)
        .measurement_time(Duration::from_secs(5));

    for (n_points, levels, degree) in [(1024, 5, 6), (4096, 6, 12)] {
        let sources = points_fixture(n_points, Some(0));
        let targets = targets_from(&points_fixture(n_points, Some(1)));

        let mut fmm = MlfmmBuilder::new()
            .levels(levels)
            .degree(degree)
            .build()
            .unwrap();
        for source in sources.iter() {
            fmm.add_source(source).unwrap();
        }
        for target in targets.iter() {
            fmm.add_target(target).unwrap();
        }

        group.bench_function(
            format!("levels={levels} degree={degree} n_points={n_points}"),
            |b| b.iter(|| fmm.solve().unwrap()),
        );

        group.bench_function(
            format!("levels={levels} degree={degree} n_points={n_points}, M2L"),
            |b| {
                b.iter(|| {
                    for level in 2..=fmm.grid.depth() {
                        fmm.m2l(level).unwrap();
                    }
                })
            },
        );

        group.bench_function(
            format!("levels={levels} degree={degree} n_points={n_points}, P2P"),
            |b| b.iter(|| fmm.p2p().unwrap()),
        );

        group.bench_function(format!("direct n_points={n_points}"), |b| {
            b.iter(|| fmm.direct_solve())
        });
    }
}

fn benchmark_barnes_hut(c: &mut Criterion) {
    let mut group = c.benchmark_group("Barnes-Hut");
    group
        .sample_size(10)
        .measurement_time(Duration::from_secs(5));

    for (n_points, max_depth) in [(1024, 5), (4096, 6)] {
        let sources = points_fixture(n_points, Some(0));
        let targets = targets_from(&sources);

        let mut bh = BarnesHutBuilder::new()
            .max_depth(max_depth)
            .theta(4.0)
            .build()
            .unwrap();
        for source in sources.iter() {
            bh.add_source(source).unwrap();
        }
        for target in targets.iter() {
            bh.add_target(target).unwrap();
        }

        group.bench_function(
            format!("max_depth={max_depth} n_points={n_points}"),
            |b| b.iter(|| bh.solve().unwrap()),
        );
    }
}

criterion_group!(solvers, benchmark_mlfmm, benchmark_barnes_hut);
criterion_main!(solvers);
