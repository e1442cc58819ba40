//! Performance measurement for partition analysis and propagating synthesis

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use patchloom::algorithm::model::ModelAggregator;
use patchloom::io::image::fill_random;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

/// Measures the full build-and-synthesize pipeline at growing source sizes
fn bench_model_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_pipeline");

    for size in &[16usize, 32, 64] {
        let mut rng = StdRng::seed_from_u64(12345);
        let Ok(source) = fill_random(*size, *size, 4, 4, &mut rng) else {
            group.finish();
            return;
        };

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut aggregator = ModelAggregator::new(12345);
                let Ok(mut model) = aggregator.build("bench", source.clone(), 4, 4) else {
                    return;
                };
                if aggregator.synthesize(&mut model).is_err() {
                    return;
                }
                black_box(&model.output);
            });
        });
    }

    group.finish();
}

/// Measures analysis alone by rebuilding models without synthesis
fn bench_model_analysis(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(6789);
    let Ok(source) = fill_random(64, 64, 8, 8, &mut rng) else {
        return;
    };

    c.bench_function("model_analysis_64", |b| {
        b.iter(|| {
            let mut aggregator = ModelAggregator::new(6789);
            let model = aggregator.build("bench", source.clone(), 8, 8);
            black_box(model.is_ok());
        });
    });
}

criterion_group!(benches, bench_model_pipeline, bench_model_analysis);
criterion_main!(benches);
