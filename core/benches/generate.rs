use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use duosweep_core::{BoardGenerator, Difficulty, RandomBoardGenerator, Rules};
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let rules = Rules::default();
    let mut group = c.benchmark_group("generate");

    for difficulty in Difficulty::ALL {
        let Ok(config) = rules.profile(difficulty).board_config() else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(difficulty), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(RandomBoardGenerator::new(seed).generate(config))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
