//! Compare sequential vs parallel batch evaluation.
//!
//! Run with: `cargo bench --bench batch`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gear_synergy::data::loose_row;
use gear_synergy::{evaluate_batch, LooseNumber, MasterData, Scorer, WorkerPool};

const ROWS: usize = 4096;

/// Cycle a few fixture units through a large batch.
fn batch() -> (Vec<LooseNumber>, Vec<Vec<LooseNumber>>, Vec<Vec<LooseNumber>>) {
    let templates: &[(i64, [i64; 6])] = &[
        (526, [19, 19, 0, 0, 0, 0]),
        (145, [488, 488, 47, 0, 0, 0]),
        (646, [389, 69, 326, 0, 0, 0]),
        (883, [373, 372, 374, 0, 0, 0]),
        (515, [425, 424, 425, 0, 0, 0]),
        (662, [326, 25, 26, 149, 0, 0]),
    ];
    let mut units = Vec::with_capacity(ROWS);
    let mut gears = Vec::with_capacity(ROWS);
    let mut levels = Vec::with_capacity(ROWS);
    for i in 0..ROWS {
        let (unit, slots) = templates[i % templates.len()];
        units.push(LooseNumber::from(unit));
        gears.push(loose_row(&slots));
        levels.push(loose_row(&[(i % 11) as i64; 6]));
    }
    (units, gears, levels)
}

fn bench_batch_sequential_vs_parallel(c: &mut Criterion) {
    let master = MasterData::load(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/master.json"
    ))
    .expect("fixture master should load");
    let (units, gears, levels) = batch();

    let mut group = c.benchmark_group("batch");
    group.sample_size(20);

    for scorer in [Scorer::Additive, Scorer::Minimum] {
        for (label, pool) in [
            ("sequential", WorkerPool::sequential()),
            ("parallel", WorkerPool::default_workers()),
        ] {
            group.bench_function(format!("{}_{}", scorer.command(), label), |b| {
                b.iter(|| {
                    black_box(evaluate_batch(
                        &master,
                        scorer,
                        &units,
                        &gears,
                        &levels,
                        &pool,
                    ))
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_batch_sequential_vs_parallel);
criterion_main!(benches);
