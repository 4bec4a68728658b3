use gear_synergy::data::{load_batch, loose_row};
use gear_synergy::{
    compute_additive_bonus, compute_minimum_bonus, evaluate_batch, BatchError, LooseNumber,
    MasterData, Scorer, WorkerPool,
};

fn master() -> MasterData {
    MasterData::load(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/master.json"
    ))
    .expect("fixture master should load")
}

struct Batch {
    units: Vec<LooseNumber>,
    gears: Vec<Vec<LooseNumber>>,
    levels: Vec<Vec<LooseNumber>>,
}

/// A mixed batch exercising both tables, repeated to give the pool some work.
fn sample_batch(repeat: usize) -> Batch {
    let rows: &[(i64, &[i64], &[i64])] = &[
        (526, &[19, 19], &[0, 0]),
        (894, &[228], &[0]),
        (154, &[44, 288, 47], &[0, 0, 0]),
        (145, &[488, 488], &[5, 10]),
        (646, &[389, 69], &[0, 0]),
        (883, &[373, 372, 0, 0, 0, 0], &[0, 0, 0, 0, 0, 0]),
        (515, &[425, 424], &[7, 10]),
        (9999, &[19, 373], &[0, 0]),
    ];
    let mut batch = Batch {
        units: Vec::new(),
        gears: Vec::new(),
        levels: Vec::new(),
    };
    for _ in 0..repeat {
        for (unit, gears, levels) in rows {
            batch.units.push(LooseNumber::from(*unit));
            batch.gears.push(loose_row(*gears));
            batch.levels.push(loose_row(*levels));
        }
    }
    batch
}

#[test]
fn additive_bonuses_match_hand_computed_values() {
    let master = master();
    let batch = sample_batch(1);
    let bonuses = compute_additive_bonus(&master, &batch.units, &batch.gears, &batch.levels)
        .expect("well-formed batch");
    assert_eq!(bonuses, vec![6, 8, 8, 16, 12, 3, 4, 0]);
}

#[test]
fn minimum_bonuses_match_hand_computed_values() {
    let master = master();
    let batch = sample_batch(1);
    let bonuses = compute_minimum_bonus(&master, &batch.units, &batch.gears, &batch.levels)
        .expect("well-formed batch");
    assert_eq!(bonuses, vec![0, 0, 0, 0, 0, 2, 1, 0]);
}

#[test]
fn parallel_evaluation_matches_sequential_in_row_order() {
    let master = master();
    let batch = sample_batch(50);
    for scorer in [Scorer::Additive, Scorer::Minimum] {
        let sequential = evaluate_batch(
            &master,
            scorer,
            &batch.units,
            &batch.gears,
            &batch.levels,
            &WorkerPool::sequential(),
        )
        .expect("sequential run");
        let parallel = evaluate_batch(
            &master,
            scorer,
            &batch.units,
            &batch.gears,
            &batch.levels,
            &WorkerPool::with_workers(4),
        )
        .expect("parallel run");
        assert_eq!(sequential.len(), batch.units.len());
        assert_eq!(sequential, parallel);
    }
}

#[test]
fn evaluation_is_repeatable() {
    let master = master();
    let batch = sample_batch(3);
    let first = compute_additive_bonus(&master, &batch.units, &batch.gears, &batch.levels);
    let second = compute_additive_bonus(&master, &batch.units, &batch.gears, &batch.levels);
    assert_eq!(first, second);
}

#[test]
fn empty_and_zero_led_batches_yield_nothing() {
    let master = master();
    assert_eq!(compute_additive_bonus(&master, &[], &[], &[]), Ok(vec![]));
    let units = vec![LooseNumber::from(0), LooseNumber::from(526)];
    // Nothing after the terminating id is read, so missing rows are fine.
    assert_eq!(compute_minimum_bonus(&master, &units, &[], &[]), Ok(vec![]));
}

#[test]
fn text_ids_are_truncated_before_lookup() {
    let master = master();
    let units = vec![LooseNumber::from("526.7")];
    let gears = vec![vec![LooseNumber::from("19"), LooseNumber::from(19.9)]];
    let levels = vec![loose_row(&[0, 0])];
    assert_eq!(
        compute_additive_bonus(&master, &units, &gears, &levels),
        Ok(vec![6])
    );
}

#[test]
fn shape_violations_abort_the_batch() {
    let master = master();
    let batch = sample_batch(1);
    let mut levels = batch.levels.clone();
    levels[3].pop();
    assert_eq!(
        compute_additive_bonus(&master, &batch.units, &batch.gears, &levels),
        Err(BatchError::RefinementShape {
            row: 3,
            slots: 2,
            levels: 1
        })
    );
}

#[test]
fn json_batch_files_load_directly() {
    let path = std::env::temp_dir().join(format!(
        "gear-synergy-batch-{}.json",
        std::process::id()
    ));
    std::fs::write(
        &path,
        r#"{"unit_ids":[526,"894"],"equipment_ids":[[19,19],[228]],"refinement_levels":[[0,0],[0]]}"#,
    )
    .expect("batch json should be written");
    let batch = load_batch(&path, None).expect("json batch loads");
    let _ = std::fs::remove_file(&path);

    let bonuses = compute_additive_bonus(
        &master(),
        &batch.unit_ids,
        &batch.equipment_ids,
        &batch.refinement_levels,
    );
    assert_eq!(bonuses, Ok(vec![6, 8]));
}
