//! Batch Evaluator: one bonus per processed row, in row order.
//!
//! The three inputs are parallel sequences indexed by row. Only the leading run
//! of positive unit ids is processed; the first non-positive id ends the batch
//! and nothing after it is read or validated. Rows never depend on each other,
//! so [evaluate_batch] may spread them across a Rayon pool.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::bonus::asw::{self, BonusContribution};
use crate::bonus::{AttackerProfile, AttributeResolver, Capabilities, Scorer};
use crate::data::{LooseNumber, MasterData};
use crate::error::BatchError;
use crate::parallel::pool::WorkerPool;

/// Leading unit ids that are positive after truncation.
pub fn processed_row_count(unit_ids: &[LooseNumber]) -> usize {
    unit_ids
        .iter()
        .take_while(|id| id.is_positive_id())
        .count()
}

/// Every processed row needs an equipment row and at least as many refinement
/// levels as equipment slots.
fn check_shape(
    rows: usize,
    equipment_ids: &[Vec<LooseNumber>],
    refinement_levels: &[Vec<LooseNumber>],
) -> Result<(), BatchError> {
    for row in 0..rows {
        let slots = equipment_ids
            .get(row)
            .ok_or(BatchError::MissingEquipmentRow { row })?;
        let levels = refinement_levels
            .get(row)
            .ok_or(BatchError::MissingRefinementRow { row })?;
        if levels.len() < slots.len() {
            return Err(BatchError::RefinementShape {
                row,
                slots: slots.len(),
                levels: levels.len(),
            });
        }
    }
    Ok(())
}

fn prepare(
    unit_ids: &[LooseNumber],
    equipment_ids: &[Vec<LooseNumber>],
    refinement_levels: &[Vec<LooseNumber>],
) -> Result<usize, BatchError> {
    let rows = processed_row_count(unit_ids);
    check_shape(rows, equipment_ids, refinement_levels)?;
    debug!(rows, supplied = unit_ids.len(), "batch sized");
    Ok(rows)
}

fn score_row(
    resolver: &AttributeResolver<'_>,
    scorer: Scorer,
    unit_id: &LooseNumber,
    equipment_ids: &[LooseNumber],
    refinement_levels: &[LooseNumber],
) -> i32 {
    let profile = AttackerProfile::build(resolver, unit_id, equipment_ids, refinement_levels);
    scorer.score(&profile)
}

fn evaluate_sequential(
    master: &MasterData,
    scorer: Scorer,
    unit_ids: &[LooseNumber],
    equipment_ids: &[Vec<LooseNumber>],
    refinement_levels: &[Vec<LooseNumber>],
) -> Result<Vec<i32>, BatchError> {
    let rows = prepare(unit_ids, equipment_ids, refinement_levels)?;
    let resolver = AttributeResolver::new(master);
    Ok((0..rows)
        .map(|row| {
            score_row(
                &resolver,
                scorer,
                &unit_ids[row],
                &equipment_ids[row],
                &refinement_levels[row],
            )
        })
        .collect())
}

/// Additive (ASW) bonus per processed row.
pub fn compute_additive_bonus(
    master: &MasterData,
    unit_ids: &[LooseNumber],
    equipment_ids: &[Vec<LooseNumber>],
    refinement_levels: &[Vec<LooseNumber>],
) -> Result<Vec<i32>, BatchError> {
    evaluate_sequential(master, Scorer::Additive, unit_ids, equipment_ids, refinement_levels)
}

/// Per-slot minimum (TP) bonus per processed row.
pub fn compute_minimum_bonus(
    master: &MasterData,
    unit_ids: &[LooseNumber],
    equipment_ids: &[Vec<LooseNumber>],
    refinement_levels: &[Vec<LooseNumber>],
) -> Result<Vec<i32>, BatchError> {
    evaluate_sequential(master, Scorer::Minimum, unit_ids, equipment_ids, refinement_levels)
}

/// Score every processed row on `pool`. Output order is row order and matches
/// the sequential functions exactly.
pub fn evaluate_batch(
    master: &MasterData,
    scorer: Scorer,
    unit_ids: &[LooseNumber],
    equipment_ids: &[Vec<LooseNumber>],
    refinement_levels: &[Vec<LooseNumber>],
    pool: &WorkerPool,
) -> Result<Vec<i32>, BatchError> {
    if pool.is_sequential() {
        return evaluate_sequential(master, scorer, unit_ids, equipment_ids, refinement_levels);
    }
    let rows = prepare(unit_ids, equipment_ids, refinement_levels)?;
    let resolver = AttributeResolver::new(master);
    Ok(pool.install(|| {
        (0..rows)
            .into_par_iter()
            .map(|row| {
                score_row(
                    &resolver,
                    scorer,
                    &unit_ids[row],
                    &equipment_ids[row],
                    &refinement_levels[row],
                )
            })
            .collect()
    }))
}

/// One row of an additive breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowReport {
    pub row: usize,
    pub unit_id: i64,
    pub name: String,
    pub bonus: i32,
    pub capabilities: Capabilities,
    pub contributions: Vec<BonusContribution>,
}

/// Additive bonus per processed row with the rule contributions behind it.
pub fn explain_additive(
    master: &MasterData,
    unit_ids: &[LooseNumber],
    equipment_ids: &[Vec<LooseNumber>],
    refinement_levels: &[Vec<LooseNumber>],
) -> Result<Vec<RowReport>, BatchError> {
    let rows = prepare(unit_ids, equipment_ids, refinement_levels)?;
    let resolver = AttributeResolver::new(master);
    Ok((0..rows)
        .map(|row| {
            let profile = AttackerProfile::build(
                &resolver,
                &unit_ids[row],
                &equipment_ids[row],
                &refinement_levels[row],
            );
            let breakdown = asw::explain(&profile);
            RowReport {
                row,
                unit_id: profile.unit_id,
                name: profile.name.to_string(),
                bonus: breakdown.total,
                capabilities: profile.capabilities,
                contributions: breakdown.contributions,
            }
        })
        .collect())
}
