pub mod batch;
pub mod pool;

pub use batch::{
    compute_additive_bonus, compute_minimum_bonus, evaluate_batch, explain_additive,
    processed_row_count, RowReport,
};
pub use pool::WorkerPool;
