pub mod bonus;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod parallel;
pub mod telemetry;

pub use bonus::{AttackerProfile, AttributeResolver, Scorer};
pub use data::{LooseNumber, MasterData};
pub use error::{BatchError, DataError};
pub use parallel::{
    compute_additive_bonus, compute_minimum_bonus, evaluate_batch, explain_additive, WorkerPool,
};
