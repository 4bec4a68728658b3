use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::data::DEFAULT_MASTER_PATH;
use crate::parallel::WorkerPool;

pub const MASTER_VAR: &str = "GEAR_SYNERGY_MASTER";
pub const LOG_VAR: &str = "GEAR_SYNERGY_LOG";
pub const WORKERS_VAR: &str = "GEAR_SYNERGY_WORKERS";

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Process-wide settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub master_path: PathBuf,
    pub log_filter: String,
    pub workers: usize,
    /// Values that were present but unusable. Reported once logging is up.
    pub rejected: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            master_path: PathBuf::from(DEFAULT_MASTER_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            workers: 0,
            rejected: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(MASTER_VAR) {
            config.master_path = PathBuf::from(path);
        }
        if let Some(filter) = read(LOG_VAR) {
            config.log_filter = filter;
        }
        if let Some(raw) = read(WORKERS_VAR) {
            match raw.parse::<usize>() {
                Ok(workers) => config.workers = workers,
                Err(_) => config
                    .rejected
                    .push(format!("{WORKERS_VAR}='{raw}' is not a thread count")),
            }
        }
        config
    }

    pub fn worker_pool(&self) -> WorkerPool {
        WorkerPool::with_workers(self.workers)
    }

    pub fn report_rejected(&self) {
        for message in &self.rejected {
            warn!("{message}; using the default");
        }
    }
}
