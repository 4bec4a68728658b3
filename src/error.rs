use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading catalogs, registries or batch files from disk.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("unable to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse json '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("sheet '{0}' not found in workbook")]
    SheetNotFound(String),
    #[error("batch row {row} has {width} columns; expected 1 + 2k (unit id, k equipment ids, k refinement levels)")]
    Layout { row: usize, width: usize },
    #[error("unsupported batch file '{}' (expected .csv, .xlsx or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Caller contract violations in the shape of a batch.
///
/// These abort the whole evaluation; a malformed batch never yields partial output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("row {row}: no equipment row supplied for a positive unit id")]
    MissingEquipmentRow { row: usize },
    #[error("row {row}: no refinement row supplied for a positive unit id")]
    MissingRefinementRow { row: usize },
    #[error("row {row}: {slots} equipment slots but only {levels} refinement levels")]
    RefinementShape {
        row: usize,
        slots: usize,
        levels: usize,
    },
}
