//! Batch input files: one row per unit, laid out like the scoring sheet.
//!
//! Column 1 is the unit id, followed by `k` equipment ids and `k` refinement
//! levels (`width = 1 + 2k`). Cells are kept loosely typed; coercion happens at
//! evaluation. An optional header row whose first cell is `unit_id` or
//! `ship_id` is skipped. JSON files hold a serialized [BatchInput] directly.

use std::fs;
use std::path::Path;

use calamine::Reader;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::loose::LooseNumber;
use crate::error::DataError;

const HEADER_MARKERS: &[&str] = &["unit_id", "ship_id"];

/// The three parallel sequences the batch evaluator consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchInput {
    pub unit_ids: Vec<LooseNumber>,
    pub equipment_ids: Vec<Vec<LooseNumber>>,
    pub refinement_levels: Vec<Vec<LooseNumber>>,
}

impl BatchInput {
    /// Split sheet-shaped rows into the three sequences.
    ///
    /// The first row whose unit id is not positive (blank cells count as
    /// 0) ends the batch: it is kept as the terminator with no equipment, and
    /// nothing after it is read, so trailing notes or totals may have any
    /// width.
    pub fn from_rows<I>(rows: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = Vec<LooseNumber>>,
    {
        let mut input = BatchInput::default();
        for (index, row) in rows.into_iter().enumerate() {
            if index == 0 && is_header(&row) {
                continue;
            }
            let unit_id = row.first().cloned().unwrap_or_default();
            if !unit_id.is_positive_id() {
                debug!(row = index, "batch ends at non-positive unit id");
                input.push(unit_id, Vec::new(), Vec::new());
                break;
            }
            let width = row.len();
            if width % 2 == 0 {
                return Err(DataError::Layout { row: index, width });
            }
            let slots = (width - 1) / 2;
            let mut cells = row.into_iter().skip(1);
            let equipment: Vec<LooseNumber> = cells.by_ref().take(slots).collect();
            let levels: Vec<LooseNumber> = cells.collect();
            input.push(unit_id, equipment, levels);
        }
        Ok(input)
    }

    fn push(&mut self, unit_id: LooseNumber, equipment: Vec<LooseNumber>, levels: Vec<LooseNumber>) {
        self.unit_ids.push(unit_id);
        self.equipment_ids.push(equipment);
        self.refinement_levels.push(levels);
    }

    pub fn len(&self) -> usize {
        self.unit_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unit_ids.is_empty()
    }
}

fn is_header(row: &[LooseNumber]) -> bool {
    match row.first() {
        Some(LooseNumber::Text(text)) => HEADER_MARKERS
            .iter()
            .any(|marker| text.trim().eq_ignore_ascii_case(marker)),
        _ => false,
    }
}

/// Read a batch file. `sheet` picks a worksheet of a workbook (first sheet by
/// default) and is ignored for other formats.
pub fn load_batch(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<BatchInput, DataError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let input = match extension.as_deref() {
        Some("csv") => load_csv(path)?,
        Some("xlsx" | "xlsm" | "xls" | "ods") => load_workbook(path, sheet)?,
        Some("json") => load_json(path)?,
        _ => {
            return Err(DataError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };
    debug!(path = %path.display(), rows = input.len(), "batch loaded");
    Ok(input)
}

fn load_csv(path: &Path) -> Result<BatchInput, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(LooseNumber::from).collect());
    }
    BatchInput::from_rows(rows)
}

fn load_workbook(path: &Path, sheet: Option<&str>) -> Result<BatchInput, DataError> {
    let mut workbook = calamine::open_workbook_auto(path)?;
    let names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|name| name.as_str() == wanted)
            .cloned()
            .ok_or_else(|| DataError::SheetNotFound(wanted.to_string()))?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| DataError::SheetNotFound("<first sheet>".to_string()))?,
    };
    let range = workbook.worksheet_range(&sheet_name)?;
    BatchInput::from_rows(
        range
            .rows()
            .map(|row| row.iter().map(LooseNumber::from).collect()),
    )
}

fn load_json(path: &Path) -> Result<BatchInput, DataError> {
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("gear-synergy-{name}-{stamp}.{extension}"))
    }

    fn text_row(cells: &[&str]) -> Vec<LooseNumber> {
        cells.iter().map(|&cell| LooseNumber::from(cell)).collect()
    }

    #[test]
    fn rows_split_into_unit_equipment_and_refinements() {
        let input = BatchInput::from_rows(vec![
            text_row(&["unit_id", "g1", "g2", "r1", "r2"]),
            text_row(&["526", "19", "19", "0", "3"]),
            text_row(&["894"]),
        ])
        .unwrap();
        assert_eq!(input.len(), 2);
        assert_eq!(input.unit_ids[0].as_id(), 526);
        assert_eq!(input.equipment_ids[0].len(), 2);
        assert_eq!(input.refinement_levels[0][1].truncate(), 3);
        assert!(input.equipment_ids[1].is_empty());
    }

    #[test]
    fn even_width_rows_are_rejected() {
        let err = BatchInput::from_rows(vec![text_row(&["526", "19"])]).unwrap_err();
        assert!(matches!(err, DataError::Layout { row: 0, width: 2 }));
    }

    #[test]
    fn blank_row_ends_the_batch() {
        let input = BatchInput::from_rows(vec![
            text_row(&["526", "19", "0"]),
            text_row(&["", ""]),
            text_row(&["89", "19", "0"]),
        ])
        .unwrap();
        assert_eq!(input.len(), 2);
        assert!(!input.unit_ids[1].is_positive_id());
        assert!(input.equipment_ids[1].is_empty());
    }

    #[test]
    fn rows_after_the_terminator_skip_layout_checks() {
        let input = BatchInput::from_rows(vec![
            text_row(&["526", "19", "0"]),
            text_row(&["0", "note"]),
            text_row(&["total", "12", "3", "4"]),
        ])
        .unwrap();
        assert_eq!(input.len(), 2);
        assert_eq!(input.unit_ids[1].as_id(), 0);

        // A text terminator with even width is accepted too.
        let input = BatchInput::from_rows(vec![
            text_row(&["894", "228", "0"]),
            text_row(&["total", "8"]),
        ])
        .unwrap();
        assert_eq!(input.len(), 2);
        assert!(!input.unit_ids[1].is_positive_id());
    }

    #[test]
    fn csv_files_load_with_ragged_rows() {
        let path = unique_temp_path("batch", "csv");
        fs::write(&path, "ship_id,g1,r1\n526,19,0\n894,19,228,0,2\n").unwrap();
        let input = load_batch(&path, None).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(input.len(), 2);
        assert_eq!(input.equipment_ids[1].len(), 2);
        assert_eq!(input.refinement_levels[1][1].truncate(), 2);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = load_batch("rows.txt", None).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFormat { .. }));
    }
}
