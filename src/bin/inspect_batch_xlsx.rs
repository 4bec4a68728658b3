//! Inspect a batch workbook: print sheet names, the first rows of a sheet and how
//! the batch reader splits them.
//! Usage: cargo run --bin inspect_batch_xlsx -- path/to/rows.xlsx [sheet]

use std::path::Path;

use calamine::Reader;

use gear_synergy::data::load_batch;
use gear_synergy::parallel::processed_row_count;

fn cell_str(d: &calamine::Data) -> String {
    match d {
        calamine::Data::Empty => String::new(),
        calamine::Data::String(s) => s.clone(),
        calamine::Data::Float(f) => format!("{}", f),
        calamine::Data::Int(i) => format!("{}", i),
        calamine::Data::Bool(b) => format!("{}", b),
        _ => format!("{:?}", d),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: inspect_batch_xlsx <path-to.xlsx> [sheet]")?;
    let wanted = std::env::args().nth(2);
    let path = Path::new(&path);
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let mut wb = calamine::open_workbook_auto(path)?;
    let names = wb.sheet_names();
    println!("Sheets ({}): {}", names.len(), names.join(", "));

    let sheet_name = match &wanted {
        Some(name) => names.iter().find(|s| *s == name),
        None => names.first(),
    }
    .ok_or("No such sheet")?;
    println!("\nUsing sheet: {}", sheet_name);

    let range = wb.worksheet_range(sheet_name)?;
    let (height, width) = range.get_size();
    println!("Size: {} rows x {} cols\nFirst 10 rows:", height, width);
    for (i, row) in range.rows().take(10).enumerate() {
        let cells: Vec<String> = row.iter().map(cell_str).collect();
        println!("  {}: {}", i, cells.join(" | "));
    }

    let batch = load_batch(path, Some(sheet_name.as_str()))?;
    let slots = batch.equipment_ids.first().map(Vec::len).unwrap_or(0);
    println!(
        "\nBatch: {} rows, {} slots per row, {} processed (leading positive unit ids)",
        batch.len(),
        slots,
        processed_row_count(&batch.unit_ids)
    );
    Ok(())
}
