use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::bonus::Scorer;
use crate::config::AppConfig;
use crate::data::registry::MASTER_DATASET;
use crate::data::{
    load_batch, load_registry, registry_path_for, validate_master, MasterData, MasterFile,
};
use crate::parallel::{evaluate_batch, explain_additive, RowReport};

const USAGE: &str = "usage: gear-synergy <asw|tp|validate> [batch-file] [--master path] [--sheet name] [--json] [--explain]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Score(Scorer),
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("validate") => Some(Command::Validate),
        Some(name) => Scorer::from_command(name).map(Command::Score),
        None => None,
    }
}

/// Flags shared by every command. Positional arguments are collected in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub positional: Vec<String>,
    pub master: Option<PathBuf>,
    pub sheet: Option<String>,
    pub json: bool,
    pub explain: bool,
}

pub fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => options.json = true,
            "--explain" => options.explain = true,
            "--master" => {
                let value = iter.next().ok_or("--master needs a path")?;
                options.master = Some(PathBuf::from(value));
            }
            "--sheet" => {
                let value = iter.next().ok_or("--sheet needs a sheet name")?;
                options.sheet = Some(value.clone());
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag '{flag}'")),
            _ => options.positional.push(arg.clone()),
        }
    }
    Ok(options)
}

pub fn run_with_args(args: &[String]) -> i32 {
    run_with_config(args, &AppConfig::from_env())
}

pub fn run_with_config(args: &[String], config: &AppConfig) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let options = match parse_options(args.get(2..).unwrap_or_default()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return 2;
        }
    };
    let master_path = options
        .master
        .clone()
        .unwrap_or_else(|| config.master_path.clone());

    match command {
        Command::Score(scorer) => handle_score(scorer, &options, &master_path, config),
        Command::Validate => handle_validate(&options, &master_path),
    }
}

#[derive(Debug, Serialize)]
struct ScoreLine {
    row: usize,
    unit_id: i64,
    bonus: i32,
}

fn handle_score(scorer: Scorer, options: &Options, master_path: &Path, config: &AppConfig) -> i32 {
    let [input_path] = options.positional.as_slice() else {
        eprintln!(
            "usage: gear-synergy {} <rows.csv|rows.xlsx|rows.json> [--sheet name] [--master path] [--json]{}",
            scorer.command(),
            if scorer == Scorer::Additive { " [--explain]" } else { "" }
        );
        return 2;
    };
    if options.explain && scorer != Scorer::Additive {
        eprintln!("--explain is only available for asw");
        return 2;
    }

    let master = match MasterData::load(master_path) {
        Ok(master) => master,
        Err(err) => {
            eprintln!("failed to load master data: {err}");
            return 1;
        }
    };
    let batch = match load_batch(input_path, options.sheet.as_deref()) {
        Ok(batch) => batch,
        Err(err) => {
            eprintln!("failed to read batch: {err}");
            return 1;
        }
    };

    if options.explain {
        return match explain_additive(
            &master,
            &batch.unit_ids,
            &batch.equipment_ids,
            &batch.refinement_levels,
        ) {
            Ok(reports) => print_reports(&reports, options.json),
            Err(err) => {
                eprintln!("batch rejected: {err}");
                1
            }
        };
    }

    let bonuses = match evaluate_batch(
        &master,
        scorer,
        &batch.unit_ids,
        &batch.equipment_ids,
        &batch.refinement_levels,
        &config.worker_pool(),
    ) {
        Ok(bonuses) => bonuses,
        Err(err) => {
            eprintln!("batch rejected: {err}");
            return 1;
        }
    };
    let lines: Vec<ScoreLine> = bonuses
        .into_iter()
        .enumerate()
        .map(|(row, bonus)| ScoreLine {
            row,
            unit_id: batch.unit_ids[row].as_id(),
            bonus,
        })
        .collect();

    if options.json {
        return print_json(&lines);
    }
    for line in &lines {
        println!("{}\t{}\t{}", line.row, line.unit_id, line.bonus);
    }
    0
}

fn print_reports(reports: &[RowReport], as_json: bool) -> i32 {
    if as_json {
        return print_json(reports);
    }
    for report in reports {
        let mut out = format!("{}\t{}\t{}", report.row, report.unit_id, report.bonus);
        for contribution in &report.contributions {
            let _ = write!(
                out,
                "\n\t#{} {}\t{:+}",
                contribution.rule, contribution.label, contribution.amount
            );
        }
        println!("{out}");
    }
    0
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}

fn handle_validate(options: &Options, master_path: &Path) -> i32 {
    if !options.positional.is_empty() {
        eprintln!("usage: gear-synergy validate [--master path] [--json]");
        return 2;
    }
    let file = match MasterFile::read(master_path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("failed to load master data: {err}");
            return 1;
        }
    };
    let report = validate_master(&file);

    if options.json {
        let code = print_json(&report);
        return if report.has_errors() { 1 } else { code };
    }
    for diag in &report.diagnostics {
        eprintln!("{}: [{}] {}", diag.severity, diag.context, diag.message);
    }
    if let Ok(registry) = load_registry(registry_path_for(master_path)) {
        if let Some(entry) = registry.get(MASTER_DATASET) {
            println!(
                "registered master: source={} last_updated={} path={}",
                entry.source,
                entry.last_updated.as_deref().unwrap_or("unknown"),
                entry.path
            );
        }
    }
    if report.has_errors() {
        eprintln!("validation failed: {}", master_path.display());
        1
    } else {
        println!("validation passed: {}", master_path.display());
        0
    }
}
