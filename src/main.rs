use std::env;

use gear_synergy::cli;
use gear_synergy::config::AppConfig;
use gear_synergy::telemetry;

fn main() {
    let config = AppConfig::from_env();
    if let Err(err) = telemetry::init(&config) {
        eprintln!("{err}");
    }
    config.report_rejected();

    let args: Vec<String> = env::args().collect();
    std::process::exit(cli::run_with_config(&args, &config));
}
