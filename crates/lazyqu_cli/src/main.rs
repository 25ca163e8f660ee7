//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `lazyqu_core` linkage.
//! - Optionally summarize a planner database: `lazyqu_cli [db_path [log_dir]]`.

use lazyqu_core::{PlannerConfig, PlannerService, SqliteBlobStorage};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("lazyqu_core ping={}", lazyqu_core::ping());
    println!("lazyqu_core version={}", lazyqu_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(db_path) = args.next() else {
        return ExitCode::SUCCESS;
    };

    let config = PlannerConfig::default();
    if let Some(log_dir) = args.next() {
        if let Err(err) = lazyqu_core::init_logging_with_config(&config, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let storage = match SqliteBlobStorage::open(&db_path) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let planner = PlannerService::open(storage, &config);
    let stats = planner.stats();
    println!("videos total={} this_week={}", stats.total, stats.selected_week);
    for week in planner.week_options() {
        let planned = lazyqu_core::select_week(planner.store().videos(), &week.value()).len();
        println!("week {} ({}) planned={planned}", week.value(), week.label);
    }
    ExitCode::SUCCESS
}
