use clap::Parser;
use log::{error, info};
use serde::Serialize;
use std::time::Instant;
use trip_insights::config::{Command, Config};
use trip_insights::error::TripInsightsError;
use trip_insights::storage::TripStorage;
use trip_insights::trip_index::common::file_operations::atomic_save_json;
use trip_insights::trip_index::search_context::format;

fn emit<T: Serialize>(config: &Config, result: &T) -> Result<(), TripInsightsError> {
    match &config.output {
        Some(path) => {
            atomic_save_json(path, result)?;
            info!("Result saved to {}", path.display());
        }
        None => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }
    Ok(())
}

fn run(config: &Config) -> Result<(), TripInsightsError> {
    let storage = TripStorage::load_trips_jsonl(&config.data)?;

    let now = Instant::now();
    match &config.command {
        Command::TopTipped { limit } => {
            let results = format(storage.query_top_tipped(*limit));
            info!(
                "Top {} tipped trips in {} micros",
                results.len(),
                now.elapsed().as_micros()
            );
            emit(config, &results)
        }
        Command::Summary(range) => emit(config, &storage.summary(&range.filter()?)),
        Command::Hourly(range) => emit(config, &storage.hourly(&range.time_filter()?)),
        Command::Trips { range, limit } => emit(config, &storage.trips(&range.filter()?, *limit)),
    }
}

fn main() {
    let config = Config::parse();
    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    if let Err(e) = run(&config) {
        error!("{}", e);
        std::process::exit(1);
    }
}
