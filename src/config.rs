use crate::error::TripInsightsError;
use crate::storage::DEFAULT_TRIPS_LIMIT;
use crate::trip::{DateFilter, TimeFilter};
use crate::trip_index::common::types::DEFAULT_TOP_K;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "./data/trips.jsonl";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug)]
#[command(about = "Aggregated NYC taxi trip analytics over a JSONL trip dump")]
pub struct Config {
    #[arg(long, env = "TRIP_INSIGHTS_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    #[arg(long, env = "TRIP_INSIGHTS_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Save the JSON result to this file instead of printing it
    #[arg(long, env = "TRIP_INSIGHTS_OUTPUT")]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Trips with the highest tip relative to the fare")]
    TopTipped {
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        limit: usize,
    },
    #[command(about = "Trip count and averages")]
    Summary(DateRange),
    #[command(about = "Trip count and average speed per pickup hour")]
    Hourly(DateRange),
    #[command(about = "Trips, most recent pickup first")]
    Trips {
        #[command(flatten)]
        range: DateRange,
        #[arg(long, default_value_t = DEFAULT_TRIPS_LIMIT)]
        limit: usize,
    },
}

#[derive(Args, Debug, Default)]
pub struct DateRange {
    /// First pickup, YYYY-MM-DD or YYYY-MM-DD HH:MM:SS
    #[arg(long, alias = "start")]
    pub from: Option<String>,
    /// Last pickup, YYYY-MM-DD or YYYY-MM-DD HH:MM:SS
    #[arg(long, alias = "end")]
    pub to: Option<String>,
}

impl DateRange {
    pub fn filter(&self) -> Result<DateFilter, TripInsightsError> {
        DateFilter::parse(self.from.as_deref(), self.to.as_deref())
    }

    pub fn time_filter(&self) -> Result<TimeFilter, TripInsightsError> {
        TimeFilter::parse(self.from.as_deref(), self.to.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_top_tipped_defaults() {
        let config = Config::try_parse_from(["trip-insights", "top-tipped"]).unwrap();
        assert_eq!(config.data, PathBuf::from(DEFAULT_DATA_PATH));
        assert!(config.output.is_none());
        assert!(matches!(config.command, Command::TopTipped { limit } if limit == DEFAULT_TOP_K));
    }

    #[test]
    fn parse_trips_with_range() {
        let config = Config::try_parse_from([
            "trip-insights",
            "--data",
            "/tmp/trips.jsonl",
            "trips",
            "--start",
            "2016-03-14",
            "--to",
            "2016-03-20",
            "--limit",
            "2",
        ])
        .unwrap();
        assert_eq!(config.data, PathBuf::from("/tmp/trips.jsonl"));
        match config.command {
            Command::Trips { range, limit } => {
                assert_eq!(limit, 2);
                let filter = range.filter().unwrap();
                assert!(filter.from.is_some());
                assert!(filter.to.is_some());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn bad_range_is_rejected_on_filter() {
        let range = DateRange {
            from: Some("March".to_string()),
            to: None,
        };
        assert!(matches!(range.filter(), Err(TripInsightsError::InvalidDate(_))));
    }
}
