use crate::error::TripInsightsError;
use crate::hourly_index::HourlyIndex;
use crate::trip::{DateFilter, TimeFilter, TripRecord, DATETIME_FORMAT};
use crate::trip_index::common::scored_candidate::ScoredItem;
use crate::trip_index::search_context::{clamp_limit, TopTippedContext};
use log::{debug, info};
use serde::Serialize;
use serde_json::Deserializer;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const DEFAULT_TRIPS_LIMIT: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    pub trips: usize,
    pub avg_speed_kmh: Option<f64>,
    pub avg_fare_per_km: Option<f64>,
    pub avg_duration_min: Option<f64>,
    pub avg_fare_amount: Option<f64>,
    pub avg_distance_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyBucket {
    /// `YYYY-MM-DD HH:00:00`
    pub hour: String,
    pub trips: usize,
    pub avg_speed: Option<f64>,
}

/// A stored trip together with the fields derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRow<'a> {
    #[serde(flatten)]
    pub trip: &'a TripRecord,
    pub speed_kmh: Option<f64>,
    pub fare_per_km: Option<f64>,
    pub hour_of_day: u32,
    /// 0 = Monday
    pub day_of_week: u32,
    pub rush_hour: bool,
    pub is_weekend: bool,
}

impl<'a> From<&'a TripRecord> for TripRow<'a> {
    fn from(trip: &'a TripRecord) -> Self {
        TripRow {
            trip,
            speed_kmh: trip.speed_kmh(),
            fare_per_km: trip.fare_per_km(),
            hour_of_day: trip.hour_of_day(),
            day_of_week: trip.day_of_week().num_days_from_monday(),
            rush_hour: trip.rush_hour(),
            is_weekend: trip.is_weekend(),
        }
    }
}

/// Average of the values, `None` when there are none
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub struct TripStorage {
    trips: Vec<TripRecord>, // in load order
    hourly_index: HourlyIndex,
}

impl Default for TripStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl TripStorage {
    pub fn new() -> TripStorage {
        TripStorage {
            trips: Vec::new(),
            hourly_index: HourlyIndex::new(),
        }
    }

    /// Loads one trip per line from a JSONL file
    pub fn load_trips_jsonl(path: &Path) -> Result<TripStorage, TripInsightsError> {
        info!("Loading trips from {}", path.display());
        let storage = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!(
            "Loaded {} trips over {} pickup hours",
            storage.len(),
            storage.hourly_index.len()
        );
        Ok(storage)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<TripStorage, TripInsightsError> {
        // stream jsonl values
        let stream = Deserializer::from_reader(reader).into_iter::<TripRecord>();
        let mut storage = TripStorage::new();
        for trip in stream {
            let trip = trip.map_err(|source| TripInsightsError::Json {
                line: source.line(),
                source,
            })?;
            storage.add(trip);
        }
        Ok(storage)
    }

    pub fn add(&mut self, trip: TripRecord) {
        let position = self.trips.len();
        self.hourly_index.add(position, &trip);
        self.trips.push(trip);
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Best tipped trips in one pass, keeping at most `limit` (capped) of them
    pub fn query_top_tipped(&self, limit: usize) -> Vec<ScoredItem> {
        let limit = clamp_limit(limit);
        let mut search_context = TopTippedContext::new(self.trips.iter(), limit);
        search_context.search()
    }

    /// Same result as `query_top_tipped` by scoring, sorting and truncating everything
    pub fn query_full_scan_top_tipped(&self, limit: usize) -> Vec<ScoredItem> {
        let mut scored_candidates: Vec<_> = self
            .trips
            .iter()
            .filter_map(|trip| {
                trip.tip_percentage().map(|score| {
                    ScoredItem::new(score, trip.trip_id, trip.fare_amount, trip.tip_amount)
                })
            })
            .collect();

        // stable: earlier trips stay ahead of later ties
        scored_candidates.sort_by(|a, b| b.cmp(a));
        scored_candidates.truncate(clamp_limit(limit));
        scored_candidates
    }

    pub fn summary(&self, filter: &DateFilter) -> TripSummary {
        let trips: Vec<&TripRecord> = self.trips.iter().filter(|t| filter.matches(t)).collect();
        debug!("summary over {} of {} trips", trips.len(), self.len());
        TripSummary {
            trips: trips.len(),
            avg_speed_kmh: mean(trips.iter().filter_map(|t| t.speed_kmh())),
            avg_fare_per_km: mean(trips.iter().filter_map(|t| t.fare_per_km())),
            avg_duration_min: mean(trips.iter().map(|t| t.duration_min)),
            avg_fare_amount: mean(trips.iter().map(|t| t.fare_amount)),
            avg_distance_km: mean(trips.iter().map(|t| t.distance_km)),
        }
    }

    /// Trip counts and average speed per pickup hour, oldest hour first.
    /// Bounds compare full pickup datetimes rather than dates.
    pub fn hourly(&self, filter: &TimeFilter) -> Vec<HourlyBucket> {
        self.hourly_index
            .iter()
            .filter_map(|(hour, positions)| {
                let trips: Vec<&TripRecord> = positions
                    .iter()
                    .map(|&position| &self.trips[position])
                    .filter(|t| filter.matches(t))
                    .collect();
                if trips.is_empty() {
                    return None;
                }
                Some(HourlyBucket {
                    hour: hour.format(DATETIME_FORMAT).to_string(),
                    trips: trips.len(),
                    avg_speed: mean(trips.iter().filter_map(|t| t.speed_kmh())),
                })
            })
            .collect()
    }

    /// Most recent pickups first
    pub fn trips(&self, filter: &DateFilter, limit: usize) -> Vec<TripRow<'_>> {
        let mut trips: Vec<&TripRecord> = self.trips.iter().filter(|t| filter.matches(t)).collect();
        trips.sort_by(|a, b| b.pickup_datetime.cmp(&a.pickup_datetime));
        trips.truncate(limit);
        trips.into_iter().map(TripRow::from).collect()
    }
}
