use crate::error::TripInsightsError;
use crate::trip_index::common::types::{Score, TripId};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DD HH:MM:SS`, with an ISO `T` separator accepted on input
mod datetime_format {
    use super::DATETIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.format(DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DATETIME_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub trip_id: TripId,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(with = "datetime_format")]
    pub pickup_datetime: NaiveDateTime,
    #[serde(with = "datetime_format")]
    pub dropoff_datetime: NaiveDateTime,
    #[serde(default)]
    pub pickup_lat: f64,
    #[serde(default)]
    pub pickup_lng: f64,
    #[serde(default)]
    pub dropoff_lat: f64,
    #[serde(default)]
    pub dropoff_lng: f64,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub duration_min: f64,
    #[serde(default)]
    pub fare_amount: f64,
    #[serde(default)]
    pub tip_amount: f64,
    #[serde(default)]
    pub payment_type: Option<String>,
}

impl TripRecord {
    /// Tip as a fraction of the fare.
    ///
    /// `None` for trips that cannot be ranked: a non-positive fare leaves the
    /// ratio undefined, and a negative tip is a refund rather than a tip.
    pub fn tip_percentage(&self) -> Option<Score> {
        if self.fare_amount <= 0.0 || self.tip_amount < 0.0 {
            return None;
        }
        Some(self.tip_amount / self.fare_amount)
    }

    pub fn speed_kmh(&self) -> Option<f64> {
        if self.duration_min > 0.0 {
            Some(self.distance_km / (self.duration_min / 60.0))
        } else {
            None
        }
    }

    pub fn fare_per_km(&self) -> Option<f64> {
        if self.distance_km > 0.0 {
            Some(self.fare_amount / self.distance_km)
        } else {
            None
        }
    }

    pub fn hour_of_day(&self) -> u32 {
        self.pickup_datetime.hour()
    }

    pub fn day_of_week(&self) -> Weekday {
        self.pickup_datetime.weekday()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.day_of_week(), Weekday::Sat | Weekday::Sun)
    }

    /// Weekday pickups between 07:00-09:59 or 16:00-19:59
    pub fn rush_hour(&self) -> bool {
        !self.is_weekend() && matches!(self.hour_of_day(), 7..=9 | 16..=19)
    }

    pub fn pickup_date(&self) -> NaiveDate {
        self.pickup_datetime.date()
    }
}

/// Inclusive pickup-date window; an open side matches everything
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateFilter {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> DateFilter {
        DateFilter { from, to }
    }

    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<DateFilter, TripInsightsError> {
        Ok(DateFilter {
            from: from.map(parse_date).transpose()?,
            to: to.map(parse_date).transpose()?,
        })
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        let date = trip.pickup_date();
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Inclusive pickup-datetime window, for queries bounded within a day
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeFilter {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl TimeFilter {
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<TimeFilter, TripInsightsError> {
        Ok(TimeFilter {
            from: from.map(parse_datetime).transpose()?,
            to: to.map(parse_datetime).transpose()?,
        })
    }

    pub fn matches(&self, trip: &TripRecord) -> bool {
        let pickup = trip.pickup_datetime;
        self.from.map_or(true, |from| pickup >= from) && self.to.map_or(true, |to| pickup <= to)
    }
}

/// Accepts a full datetime or a bare date, read as midnight
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, TripInsightsError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, DATE_FORMAT).map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| TripInsightsError::InvalidDate(s.to_string()))
}

/// Accepts a bare date or a full datetime, keeping only the date part
pub fn parse_date(s: &str) -> Result<NaiveDate, TripInsightsError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map(|dt| dt.date()))
        .map_err(|_| TripInsightsError::InvalidDate(s.to_string()))
}
