use crate::trip::TripRecord;
use chrono::{NaiveDateTime, Timelike};
use std::collections::BTreeMap;

/// Pickup hour -> positions of the trips picked up during that hour
#[derive(Debug, Default)]
pub struct HourlyIndex {
    pub map: BTreeMap<NaiveDateTime, Vec<usize>>,
}

/// Start of the hour `dt` falls in
pub fn hour_bucket(dt: &NaiveDateTime) -> NaiveDateTime {
    dt.date()
        .and_hms_opt(dt.hour(), 0, 0)
        .unwrap_or(*dt)
}

impl HourlyIndex {
    pub fn new() -> HourlyIndex {
        HourlyIndex {
            map: BTreeMap::new(),
        }
    }

    pub fn get(&self, hour: &NaiveDateTime) -> Option<&Vec<usize>> {
        self.map.get(hour)
    }

    pub fn add(&mut self, position: usize, trip: &TripRecord) {
        self.map
            .entry(hour_bucket(&trip.pickup_datetime))
            .or_default() // init if not exists
            .push(position);
    }

    /// Hours in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDateTime, &Vec<usize>)> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
