use crate::trip::TripRecord;
use crate::trip_index::common::fixed_length_pq::FixedLengthPriorityQueue;
use crate::trip_index::common::scored_candidate::ScoredItem;
use crate::trip_index::common::types::{TripId, MAX_TOP_K};
use log::debug;
use serde::{Deserialize, Serialize};

/// One row of the top-tipped report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTippedEntry {
    pub trip_id: TripId,
    /// Percent of the fare, rounded to two decimals
    pub tip_pct: f64,
    pub fare_amount: f64,
    pub tip_amount: f64,
}

impl From<ScoredItem> for TopTippedEntry {
    fn from(item: ScoredItem) -> Self {
        TopTippedEntry {
            trip_id: item.trip_id,
            tip_pct: (item.score * 100.0 * 100.0).round() / 100.0,
            fare_amount: item.fare_amount,
            tip_amount: item.tip_amount,
        }
    }
}

/// Caps a requested result count to what a single scan is allowed to keep
pub fn clamp_limit(limit: usize) -> usize {
    limit.min(MAX_TOP_K)
}

/// Single pass over a trip stream keeping the `top` best tipped trips
pub struct TopTippedContext<I> {
    trips: I,
    top: usize,
    scanned: usize,
    scored: usize,
    result_queue: FixedLengthPriorityQueue<ScoredItem>, // keep the largest elements and pop smallest
}

impl<'a, I> TopTippedContext<I>
where
    I: Iterator<Item = &'a TripRecord>,
{
    pub fn new(trips: I, top: usize) -> TopTippedContext<I> {
        TopTippedContext {
            trips,
            top,
            scanned: 0,
            scored: 0,
            result_queue: FixedLengthPriorityQueue::new(top),
        }
    }

    /// Next rankable trip of the stream, trips without a defined tip ratio are skipped
    fn advance(&mut self) -> Option<ScoredItem> {
        for trip in self.trips.by_ref() {
            self.scanned += 1;
            if let Some(score) = trip.tip_percentage() {
                self.scored += 1;
                return Some(ScoredItem::new(
                    score,
                    trip.trip_id,
                    trip.fare_amount,
                    trip.tip_amount,
                ));
            }
        }
        None
    }

    /// Best tipped trips, highest tip percentage first
    pub fn search(&mut self) -> Vec<ScoredItem> {
        while let Some(candidate) = self.advance() {
            self.result_queue.push(candidate);
        }
        debug!(
            "top tipped scan: {} trips scanned, {} scored, {} kept (limit {}), min kept {:?}",
            self.scanned,
            self.scored,
            self.result_queue.len(),
            self.top,
            self.result_queue.top().map(|c| c.score)
        );
        let queue = std::mem::take(&mut self.result_queue);
        queue.into_vec()
    }

    pub fn scanned(&self) -> usize {
        self.scanned
    }

    pub fn scored(&self) -> usize {
        self.scored
    }
}

/// Report rows for the scored trips, in the order given
pub fn format(results: Vec<ScoredItem>) -> Vec<TopTippedEntry> {
    results.into_iter().map(TopTippedEntry::from).collect()
}
