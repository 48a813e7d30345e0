use crate::trip_index::common::types::{Score, TripId};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;

/// A trip ranked by its score. Fare and tip ride along for display only,
/// ordering and equality look at `score` alone.
#[derive(Debug, Clone, Copy)]
pub struct ScoredItem {
    pub score: Score,
    pub trip_id: TripId,
    pub fare_amount: f64,
    pub tip_amount: f64,
}

impl ScoredItem {
    pub fn new(score: Score, trip_id: TripId, fare_amount: f64, tip_amount: f64) -> ScoredItem {
        ScoredItem {
            score,
            trip_id,
            fare_amount,
            tip_amount,
        }
    }
}

impl PartialEq for ScoredItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.score).cmp(&OrderedFloat(other.score))
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_ignores_payload() {
        let low = ScoredItem::new(0.1, 7, 100.0, 10.0);
        let high = ScoredItem::new(0.2, 1, 5.0, 1.0);
        assert!(low < high);
        assert_eq!(
            ScoredItem::new(0.5, 1, 2.0, 1.0).cmp(&ScoredItem::new(0.5, 2, 4.0, 2.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn equality_agrees_with_ordering() {
        let a = ScoredItem::new(0.5, 1, 2.0, 1.0);
        let b = ScoredItem::new(0.5, 2, 4.0, 2.0);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_ne!(a, ScoredItem::new(0.25, 1, 2.0, 0.5));
    }
}
