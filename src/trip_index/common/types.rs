pub type TripId = u64;
/// Ranking key of a scored trip (tip percentage as a plain ratio)
pub type Score = f64;
/// Largest number of results a top-K query may ask for
pub const MAX_TOP_K: usize = 200;
pub const DEFAULT_TOP_K: usize = 20;
