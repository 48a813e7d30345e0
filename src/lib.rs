pub mod config;
pub mod error;
pub mod hourly_index;
pub mod storage;
pub mod trip;
pub mod trip_index;
