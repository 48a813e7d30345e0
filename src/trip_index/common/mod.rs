pub mod file_operations;
pub mod fixed_length_pq;
pub mod scored_candidate;
pub mod types;
