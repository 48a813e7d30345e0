pub mod common;
pub mod search_context;
