//! Parallel execution support
//!
//! Provides batch analysis of many requests on a thread pool.

mod executor;

pub use executor::{analyze_batch, ParallelConfig};
