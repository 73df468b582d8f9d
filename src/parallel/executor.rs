//! Batch executor for security-condition analysis
//!
//! Uses Rayon for work-stealing parallelism with configurable limits.

use crate::analysis::{AnalysisRequest, AnalysisResult, SecurityAnalyzer};
use crate::config::AnalyzerOptions;
use crate::error::{Error, Result};
use rayon::prelude::*;

/// Configuration for batch execution
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Maximum number of worker threads (default: num_cpus)
    pub max_parallelism: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            max_parallelism: num_cpus::get(),
        }
    }
}

/// Analyze many requests concurrently
///
/// # Arguments
/// * `requests` - Requests to analyze
/// * `options` - Analyzer options shared by every request
/// * `config` - Thread pool configuration
///
/// # Returns
/// * `Ok(Vec<AnalysisResult>)` - One result per request, in input order
/// * `Err(Error)` - The thread pool could not be built
///
/// # Example
/// ```ignore
/// let results = analyze_batch(
///     &requests,
///     &AnalyzerOptions::default(),
///     &ParallelConfig::default(),
/// )?;
/// ```
pub fn analyze_batch(
    requests: &[AnalysisRequest],
    options: &AnalyzerOptions,
    config: &ParallelConfig,
) -> Result<Vec<AnalysisResult>> {
    let analyzer = SecurityAnalyzer::new(options.clone());

    // Empty and single-request fast paths
    if requests.len() <= 1 {
        return Ok(requests
            .iter()
            .map(|request| analyzer.analyze_request(request))
            .collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_parallelism.clamp(1, requests.len()))
        .build()
        .map_err(|e| Error::ThreadPoolError(format!("Failed to create thread pool: {}", e)))?;

    tracing::debug!(
        "Analyzing {} requests on {} threads",
        requests.len(),
        pool.current_num_threads()
    );

    Ok(pool.install(|| {
        requests
            .par_iter()
            .map(|request| analyzer.analyze_request(request))
            .collect()
    }))
}
