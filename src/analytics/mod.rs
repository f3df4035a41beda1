/// Analytics engine for aggregating and analyzing health records
///
/// Everything in this module is a pure function from an immutable record
/// snapshot to derived values: KPIs, rolling-average series, trend
/// classifications and correlation rankings. No function here performs I/O,
/// holds state between calls, or mutates its inputs.

pub mod filter;
pub mod kpi;
pub mod trend;
pub mod correlation;
pub mod insights;

pub use filter::*;
pub use kpi::*;
pub use trend::*;
pub use correlation::*;
pub use insights::*;

use thiserror::Error;

/// Errors that can occur during analytics operations
///
/// `InvalidParameter` means a caller-supplied configuration value is outside
/// its valid domain and is never silently clamped. `InsufficientData` is an
/// expected condition (e.g. a new user with little history), surfaced as a
/// typed result so callers can render it as a message rather than a failure.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("Insufficient data: {rows} paired observations (need at least {min})")]
    InsufficientData { rows: usize, min: usize },
}

/// Stateless facade over the analytics functions
///
/// The server holds one of these; it carries no state, so the same engine
/// can serve any number of concurrent computation passes.
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}
