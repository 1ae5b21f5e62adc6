//! Request pacing for delete runs
//!
//! Run settings (in-flight limit, per-call timeout) and the semaphore that
//! caps concurrent HTTP requests per client.

pub mod concurrency;
pub mod config;

pub use concurrency::ConcurrencyLimiter;
pub use config::{ConcurrencyConfig, ResilienceConfig, TimeoutConfig};
