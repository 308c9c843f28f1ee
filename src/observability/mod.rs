//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! decoder / tracker produce:
//!     → tracing events (one per malformed field, field + raw value)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, JSON or pretty)
//!     → whatever metrics recorder the embedding process installs
//! ```

pub mod logging;
pub mod metrics;
