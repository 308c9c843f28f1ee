//! Metrics emitted while decoding metadata.
//!
//! # Metrics
//! - `xds_metadata_invalid_fields_total` (counter): malformed fields by field name
//! - `xds_metadata_snapshots_total` (counter): metadata snapshots decoded
//! - `xds_metadata_tracked_streams` (gauge): streams with a live snapshot
//!
//! # Design Decisions
//! - Labels only carry reserved field names, never attacker-chosen keys
//! - No recorder is installed here; without one every call is a no-op

use metrics::{counter, gauge};

pub fn record_invalid_field(field: &'static str) {
    counter!("xds_metadata_invalid_fields_total", "field" => field).increment(1);
}

pub fn record_snapshot() {
    counter!("xds_metadata_snapshots_total").increment(1);
}

pub fn set_tracked_streams(count: usize) {
    gauge!("xds_metadata_tracked_streams").set(count as f64);
}
