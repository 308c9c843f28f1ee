//! Per-stream metadata tracking.
//!
//! # Responsibilities
//! - Decode the node metadata of every request on an xDS stream
//! - Keep the latest snapshot per stream, replaced wholesale
//! - Forget the stream once it closes
//!
//! # Design Decisions
//! - Snapshots are `Arc`-shared and never mutated, readers need no locks
//! - A stream without a snapshot reads like default metadata (`MetadataExt`)

use std::sync::Arc;

use dashmap::DashMap;

use crate::metadata::{DataplaneMetadata, Struct};
use crate::observability::metrics;

/// Identifier the xDS server assigns to each stream.
pub type StreamId = i64;

/// Latest decoded metadata of every open stream.
#[derive(Debug, Default)]
pub struct MetadataTracker {
    streams: DashMap<StreamId, Arc<DataplaneMetadata>>,
}

impl MetadataTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `node_metadata` and make it the stream's current snapshot.
    pub fn on_stream_request(
        &self,
        stream_id: StreamId,
        node_metadata: Option<&Struct>,
    ) -> Arc<DataplaneMetadata> {
        let metadata = Arc::new(DataplaneMetadata::from_xds_metadata(node_metadata));
        self.streams.insert(stream_id, metadata.clone());
        metrics::record_snapshot();
        metrics::set_tracked_streams(self.streams.len());

        tracing::debug!(
            stream_id,
            proxy_type = %metadata.proxy_type(),
            resource = ?metadata.resource().map(|r| r.resource_type()),
            name = metadata.resource().map_or("", |r| r.meta().name.as_str()),
            admin_port = metadata.admin_port(),
            "Dataplane metadata updated"
        );
        metadata
    }

    /// Current snapshot of a stream, if one has been received.
    pub fn metadata(&self, stream_id: StreamId) -> Option<Arc<DataplaneMetadata>> {
        self.streams.get(&stream_id).map(|m| Arc::clone(m.value()))
    }

    pub fn on_stream_closed(&self, stream_id: StreamId) {
        if self.streams.remove(&stream_id).is_some() {
            metrics::set_tracked_streams(self.streams.len());
            tracing::debug!(stream_id, "Dataplane metadata dropped");
        }
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}
