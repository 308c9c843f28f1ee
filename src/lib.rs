//! Typed, nil-safe decoding of proxy node metadata for an xDS control plane.

pub mod config;
pub mod metadata;
pub mod observability;
pub mod resource;
pub mod tracker;

pub use metadata::{DataplaneMetadata, MetadataExt, ProxyType};
pub use resource::ProxyResource;
pub use tracker::MetadataTracker;
