//! Node metadata subsystem.
//!
//! # Data Flow
//! ```text
//! DiscoveryRequest.node.metadata (untrusted value tree)
//!     → value.rs (generic tree, total accessors)
//!     → decoder.rs (one total function per field, logs malformed input)
//!         → resource::decode_resource (embedded Dataplane/ZoneIngress/ZoneEgress)
//!         → version.rs (version record, partial on error)
//!     → DataplaneMetadata (descriptor.rs, immutable)
//!     → config generators read through MetadataExt
//! ```
//!
//! # Design Decisions
//! - Decoding never fails; errors only reach the log and metrics
//! - Absent fields are silent, malformed fields are logged exactly once
//! - A missing descriptor reads exactly like a default one
//! - Version is decoded before dynamic metadata (dependency redirect)

pub mod decoder;
pub mod descriptor;
pub mod fields;
pub mod value;
pub mod version;

pub use decoder::MetadataError;
pub use descriptor::{DataplaneMetadata, MetadataExt, ProxyType, ScrapeTarget};
pub use value::{Struct, Value};
pub use version::Version;
