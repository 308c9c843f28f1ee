//! Mesh resources a proxy can describe itself with.
//!
//! # Data Flow
//! ```text
//! "dataplane.resource" string (REST JSON)
//!     → decode.rs (parse, split kind / meta / spec)
//!     → Resource (any kind; typed spec for proxy kinds)
//!     → ProxyResource::try_from (rejects every non-proxy kind)
//! ```
//!
//! # Design Decisions
//! - Only Dataplane, ZoneIngress and ZoneEgress get typed specs
//! - Other kinds still decode, so the caller can report which kind it got
//! - registry.rs maps CLI entity names to kinds

pub mod decode;
pub mod registry;
pub mod spec;
pub mod types;

pub use decode::decode_resource;
pub use types::{
    DataplaneResource, ProxyResource, Resource, ResourceError, ResourceMeta, ResourceType,
    ZoneEgressResource, ZoneIngressResource,
};
