//! Resource kinds, metadata and error definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resource::spec::{DataplaneSpec, ZoneEgressSpec, ZoneIngressSpec};

/// Every mesh resource kind the control plane knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    CircuitBreaker,
    Dataplane,
    ExternalService,
    FaultInjection,
    HealthCheck,
    Mesh,
    ProxyTemplate,
    RateLimit,
    Retry,
    Timeout,
    TrafficLog,
    TrafficPermission,
    TrafficRoute,
    TrafficTrace,
    ZoneIngress,
    ZoneEgress,
}

impl ResourceType {
    pub const ALL: [ResourceType; 16] = [
        ResourceType::CircuitBreaker,
        ResourceType::Dataplane,
        ResourceType::ExternalService,
        ResourceType::FaultInjection,
        ResourceType::HealthCheck,
        ResourceType::Mesh,
        ResourceType::ProxyTemplate,
        ResourceType::RateLimit,
        ResourceType::Retry,
        ResourceType::Timeout,
        ResourceType::TrafficLog,
        ResourceType::TrafficPermission,
        ResourceType::TrafficRoute,
        ResourceType::TrafficTrace,
        ResourceType::ZoneIngress,
        ResourceType::ZoneEgress,
    ];

    /// Name used in the `type` field of the REST representation.
    pub fn name(self) -> &'static str {
        match self {
            ResourceType::CircuitBreaker => "CircuitBreaker",
            ResourceType::Dataplane => "Dataplane",
            ResourceType::ExternalService => "ExternalService",
            ResourceType::FaultInjection => "FaultInjection",
            ResourceType::HealthCheck => "HealthCheck",
            ResourceType::Mesh => "Mesh",
            ResourceType::ProxyTemplate => "ProxyTemplate",
            ResourceType::RateLimit => "RateLimit",
            ResourceType::Retry => "Retry",
            ResourceType::Timeout => "Timeout",
            ResourceType::TrafficLog => "TrafficLog",
            ResourceType::TrafficPermission => "TrafficPermission",
            ResourceType::TrafficRoute => "TrafficRoute",
            ResourceType::TrafficTrace => "TrafficTrace",
            ResourceType::ZoneIngress => "ZoneIngress",
            ResourceType::ZoneEgress => "ZoneEgress",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Zone ingress/egress live outside any mesh.
    pub fn is_global(self) -> bool {
        matches!(self, ResourceType::ZoneIngress | ResourceType::ZoneEgress)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a stored resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMeta {
    /// Owning mesh; empty for global kinds.
    pub mesh: String,
    pub name: String,
}

/// A resource whose spec has been decoded into a typed representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedResource<S> {
    pub meta: ResourceMeta,
    pub spec: S,
}

pub type DataplaneResource = TypedResource<DataplaneSpec>;
pub type ZoneIngressResource = TypedResource<ZoneIngressSpec>;
pub type ZoneEgressResource = TypedResource<ZoneEgressSpec>;

/// A resource of a kind this crate does not model; its spec stays as raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct UntypedResource {
    pub resource_type: ResourceType,
    pub meta: ResourceMeta,
    pub spec: serde_json::Map<String, serde_json::Value>,
}

/// Any decoded resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Dataplane(DataplaneResource),
    ZoneIngress(ZoneIngressResource),
    ZoneEgress(ZoneEgressResource),
    Other(UntypedResource),
}

impl Resource {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Resource::Dataplane(_) => ResourceType::Dataplane,
            Resource::ZoneIngress(_) => ResourceType::ZoneIngress,
            Resource::ZoneEgress(_) => ResourceType::ZoneEgress,
            Resource::Other(r) => r.resource_type,
        }
    }

    pub fn meta(&self) -> &ResourceMeta {
        match self {
            Resource::Dataplane(r) => &r.meta,
            Resource::ZoneIngress(r) => &r.meta,
            Resource::ZoneEgress(r) => &r.meta,
            Resource::Other(r) => &r.meta,
        }
    }
}

/// The resource kinds a proxy may describe itself with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ProxyResource {
    Dataplane(DataplaneResource),
    ZoneIngress(ZoneIngressResource),
    ZoneEgress(ZoneEgressResource),
}

impl ProxyResource {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ProxyResource::Dataplane(_) => ResourceType::Dataplane,
            ProxyResource::ZoneIngress(_) => ResourceType::ZoneIngress,
            ProxyResource::ZoneEgress(_) => ResourceType::ZoneEgress,
        }
    }

    pub fn meta(&self) -> &ResourceMeta {
        match self {
            ProxyResource::Dataplane(r) => &r.meta,
            ProxyResource::ZoneIngress(r) => &r.meta,
            ProxyResource::ZoneEgress(r) => &r.meta,
        }
    }
}

impl TryFrom<Resource> for ProxyResource {
    type Error = ResourceError;

    fn try_from(resource: Resource) -> Result<Self, Self::Error> {
        match resource {
            Resource::Dataplane(r) => Ok(ProxyResource::Dataplane(r)),
            Resource::ZoneIngress(r) => Ok(ProxyResource::ZoneIngress(r)),
            Resource::ZoneEgress(r) => Ok(ProxyResource::ZoneEgress(r)),
            Resource::Other(r) => Err(ResourceError::UnsupportedType(r.resource_type)),
        }
    }
}

/// Errors produced while decoding an embedded resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Bytes are not a JSON document.
    #[error("invalid resource document: {0}")]
    Json(#[source] serde_json::Error),

    #[error("resource document must be an object")]
    NotAnObject,

    #[error("resource document has no type")]
    MissingType,

    #[error("unknown resource type: {0}")]
    UnknownType(String),

    /// The spec does not match the shape of its kind.
    #[error("invalid {resource_type} spec: {source}")]
    Spec {
        resource_type: ResourceType,
        #[source]
        source: serde_json::Error,
    },

    /// Decoded fine, but the kind cannot describe a proxy.
    #[error("invalid dataplane resource type: {0}")]
    UnsupportedType(ResourceType),
}
