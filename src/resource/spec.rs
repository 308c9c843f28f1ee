//! Typed specs for the proxy resource kinds.
//!
//! Field names follow the camelCase REST representation. Unknown fields are
//! ignored and every field has a default, so partially filled documents decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type Tags = BTreeMap<String, String>;

/// Tag holding the service name of an inbound.
pub const SERVICE_TAG: &str = "kuma.io/service";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataplaneSpec {
    pub networking: DataplaneNetworking,
    /// Metrics backend override; opaque to this crate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<serde_json::Value>,
}

impl DataplaneSpec {
    pub fn is_gateway(&self) -> bool {
        self.networking.gateway.is_some()
    }

    /// Service names of all inbounds, in declaration order.
    pub fn service_names(&self) -> Vec<&str> {
        self.networking
            .inbound
            .iter()
            .filter_map(|i| i.tags.get(SERVICE_TAG).map(String::as_str))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataplaneNetworking {
    pub address: String,
    pub advertised_address: String,
    pub inbound: Vec<Inbound>,
    pub outbound: Vec<Outbound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<Gateway>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<EnvoyAdmin>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Inbound {
    pub address: String,
    pub port: u32,
    pub service_address: String,
    pub service_port: u32,
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Outbound {
    pub address: String,
    pub port: u32,
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gateway {
    pub tags: Tags,
    /// `DELEGATED` or `BUILTIN`.
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvoyAdmin {
    pub port: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoneIngressSpec {
    pub zone: String,
    pub networking: ZoneIngressNetworking,
    pub available_services: Vec<AvailableService>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoneIngressNetworking {
    pub address: String,
    pub advertised_address: String,
    pub port: u32,
    pub advertised_port: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<EnvoyAdmin>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvailableService {
    pub tags: Tags,
    pub instances: u32,
    pub mesh: String,
    pub external_service: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoneEgressSpec {
    pub zone: String,
    pub networking: ZoneEgressNetworking,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneEgressNetworking {
    pub address: String,
    pub port: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<EnvoyAdmin>,
}
