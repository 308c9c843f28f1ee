//! Decoding of node metadata into [`DataplaneMetadata`].
//!
//! The metadata is user input: a DiscoveryRequest can be crafted by hand, so
//! nothing here may assume a field exists or has the kind the proxy normally
//! sends. Each field is read by its own total function. A malformed field is
//! logged once and falls back to its default; an absent field is not logged.

use std::collections::BTreeMap;
use std::num::ParseIntError;

use thiserror::Error;

use crate::metadata::descriptor::{DataplaneMetadata, ProxyType, ScrapeTarget};
use crate::metadata::fields as keys;
use crate::metadata::value::{Struct, Value};
use crate::metadata::version::{ConversionError, Version};
use crate::observability::metrics;
use crate::resource::{decode_resource, ProxyResource, ResourceError};

/// Why a metadata field was rejected.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("expected {expected}, got {actual}")]
    WrongKind {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("invalid integer: {0}")]
    Integer(#[from] ParseIntError),

    #[error("unknown proxy type: {0}")]
    UnknownProxyType(String),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Version(#[from] ConversionError),
}

impl DataplaneMetadata {
    /// Decode the node metadata of a DiscoveryRequest.
    ///
    /// Never fails: `None` or an empty document yields the default metadata.
    pub fn from_xds_metadata(xds_metadata: Option<&Struct>) -> DataplaneMetadata {
        let mut metadata = DataplaneMetadata::default();
        let Some(document) = xds_metadata else {
            return metadata;
        };

        metadata.proxy_type = proxy_type_field(document);
        metadata.admin_port = uint32_field(document, keys::ADMIN_PORT);
        metadata.dns_port = uint32_field(document, keys::DNS_PORT);
        metadata.empty_dns_port = uint32_field(document, keys::EMPTY_DNS_PORT);
        metadata.resource = resource_field(document);

        // Dependency versions in dynamic metadata are merged into the version
        // record, so it has to be decoded first.
        metadata.version = version_field(document);
        let dependencies = metadata
            .version
            .as_mut()
            .and_then(|v| v.dependencies.as_mut());
        metadata.dynamic_metadata = dynamic_metadata_field(document, dependencies);

        metadata.applications_metrics = applications_metrics_field(document);
        metadata
    }
}

fn report(field: &'static str, value: &Value, error: &MetadataError) {
    tracing::error!(
        error = %error,
        field,
        value = %value,
        "invalid value in dataplane metadata"
    );
    metrics::record_invalid_field(field);
}

fn wrong_kind(expected: &'static str, value: &Value) -> MetadataError {
    MetadataError::WrongKind {
        expected,
        actual: value.kind_name(),
    }
}

fn proxy_type_field(document: &Struct) -> Option<ProxyType> {
    let value = document.get(keys::PROXY_TYPE)?;
    let parsed = match value {
        Value::String(tag) if tag.is_empty() => return None,
        Value::String(tag) => {
            ProxyType::from_tag(tag).ok_or_else(|| MetadataError::UnknownProxyType(tag.clone()))
        }
        other => Err(wrong_kind("string", other)),
    };
    parsed
        .map_err(|e| report(keys::PROXY_TYPE, value, &e))
        .ok()
}

/// Ports are sent as decimal strings, not numbers.
fn uint32_field(document: &Struct, field: &'static str) -> u32 {
    let Some(value) = document.get(field) else {
        return 0;
    };
    parse_uint32(value).unwrap_or_else(|e| {
        report(field, value, &e);
        0
    })
}

fn parse_uint32(value: &Value) -> Result<u32, MetadataError> {
    let raw = value.as_string().ok_or_else(|| wrong_kind("string", value))?;
    let parsed: i64 = raw.parse()?;
    // Narrowed the way the producer's control plane always has: out of range wraps.
    Ok(parsed as u32)
}

fn resource_field(document: &Struct) -> Option<ProxyResource> {
    let value = document.get(keys::RESOURCE)?;
    let decoded = value
        .as_string()
        .ok_or_else(|| wrong_kind("string", value))
        .and_then(|raw| decode_resource(raw.as_bytes()).map_err(MetadataError::from));
    let resource = match decoded {
        Ok(resource) => resource,
        Err(e) => {
            report(keys::RESOURCE, value, &e);
            return None;
        }
    };

    let resource_type = resource.resource_type();
    match ProxyResource::try_from(resource) {
        Ok(resource) => Some(resource),
        Err(e) => {
            tracing::error!(
                error = %e,
                resource = %resource_type,
                field = keys::RESOURCE,
                value = %value,
                "invalid dataplane resource type"
            );
            metrics::record_invalid_field(keys::RESOURCE);
            None
        }
    }
}

fn version_field(document: &Struct) -> Option<Version> {
    let value = document.get(keys::VERSION)?;
    let Some(fields) = value.as_struct() else {
        report(keys::VERSION, value, &wrong_kind("struct", value));
        return None;
    };

    // A partially converted record is still better than none.
    let (version, error) = Version::from_struct(fields);
    if let Some(e) = error {
        report(keys::VERSION, value, &MetadataError::from(e));
    }
    Some(version)
}

fn dynamic_metadata_field(
    document: &Struct,
    mut dependencies: Option<&mut BTreeMap<String, String>>,
) -> BTreeMap<String, String> {
    let mut dynamic_metadata = BTreeMap::new();
    let Some(value) = document.get(keys::DYNAMIC_METADATA) else {
        return dynamic_metadata;
    };
    let Some(entries) = value.as_struct() else {
        report(keys::DYNAMIC_METADATA, value, &wrong_kind("struct", value));
        return dynamic_metadata;
    };

    for (key, entry) in entries {
        if entry.as_string().is_none() {
            tracing::error!(
                error = %wrong_kind("string", entry),
                field = keys::DYNAMIC_METADATA,
                key = %key,
                value = %entry,
                "invalid value in dataplane metadata"
            );
            metrics::record_invalid_field(keys::DYNAMIC_METADATA);
        }

        match keys::dependency_name(key) {
            // Dropped unless the version record carries a dependency map.
            Some(dependency) => {
                if let Some(deps) = dependencies.as_deref_mut() {
                    deps.insert(dependency.to_string(), entry.as_str().to_string());
                }
            }
            None => {
                dynamic_metadata.insert(key.clone(), entry.as_str().to_string());
            }
        }
    }
    dynamic_metadata
}

fn applications_metrics_field(document: &Struct) -> Vec<ScrapeTarget> {
    let Some(value) = document.get(keys::APPLICATIONS_METRICS) else {
        return Vec::new();
    };
    let Some(items) = value.as_list() else {
        report(keys::APPLICATIONS_METRICS, value, &wrong_kind("list", value));
        return Vec::new();
    };
    items.iter().map(scrape_target).collect()
}

fn scrape_target(item: &Value) -> ScrapeTarget {
    let mut target = ScrapeTarget::default();
    let Some(config) = item.as_struct() else {
        // Still appended, the list keeps one target per element.
        report(keys::APPLICATIONS_METRICS, item, &wrong_kind("struct", item));
        return target;
    };

    target.path = string_field(config, keys::SCRAPE_PATH);
    target.name = string_field(config, keys::SCRAPE_NAME);
    target.port = uint32_field(config, keys::SCRAPE_PORT);
    target
}

fn string_field(document: &Struct, field: &'static str) -> String {
    match document.get(field) {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            report(field, other, &wrong_kind("string", other));
            String::new()
        }
    }
}
