//! Typed view of a proxy's node metadata.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::metadata::version::Version;
use crate::resource::{DataplaneResource, ProxyResource, ZoneEgressResource, ZoneIngressResource};

static NO_DYNAMIC_METADATA: BTreeMap<String, String> = BTreeMap::new();

/// Kind of proxy announcing itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    #[default]
    Dataplane,
    Ingress,
    Egress,
}

impl ProxyType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::Dataplane => "dataplane",
            ProxyType::Ingress => "ingress",
            ProxyType::Egress => "egress",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "dataplane" => Some(ProxyType::Dataplane),
            "ingress" => Some(ProxyType::Ingress),
            "egress" => Some(ProxyType::Egress),
            _ => None,
        }
    }
}

impl fmt::Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One application metrics endpoint to scrape and aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrapeTarget {
    pub path: String,
    pub name: String,
    pub port: u32,
}

/// Environment-specific part of a proxy's configuration.
///
/// It may change from one proxy run to another, so it cannot live in the
/// proxy's resource. The proxy captures its effective settings on start-up and
/// sends them as node metadata on every xDS stream; this is the decoded form.
///
/// Built once per snapshot by [`DataplaneMetadata::from_xds_metadata`] and never
/// mutated afterwards. Code that may not have a snapshot yet should hold an
/// `Option<&DataplaneMetadata>` and read it through [`MetadataExt`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataplaneMetadata {
    pub(crate) resource: Option<ProxyResource>,
    pub(crate) admin_port: u32,
    pub(crate) dns_port: u32,
    pub(crate) empty_dns_port: u32,
    pub(crate) dynamic_metadata: BTreeMap<String, String>,
    pub(crate) proxy_type: Option<ProxyType>,
    pub(crate) version: Option<Version>,
    pub(crate) applications_metrics: Vec<ScrapeTarget>,
}

impl DataplaneMetadata {
    pub fn resource(&self) -> Option<&ProxyResource> {
        self.resource.as_ref()
    }

    /// The embedded resource if it is a Dataplane.
    pub fn dataplane_resource(&self) -> Option<&DataplaneResource> {
        match &self.resource {
            Some(ProxyResource::Dataplane(r)) => Some(r),
            _ => None,
        }
    }

    /// The embedded resource if it is a ZoneIngress.
    pub fn zone_ingress_resource(&self) -> Option<&ZoneIngressResource> {
        match &self.resource {
            Some(ProxyResource::ZoneIngress(r)) => Some(r),
            _ => None,
        }
    }

    /// The embedded resource if it is a ZoneEgress.
    pub fn zone_egress_resource(&self) -> Option<&ZoneEgressResource> {
        match &self.resource {
            Some(ProxyResource::ZoneEgress(r)) => Some(r),
            _ => None,
        }
    }

    /// Declared proxy type, [`ProxyType::Dataplane`] when none was sent.
    pub fn proxy_type(&self) -> ProxyType {
        self.proxy_type.unwrap_or_default()
    }

    pub fn admin_port(&self) -> u32 {
        self.admin_port
    }

    pub fn dns_port(&self) -> u32 {
        self.dns_port
    }

    pub fn empty_dns_port(&self) -> u32 {
        self.empty_dns_port
    }

    /// Value of a dynamic metadata key, `""` when missing.
    pub fn dynamic_metadata(&self, key: &str) -> &str {
        self.dynamic_metadata
            .get(key)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn dynamic_metadata_entries(&self) -> &BTreeMap<String, String> {
        &self.dynamic_metadata
    }

    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    pub fn applications_metrics(&self) -> &[ScrapeTarget] {
        &self.applications_metrics
    }
}

/// Accessors for metadata that may not have arrived yet.
///
/// A missing snapshot answers exactly like `DataplaneMetadata::default()`.
pub trait MetadataExt<'a> {
    fn resource(self) -> Option<&'a ProxyResource>;
    fn dataplane_resource(self) -> Option<&'a DataplaneResource>;
    fn zone_ingress_resource(self) -> Option<&'a ZoneIngressResource>;
    fn zone_egress_resource(self) -> Option<&'a ZoneEgressResource>;
    fn proxy_type(self) -> ProxyType;
    fn admin_port(self) -> u32;
    fn dns_port(self) -> u32;
    fn empty_dns_port(self) -> u32;
    fn dynamic_metadata(self, key: &str) -> &'a str;
    fn dynamic_metadata_entries(self) -> &'a BTreeMap<String, String>;
    fn version(self) -> Option<&'a Version>;
    fn applications_metrics(self) -> &'a [ScrapeTarget];
}

impl<'a> MetadataExt<'a> for Option<&'a DataplaneMetadata> {
    fn resource(self) -> Option<&'a ProxyResource> {
        self.and_then(DataplaneMetadata::resource)
    }

    fn dataplane_resource(self) -> Option<&'a DataplaneResource> {
        self.and_then(DataplaneMetadata::dataplane_resource)
    }

    fn zone_ingress_resource(self) -> Option<&'a ZoneIngressResource> {
        self.and_then(DataplaneMetadata::zone_ingress_resource)
    }

    fn zone_egress_resource(self) -> Option<&'a ZoneEgressResource> {
        self.and_then(DataplaneMetadata::zone_egress_resource)
    }

    fn proxy_type(self) -> ProxyType {
        match self {
            Some(m) => m.proxy_type(),
            None => ProxyType::default(),
        }
    }

    fn admin_port(self) -> u32 {
        match self {
            Some(m) => m.admin_port,
            None => 0,
        }
    }

    fn dns_port(self) -> u32 {
        match self {
            Some(m) => m.dns_port,
            None => 0,
        }
    }

    fn empty_dns_port(self) -> u32 {
        match self {
            Some(m) => m.empty_dns_port,
            None => 0,
        }
    }

    fn dynamic_metadata(self, key: &str) -> &'a str {
        match self {
            Some(m) => m.dynamic_metadata(key),
            None => "",
        }
    }

    fn dynamic_metadata_entries(self) -> &'a BTreeMap<String, String> {
        match self {
            Some(m) => m.dynamic_metadata_entries(),
            None => &NO_DYNAMIC_METADATA,
        }
    }

    fn version(self) -> Option<&'a Version> {
        self.and_then(DataplaneMetadata::version)
    }

    fn applications_metrics(self) -> &'a [ScrapeTarget] {
        match self {
            Some(m) => m.applications_metrics(),
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::spec::ZoneIngressSpec;
    use crate::resource::types::{ResourceMeta, TypedResource};

    fn assert_default_view(view: Option<&DataplaneMetadata>) {
        assert!(view.resource().is_none());
        assert!(view.dataplane_resource().is_none());
        assert!(view.zone_ingress_resource().is_none());
        assert!(view.zone_egress_resource().is_none());
        assert_eq!(view.proxy_type(), ProxyType::Dataplane);
        assert_eq!(view.admin_port(), 0);
        assert_eq!(view.dns_port(), 0);
        assert_eq!(view.empty_dns_port(), 0);
        assert_eq!(view.dynamic_metadata("anything"), "");
        assert!(view.dynamic_metadata_entries().is_empty());
        assert!(view.version().is_none());
        assert!(view.applications_metrics().is_empty());
    }

    #[test]
    fn test_missing_metadata_matches_default() {
        assert_default_view(None);
        let empty = DataplaneMetadata::default();
        assert_default_view(Some(&empty));
    }

    #[test]
    fn test_resource_narrowing() {
        let metadata = DataplaneMetadata {
            resource: Some(ProxyResource::ZoneIngress(TypedResource {
                meta: ResourceMeta {
                    mesh: String::new(),
                    name: "zi-1".to_string(),
                },
                spec: ZoneIngressSpec::default(),
            })),
            ..Default::default()
        };

        assert_eq!(metadata.zone_ingress_resource().unwrap().meta.name, "zi-1");
        assert!(metadata.dataplane_resource().is_none());
        assert!(metadata.zone_egress_resource().is_none());
        assert!(Some(&metadata).zone_ingress_resource().is_some());
    }

    #[test]
    fn test_proxy_type_tags() {
        for t in [ProxyType::Dataplane, ProxyType::Ingress, ProxyType::Egress] {
            assert_eq!(ProxyType::from_tag(t.as_str()), Some(t));
        }
        assert_eq!(ProxyType::from_tag("gateway"), None);
        assert_eq!(ProxyType::from_tag(""), None);
    }

    #[test]
    fn test_explicit_proxy_type_wins() {
        let metadata = DataplaneMetadata {
            proxy_type: Some(ProxyType::Egress),
            ..Default::default()
        };
        assert_eq!(Some(&metadata).proxy_type(), ProxyType::Egress);
    }
}
