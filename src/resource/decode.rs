//! Decoding of resources from their REST (JSON) representation.
//!
//! ```text
//! {"type": "Dataplane", "mesh": "default", "name": "web-1", "networking": {...}}
//!  └─ kind ─────────┘  └─ meta ──────────────────────────┘  └─ spec ─────────┘
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::resource::types::{
    Resource, ResourceError, ResourceMeta, ResourceType, TypedResource, UntypedResource,
};

const FIELD_TYPE: &str = "type";
const FIELD_MESH: &str = "mesh";
const FIELD_NAME: &str = "name";

/// Store-managed fields that never belong to the spec.
const SYSTEM_FIELDS: [&str; 3] = ["creationTime", "modificationTime", "labels"];

/// Decode a resource from raw bytes.
pub fn decode_resource(bytes: &[u8]) -> Result<Resource, ResourceError> {
    let document: Value = serde_json::from_slice(bytes).map_err(ResourceError::Json)?;
    let Value::Object(mut fields) = document else {
        return Err(ResourceError::NotAnObject);
    };

    let type_name = match fields.remove(FIELD_TYPE) {
        Some(Value::String(name)) if !name.is_empty() => name,
        _ => return Err(ResourceError::MissingType),
    };
    let resource_type =
        ResourceType::from_name(&type_name).ok_or(ResourceError::UnknownType(type_name))?;

    let mesh = take_string(&mut fields, FIELD_MESH);
    let meta = ResourceMeta {
        mesh: if resource_type.is_global() { String::new() } else { mesh },
        name: take_string(&mut fields, FIELD_NAME),
    };
    for system in SYSTEM_FIELDS {
        fields.remove(system);
    }

    let resource = match resource_type {
        ResourceType::Dataplane => Resource::Dataplane(typed(resource_type, meta, fields)?),
        ResourceType::ZoneIngress => Resource::ZoneIngress(typed(resource_type, meta, fields)?),
        ResourceType::ZoneEgress => Resource::ZoneEgress(typed(resource_type, meta, fields)?),
        _ => Resource::Other(UntypedResource {
            resource_type,
            meta,
            spec: fields,
        }),
    };
    Ok(resource)
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> String {
    match fields.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

fn typed<S: DeserializeOwned>(
    resource_type: ResourceType,
    meta: ResourceMeta,
    spec: Map<String, Value>,
) -> Result<TypedResource<S>, ResourceError> {
    let spec = serde_json::from_value(Value::Object(spec))
        .map_err(|source| ResourceError::Spec { resource_type, source })?;
    Ok(TypedResource { meta, spec })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_dataplane() {
        let raw = br#"{
            "type": "Dataplane",
            "mesh": "default",
            "name": "web-1",
            "creationTime": "0001-01-01T00:00:00Z",
            "networking": {
                "address": "192.168.0.2",
                "inbound": [{"port": 8080, "servicePort": 80, "tags": {"kuma.io/service": "web"}}]
            }
        }"#;

        let Resource::Dataplane(dp) = decode_resource(raw).unwrap() else {
            panic!("expected a dataplane");
        };
        assert_eq!(dp.meta.mesh, "default");
        assert_eq!(dp.meta.name, "web-1");
        assert_eq!(dp.spec.networking.inbound[0].service_port, 80);
    }

    #[test]
    fn test_decode_zone_ingress_drops_mesh() {
        let raw = br#"{"type": "ZoneIngress", "mesh": "ignored", "name": "zi", "zone": "east"}"#;
        let resource = decode_resource(raw).unwrap();
        assert_eq!(resource.resource_type(), ResourceType::ZoneIngress);
        assert_eq!(resource.meta().mesh, "");
        assert_eq!(resource.meta().name, "zi");
    }

    #[test]
    fn test_decode_other_kind_keeps_raw_spec() {
        let raw = br#"{"type": "TrafficRoute", "mesh": "default", "name": "route", "conf": {"split": []}}"#;
        let Resource::Other(r) = decode_resource(raw).unwrap() else {
            panic!("expected an untyped resource");
        };
        assert_eq!(r.resource_type, ResourceType::TrafficRoute);
        assert!(r.spec.contains_key("conf"));
        assert!(!r.spec.contains_key("type"));
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode_resource(b""), Err(ResourceError::Json(_))));
        assert!(matches!(decode_resource(b"{not json"), Err(ResourceError::Json(_))));
        assert!(matches!(decode_resource(b"[1]"), Err(ResourceError::NotAnObject)));
        assert!(matches!(decode_resource(b"{}"), Err(ResourceError::MissingType)));
        assert!(matches!(
            decode_resource(br#"{"type": 3}"#),
            Err(ResourceError::MissingType)
        ));
        assert!(matches!(
            decode_resource(br#"{"type": "Pod"}"#),
            Err(ResourceError::UnknownType(t)) if t == "Pod"
        ));
        assert!(matches!(
            decode_resource(br#"{"type": "Dataplane", "networking": "10.0.0.1"}"#),
            Err(ResourceError::Spec { resource_type: ResourceType::Dataplane, .. })
        ));
    }
}
