//! Entity names used on the command line for mesh resources.

use serde::Serialize;

use crate::resource::types::ResourceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub singular: &'static str,
    pub plural: &'static str,
    pub resource_type: ResourceType,
    pub read_only: bool,
}

const fn def(singular: &'static str, plural: &'static str, resource_type: ResourceType) -> Definition {
    Definition {
        singular,
        plural,
        resource_type,
        read_only: false,
    }
}

static MESH_ENTITIES: [Definition; 15] = [
    def("circuit-breaker", "circuit-breakers", ResourceType::CircuitBreaker),
    def("dataplane", "dataplanes", ResourceType::Dataplane),
    def("external-service", "external-services", ResourceType::ExternalService),
    def("fault-injection", "fault-injections", ResourceType::FaultInjection),
    def("health-check", "health-checks", ResourceType::HealthCheck),
    def("mesh", "meshes", ResourceType::Mesh),
    def("proxytemplate", "proxytemplates", ResourceType::ProxyTemplate),
    def("rate-limit", "rate-limits", ResourceType::RateLimit),
    def("retry", "retries", ResourceType::Retry),
    def("timeout", "timeouts", ResourceType::Timeout),
    def("traffic-log", "traffic-logs", ResourceType::TrafficLog),
    def("traffic-permission", "traffic-permissions", ResourceType::TrafficPermission),
    def("traffic-route", "traffic-routes", ResourceType::TrafficRoute),
    def("traffic-trace", "traffic-traces", ResourceType::TrafficTrace),
    def("zone-ingress", "zone-ingresses", ResourceType::ZoneIngress),
];

pub fn mesh_entities() -> &'static [Definition] {
    &MESH_ENTITIES
}

/// Find an entity by its singular or plural name.
pub fn lookup(name: &str) -> Option<&'static Definition> {
    MESH_ENTITIES
        .iter()
        .find(|d| d.singular == name || d.plural == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_forms() {
        assert_eq!(lookup("mesh").unwrap().resource_type, ResourceType::Mesh);
        assert_eq!(lookup("meshes").unwrap().resource_type, ResourceType::Mesh);
        assert_eq!(lookup("retries").unwrap().singular, "retry");
        assert!(lookup("zone-egress").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<&str> = mesh_entities()
            .iter()
            .flat_map(|d| [d.singular, d.plural])
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
