//! Node metadata keys understood by the control plane.
//!
//! These names are shared with the handshake producer and must not change.

pub const ADMIN_PORT: &str = "dataplane.admin.port";
pub const APPLICATIONS_METRICS: &str = "dataplane.applications.metrics";
pub const DNS_PORT: &str = "dataplane.dns.port";
pub const EMPTY_DNS_PORT: &str = "dataplane.dns.empty.port";
pub const RESOURCE: &str = "dataplane.resource";
pub const DYNAMIC_METADATA: &str = "dynamicMetadata";
pub const PROXY_TYPE: &str = "dataplane.proxyType";
pub const VERSION: &str = "version";

/// Dynamic metadata keys starting with this prefix (plus [`SEPARATOR`]) carry
/// dependency versions rather than plain metadata.
pub const PREFIX_DEPENDENCIES_VERSION: &str = "version.dependencies";
pub const SEPARATOR: char = '.';

// Scrape target sub-document keys.
pub const SCRAPE_PATH: &str = "path";
pub const SCRAPE_NAME: &str = "name";
pub const SCRAPE_PORT: &str = "port";

/// Dependency name carried by a prefixed dynamic metadata key, if any.
pub fn dependency_name(key: &str) -> Option<&str> {
    key.strip_prefix(PREFIX_DEPENDENCIES_VERSION)?
        .strip_prefix(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_name() {
        assert_eq!(dependency_name("version.dependencies.coredns"), Some("coredns"));
        assert_eq!(dependency_name("version.dependencies."), Some(""));
        assert_eq!(dependency_name("version.dependencies"), None);
        assert_eq!(dependency_name("version.dependenciesX"), None);
        assert_eq!(dependency_name("zone"), None);
    }
}
