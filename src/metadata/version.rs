//! Version record reported by a proxy in its node metadata.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metadata::value::{Struct, Value};

const FIELD_KUMA_DP: &str = "kumaDp";
const FIELD_ENVOY: &str = "envoy";
const FIELD_DEPENDENCIES: &str = "dependencies";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub kuma_dp: Option<KumaDpVersion>,
    pub envoy: Option<EnvoyVersion>,
    /// `None` unless the document carried a `dependencies` map. Dependency
    /// versions from dynamic metadata are only merged into an existing map.
    pub dependencies: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KumaDpVersion {
    pub version: String,
    pub git_tag: String,
    pub git_commit: String,
    pub build_date: String,
    pub kuma_cp_compatible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvoyVersion {
    pub version: String,
    pub build: String,
    pub kuma_dp_compatible: bool,
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("field {field} must be a struct, got {actual}")]
    NotAStruct {
        field: &'static str,
        actual: &'static str,
    },

    #[error("invalid value for field {field}: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Version {
    /// Convert a metadata document into a version record.
    ///
    /// Fields are converted one by one and unknown fields are ignored. A field
    /// that fails to convert is left unset while the others still populate, so
    /// the returned record is always usable; the first failure is returned
    /// alongside it.
    pub fn from_struct(document: &Struct) -> (Version, Option<ConversionError>) {
        let mut first_error = None;
        let version = Version {
            kuma_dp: keep(sub_record(document, FIELD_KUMA_DP), &mut first_error),
            envoy: keep(sub_record(document, FIELD_ENVOY), &mut first_error),
            dependencies: keep(sub_record(document, FIELD_DEPENDENCIES), &mut first_error),
        };
        (version, first_error)
    }

    pub fn dependencies(&self) -> Option<&BTreeMap<String, String>> {
        self.dependencies.as_ref()
    }
}

fn keep<T>(
    result: Result<Option<T>, ConversionError>,
    first_error: &mut Option<ConversionError>,
) -> Option<T> {
    result.unwrap_or_else(|e| {
        first_error.get_or_insert(e);
        None
    })
}

fn sub_record<T: DeserializeOwned>(
    document: &Struct,
    field: &'static str,
) -> Result<Option<T>, ConversionError> {
    let fields = match document.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Struct(fields)) => fields,
        Some(other) => {
            return Err(ConversionError::NotAStruct {
                field,
                actual: other.kind_name(),
            })
        }
    };
    let json = serde_json::Value::from(Value::Struct(fields.clone()));
    serde_json::from_value(json)
        .map(Some)
        .map_err(|source| ConversionError::Field { field, source })
}
