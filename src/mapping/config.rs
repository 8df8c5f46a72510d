//! Configuration for model mapping

use crate::models::ScalarKind;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Name prefix shared by the ISO 19107 geometry datatypes
pub const GEOMETRY_PREFIX: &str = "GM_";

/// Spatial reference id of the Dutch national grid (RD New)
pub const DEFAULT_SRID: u32 = 28992;

/// MIM primitive every string-like datatype derives from
pub const CHARACTER_STRING: &str = "CharacterString";

static DEFAULT_SCALAR_MAPPINGS: Lazy<BTreeMap<String, ScalarKind>> = Lazy::new(|| {
    [
        (CHARACTER_STRING, ScalarKind::String),
        ("Date", ScalarKind::String),
        ("DateTime", ScalarKind::String),
        ("Year", ScalarKind::String),
        ("URI", ScalarKind::String),
        ("Real", ScalarKind::Float),
        ("Decimal", ScalarKind::Double),
        ("Integer", ScalarKind::Integer),
        ("Boolean", ScalarKind::Boolean),
    ]
    .into_iter()
    .map(|(name, kind)| (name.to_string(), kind))
    .collect()
});

/// Configuration for model mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapperConfig {
    /// Datatype names starting with this prefix are geometries
    pub geometry_prefix: String,
    /// Datatypes deriving from this type are strings
    pub string_supertype: String,
    /// Spatial reference id given to created geometry types
    pub default_srid: u32,
    /// Canonical base name to scalar kind
    pub scalar_mappings: BTreeMap<String, ScalarKind>,
    /// What to do with a base name missing from `scalar_mappings`
    pub unmapped_types: UnmappedTypePolicy,
    /// Include members inherited from supertypes of object types
    pub include_inherited: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            geometry_prefix: GEOMETRY_PREFIX.to_string(),
            string_supertype: CHARACTER_STRING.to_string(),
            default_srid: DEFAULT_SRID,
            scalar_mappings: DEFAULT_SCALAR_MAPPINGS.clone(),
            unmapped_types: UnmappedTypePolicy::default(),
            include_inherited: true,
        }
    }
}

impl MapperConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spatial reference id for geometry types
    pub fn with_default_srid(mut self, srid: u32) -> Self {
        self.default_srid = srid;
        self
    }

    /// Set the geometry datatype prefix
    pub fn with_geometry_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.geometry_prefix = prefix.into();
        self
    }

    /// Add or replace one entry of the scalar mapping table
    pub fn with_scalar_mapping(mut self, base_name: impl Into<String>, kind: ScalarKind) -> Self {
        self.scalar_mappings.insert(base_name.into(), kind);
        self
    }

    /// Set the policy for unmapped base names
    pub fn with_unmapped_types(mut self, policy: UnmappedTypePolicy) -> Self {
        self.unmapped_types = policy;
        self
    }

    /// Enable/disable inherited members
    pub fn with_include_inherited(mut self, enabled: bool) -> Self {
        self.include_inherited = enabled;
        self
    }

    /// Scalar kind for a canonical base name, if mapped
    pub fn scalar_kind(&self, base_name: &str) -> Option<ScalarKind> {
        self.scalar_mappings.get(base_name).copied()
    }

    pub fn is_geometry_name(&self, name: &str) -> bool {
        name.starts_with(&self.geometry_prefix)
    }
}

/// Handling of canonical base names without a scalar mapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnmappedTypePolicy {
    /// Abort mapping with an unresolvable-type error
    #[default]
    Fail,
    /// Use the base name itself as value type name
    PassThrough,
}

impl fmt::Display for UnmappedTypePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmappedTypePolicy::Fail => write!(f, "fail"),
            UnmappedTypePolicy::PassThrough => write!(f, "passThrough"),
        }
    }
}

impl FromStr for UnmappedTypePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "fail" => Ok(UnmappedTypePolicy::Fail),
            "passthrough" => Ok(UnmappedTypePolicy::PassThrough),
            _ => Err(format!("Unknown unmapped type policy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MapperConfig::default();
        assert_eq!(config.default_srid, 28992);
        assert_eq!(config.geometry_prefix, "GM_");
        assert_eq!(config.unmapped_types, UnmappedTypePolicy::Fail);
        assert!(config.include_inherited);

        assert_eq!(config.scalar_kind("Real"), Some(ScalarKind::Float));
        assert_eq!(config.scalar_kind("Decimal"), Some(ScalarKind::Double));
        assert_eq!(config.scalar_kind("URI"), Some(ScalarKind::String));
        assert_eq!(config.scalar_kind("Month"), None);
    }

    #[test]
    fn test_builder() {
        let config = MapperConfig::new()
            .with_default_srid(4326)
            .with_scalar_mapping("Month", ScalarKind::Integer)
            .with_unmapped_types(UnmappedTypePolicy::PassThrough)
            .with_include_inherited(false);

        assert_eq!(config.default_srid, 4326);
        assert_eq!(config.scalar_kind("Month"), Some(ScalarKind::Integer));
        assert_eq!(config.unmapped_types, UnmappedTypePolicy::PassThrough);
        assert!(!config.include_inherited);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: MapperConfig = serde_yaml::from_str("defaultSrid: 4258\nunmappedTypes: passThrough\n").unwrap();
        assert_eq!(config.default_srid, 4258);
        assert_eq!(config.unmapped_types, UnmappedTypePolicy::PassThrough);
        assert_eq!(config.scalar_kind("Integer"), Some(ScalarKind::Integer));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("fail".parse::<UnmappedTypePolicy>().unwrap(), UnmappedTypePolicy::Fail);
        assert_eq!(
            "pass-through".parse::<UnmappedTypePolicy>().unwrap(),
            UnmappedTypePolicy::PassThrough
        );
        assert!("ignore".parse::<UnmappedTypePolicy>().is_err());
    }
}
