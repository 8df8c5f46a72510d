//! Scalar value types and the registry that creates them
//!
//! The mapper resolves a value type *name* and asks the registry for the
//! factory registered under that name. Factories receive a JSON object with
//! type-specific options, e.g. `{"srid": 28992}` for geometry.

use crate::mapping::{MappingError, MappingResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Options passed to a value type factory
pub type TypeOptions = serde_json::Map<String, serde_json::Value>;

/// Option key carrying the spatial reference id of geometry types
pub const SRID_OPTION: &str = "srid";

/// Canonical scalar kinds of the target schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScalarKind {
    String,
    Integer,
    /// Single precision
    Float,
    /// Double precision
    Double,
    Boolean,
    Geometry,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 6] = [
        ScalarKind::String,
        ScalarKind::Integer,
        ScalarKind::Float,
        ScalarKind::Double,
        ScalarKind::Boolean,
        ScalarKind::Geometry,
    ];

    /// Name under which the kind is registered
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::String => "String",
            ScalarKind::Integer => "Integer",
            ScalarKind::Float => "Float",
            ScalarKind::Double => "Double",
            ScalarKind::Boolean => "Boolean",
            ScalarKind::Geometry => "Geometry",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScalarKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown scalar kind: {}", s))
    }
}

/// A created value type attached to an attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ValueType {
    String,
    Integer,
    Float,
    Double,
    Boolean,
    Geometry { srid: u32 },
    /// Value type produced by a host-registered factory
    Custom { name: String, options: TypeOptions },
}

impl ValueType {
    pub fn name(&self) -> &str {
        match self {
            ValueType::String => ScalarKind::String.name(),
            ValueType::Integer => ScalarKind::Integer.name(),
            ValueType::Float => ScalarKind::Float.name(),
            ValueType::Double => ScalarKind::Double.name(),
            ValueType::Boolean => ScalarKind::Boolean.name(),
            ValueType::Geometry { .. } => ScalarKind::Geometry.name(),
            ValueType::Custom { name, .. } => name,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Geometry { srid } => write!(f, "Geometry(srid={})", srid),
            other => f.write_str(other.name()),
        }
    }
}

/// Creates value types of one named kind
pub trait ValueTypeFactory: Send + Sync {
    /// Name the factory is registered under
    fn type_name(&self) -> &str;

    fn create(&self, options: &TypeOptions) -> MappingResult<ValueType>;
}

/// Factory for the option-less scalar kinds
#[derive(Debug, Clone, Copy)]
pub struct ScalarTypeFactory {
    kind: ScalarKind,
}

impl ScalarTypeFactory {
    pub fn new(kind: ScalarKind) -> Self {
        Self { kind }
    }
}

impl ValueTypeFactory for ScalarTypeFactory {
    fn type_name(&self) -> &str {
        self.kind.name()
    }

    fn create(&self, options: &TypeOptions) -> MappingResult<ValueType> {
        Ok(match self.kind {
            ScalarKind::String => ValueType::String,
            ScalarKind::Integer => ValueType::Integer,
            ScalarKind::Float => ValueType::Float,
            ScalarKind::Double => ValueType::Double,
            ScalarKind::Boolean => ValueType::Boolean,
            ScalarKind::Geometry => GeometryTypeFactory.create(options)?,
        })
    }
}

/// Factory for geometry types; requires an integer `srid` option
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryTypeFactory;

impl ValueTypeFactory for GeometryTypeFactory {
    fn type_name(&self) -> &str {
        ScalarKind::Geometry.name()
    }

    fn create(&self, options: &TypeOptions) -> MappingResult<ValueType> {
        let invalid = |reason: &str| MappingError::InvalidTypeOptions {
            type_name: self.type_name().to_string(),
            reason: reason.to_string(),
        };

        let srid = options
            .get(SRID_OPTION)
            .ok_or_else(|| invalid("missing 'srid'"))?
            .as_u64()
            .ok_or_else(|| invalid("'srid' must be a non-negative integer"))?;
        let srid = u32::try_from(srid).map_err(|_| invalid("'srid' is out of range"))?;

        Ok(ValueType::Geometry { srid })
    }
}

/// Value type factories keyed by type name
#[derive(Clone, Default)]
pub struct ValueTypeRegistry {
    factories: HashMap<String, Arc<dyn ValueTypeFactory>>,
}

impl ValueTypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding factories for every scalar kind
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in ScalarKind::ALL {
            match kind {
                ScalarKind::Geometry => registry.register(GeometryTypeFactory),
                kind => registry.register(ScalarTypeFactory::new(kind)),
            };
        }
        registry
    }

    /// Register a factory, replacing any factory with the same name
    pub fn register<F>(&mut self, factory: F) -> &mut Self
    where
        F: ValueTypeFactory + 'static,
    {
        self.factories
            .insert(factory.type_name().to_string(), Arc::new(factory));
        self
    }

    /// Look up the factory registered under `name`
    pub fn factory(&self, name: &str) -> MappingResult<&dyn ValueTypeFactory> {
        self.factories
            .get(name)
            .map(|factory| factory.as_ref())
            .ok_or_else(|| MappingError::UnknownValueType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Look up and create in one step
    pub fn create(&self, name: &str, options: &TypeOptions) -> MappingResult<ValueType> {
        self.factory(name)?.create(options)
    }
}

impl fmt::Debug for ValueTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ValueTypeRegistry")
            .field("factories", &names)
            .finish()
    }
}
