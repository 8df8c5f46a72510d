//! Target model and its builder

use super::object_type::ObjectType;
use crate::mapping::{MappingError, MappingResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Immutable target model: object types keyed by unique name
///
/// Only serialized; models are constructed through [`ModelBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    object_types: BTreeMap<String, ObjectType>,
}

impl Model {
    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.object_types.get(name)
    }

    /// Object types in name order
    pub fn object_types(&self) -> impl Iterator<Item = &ObjectType> {
        self.object_types.values()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.object_types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.object_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object_types.is_empty()
    }
}

/// Accumulates object types into a [`Model`]
///
/// A name may be added only once; [`ModelBuilder::build`] fails on the first
/// duplicate instead of letting a later object type replace an earlier one.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    alias: Option<String>,
    object_types: Vec<ObjectType>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn object_type(mut self, object_type: ObjectType) -> Self {
        self.object_types.push(object_type);
        self
    }

    /// Add an object type through a mutable reference
    pub fn push(&mut self, object_type: ObjectType) {
        self.object_types.push(object_type);
    }

    pub fn build(self) -> MappingResult<Model> {
        let mut object_types = BTreeMap::new();
        for object_type in self.object_types {
            if object_types.contains_key(&object_type.name) {
                return Err(MappingError::DuplicateObjectType {
                    name: object_type.name,
                });
            }
            object_types.insert(object_type.name.clone(), object_type);
        }

        Ok(Model {
            alias: self.alias,
            object_types,
        })
    }
}
