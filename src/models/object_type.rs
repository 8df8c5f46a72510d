//! Target object types

use super::property::{Attribute, Property, Relation};
use crate::mapping::{MappingError, MappingResult};
use serde::Serialize;
use std::collections::BTreeMap;

/// Object type of the target model
///
/// Properties are keyed by name; a name occurs at most once per object type.
/// Only serialized; object types are constructed through [`ObjectTypeBuilder`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<String>,
    pub properties: BTreeMap<String, Property>,
}

impl ObjectType {
    pub fn builder(name: impl Into<String>) -> ObjectTypeBuilder {
        ObjectTypeBuilder::new(name)
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.property(name).and_then(Property::as_attribute)
    }

    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.property(name).and_then(Property::as_relation)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.properties().filter_map(Property::as_attribute)
    }

    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.properties().filter_map(Property::as_relation)
    }

    /// Properties flagged as (part of) the identifier
    pub fn identifiers(&self) -> impl Iterator<Item = &Property> {
        self.properties().filter(|p| p.is_identifier())
    }
}

/// Builder for [`ObjectType`]
///
/// Duplicate property names are reported by [`ObjectTypeBuilder::build`].
#[derive(Debug)]
pub struct ObjectTypeBuilder {
    name: String,
    supertypes: Vec<String>,
    properties: Vec<Property>,
}

impl ObjectTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supertypes: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn supertype(mut self, name: impl Into<String>) -> Self {
        self.supertypes.push(name.into());
        self
    }

    pub fn property(mut self, property: impl Into<Property>) -> Self {
        self.properties.push(property.into());
        self
    }

    pub fn properties<I>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = Property>,
    {
        self.properties.extend(properties);
        self
    }

    pub fn build(self) -> MappingResult<ObjectType> {
        let mut properties = BTreeMap::new();
        for property in self.properties {
            let key = property.name().to_string();
            if properties.contains_key(&key) {
                return Err(MappingError::DuplicateProperty {
                    object_type: self.name,
                    property: key,
                });
            }
            properties.insert(key, property);
        }

        Ok(ObjectType {
            name: self.name,
            supertypes: self.supertypes,
            properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cardinality, ValueType};

    #[test]
    fn test_build_object_type() {
        let object_type = ObjectType::builder("Fiets")
            .supertype("Product")
            .property(
                Attribute::new("framenummer", ValueType::String, Cardinality::Required)
                    .with_identifier(true),
            )
            .property(Relation::new("winkel", "Winkel", Cardinality::Optional))
            .build()
            .unwrap();

        assert_eq!(object_type.name, "Fiets");
        assert_eq!(object_type.supertypes, vec!["Product".to_string()]);
        assert_eq!(object_type.attributes().count(), 1);
        assert_eq!(object_type.relations().count(), 1);
        assert_eq!(object_type.identifiers().count(), 1);
        assert!(object_type.attribute("winkel").is_none());
        assert_eq!(object_type.relation("winkel").unwrap().target, "Winkel");
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let err = ObjectType::builder("Fiets")
            .property(Attribute::new("kleur", ValueType::String, Cardinality::Optional))
            .property(Relation::new("kleur", "Kleur", Cardinality::Optional))
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            MappingError::DuplicateProperty {
                object_type: "Fiets".to_string(),
                property: "kleur".to_string(),
            }
        );
    }
}
