//! Properties of target object types

use super::cardinality::Cardinality;
use super::value_type::ValueType;
use serde::{Deserialize, Serialize};

/// A property is either a scalar attribute or a relation to another object type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Property {
    Attribute(Attribute),
    Relation(Relation),
}

impl Property {
    pub fn name(&self) -> &str {
        match self {
            Property::Attribute(attribute) => &attribute.name,
            Property::Relation(relation) => &relation.name,
        }
    }

    pub fn is_identifier(&self) -> bool {
        match self {
            Property::Attribute(attribute) => attribute.identifier,
            Property::Relation(relation) => relation.identifier,
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        match self {
            Property::Attribute(attribute) => attribute.cardinality,
            Property::Relation(relation) => relation.cardinality,
        }
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Property::Attribute(attribute) => Some(attribute),
            Property::Relation(_) => None,
        }
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Property::Relation(relation) => Some(relation),
            Property::Attribute(_) => None,
        }
    }
}

impl From<Attribute> for Property {
    fn from(attribute: Attribute) -> Self {
        Property::Attribute(attribute)
    }
}

impl From<Relation> for Property {
    fn from(relation: Relation) -> Self {
        Property::Relation(relation)
    }
}

/// Scalar-valued property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub identifier: bool,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub cardinality: Cardinality,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value_type: ValueType, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            identifier: false,
            value_type,
            cardinality,
        }
    }

    pub fn with_identifier(mut self, identifier: bool) -> Self {
        self.identifier = identifier;
        self
    }
}

/// Property referring to another object type by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub name: String,
    #[serde(default)]
    pub identifier: bool,
    /// Name of the target object type
    pub target: String,
    pub cardinality: Cardinality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse_cardinality: Option<Cardinality>,
}

impl Relation {
    pub fn new(name: impl Into<String>, target: impl Into<String>, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            identifier: false,
            target: target.into(),
            cardinality,
            inverse_name: None,
            inverse_cardinality: None,
        }
    }

    pub fn with_identifier(mut self, identifier: bool) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_inverse(mut self, name: Option<String>, cardinality: Cardinality) -> Self {
        self.inverse_name = name;
        self.inverse_cardinality = Some(cardinality);
        self
    }
}
