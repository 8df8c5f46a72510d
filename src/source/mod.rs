//! Source information model
//!
//! In-memory form of a MIM information model as produced by a document
//! parser: packages holding object types, datagroup types and datatypes.
//! Elements refer to each other by name. The mapper only ever reads it.

pub mod datatype;
pub mod graph;
pub mod occurrence;

pub use datatype::{
    CodeList, DataElement, Datatype, Enumeration, PrimitiveDatatype, ReferenceList,
    StructuredDatatype,
};
pub use graph::{SourceIndex, SupertypeGraph};
pub use occurrence::{Occurrence, OccurrenceParseError};

use serde::{Deserialize, Serialize};

/// Common view on attribute definitions and data elements
pub trait Member {
    fn name(&self) -> &str;
    fn is_identifier(&self) -> bool;
    fn occurrence(&self) -> Option<&Occurrence>;
    /// Name of the single datatype, if declared
    fn datatype(&self) -> Option<&str>;
    /// Alternative datatype names, if the member declares a choice
    fn choice(&self) -> Option<&[String]>;
}

/// A complete information model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceModel {
    pub name: String,
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl SourceModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packages: Vec::new(),
        }
    }

    pub fn with_package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    /// Parse a source model from YAML
    pub fn from_yaml(yaml_content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml_content)
    }

    /// Parse a source model from JSON
    pub fn from_json(json_content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_content)
    }

    pub fn object_types(&self) -> impl Iterator<Item = &ObjectType> {
        self.packages.iter().flat_map(|p| p.object_types.iter())
    }

    pub fn datagroup_types(&self) -> impl Iterator<Item = &DatagroupType> {
        self.packages.iter().flat_map(|p| p.datagroup_types.iter())
    }

    pub fn datatypes(&self) -> impl Iterator<Item = &Datatype> {
        self.packages.iter().flat_map(|p| p.datatypes.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub object_types: Vec<ObjectType>,
    #[serde(default)]
    pub datagroup_types: Vec<DatagroupType>,
    #[serde(default)]
    pub datatypes: Vec<Datatype>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_object_type(mut self, object_type: ObjectType) -> Self {
        self.object_types.push(object_type);
        self
    }

    pub fn with_datagroup_type(mut self, datagroup_type: DatagroupType) -> Self {
        self.datagroup_types.push(datagroup_type);
        self
    }

    pub fn with_datatype(mut self, datatype: Datatype) -> Self {
        self.datatypes.push(datatype);
        self
    }
}

/// Object type (MIM "objecttype")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    pub name: String,
    /// Abstract object types are only mapped through their subtypes
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
    #[serde(default)]
    pub relations: Vec<RelationDefinition>,
    #[serde(default)]
    pub datagroups: Vec<DatagroupReference>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_supertype(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeDefinition) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_relation(mut self, relation: RelationDefinition) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn with_datagroup(mut self, datagroup: DatagroupReference) -> Self {
        self.datagroups.push(datagroup);
        self
    }
}

/// Datagroup type (MIM "gegevensgroeptype")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatagroupType {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
    #[serde(default)]
    pub relations: Vec<RelationDefinition>,
    #[serde(default)]
    pub datagroups: Vec<DatagroupReference>,
}

impl DatagroupType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeDefinition) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_relation(mut self, relation: RelationDefinition) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn with_datagroup(mut self, datagroup: DatagroupReference) -> Self {
        self.datagroups.push(datagroup);
        self
    }
}

/// Attribute definition (MIM "attribuutsoort")
///
/// Declares either a single `datatype` or a `choice` of datatypes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    pub name: String,
    #[serde(default)]
    pub identifier: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence: Option<Occurrence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<Vec<String>>,
}

impl AttributeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_datatype(mut self, datatype: impl Into<String>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    pub fn with_choice<I, S>(mut self, datatypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choice = Some(datatypes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrence = Some(occurrence);
        self
    }

    pub fn with_identifier(mut self, identifier: bool) -> Self {
        self.identifier = identifier;
        self
    }
}

impl Member for AttributeDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_identifier(&self) -> bool {
        self.identifier
    }

    fn occurrence(&self) -> Option<&Occurrence> {
        self.occurrence.as_ref()
    }

    fn datatype(&self) -> Option<&str> {
        self.datatype.as_deref()
    }

    fn choice(&self) -> Option<&[String]> {
        self.choice.as_deref()
    }
}

/// Relation definition (MIM "relatiesoort")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDefinition {
    pub name: String,
    #[serde(default)]
    pub identifier: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence: Option<Occurrence>,
    /// Target object type; relations without a resolvable target are not mapped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse_occurrence: Option<Occurrence>,
}

impl RelationDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrence = Some(occurrence);
        self
    }

    pub fn with_identifier(mut self, identifier: bool) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn with_inverse(mut self, name: impl Into<String>, occurrence: Option<Occurrence>) -> Self {
        self.inverse_name = Some(name.into());
        self.inverse_occurrence = occurrence;
        self
    }
}

/// Reference from an owner to a datagroup type (MIM "gegevensgroep")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatagroupReference {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence: Option<Occurrence>,
    /// Name of the referenced datagroup type
    #[serde(rename = "type")]
    pub datagroup_type: String,
}

impl DatagroupReference {
    pub fn new(name: impl Into<String>, datagroup_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            occurrence: None,
            datagroup_type: datagroup_type.into(),
        }
    }

    pub fn with_occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrence = Some(occurrence);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_model() {
        let yaml = r#"
name: Fietsenwinkel
packages:
  - name: Domein
    objectTypes:
      - name: Fiets
        supertypes: [Product]
        attributes:
          - name: framenummer
            identifier: true
            occurrence: 1
            datatype: CharacterString
          - name: locatie
            choice: [GM_Point, GM_Surface]
        relations:
          - name: verkochtDoor
            target: Winkel
            inverseName: verkochteFietsen
        datagroups:
          - name: afmetingen
            type: Afmetingen
      - name: Product
        abstract: true
"#;
        let model = SourceModel::from_yaml(yaml).unwrap();
        assert_eq!(model.name, "Fietsenwinkel");
        assert_eq!(model.object_types().count(), 2);

        let fiets = &model.packages[0].object_types[0];
        assert!(!fiets.is_abstract);
        assert_eq!(fiets.supertypes, vec!["Product".to_string()]);
        assert_eq!(fiets.attributes[0].occurrence, Some(Occurrence::required()));
        assert_eq!(fiets.attributes[1].choice().map(<[String]>::len), Some(2));
        assert_eq!(fiets.relations[0].inverse_occurrence, None);
        assert_eq!(fiets.datagroups[0].datagroup_type, "Afmetingen");

        assert!(model.packages[0].object_types[1].is_abstract);
    }

    #[test]
    fn test_json_roundtrip_keeps_names() {
        let model = SourceModel::new("Test").with_package(
            Package::new("P").with_object_type(
                ObjectType::new("A")
                    .with_attribute(AttributeDefinition::new("a").with_datatype("Integer")),
            ),
        );

        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains("\"objectTypes\""));
        assert_eq!(SourceModel::from_json(&json).unwrap(), model);
    }
}
