//! Source datatypes
//!
//! Datatypes are a closed set of variants. Only structured datatypes and
//! reference lists carry structure; every other variant denotes a scalar value.

use super::Member;
use super::occurrence::Occurrence;
use serde::{Deserialize, Serialize};

/// A datatype declared in a source package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Datatype {
    /// Fixed list of allowed values
    Enumeration(Enumeration),
    /// Externally managed list of codes
    CodeList(CodeList),
    /// Primitive datatype, optionally constrained by a formal pattern
    Primitive(PrimitiveDatatype),
    /// Datatype composed of data elements
    Structured(StructuredDatatype),
    /// Reference to an externally managed list of objects
    ReferenceList(ReferenceList),
}

impl Datatype {
    pub fn name(&self) -> &str {
        match self {
            Datatype::Enumeration(dt) => &dt.name,
            Datatype::CodeList(dt) => &dt.name,
            Datatype::Primitive(dt) => &dt.name,
            Datatype::Structured(dt) => &dt.name,
            Datatype::ReferenceList(dt) => &dt.name,
        }
    }

    /// Directly declared supertype names
    pub fn supertypes(&self) -> &[String] {
        match self {
            Datatype::Enumeration(dt) => &dt.supertypes,
            Datatype::CodeList(dt) => &dt.supertypes,
            Datatype::Primitive(dt) => &dt.supertypes,
            Datatype::Structured(dt) => &dt.supertypes,
            Datatype::ReferenceList(dt) => &dt.supertypes,
        }
    }

    /// Whether values of this datatype map to a scalar attribute
    ///
    /// Structured datatypes and reference lists always become relations.
    pub fn is_scalar_like(&self) -> bool {
        match self {
            Datatype::Structured(_) | Datatype::ReferenceList(_) => false,
            Datatype::Enumeration(_) | Datatype::CodeList(_) | Datatype::Primitive(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enumeration {
    pub name: String,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeList {
    pub name: String,
    #[serde(default)]
    pub supertypes: Vec<String>,
    /// Where the code list is published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveDatatype {
    pub name: String,
    #[serde(default)]
    pub supertypes: Vec<String>,
    /// Formal pattern (MIM "formeel patroon") constraining the lexical form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl PrimitiveDatatype {
    /// Whether a non-blank formal pattern is declared
    pub fn has_pattern(&self) -> bool {
        self.pattern.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredDatatype {
    pub name: String,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub data_elements: Vec<DataElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceList {
    pub name: String,
    #[serde(default)]
    pub supertypes: Vec<String>,
}

/// Member of a structured datatype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataElement {
    pub name: String,
    #[serde(default)]
    pub identifier: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence: Option<Occurrence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl Member for DataElement {
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
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primitive(name: &str, pattern: Option<&str>) -> Datatype {
        Datatype::Primitive(PrimitiveDatatype {
            name: name.to_string(),
            supertypes: Vec::new(),
            pattern: pattern.map(str::to_string),
        })
    }

    #[test]
    fn test_scalar_like_variants() {
        let structured = Datatype::Structured(StructuredDatatype {
            name: "Bedrag".to_string(),
            supertypes: Vec::new(),
            data_elements: Vec::new(),
        });
        let reference_list = Datatype::ReferenceList(ReferenceList {
            name: "Landen".to_string(),
            supertypes: Vec::new(),
        });
        let enumeration = Datatype::Enumeration(Enumeration {
            name: "Kleur".to_string(),
            supertypes: Vec::new(),
            values: vec!["rood".to_string()],
        });
        let code_list = Datatype::CodeList(CodeList {
            name: "Merken".to_string(),
            supertypes: Vec::new(),
            location: None,
        });

        assert!(!structured.is_scalar_like());
        assert!(!reference_list.is_scalar_like());
        assert!(enumeration.is_scalar_like());
        assert!(code_list.is_scalar_like());
        assert!(primitive("Integer", None).is_scalar_like());
    }

    #[test]
    fn test_has_pattern_ignores_blank() {
        let Datatype::Primitive(blank) = primitive("Code", Some("   ")) else {
            unreachable!()
        };
        let Datatype::Primitive(patterned) = primitive("Postcode", Some(r"\d{4}[A-Z]{2}")) else {
            unreachable!()
        };

        assert!(!blank.has_pattern());
        assert!(patterned.has_pattern());
    }

    #[test]
    fn test_deserialize_tagged() {
        let yaml = r#"
kind: primitive
name: Postcode
supertypes: [CharacterString]
pattern: "\\d{4}[A-Z]{2}"
"#;
        let datatype: Datatype = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(datatype.name(), "Postcode");
        assert_eq!(datatype.supertypes(), ["CharacterString".to_string()]);
        assert!(matches!(datatype, Datatype::Primitive(ref p) if p.has_pattern()));

        let yaml = r#"
kind: structured
name: Bedrag
dataElements:
  - name: waarde
    occurrence: "1"
    datatype: Decimal
"#;
        let datatype: Datatype = serde_yaml::from_str(yaml).unwrap();
        let Datatype::Structured(structured) = datatype else {
            panic!("expected structured datatype");
        };
        assert_eq!(structured.data_elements.len(), 1);
        assert_eq!(structured.data_elements[0].occurrence, Some(Occurrence::required()));
    }
}
