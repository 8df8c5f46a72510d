//! Value type resolution
//!
//! Decides whether a member is scalar or structural and, for scalar members,
//! which value type name it maps to. Resolution order for a single datatype:
//!
//! 1. enumerations and code lists are strings
//! 2. primitives with a formal pattern are strings
//! 3. anything deriving from `CharacterString` is a string
//! 4. names with the geometry prefix are geometries
//! 5. otherwise the canonical base name is looked up in the scalar table

use super::config::{MapperConfig, UnmappedTypePolicy};
use super::error::{MappingError, MappingResult};
use crate::models::ScalarKind;
use crate::source::{Datatype, Member, SourceIndex};
use std::collections::BTreeSet;
use tracing::debug;

/// Outcome of resolving a member's type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// Scalar attribute with this value type name
    Scalar(String),
    /// Relation to the object type with this name
    Relation(String),
}

/// Resolves member types against a source index
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'i, 'a> {
    index: &'i SourceIndex<'a>,
    config: &'i MapperConfig,
}

impl<'i, 'a> TypeResolver<'i, 'a> {
    pub fn new(index: &'i SourceIndex<'a>, config: &'i MapperConfig) -> Self {
        Self { index, config }
    }

    /// Whether the named datatype maps to a scalar attribute
    ///
    /// Undeclared datatype names are implicit primitives and therefore scalar.
    pub fn is_scalar_like(&self, datatype_name: &str) -> bool {
        self.index
            .datatype(datatype_name)
            .is_none_or(Datatype::is_scalar_like)
    }

    /// Resolve the type of an attribute definition or data element
    pub fn resolve_member<M: Member>(&self, owner: &str, member: &M) -> MappingResult<ResolvedType> {
        if let Some(datatype) = member.datatype() {
            if !self.is_scalar_like(datatype) {
                return Ok(ResolvedType::Relation(datatype.to_string()));
            }
        }

        match (member.choice(), member.datatype()) {
            (Some(alternatives), _) if !alternatives.is_empty() => self
                .resolve_choice(member.name(), alternatives)
                .map(ResolvedType::Scalar),
            (_, Some(datatype)) => self.value_type_name(datatype).map(ResolvedType::Scalar),
            _ => Err(MappingError::MalformedMember {
                owner: owner.to_string(),
                member: member.name().to_string(),
            }),
        }
    }

    /// Resolve a choice between several datatypes
    ///
    /// All-geometry choices are geometries; otherwise every alternative must
    /// share one canonical base name.
    pub fn resolve_choice(&self, member: &str, alternatives: &[String]) -> MappingResult<String> {
        if alternatives
            .iter()
            .all(|alternative| self.config.is_geometry_name(alternative))
        {
            return Ok(ScalarKind::Geometry.name().to_string());
        }

        let hierarchy = self.index.datatype_hierarchy();
        let bases: BTreeSet<&str> = alternatives
            .iter()
            .map(|alternative| hierarchy.root(alternative))
            .collect();

        match alternatives.first() {
            Some(representative) if bases.len() <= 1 => self.value_type_name(representative),
            _ => Err(MappingError::UnsupportedChoice {
                member: member.to_string(),
                alternatives: alternatives.to_vec(),
            }),
        }
    }

    /// Resolve the value type name of a scalar-like datatype
    pub fn value_type_name(&self, datatype_name: &str) -> MappingResult<String> {
        let string = || Ok(ScalarKind::String.name().to_string());

        if let Some(datatype) = self.index.datatype(datatype_name) {
            match datatype {
                Datatype::Enumeration(_) | Datatype::CodeList(_) => return string(),
                Datatype::Primitive(primitive) if primitive.has_pattern() => return string(),
                Datatype::Primitive(_) | Datatype::Structured(_) | Datatype::ReferenceList(_) => {}
            }
        }

        let hierarchy = self.index.datatype_hierarchy();
        if hierarchy
            .supertypes(datatype_name, true)
            .contains(&self.config.string_supertype.as_str())
        {
            return string();
        }

        if self.config.is_geometry_name(datatype_name) {
            return Ok(ScalarKind::Geometry.name().to_string());
        }

        let base = hierarchy.root(datatype_name);
        if let Some(kind) = self.config.scalar_kind(base) {
            return Ok(kind.name().to_string());
        }

        match self.config.unmapped_types {
            UnmappedTypePolicy::Fail => Err(MappingError::UnresolvableType {
                datatype: datatype_name.to_string(),
                base: base.to_string(),
            }),
            UnmappedTypePolicy::PassThrough => {
                debug!(
                    "No scalar mapping for base '{}' of datatype '{}', passing it through",
                    base, datatype_name
                );
                Ok(base.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{
        AttributeDefinition, CodeList, DataElement, Enumeration, Package, PrimitiveDatatype,
        SourceModel, StructuredDatatype,
    };

    fn primitive(name: &str, supertypes: &[&str], pattern: Option<&str>) -> Datatype {
        Datatype::Primitive(PrimitiveDatatype {
            name: name.to_string(),
            supertypes: supertypes.iter().map(|s| s.to_string()).collect(),
            pattern: pattern.map(str::to_string),
        })
    }

    fn model() -> SourceModel {
        let package = Package::new("Datatypes")
            .with_datatype(primitive("Postcode", &["CharacterString"], None))
            .with_datatype(primitive("Huisnummer", &["Integer"], Some(r"\d{1,5}")))
            .with_datatype(primitive("Bedragwaarde", &["Getal"], None))
            .with_datatype(primitive("Getal", &["Decimal"], None))
            .with_datatype(primitive("Oppervlakte", &["Real"], None))
            .with_datatype(primitive("Maand", &["Month"], None))
            .with_datatype(primitive("GM_Punt", &["Integer"], None))
            .with_datatype(Datatype::Enumeration(Enumeration {
                name: "Kleur".to_string(),
                supertypes: Vec::new(),
                values: vec!["rood".to_string(), "blauw".to_string()],
            }))
            .with_datatype(Datatype::CodeList(CodeList {
                name: "Merk".to_string(),
                supertypes: Vec::new(),
                location: Some("https://example.org/merken".to_string()),
            }))
            .with_datatype(Datatype::Structured(StructuredDatatype {
                name: "Bedrag".to_string(),
                supertypes: Vec::new(),
                data_elements: vec![DataElement {
                    name: "waarde".to_string(),
                    identifier: false,
                    occurrence: None,
                    datatype: Some("Bedragwaarde".to_string()),
                }],
            }));
        SourceModel::new("Test").with_package(package)
    }

    fn resolve(config: &MapperConfig, datatype: &str) -> MappingResult<String> {
        let model = model();
        let index = SourceIndex::new(&model).unwrap();
        TypeResolver::new(&index, config).value_type_name(datatype)
    }

    #[test]
    fn test_character_string_maps_to_string() {
        let config = MapperConfig::default();
        assert_eq!(resolve(&config, "CharacterString").unwrap(), "String");
        assert_eq!(resolve(&config, "Postcode").unwrap(), "String");
    }

    #[test]
    fn test_enumerations_and_code_lists_are_strings() {
        let config = MapperConfig::default();
        assert_eq!(resolve(&config, "Kleur").unwrap(), "String");
        assert_eq!(resolve(&config, "Merk").unwrap(), "String");
    }

    #[test]
    fn test_pattern_overrides_base_type() {
        assert_eq!(resolve(&MapperConfig::default(), "Huisnummer").unwrap(), "String");
    }

    #[test]
    fn test_geometry_prefix() {
        let config = MapperConfig::default();
        assert_eq!(resolve(&config, "GM_Surface").unwrap(), "Geometry");
        // the prefix wins over the supertype chain
        assert_eq!(resolve(&config, "GM_Punt").unwrap(), "Geometry");
    }

    #[test]
    fn test_base_name_table() {
        let config = MapperConfig::default();
        assert_eq!(resolve(&config, "Bedragwaarde").unwrap(), "Double");
        assert_eq!(resolve(&config, "Oppervlakte").unwrap(), "Float");
        assert_eq!(resolve(&config, "Integer").unwrap(), "Integer");
        assert_eq!(resolve(&config, "Boolean").unwrap(), "Boolean");
        assert_eq!(resolve(&config, "DateTime").unwrap(), "String");
    }

    #[test]
    fn test_unmapped_base_policy() {
        let err = resolve(&MapperConfig::default(), "Maand").unwrap_err();
        assert_eq!(
            err,
            MappingError::UnresolvableType {
                datatype: "Maand".to_string(),
                base: "Month".to_string(),
            }
        );

        let config = MapperConfig::new().with_unmapped_types(UnmappedTypePolicy::PassThrough);
        assert_eq!(resolve(&config, "Maand").unwrap(), "Month");
    }

    #[test]
    fn test_structured_member_is_relation() {
        let model = model();
        let index = SourceIndex::new(&model).unwrap();
        let config = MapperConfig::default();
        let resolver = TypeResolver::new(&index, &config);

        assert!(!resolver.is_scalar_like("Bedrag"));
        assert!(resolver.is_scalar_like("Kleur"));
        assert!(resolver.is_scalar_like("Undeclared"));

        let member = AttributeDefinition::new("prijs").with_datatype("Bedrag");
        assert_eq!(
            resolver.resolve_member("Fiets", &member).unwrap(),
            ResolvedType::Relation("Bedrag".to_string())
        );
    }

    #[test]
    fn test_choice_resolution() {
        let model = model();
        let index = SourceIndex::new(&model).unwrap();
        let config = MapperConfig::default();
        let resolver = TypeResolver::new(&index, &config);

        let geometry = AttributeDefinition::new("geometrie").with_choice(["GM_Point", "GM_Surface"]);
        assert_eq!(
            resolver.resolve_member("Pand", &geometry).unwrap(),
            ResolvedType::Scalar("Geometry".to_string())
        );

        let same_base = AttributeDefinition::new("code").with_choice(["Postcode", "CharacterString"]);
        assert_eq!(
            resolver.resolve_member("Adres", &same_base).unwrap(),
            ResolvedType::Scalar("String".to_string())
        );

        let mixed = AttributeDefinition::new("waarde").with_choice(["Postcode", "Integer"]);
        assert!(matches!(
            resolver.resolve_member("Adres", &mixed),
            Err(MappingError::UnsupportedChoice { ref member, .. }) if member == "waarde"
        ));
    }

    #[test]
    fn test_malformed_member() {
        let model = model();
        let index = SourceIndex::new(&model).unwrap();
        let config = MapperConfig::default();
        let resolver = TypeResolver::new(&index, &config);

        let member = AttributeDefinition::new("leeg");
        assert_eq!(
            resolver.resolve_member("Fiets", &member).unwrap_err(),
            MappingError::MalformedMember {
                owner: "Fiets".to_string(),
                member: "leeg".to_string(),
            }
        );

        let empty_choice = AttributeDefinition::new("keuze").with_choice(Vec::<String>::new());
        assert!(matches!(
            resolver.resolve_member("Fiets", &empty_choice),
            Err(MappingError::MalformedMember { .. })
        ));
    }
}
