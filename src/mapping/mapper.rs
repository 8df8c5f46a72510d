//! Model mapper
//!
//! Walks the packages of a source model and emits one target object type per
//! concrete object type, datagroup type and structured datatype.

use super::cardinality::cardinality_or_default;
use super::config::MapperConfig;
use super::error::{MappingError, MappingResult};
use super::types::{ResolvedType, TypeResolver};
use crate::models::{
    Attribute, Cardinality, Model, ModelBuilder, ObjectType, Property, Relation, SRID_OPTION,
    ScalarKind, TypeOptions, ValueType, ValueTypeRegistry,
};
use crate::source::{
    self, DatagroupReference, DatagroupType, Datatype, Member, RelationDefinition, SourceIndex,
    SourceModel, StructuredDatatype,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Maps source information models onto target models
#[derive(Debug, Clone)]
pub struct ModelMapper {
    registry: ValueTypeRegistry,
    config: MapperConfig,
}

impl Default for ModelMapper {
    fn default() -> Self {
        Self::new(ValueTypeRegistry::with_defaults())
    }
}

impl ModelMapper {
    /// Create a mapper with default configuration
    pub fn new(registry: ValueTypeRegistry) -> Self {
        Self::with_config(registry, MapperConfig::default())
    }

    pub fn with_config(registry: ValueTypeRegistry, config: MapperConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn registry(&self) -> &ValueTypeRegistry {
        &self.registry
    }

    /// Map a source model
    ///
    /// The whole pass fails on the first error; no partial model is returned.
    pub fn map_model(&self, source: &SourceModel, alias: Option<&str>) -> MappingResult<Model> {
        let index = SourceIndex::new(source)?;
        let pass = MappingPass {
            index: &index,
            resolver: TypeResolver::new(&index, &self.config),
            mapper: self,
        };

        let mut builder = ModelBuilder::new();
        if let Some(alias) = alias {
            builder = builder.alias(alias);
        }

        for package in &source.packages {
            debug!("Mapping package '{}'", package.name);

            for object_type in &package.object_types {
                if object_type.is_abstract {
                    debug!("Skipping abstract object type '{}'", object_type.name);
                    continue;
                }
                builder.push(pass.object_type(object_type)?);
            }

            for datagroup_type in &package.datagroup_types {
                builder.push(pass.datagroup_type(datagroup_type)?);
            }

            for datatype in &package.datatypes {
                if let Datatype::Structured(structured) = datatype {
                    builder.push(pass.structured_datatype(structured)?);
                }
            }
        }

        let model = builder.build()?;
        info!(
            "Mapped model '{}' to {} object types",
            source.name,
            model.len()
        );
        Ok(model)
    }

    /// Create the value type registered under `name`
    fn value_type(&self, name: &str) -> MappingResult<ValueType> {
        let mut options = TypeOptions::new();
        if name == ScalarKind::Geometry.name() {
            options.insert(SRID_OPTION.to_string(), self.config.default_srid.into());
        }
        self.registry.create(name, &options)
    }
}

/// State of a single mapping pass
struct MappingPass<'p, 'a> {
    index: &'p SourceIndex<'a>,
    resolver: TypeResolver<'p, 'a>,
    mapper: &'p ModelMapper,
}

impl<'p, 'a> MappingPass<'p, 'a> {
    fn object_type(&self, object_type: &'a source::ObjectType) -> MappingResult<ObjectType> {
        debug!("Mapping object type '{}'", object_type.name);

        let mut properties = Vec::new();
        // property name -> name of the type that declared the kept member
        let mut declared_by: HashMap<String, &str> = HashMap::new();
        let hierarchy = self.index.object_type_hierarchy();

        let lineage = self
            .index
            .lineage(object_type, self.mapper.config.include_inherited);
        for declaring in lineage {
            let declared = self.members(
                &declaring.name,
                &declaring.attributes,
                &declaring.relations,
                &declaring.datagroups,
            )?;

            for property in declared {
                match declared_by.get(property.name()) {
                    None => {
                        declared_by.insert(property.name().to_string(), &declaring.name);
                        properties.push(property);
                    }
                    // the kept member is declared on a subtype of this ancestor
                    Some(&kept) if hierarchy.is_subtype_of(kept, &declaring.name) => {
                        debug!(
                            "Property '{}' inherited from '{}' is shadowed by '{}' in '{}'",
                            property.name(),
                            declaring.name,
                            kept,
                            object_type.name
                        );
                    }
                    // neither declaration is nearer: siblings or unrelated branches
                    Some(_) => {
                        return Err(MappingError::DuplicateProperty {
                            object_type: object_type.name.clone(),
                            property: property.name().to_string(),
                        });
                    }
                }
            }
        }

        object_type
            .supertypes
            .iter()
            .fold(ObjectType::builder(&object_type.name), |builder, supertype| {
                builder.supertype(supertype)
            })
            .properties(properties)
            .build()
    }

    fn datagroup_type(&self, datagroup_type: &DatagroupType) -> MappingResult<ObjectType> {
        debug!("Mapping datagroup type '{}'", datagroup_type.name);

        let properties = self.members(
            &datagroup_type.name,
            &datagroup_type.attributes,
            &datagroup_type.relations,
            &datagroup_type.datagroups,
        )?;

        ObjectType::builder(&datagroup_type.name)
            .properties(properties)
            .build()
    }

    fn structured_datatype(&self, structured: &StructuredDatatype) -> MappingResult<ObjectType> {
        debug!("Mapping structured datatype '{}'", structured.name);

        let properties = structured
            .data_elements
            .iter()
            .map(|element| self.member(&structured.name, element))
            .collect::<MappingResult<Vec<_>>>()?;

        ObjectType::builder(&structured.name)
            .properties(properties)
            .build()
    }

    /// Map the members declared directly on one element
    ///
    /// Names must be unique among the members of a single element.
    fn members<M: Member>(
        &self,
        owner: &str,
        attributes: &[M],
        relations: &[RelationDefinition],
        datagroups: &[DatagroupReference],
    ) -> MappingResult<Vec<Property>> {
        let mut properties = Vec::new();

        for attribute in attributes {
            properties.push(self.member(owner, attribute)?);
        }
        properties.extend(
            relations
                .iter()
                .filter_map(|relation| self.relation(owner, relation))
                .map(Property::from),
        );
        properties.extend(
            datagroups
                .iter()
                .map(|datagroup| Property::from(self.datagroup(datagroup))),
        );

        let mut names = HashSet::new();
        for property in &properties {
            if !names.insert(property.name()) {
                return Err(MappingError::DuplicateProperty {
                    object_type: owner.to_string(),
                    property: property.name().to_string(),
                });
            }
        }

        Ok(properties)
    }

    /// Map an attribute definition or data element
    fn member<M: Member>(&self, owner: &str, member: &M) -> MappingResult<Property> {
        let cardinality = cardinality_or_default(member.occurrence(), Cardinality::Optional);

        let property = match self.resolver.resolve_member(owner, member)? {
            ResolvedType::Scalar(type_name) => Attribute::new(
                member.name(),
                self.mapper.value_type(&type_name)?,
                cardinality,
            )
            .with_identifier(member.is_identifier())
            .into(),
            ResolvedType::Relation(target) => Relation::new(member.name(), target, cardinality)
                .with_identifier(member.is_identifier())
                .into(),
        };

        Ok(property)
    }

    /// Map a relation definition; `None` when its target does not resolve
    fn relation(&self, owner: &str, relation: &RelationDefinition) -> Option<Relation> {
        let Some(target) = relation.target.as_deref() else {
            debug!("Dropping relation '{}' of '{}' without target", relation.name, owner);
            return None;
        };
        if self.index.object_type(target).is_none() {
            warn!(
                "Dropping relation '{}' of '{}': target '{}' is not an object type",
                relation.name, owner, target
            );
            return None;
        }

        let mapped = Relation::new(
            &relation.name,
            target,
            cardinality_or_default(relation.occurrence.as_ref(), Cardinality::Optional),
        )
        .with_identifier(relation.identifier)
        .with_inverse(
            relation.inverse_name.clone(),
            cardinality_or_default(relation.inverse_occurrence.as_ref(), Cardinality::Multi),
        );

        Some(mapped)
    }

    fn datagroup(&self, datagroup: &DatagroupReference) -> Relation {
        Relation::new(
            &datagroup.name,
            &datagroup.datagroup_type,
            cardinality_or_default(datagroup.occurrence.as_ref(), Cardinality::Optional),
        )
    }
}
