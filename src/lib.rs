//! MIM model mapper - maps MIM information models onto a flattened object model
//!
//! Provides:
//! - An in-memory source model for MIM packages, object types, datagroup
//!   types and datatypes
//! - Type and cardinality resolution for attributes, data elements and relations
//! - The target model of object types with attributes and relations
//! - A loader for JSON/YAML serialized source models

pub mod mapping;
pub mod model;
pub mod models;
pub mod source;

#[cfg(feature = "cli")]
pub mod cli;

pub use mapping::{MapperConfig, MappingError, MappingResult, ModelMapper, map_model};
pub use model::{LoadError, MimModelLoader, ModelLoader, SourceFormat};
pub use models::{
    Attribute, Cardinality, Model, ObjectType, Property, Relation, ValueType, ValueTypeRegistry,
};
pub use source::SourceModel;
