//! Target model
//!
//! The flattened schema produced by the mapper: object types whose
//! properties are scalar attributes or relations to other object types.

pub mod cardinality;
pub mod data_model;
pub mod object_type;
pub mod property;
pub mod value_type;

pub use cardinality::Cardinality;
pub use data_model::{Model, ModelBuilder};
pub use object_type::{ObjectType, ObjectTypeBuilder};
pub use property::{Attribute, Property, Relation};
pub use value_type::{
    GeometryTypeFactory, SRID_OPTION, ScalarKind, ScalarTypeFactory, TypeOptions, ValueType,
    ValueTypeFactory, ValueTypeRegistry,
};
