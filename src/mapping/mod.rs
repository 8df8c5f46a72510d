//! Mapping of MIM information models onto target models
//!
//! This module provides functionality to:
//! - Index a source model by name and build its supertype hierarchies
//! - Resolve member datatypes to scalar value types or relations
//! - Map occurrence bounds to cardinalities
//! - Flatten concrete object types, datagroup types and structured datatypes
//!   into target object types
//!
//! # Example
//!
//! ```rust,ignore
//! use mim_model_mapper::mapping::{MapperConfig, ModelMapper};
//! use mim_model_mapper::models::ValueTypeRegistry;
//! use mim_model_mapper::source::SourceModel;
//!
//! let source = SourceModel::from_yaml(&std::fs::read_to_string("fietsenwinkel.yaml")?)?;
//!
//! let mapper = ModelMapper::with_config(
//!     ValueTypeRegistry::with_defaults(),
//!     MapperConfig::new().with_default_srid(4326),
//! );
//!
//! let model = mapper.map_model(&source, Some("winkel"))?;
//! println!("{} object types", model.len());
//! ```

mod cardinality;
mod config;
mod error;
mod mapper;
mod types;

pub use cardinality::cardinality_or_default;
pub use config::{CHARACTER_STRING, DEFAULT_SRID, GEOMETRY_PREFIX, MapperConfig, UnmappedTypePolicy};
pub use error::{MappingError, MappingResult};
pub use mapper::ModelMapper;
pub use types::{ResolvedType, TypeResolver};

use crate::models::Model;
use crate::source::SourceModel;

/// Map a source model with the default registry and configuration
pub fn map_model(source: &SourceModel) -> MappingResult<Model> {
    ModelMapper::default().map_model(source, None)
}
