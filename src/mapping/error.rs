//! Error types for model mapping

use thiserror::Error;

/// Errors that abort a mapping pass
///
/// Every variant names the offending source element so the source model can
/// be corrected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    /// Member declares neither a datatype nor a choice
    #[error("No datatype or choice found for member '{member}' of '{owner}'")]
    MalformedMember { owner: String, member: String },

    /// Choice alternatives resolve to more than one base type
    #[error("Unsupported choice for member '{member}': alternatives [{}] resolve to different base types", .alternatives.join(", "))]
    UnsupportedChoice {
        member: String,
        alternatives: Vec<String>,
    },

    /// Canonical base name has no scalar mapping
    #[error("No scalar type mapping for datatype '{datatype}' (base type '{base}')")]
    UnresolvableType { datatype: String, base: String },

    /// Two emitted object types share a name
    #[error("Duplicate object type '{name}'")]
    DuplicateObjectType { name: String },

    /// Two properties of one object type share a name
    #[error("Duplicate property '{property}' in object type '{object_type}'")]
    DuplicateProperty {
        object_type: String,
        property: String,
    },

    /// Supertype hierarchy contains a cycle
    #[error("Supertype hierarchy of '{type_name}' contains a cycle")]
    SupertypeCycle { type_name: String },

    /// No value type factory registered under this name
    #[error("No value type factory registered for '{0}'")]
    UnknownValueType(String),

    /// Factory rejected its configuration options
    #[error("Invalid options for value type '{type_name}': {reason}")]
    InvalidTypeOptions { type_name: String, reason: String },
}

/// Result type for mapping operations
pub type MappingResult<T> = Result<T, MappingError>;
