//! Cardinality of target properties

use serde::{Deserialize, Serialize};
use std::fmt;

/// Effective cardinality of an attribute or relation end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Exactly one
    Required,
    /// Zero or one
    Optional,
    /// Zero or more
    Multi,
}

impl Cardinality {
    pub fn is_required(&self) -> bool {
        matches!(self, Cardinality::Required)
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Cardinality::Multi)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Required => write!(f, "1"),
            Cardinality::Optional => write!(f, "0..1"),
            Cardinality::Multi => write!(f, "0..*"),
        }
    }
}
