//! Cardinality resolution from raw occurrence bounds

use crate::models::Cardinality;
use crate::source::Occurrence;

/// Resolve the cardinality of a member, falling back to `default` when no
/// occurrence was declared
pub fn cardinality_or_default(occurrence: Option<&Occurrence>, default: Cardinality) -> Cardinality {
    let Some(occurrence) = occurrence else {
        return default;
    };

    if occurrence.multi {
        return Cardinality::Multi;
    }

    if occurrence.min == 0 {
        return Cardinality::Optional;
    }

    Cardinality::Required
}
