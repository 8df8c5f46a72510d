//! Occurrence descriptors (MIM "kardinaliteit")
//!
//! An occurrence is the raw minimum/maximum bound declared on a member. It can
//! be written either as a struct (`{min: 1, multi: false}`) or in the usual
//! MIM notation (`"1"`, `"0..1"`, `"1..*"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw occurrence bounds of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OccurrenceRepr")]
pub struct Occurrence {
    /// Minimum number of occurrences
    pub min: u32,
    /// Whether more than one occurrence is allowed
    pub multi: bool,
}

impl Occurrence {
    pub fn new(min: u32, multi: bool) -> Self {
        Self { min, multi }
    }

    /// Exactly one (`1`)
    pub fn required() -> Self {
        Self::new(1, false)
    }

    /// Zero or one (`0..1`)
    pub fn optional() -> Self {
        Self::new(0, false)
    }

    /// Zero or more (`0..*`)
    pub fn many() -> Self {
        Self::new(0, true)
    }
}

/// Error parsing occurrence notation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid occurrence notation '{notation}': {reason}")]
pub struct OccurrenceParseError {
    pub notation: String,
    pub reason: String,
}

impl FromStr for Occurrence {
    type Err = OccurrenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| OccurrenceParseError {
            notation: s.to_string(),
            reason: reason.to_string(),
        };

        let notation = s.trim();
        if notation.is_empty() {
            return Err(invalid("empty notation"));
        }

        let (lower, upper) = match notation.split_once("..") {
            Some((lower, upper)) => (lower.trim(), upper.trim()),
            // A single bound: "*" means 0..*, "n" means n..n
            None if is_unbounded(notation) => ("0", notation),
            None => (notation, notation),
        };

        let min: u32 = lower
            .parse()
            .map_err(|_| invalid("lower bound is not a number"))?;

        if is_unbounded(upper) {
            return Ok(Self::new(min, true));
        }

        let max: u32 = upper
            .parse()
            .map_err(|_| invalid("upper bound is not a number or '*'"))?;
        if max < min {
            return Err(invalid("upper bound is lower than the lower bound"));
        }
        if max == 0 {
            return Err(invalid("upper bound must be at least 1"));
        }

        Ok(Self::new(min, max > 1))
    }
}

fn is_unbounded(bound: &str) -> bool {
    matches!(bound, "*" | "n" | "N")
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.multi) {
            (min, true) => write!(f, "{}..*", min),
            (1, false) => write!(f, "1"),
            (min, false) => write!(f, "{}..1", min),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OccurrenceRepr {
    Count(u32),
    Notation(String),
    Bounds {
        #[serde(default)]
        min: u32,
        #[serde(default)]
        multi: bool,
    },
}

impl TryFrom<OccurrenceRepr> for Occurrence {
    type Error = OccurrenceParseError;

    fn try_from(repr: OccurrenceRepr) -> Result<Self, Self::Error> {
        match repr {
            OccurrenceRepr::Count(count) => count.to_string().parse(),
            OccurrenceRepr::Notation(notation) => notation.parse(),
            OccurrenceRepr::Bounds { min, multi } => Ok(Self::new(min, multi)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_bound() {
        assert_eq!("1".parse::<Occurrence>().unwrap(), Occurrence::required());
        assert_eq!("*".parse::<Occurrence>().unwrap(), Occurrence::many());
        assert_eq!("3".parse::<Occurrence>().unwrap(), Occurrence::new(3, true));
    }

    #[test]
    fn test_parse_range() {
        assert_eq!("0..1".parse::<Occurrence>().unwrap(), Occurrence::optional());
        assert_eq!("1..*".parse::<Occurrence>().unwrap(), Occurrence::new(1, true));
        assert_eq!("0..3".parse::<Occurrence>().unwrap(), Occurrence::new(0, true));
        assert_eq!(" 1 .. 1 ".parse::<Occurrence>().unwrap(), Occurrence::required());
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<Occurrence>().is_err());
        assert!("a..1".parse::<Occurrence>().is_err());
        assert!("2..1".parse::<Occurrence>().is_err());
        assert!("0..0".parse::<Occurrence>().is_err());

        let err = "x".parse::<Occurrence>().unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn test_deserialize_both_forms() {
        let from_notation: Occurrence = serde_json::from_str(r#""0..*""#).unwrap();
        assert_eq!(from_notation, Occurrence::many());

        let from_struct: Occurrence = serde_json::from_str(r#"{"min": 1, "multi": false}"#).unwrap();
        assert_eq!(from_struct, Occurrence::required());

        let from_count: Occurrence = serde_json::from_str("1").unwrap();
        assert_eq!(from_count, Occurrence::required());

        assert!(serde_json::from_str::<Occurrence>(r#""1..0""#).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Occurrence::required().to_string(), "1");
        assert_eq!(Occurrence::optional().to_string(), "0..1");
        assert_eq!(Occurrence::new(1, true).to_string(), "1..*");
    }
}
