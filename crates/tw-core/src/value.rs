use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar stored in the game variable map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// A boolean value.
    Boolean(bool),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A text value.
    String(String),
}

impl Scalar {
    /// Numeric view of the value. Numeric strings count as numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::String(s) => s.trim().parse().ok(),
            Self::Boolean(_) => None,
        }
    }

    /// Whether the value counts as "set": `false`, `0`, and the empty string do not.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) => !s.is_empty() && s != "false",
        }
    }

    /// Parse a value written as text in a document (`"true"`, `"3"`, `"2.5"`, anything else).
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s {
            "true" => Self::Boolean(true),
            "false" => Self::Boolean(false),
            _ => {
                if let Ok(i) = s.parse::<i64>() {
                    Self::Integer(i)
                } else if let Ok(f) = s.parse::<f64>() {
                    Self::Float(f)
                } else {
                    Self::String(s.to_string())
                }
            }
        }
    }

    /// Loose equality: numbers compare numerically, everything else by text.
    pub fn loosely_equals(&self, other: &Scalar) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self.to_string().eq_ignore_ascii_case(&other.to_string()),
        }
    }

    /// Numeric ordering, if both sides are numeric.
    pub fn numeric_cmp(&self, other: &Scalar) -> Option<Ordering> {
        self.as_number()?.partial_cmp(&other.as_number()?)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_untagged() {
        let values: Vec<Scalar> = serde_json::from_str(r#"[true, 3, 2.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Scalar::Boolean(true),
                Scalar::Integer(3),
                Scalar::Float(2.5),
                Scalar::String("x".to_string()),
            ]
        );
    }

    #[test]
    fn parse_from_text() {
        assert_eq!(Scalar::parse("true"), Scalar::Boolean(true));
        assert_eq!(Scalar::parse(" 42 "), Scalar::Integer(42));
        assert_eq!(Scalar::parse("0.5"), Scalar::Float(0.5));
        assert_eq!(Scalar::parse("offen"), Scalar::String("offen".to_string()));
    }

    #[test]
    fn loose_equality() {
        assert!(Scalar::Integer(3).loosely_equals(&Scalar::String("3".to_string())));
        assert!(Scalar::Float(3.0).loosely_equals(&Scalar::Integer(3)));
        assert!(Scalar::from("Offen").loosely_equals(&Scalar::from("offen")));
        assert!(!Scalar::Boolean(true).loosely_equals(&Scalar::Integer(1)));
    }

    #[test]
    fn truthiness() {
        assert!(Scalar::Integer(1).is_truthy());
        assert!(!Scalar::Integer(0).is_truthy());
        assert!(!Scalar::from("").is_truthy());
        assert!(!Scalar::Boolean(false).is_truthy());
    }

    #[test]
    fn numeric_ordering() {
        assert_eq!(
            Scalar::Integer(2).numeric_cmp(&Scalar::Float(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(Scalar::from("abc").numeric_cmp(&Scalar::Integer(1)), None);
    }
}
