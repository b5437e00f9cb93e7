//! Attribute value types for entities
//!
//! Attributes are scalar tags used for filtering and colouring only.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar attribute value
///
/// Supports:
/// - String
/// - Integer (i64)
/// - Float (f64)
/// - Boolean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "String",
            AttributeValue::Integer(_) => "Integer",
            AttributeValue::Float(_) => "Float",
            AttributeValue::Boolean(_) => "Boolean",
        }
    }

    /// Exact match that tolerates dropdown values arriving as text.
    ///
    /// `"3"` matches `Integer(3)`, `"2.5"` matches `Float(2.5)` and `"true"`
    /// matches `Boolean(true)`. Strings are compared verbatim.
    pub fn matches(&self, other: &AttributeValue) -> bool {
        use AttributeValue::*;

        match (self, other) {
            (String(a), String(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Integer(i), Float(f)) | (Float(f), Integer(i)) => *i as f64 == *f,
            (String(s), Integer(i)) | (Integer(i), String(s)) => {
                s.trim().parse::<i64>().map_or(false, |parsed| parsed == *i)
            }
            (String(s), Float(f)) | (Float(f), String(s)) => {
                s.trim().parse::<f64>().map_or(false, |parsed| parsed == *f)
            }
            (String(s), Boolean(b)) | (Boolean(b), String(s)) => {
                s.trim().parse::<bool>().map_or(false, |parsed| parsed == *b)
            }
            _ => false,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{}", s),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(fl) => write!(f, "{}", fl),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

// Convenience conversions
impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<i32> for AttributeValue {
    fn from(i: i32) -> Self {
        AttributeValue::Integer(i as i64)
    }
}

impl From<f64> for AttributeValue {
    fn from(f: f64) -> Self {
        AttributeValue::Float(f)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

/// Insertion-ordered attribute map; order is kept for the details panel
pub type AttributeMap = IndexMap<String, AttributeValue>;

/// Well-known attribute names
pub mod keys {
    pub const RISK_FACTOR: &str = "risk_factor";
    pub const RECOVERY_TIME: &str = "recovery_time";
    pub const BUSINESS_NAME: &str = "business_name";
    pub const STATUS: &str = "status";
}
