//! Attribute definitions and attribute values.

use super::types::ObjectType;
use alloc::string::String;
use alloc::vec::Vec;

/// A raw attribute value.
///
/// The value is kept as written; it is not checked against the
/// [`AttributeDefinition`] of the same name.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    String(String),
}

impl AttributeValue {
    /// Get the value as a float, if it is numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::String(_) => None,
        }
    }

    /// Get the value as text, if it is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// An attribute attached to an object.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub(crate) name: String,
    pub(crate) object_type: ObjectType,
    pub(crate) value: AttributeValue,
}

impl Attribute {
    /// Create a new attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, object_type: ObjectType, value: AttributeValue) -> Self {
        Self {
            name: name.into(),
            object_type,
            value,
        }
    }

    /// Get the attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the kind of object the attribute is attached to.
    #[must_use]
    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    /// Get the raw value.
    #[must_use]
    pub fn value(&self) -> &AttributeValue {
        &self.value
    }
}

/// Value type of an attribute definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValueType {
    /// Integer in `[minimum, maximum]`.
    Int {
        /// Lower bound.
        minimum: i64,
        /// Upper bound.
        maximum: i64,
    },
    /// Hex integer in `[minimum, maximum]`.
    Hex {
        /// Lower bound.
        minimum: i64,
        /// Upper bound.
        maximum: i64,
    },
    /// Float in `[minimum, maximum]`.
    Float {
        /// Lower bound.
        minimum: f64,
        /// Upper bound.
        maximum: f64,
    },
    /// Free text.
    String,
    /// One of a fixed list of labels.
    Enum {
        /// Allowed labels in declaration order.
        values: Vec<String>,
    },
}

/// A `BA_DEF_` attribute definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeDefinition {
    pub(crate) name: String,
    pub(crate) object_type: ObjectType,
    pub(crate) value_type: AttributeValueType,
}

impl AttributeDefinition {
    /// Get the attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the kind of object the attribute applies to.
    #[must_use]
    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    /// Get the value type.
    #[must_use]
    pub fn value_type(&self) -> &AttributeValueType {
        &self.value_type
    }
}
