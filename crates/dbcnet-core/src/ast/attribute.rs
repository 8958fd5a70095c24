//! Attribute definition facts.

use super::AttrLiteral;
use alloc::string::String;
use alloc::vec::Vec;

/// A `BA_DEF_` attribute definition.
///
/// `BA_DEF_ [BU_|BO_|SG_|EV_] "name" value_type ;`
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeDefinitionDef {
    /// Object type tag as written (`BU_`, `BO_`, `SG_`, `EV_`), absent for network attributes.
    pub object_type: Option<String>,
    /// Attribute name.
    pub name: String,
    /// Value type.
    pub value_type: AttributeValueTypeDef,
}

/// The value type clause of a `BA_DEF_`.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValueTypeDef {
    /// `INT min max`
    Int {
        /// Lower bound.
        minimum: i64,
        /// Upper bound.
        maximum: i64,
    },
    /// `HEX min max`
    Hex {
        /// Lower bound.
        minimum: i64,
        /// Upper bound.
        maximum: i64,
    },
    /// `FLOAT min max`
    Float {
        /// Lower bound.
        minimum: f64,
        /// Upper bound.
        maximum: f64,
    },
    /// `STRING`
    String,
    /// `ENUM "a","b",...`
    Enum {
        /// Allowed labels in source order.
        values: Vec<String>,
    },
}

/// A `BA_DEF_DEF_` attribute default.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeDefaultDef {
    /// Attribute name.
    pub name: String,
    /// Default value.
    pub value: AttrLiteral,
}
