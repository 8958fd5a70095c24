//! Common AST types used across fact kinds.

use alloc::string::String;
use alloc::vec::Vec;

/// One `value "description"` pair as written in `VAL_` and `VAL_TABLE_`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueDescriptionItem {
    /// Raw integer value.
    pub value: i64,
    /// Description text (quotes stripped, escapes resolved).
    pub description: String,
}

impl ValueDescriptionItem {
    /// Create a new value description item.
    #[must_use]
    pub fn new(value: i64, description: impl Into<String>) -> Self {
        Self {
            value,
            description: description.into(),
        }
    }
}

/// A literal attribute value (`BA_`, `BA_DEF_DEF_`).
///
/// The literal is not checked against its attribute definition.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrLiteral {
    /// Integer literal.
    Int(i64),
    /// Literal with a fraction or exponent, or an integer out of `i64` range.
    Float(f64),
    /// Quoted string literal.
    String(String),
}

/// Baud rate and bit timing registers from `BS_`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitTimingDef {
    /// Baud rate.
    pub baudrate: u64,
    /// First bit timing register.
    pub btr1: u64,
    /// Second bit timing register.
    pub btr2: u64,
}

/// A node (ECU) from `BU_`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeDef {
    /// Node name.
    pub name: String,
}

impl NodeDef {
    /// Create a new node definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A `VAL_TABLE_` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueTableDef {
    /// Table name.
    pub name: String,
    /// Value descriptions in source order.
    pub items: Vec<ValueDescriptionItem>,
}

/// A `SGTYPE_` signal type template.
///
/// `SGTYPE_ name : size@order sign (factor,offset) [min|max] "unit" default , value_table ;`
#[derive(Clone, Debug, PartialEq)]
pub struct SignalTypeDef {
    /// Template name.
    pub name: String,
    /// Bit size.
    pub size: u64,
    /// Byte order character (`'0'` big endian, `'1'` little endian).
    pub byte_order: char,
    /// Value type character (`'+'` unsigned, `'-'` signed).
    pub value_type: char,
    /// Scale factor.
    pub factor: f64,
    /// Offset.
    pub offset: f64,
    /// Minimum physical value.
    pub minimum: f64,
    /// Maximum physical value.
    pub maximum: f64,
    /// Unit text.
    pub unit: String,
    /// Default physical value.
    pub default_value: f64,
    /// Name of the value table this template refers to.
    pub value_table_name: String,
}
