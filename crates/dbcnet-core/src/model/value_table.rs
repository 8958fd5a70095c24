//! Value tables and signal type templates.

use super::types::{ByteOrder, ValueType};
use alloc::string::String;
use alloc::vec::Vec;

/// One `(raw value, description)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueEncodingDescription {
    /// Raw value.
    pub value: i64,
    /// Description text.
    pub description: String,
}

impl ValueEncodingDescription {
    /// Create a new value description.
    #[must_use]
    pub fn new(value: i64, description: impl Into<String>) -> Self {
        Self {
            value,
            description: description.into(),
        }
    }
}

/// Reusable signal encoding template (`SGTYPE_`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalType {
    pub(crate) name: String,
    pub(crate) bit_size: u64,
    pub(crate) byte_order: ByteOrder,
    pub(crate) value_type: ValueType,
    pub(crate) factor: f64,
    pub(crate) offset: f64,
    pub(crate) minimum: f64,
    pub(crate) maximum: f64,
    pub(crate) unit: String,
    pub(crate) default_value: f64,
    pub(crate) value_table_name: String,
}

impl SignalType {
    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the bit size.
    #[must_use]
    pub fn bit_size(&self) -> u64 {
        self.bit_size
    }

    /// Get the byte order.
    #[must_use]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Get the signedness.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Get the scale factor.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Get the offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Get the minimum physical value.
    #[must_use]
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Get the maximum physical value.
    #[must_use]
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Get the unit text.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Get the default physical value.
    #[must_use]
    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    /// Get the name of the owning value table.
    #[must_use]
    pub fn value_table_name(&self) -> &str {
        &self.value_table_name
    }
}

/// A named value table (`VAL_TABLE_`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueTable {
    pub(crate) name: String,
    pub(crate) signal_type: Option<SignalType>,
    pub(crate) value_encoding_descriptions: Vec<ValueEncodingDescription>,
}

impl ValueTable {
    /// Get the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the signal type template that refers to this table, if any.
    #[must_use]
    pub fn signal_type(&self) -> Option<&SignalType> {
        self.signal_type.as_ref()
    }

    /// Get the value descriptions in source order.
    #[must_use]
    pub fn value_encoding_descriptions(&self) -> &[ValueEncodingDescription] {
        &self.value_encoding_descriptions
    }
}
