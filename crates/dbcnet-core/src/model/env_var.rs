//! Environment variables.

use super::attribute::Attribute;
use super::types::{AccessType, VarType};
use super::value_table::ValueEncodingDescription;
use alloc::string::String;
use alloc::vec::Vec;

/// An environment variable (`EV_`).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentVariable {
    pub(crate) name: String,
    pub(crate) var_type: VarType,
    pub(crate) minimum: f64,
    pub(crate) maximum: f64,
    pub(crate) unit: String,
    pub(crate) initial_value: f64,
    pub(crate) id: u64,
    pub(crate) access_type: AccessType,
    pub(crate) access_nodes: Vec<String>,
    pub(crate) value_encoding_descriptions: Vec<ValueEncodingDescription>,
    pub(crate) data_size: u64,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) comment: String,
}

impl EnvironmentVariable {
    /// Get the variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the variable kind.
    ///
    /// [`VarType::Data`] wins over the declared kind whenever an
    /// `ENVVAR_DATA_` entry with the same name exists.
    #[must_use]
    pub fn var_type(&self) -> VarType {
        self.var_type
    }

    /// Get the minimum value.
    #[must_use]
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Get the maximum value.
    #[must_use]
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Get the unit text.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Get the initial value.
    #[must_use]
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Get the numeric identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Get the access type.
    #[must_use]
    pub fn access_type(&self) -> AccessType {
        self.access_type
    }

    /// Get the names of nodes with access.
    #[must_use]
    pub fn access_nodes(&self) -> &[String] {
        &self.access_nodes
    }

    /// Get the value descriptions.
    #[must_use]
    pub fn value_encoding_descriptions(&self) -> &[ValueEncodingDescription] {
        &self.value_encoding_descriptions
    }

    /// Get the data size in bytes (zero unless the kind is data).
    #[must_use]
    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Get the attributes attached to this variable, in source order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Get the comment (empty if none).
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }
}
