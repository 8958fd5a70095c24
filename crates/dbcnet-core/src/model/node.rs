//! Network nodes (ECUs).

use super::attribute::Attribute;
use alloc::string::String;
use alloc::vec::Vec;

/// A node on the bus.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub(crate) name: String,
    pub(crate) comment: String,
    pub(crate) attributes: Vec<Attribute>,
}

impl Node {
    /// Get the node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the comment (empty if none).
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Get the attributes attached to this node, in source order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Get an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}
