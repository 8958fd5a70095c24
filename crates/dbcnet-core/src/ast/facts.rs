//! Tagged side facts.
//!
//! One source list mixes several target kinds (a `CM_` list holds network,
//! node, message, signal and environment variable comments). Each list is a
//! closed enum so the resolver can split it by variant while indexing.

use super::{AttrLiteral, ValueDescriptionItem};
use alloc::string::String;
use alloc::vec::Vec;

/// A `CM_` comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommentDef {
    /// `CM_ "text";`
    Network {
        /// Comment text.
        comment: String,
    },
    /// `CM_ BU_ node "text";`
    Node {
        /// Target node.
        node_name: String,
        /// Comment text.
        comment: String,
    },
    /// `CM_ BO_ id "text";`
    Message {
        /// Target message.
        message_id: u64,
        /// Comment text.
        comment: String,
    },
    /// `CM_ SG_ id signal "text";`
    Signal {
        /// Owning message.
        message_id: u64,
        /// Target signal.
        signal_name: String,
        /// Comment text.
        comment: String,
    },
    /// `CM_ EV_ name "text";`
    EnvVar {
        /// Target environment variable.
        env_var_name: String,
        /// Comment text.
        comment: String,
    },
}

impl CommentDef {
    /// Get the comment text regardless of target.
    #[must_use]
    pub fn comment(&self) -> &str {
        match self {
            Self::Network { comment }
            | Self::Node { comment, .. }
            | Self::Message { comment, .. }
            | Self::Signal { comment, .. }
            | Self::EnvVar { comment, .. } => comment,
        }
    }
}

/// A `BA_` attribute value.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValueDef {
    /// `BA_ "name" value;`
    Network {
        /// Attribute name.
        attribute_name: String,
        /// Literal value.
        value: AttrLiteral,
    },
    /// `BA_ "name" BU_ node value;`
    Node {
        /// Attribute name.
        attribute_name: String,
        /// Target node.
        node_name: String,
        /// Literal value.
        value: AttrLiteral,
    },
    /// `BA_ "name" BO_ id value;`
    Message {
        /// Attribute name.
        attribute_name: String,
        /// Target message.
        message_id: u64,
        /// Literal value.
        value: AttrLiteral,
    },
    /// `BA_ "name" SG_ id signal value;`
    Signal {
        /// Attribute name.
        attribute_name: String,
        /// Owning message.
        message_id: u64,
        /// Target signal.
        signal_name: String,
        /// Literal value.
        value: AttrLiteral,
    },
    /// `BA_ "name" EV_ name value;`
    EnvVar {
        /// Attribute name.
        attribute_name: String,
        /// Target environment variable.
        env_var_name: String,
        /// Literal value.
        value: AttrLiteral,
    },
}

impl AttributeValueDef {
    /// Get the attribute name regardless of target.
    #[must_use]
    pub fn attribute_name(&self) -> &str {
        match self {
            Self::Network { attribute_name, .. }
            | Self::Node { attribute_name, .. }
            | Self::Message { attribute_name, .. }
            | Self::Signal { attribute_name, .. }
            | Self::EnvVar { attribute_name, .. } => attribute_name,
        }
    }

    /// Get the literal value regardless of target.
    #[must_use]
    pub fn value(&self) -> &AttrLiteral {
        match self {
            Self::Network { value, .. }
            | Self::Node { value, .. }
            | Self::Message { value, .. }
            | Self::Signal { value, .. }
            | Self::EnvVar { value, .. } => value,
        }
    }
}

/// A `VAL_` value description list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueDescriptionDef {
    /// `VAL_ id signal 0 "off" 1 "on";`
    Signal {
        /// Owning message.
        message_id: u64,
        /// Target signal.
        signal_name: String,
        /// Descriptions in source order.
        items: Vec<ValueDescriptionItem>,
    },
    /// `VAL_ env_var 0 "off" 1 "on";`
    EnvVar {
        /// Target environment variable.
        env_var_name: String,
        /// Descriptions in source order.
        items: Vec<ValueDescriptionItem>,
    },
}

impl ValueDescriptionDef {
    /// Get the descriptions regardless of target.
    #[must_use]
    pub fn items(&self) -> &[ValueDescriptionItem] {
        match self {
            Self::Signal { items, .. } | Self::EnvVar { items, .. } => items,
        }
    }
}
