//! Entity builders.
//!
//! One pure builder per entity kind. Every builder reads its own base fact
//! plus what the [`CrossReferenceIndex`](super::CrossReferenceIndex) holds for
//! the entity's key, and returns a finished entity:
//!
//! 1. **Nodes**: comment and attributes by node name
//! 2. **Value tables**: signal type template by table name
//! 3. **Messages**: transmitters, attributes, comment, groups and signals
//! 4. **Environment variables**: descriptions, attributes, comment, data override
//! 5. **Attributes**: definitions, defaults, network values and comment
//!
//! Soft diagnostics are computed by [`validation`] and stored on the entity;
//! the builders never report them themselves.

pub mod attributes;
pub mod env_vars;
pub mod messages;
pub mod nodes;
pub mod validation;
pub mod value_tables;

pub use attributes::{
    build_attribute_defaults, build_attribute_definition, build_attribute_definitions,
    build_network_attribute_values, network_comment,
};
pub use env_vars::{build_env_var, build_env_vars};
pub use messages::{build_message, build_messages, build_signal};
pub use nodes::{build_node, build_nodes};
pub use validation::{check_message, check_signal};
pub use value_tables::{build_value_table, build_value_tables};
