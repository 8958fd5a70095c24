//! Environment variable facts.

use alloc::string::String;
use alloc::vec::Vec;

/// An `EV_` environment variable.
///
/// `EV_ name : type [min|max] "unit" initial id access_type access_nodes ;`
#[derive(Clone, Debug, PartialEq)]
pub struct EnvVarDef {
    /// Variable name.
    pub name: String,
    /// Raw type tag (`0` integer, `1` float, `2` string).
    pub var_type: u64,
    /// Minimum value.
    pub minimum: f64,
    /// Maximum value.
    pub maximum: f64,
    /// Unit text.
    pub unit: String,
    /// Initial value.
    pub initial_value: f64,
    /// Numeric identifier.
    pub id: u64,
    /// Access type token (`DUMMY_NODE_VECTOR0` ... `DUMMY_NODE_VECTOR8003`).
    pub access_type: String,
    /// Nodes with access to the variable.
    pub access_nodes: Vec<String>,
}

/// An `ENVVAR_DATA_` declaration, turning a variable into a data variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvVarDataDef {
    /// Variable name.
    pub name: String,
    /// Data size in bytes.
    pub size: u64,
}
